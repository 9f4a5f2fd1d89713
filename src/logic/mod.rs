//! Tournament engine: scoring rules, rubber ledger, bracket, standings, corrections.

mod bracket;
mod corrections;
mod event_status;
mod rubber_ledger;
mod score_rules;
mod standings;

pub use bracket::{
    clear_bracket, generate_first_round, generate_next_round, next_round_number, round_label,
    FINAL_ROUND, SEMIFINAL_ROUND,
};
pub use corrections::correct_score;
pub use event_status::event_status;
pub use rubber_ledger::{
    assign_lineup, create_rubbers, recompute_team_match_state, submit_score,
    update_after_score_change, RUBBERS_TO_WIN,
};
pub use score_rules::{
    is_set_complete, rubber_winner, set_winner, validate_rubber_scores, validate_set, SetOutcome,
    GAME_POINT, MAX_SCORE, SETS_TO_WIN,
};
pub use standings::{calculate_standings, standings};
