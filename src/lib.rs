//! Badminton team tournament: library with models and the match/bracket engine.

pub mod logic;
pub mod models;

pub use logic::{
    assign_lineup, calculate_standings, clear_bracket, correct_score, create_rubbers,
    event_status, generate_first_round, generate_next_round, is_set_complete,
    next_round_number, recompute_team_match_state, round_label, rubber_winner, set_winner,
    standings, submit_score, update_after_score_change, validate_rubber_scores, validate_set,
    SetOutcome,
};
pub use models::{
    CorrectionId, ErrorKind, Event, EventError, EventId, EventStatus, Gender, GenderRequirement,
    Lineup, MatchStatus, MatchType, Player, PlayerId, Rubber, RubberId, RubberScores,
    ScoreCorrection, ScoreError, SetScore, Side, Standing, Team, TeamId, TeamMatch, TeamMatchId,
    SETS_PER_RUBBER,
};
