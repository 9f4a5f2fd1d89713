//! Single-elimination bracket: first round pairing, round progression, clearing.

use crate::models::{Event, EventError, TeamId, TeamMatch, TeamMatchId};
use log::{info, warn};

/// Round number used for the semifinal.
pub const SEMIFINAL_ROUND: u32 = 3;
/// Round number used for the final.
pub const FINAL_ROUND: u32 = 4;

/// Display name of a round.
pub fn round_label(round: u32) -> String {
    match round {
        SEMIFINAL_ROUND => "Semifinal".to_string(),
        FINAL_ROUND => "Final".to_string(),
        n => format!("Round {n}"),
    }
}

/// Round number for the next round, given the current one and how many winners it produced.
///
/// Two winners play the final (round 4) and four winners the semifinal (round 3),
/// whatever the current round; any other count goes to the following round.
pub fn next_round_number(current_round: u32, winners: usize) -> u32 {
    match winners {
        2 => FINAL_ROUND,
        4 => SEMIFINAL_ROUND,
        _ => current_round + 1,
    }
}

/// Pair entrants in order: (0, 1), (2, 3), ...; an odd last entrant gets a bye.
fn pair_round(event: &mut Event, round: u32, entrants: &[TeamId]) -> Vec<TeamMatchId> {
    entrants
        .chunks(2)
        .map(|pair| {
            let id = event.allocate_id();
            event
                .team_matches
                .push(TeamMatch::new(id, round, pair[0], pair.get(1).copied()));
            id
        })
        .collect()
}

/// Generate round 1 from the event's teams in registration order.
///
/// Requires at least 2 teams and no existing bracket. Paired team matches start
/// without rubbers; a bye is finished at creation with its team as winner.
pub fn generate_first_round(event: &mut Event) -> Result<Vec<TeamMatchId>, EventError> {
    if event.teams.len() < 2 {
        return Err(EventError::NotEnoughTeams {
            found: event.teams.len(),
        });
    }
    if !event.team_matches.is_empty() {
        return Err(EventError::BracketExists);
    }
    let teams: Vec<TeamId> = event.teams.iter().map(|t| t.id).collect();
    let ids = pair_round(event, 1, &teams);
    info!(
        "Generated round 1 for event {}: {} team(s), {} team match(es)",
        event.id,
        teams.len(),
        ids.len()
    );
    Ok(ids)
}

/// Generate the next round from the winners of the current (highest) round, in order.
///
/// Fails while the current round has unfinished team matches, or when fewer than
/// 2 winners remain.
///
/// When the fixed numbering lands on a round that already exists (4 winners out of
/// round 3 or later), the new team matches are appended to that round. From then on
/// the round holds both old and new matches, so its winners include the teams that
/// advanced out of the old ones.
pub fn generate_next_round(event: &mut Event) -> Result<Vec<TeamMatchId>, EventError> {
    let current = event.current_round().ok_or(EventError::NoBracket)?;
    let unfinished = event.round(current).filter(|m| !m.is_finished()).count();
    if unfinished > 0 {
        return Err(EventError::RoundNotFinished {
            round: current,
            unfinished,
        });
    }
    let winners: Vec<TeamId> = event.round(current).filter_map(|m| m.winner).collect();
    if winners.len() < 2 {
        return Err(EventError::TournamentDecided);
    }

    let next = next_round_number(current, winners.len());
    if next <= current {
        warn!(
            "Event {}: {} winners of round {} advance to round {} ({})",
            event.id,
            winners.len(),
            current,
            next,
            round_label(next)
        );
    }
    let ids = pair_round(event, next, &winners);
    info!(
        "Generated {} for event {}: {} team(s), {} team match(es)",
        round_label(next),
        event.id,
        winners.len(),
        ids.len()
    );
    Ok(ids)
}

/// Remove every team match and rubber of the event. Correction records are kept.
pub fn clear_bracket(event: &mut Event) {
    let removed = event.team_matches.len();
    event.team_matches.clear();
    event.rubbers.clear();
    info!("Cleared bracket of event {} ({} team match(es))", event.id, removed);
}
