//! Event progress derived from the bracket.

use crate::models::{Event, EventStatus, MatchStatus};

/// Status of the event as a whole.
///
/// Preparing until anything has been played, finished once every team match is
/// over and the last round left a single winner, in progress otherwise.
pub fn event_status(event: &Event) -> EventStatus {
    let Some(current) = event.current_round() else {
        return EventStatus::Preparing;
    };

    if event.team_matches.iter().all(|m| m.is_finished()) {
        let winners = event.round(current).filter(|m| m.winner.is_some()).count();
        return if winners <= 1 {
            EventStatus::Finished
        } else {
            EventStatus::InProgress
        };
    }

    let any_team_match_started = event
        .team_matches
        .iter()
        .any(|m| m.status != MatchStatus::NotStarted);
    let any_rubber_started = event
        .rubbers
        .iter()
        .any(|r| r.status != MatchStatus::NotStarted || r.winner.is_some());
    if any_team_match_started || any_rubber_started {
        EventStatus::InProgress
    } else {
        EventStatus::Preparing
    }
}
