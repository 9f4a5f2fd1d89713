//! Rubber scoring and team match state: rubber creation, lineups, score entry,
//! and the tally of rubber wins that decides a team match.

use crate::logic::score_rules::{rubber_winner, validate_rubber_scores};
use crate::models::{
    Event, EventError, Lineup, MatchStatus, MatchType, Rubber, RubberId, RubberScores, Side,
    TeamMatchId,
};
use chrono::Utc;
use log::{debug, info, warn};

/// Rubbers a side must win to take the team match (best of five).
pub const RUBBERS_TO_WIN: usize = 3;

/// Create the five rubbers of a paired team match, in serve order.
///
/// Byes never get rubbers, and rubbers are only created once per team match.
pub fn create_rubbers(
    event: &mut Event,
    team_match_id: TeamMatchId,
) -> Result<Vec<RubberId>, EventError> {
    let team_match = event.team_match(team_match_id)?;
    if team_match.is_bye() {
        return Err(EventError::ByeHasNoRubbers(team_match_id));
    }
    if event.rubbers_of(team_match_id).next().is_some() {
        return Err(EventError::RubbersAlreadyCreated(team_match_id));
    }
    let ids: Vec<RubberId> = MatchType::ALL
        .iter()
        .map(|&match_type| {
            let id = event.allocate_id();
            event.rubbers.push(Rubber::new(id, team_match_id, match_type));
            id
        })
        .collect();
    debug!("Created {} rubbers for team match {}", ids.len(), team_match_id);
    Ok(ids)
}

/// Set the players (and umpire) of a rubber.
///
/// Each side fields the discipline's number of players from its own roster, with
/// the discipline's genders, and nobody plays twice within one team match.
pub fn assign_lineup(event: &mut Event, rubber_id: RubberId, lineup: Lineup) -> Result<(), EventError> {
    let rubber = event.rubber(rubber_id)?;
    let match_type = rubber.match_type;
    let team_match = event.team_match(rubber.team_match_id)?;
    let team_b = team_match
        .team_b
        .ok_or(EventError::ByeHasNoRubbers(team_match.id))?;

    for (side, team_id, players) in [
        (Side::A, team_match.team_a, &lineup.team_a),
        (Side::B, team_b, &lineup.team_b),
    ] {
        let needed = match_type.players_per_side();
        let duplicate = players.len() == 2 && players[0] == players[1];
        if players.len() != needed || duplicate {
            return Err(EventError::WrongNumberOfPlayers {
                side,
                needed,
                selected: if duplicate { 1 } else { players.len() },
            });
        }
        let team = event.team(team_id)?;
        let genders = players
            .iter()
            .map(|&player| {
                team.player(player)
                    .map(|p| p.gender)
                    .ok_or(EventError::PlayerNotInTeam { player, team: team_id })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !match_type.gender_requirement().accepts(&genders) {
            return Err(EventError::GenderMismatch { side, match_type });
        }
    }

    for other in event
        .rubbers_of(team_match.id)
        .filter(|r| r.id != rubber_id)
    {
        if let Some(player) = lineup.players().find(|&p| other.lineup.contains(p)) {
            return Err(EventError::PlayerAlreadyFielded {
                player,
                rubber: other.id,
            });
        }
    }

    let referee = lineup
        .referee
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    event.rubber_mut(rubber_id)?.lineup = Lineup { referee, ..lineup };
    Ok(())
}

/// Enter the set scores of a rubber (normal entry path).
///
/// The scores are fully validated first; on success the rubber and its team
/// match are brought up to date before returning.
pub fn submit_score(event: &mut Event, rubber_id: RubberId, sets: RubberScores) -> Result<(), EventError> {
    let rubber = event.rubber(rubber_id)?;
    event.team_match(rubber.team_match_id)?;
    validate_rubber_scores(&sets)?;
    apply_scores(event, rubber_id, sets)
}

/// Write already validated scores and propagate them to the rubber and its team match.
pub(crate) fn apply_scores(event: &mut Event, rubber_id: RubberId, sets: RubberScores) -> Result<(), EventError> {
    let rubber = event.rubber_mut(rubber_id)?;
    rubber.sets = sets;
    rubber.updated_at = Some(Utc::now());
    let team_match_id = rubber.team_match_id;
    update_after_score_change(event, rubber_id)?;
    recompute_team_match_state(event, team_match_id)
}

/// Derive a rubber's winner and status from its stored set scores.
pub fn update_after_score_change(event: &mut Event, rubber_id: RubberId) -> Result<(), EventError> {
    let rubber = event.rubber(rubber_id)?;
    let sets = rubber.sets;
    let team_match = event.team_match(rubber.team_match_id)?;
    let winner = rubber_winner(&sets).and_then(|side| team_match.team_on(side));
    let status = if winner.is_some() {
        MatchStatus::Finished
    } else if sets.iter().any(|s| !s.is_empty()) {
        MatchStatus::InProgress
    } else {
        MatchStatus::NotStarted
    };

    let rubber = event.rubber_mut(rubber_id)?;
    if status == MatchStatus::Finished && rubber.winner != winner {
        info!(
            "{} (rubber {}) decided, winner team {:?}",
            rubber.match_type, rubber_id, winner
        );
    }
    rubber.winner = winner;
    rubber.status = status;
    Ok(())
}

/// Tally rubber wins and derive the team match winner and status.
///
/// Three rubbers decide the match. A bye keeps its automatic result.
pub fn recompute_team_match_state(event: &mut Event, team_match_id: TeamMatchId) -> Result<(), EventError> {
    let team_match = event.team_match(team_match_id)?;
    if team_match.is_bye() {
        return Ok(());
    }
    let (team_a, team_b) = (team_match.team_a, team_match.team_b);
    let (round, previous) = (team_match.round, team_match.winner);

    let (mut wins_a, mut wins_b) = (0, 0);
    let mut started = false;
    for rubber in event.rubbers_of(team_match_id) {
        match rubber.winner {
            Some(w) if w == team_a => wins_a += 1,
            Some(w) if Some(w) == team_b => wins_b += 1,
            _ => {}
        }
        started |= rubber.status != MatchStatus::NotStarted;
    }

    let (winner, status) = if wins_a >= RUBBERS_TO_WIN {
        (Some(team_a), MatchStatus::Finished)
    } else if wins_b >= RUBBERS_TO_WIN {
        (team_b, MatchStatus::Finished)
    } else if started || wins_a > 0 || wins_b > 0 {
        (None, MatchStatus::InProgress)
    } else {
        (None, MatchStatus::NotStarted)
    };

    if previous != winner {
        match winner {
            Some(w) => info!("Team match {team_match_id} decided {wins_a}-{wins_b}, winner team {w}"),
            None => info!("Team match {team_match_id} is no longer decided ({wins_a}-{wins_b})"),
        }
        let later_rounds = event.current_round().is_some_and(|r| r > round);
        if previous.is_some() && later_rounds {
            warn!(
                "Result of team match {team_match_id} changed after round {round} was advanced; later rounds are not rewritten"
            );
        }
    }

    let team_match = event.team_match_mut(team_match_id)?;
    team_match.winner = winner;
    team_match.status = status;
    Ok(())
}
