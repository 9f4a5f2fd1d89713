//! Standings: full recompute from decided rubbers, then ranking.

use crate::models::{Event, Standing};
use log::info;
use std::cmp::Ordering;

/// Rank order: total points, then set difference, then point difference, all descending.
fn compare(a: &Standing, b: &Standing) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| b.game_difference().cmp(&a.game_difference()))
        .then_with(|| b.point_difference().cmp(&a.point_difference()))
}

/// Rebuild every standing row of the event from its finished rubbers and rank them.
///
/// Never incremental: the previous rows are discarded. Teams equal on all three
/// keys keep their registration order. Returns the rows in ranking order.
pub fn calculate_standings(event: &mut Event) -> &[Standing] {
    let mut standings: Vec<Standing> = event.teams.iter().map(Standing::for_team).collect();

    for standing in &mut standings {
        let team_id = standing.team_id;
        let played = event
            .team_matches
            .iter()
            .filter_map(|m| m.side_of(team_id).map(|side| (m, side)));
        for (team_match, side) in played {
            for rubber in event
                .rubbers_of(team_match.id)
                .filter(|r| r.is_finished())
            {
                if rubber.winner == Some(team_id) {
                    standing.matches_won += 1;
                    standing.total_points += 1;
                } else {
                    standing.matches_lost += 1;
                }
                for set in rubber.sets.iter().filter(|s| !s.is_empty()) {
                    let (own, opponent) = set.for_side(side);
                    standing.points_won += own;
                    standing.points_lost += opponent;
                    if own > opponent {
                        standing.games_won += 1;
                    } else {
                        standing.games_lost += 1;
                    }
                }
            }
        }
    }

    standings.sort_by(compare);
    for (idx, standing) in standings.iter_mut().enumerate() {
        standing.ranking = (idx + 1) as u32;
    }
    info!(
        "Calculated standings for event {} ({} team(s))",
        event.id,
        standings.len()
    );
    event.standings = standings;
    &event.standings
}

/// Last calculated standings, in ranking order.
pub fn standings(event: &Event) -> &[Standing] {
    &event.standings
}
