//! Standing and ScoreCorrection: derived rows and the audit trail.

use crate::models::rubber::{RubberId, RubberScores};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team's aggregated record within an event.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    /// One point per rubber won.
    pub total_points: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub points_won: u32,
    pub points_lost: u32,
    /// 1-based position, 0 until ranked.
    pub ranking: u32,
}

impl Standing {
    /// Empty record for a team.
    pub fn for_team(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            ..Self::default()
        }
    }

    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }

    pub fn point_difference(&self) -> i64 {
        i64::from(self.points_won) - i64::from(self.points_lost)
    }
}

/// Identifier of a correction record inside its event.
pub type CorrectionId = u64;

/// Immutable audit record of a score correction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreCorrection {
    pub id: CorrectionId,
    pub rubber_id: RubberId,
    pub original: RubberScores,
    pub corrected: RubberScores,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}
