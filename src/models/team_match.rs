//! TeamMatch: one bracket node pairing two teams, or a team and a bye.

use crate::models::rubber::Side;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Identifier of a team match inside its event.
pub type TeamMatchId = u64;

/// Progress of a team match or a rubber.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamMatch {
    pub id: TeamMatchId,
    /// 1 is the first round; 3 and 4 are the semifinal and final.
    pub round: u32,
    pub team_a: TeamId,
    /// None for a bye.
    pub team_b: Option<TeamId>,
    /// None until decided.
    pub winner: Option<TeamId>,
    pub status: MatchStatus,
}

impl TeamMatch {
    /// A bye is created already finished with `team_a` as the winner.
    pub fn new(id: TeamMatchId, round: u32, team_a: TeamId, team_b: Option<TeamId>) -> Self {
        let (winner, status) = match team_b {
            Some(_) => (None, MatchStatus::NotStarted),
            None => (Some(team_a), MatchStatus::Finished),
        };
        Self {
            id,
            round,
            team_a,
            team_b,
            winner,
            status,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_b.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Team playing on the given side (None for side B of a bye).
    pub fn team_on(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::A => Some(self.team_a),
            Side::B => self.team_b,
        }
    }

    /// Which side the team plays on, if it takes part in this match.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.team_a == team {
            Some(Side::A)
        } else if self.team_b == Some(team) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.side_of(team).is_some()
    }
}
