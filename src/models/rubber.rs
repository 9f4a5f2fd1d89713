//! Rubber (a single discipline match), set scores and score errors.

use crate::models::match_type::MatchType;
use crate::models::team::{PlayerId, TeamId};
use crate::models::team_match::{MatchStatus, TeamMatchId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a rubber inside its event.
pub type RubberId = u64;

/// Sets played in a rubber at most (best of three).
pub const SETS_PER_RUBBER: usize = 3;

/// The three set scores of a rubber, unplayed sets are 0-0.
pub type RubberScores = [SetScore; SETS_PER_RUBBER];

/// Side of a pairing: A is the first-listed team.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Score of one set. 0-0 means the set was not played.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

impl SetScore {
    pub const fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub fn is_empty(&self) -> bool {
        self.a == 0 && self.b == 0
    }

    /// `(own, opponent)` points seen from one side.
    pub fn for_side(&self, side: Side) -> (u32, u32) {
        match side {
            Side::A => (self.a, self.b),
            Side::B => (self.b, self.a),
        }
    }
}

/// Why a set score (or a rubber's sequence of sets) was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreError {
    /// A score above 30.
    OutOfRange { a: u32, b: u32 },
    /// Level scores at 29 or above cannot occur.
    IllegalTie { score: u32 },
    /// A 21-point win with the loser on 20 or 21.
    InflatedWin { a: u32, b: u32 },
    /// Between 22 and 29 the winner leads by exactly 2.
    WrongMargin { a: u32, b: u32 },
    /// A 30-point finish requires the loser on exactly 29.
    InvalidThirtyPointFinish { a: u32, b: u32 },
    /// A set has points although the rubber was already decided.
    AfterRubberDecided,
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::OutOfRange { a, b } => {
                write!(f, "score {a}-{b} is out of range (0 to 30)")
            }
            ScoreError::IllegalTie { score } => {
                write!(f, "illegal tie at {score}-{score}")
            }
            ScoreError::InflatedWin { a, b } => {
                write!(f, "score {a}-{b} is impossible: a 21-point win leaves the loser on 19 at most")
            }
            ScoreError::WrongMargin { a, b } => {
                write!(f, "score {a}-{b} is impossible: beyond 21 a set is won by exactly 2 points")
            }
            ScoreError::InvalidThirtyPointFinish { a, b } => {
                write!(f, "score {a}-{b} is impossible: a 30-point finish must be 30-29")
            }
            ScoreError::AfterRubberDecided => {
                write!(f, "set has points but the rubber was already decided")
            }
        }
    }
}

/// Players fielded on each side of a rubber, plus the umpire.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    #[serde(default)]
    pub team_a: Vec<PlayerId>,
    #[serde(default)]
    pub team_b: Vec<PlayerId>,
    #[serde(default)]
    pub referee: Option<String>,
}

impl Lineup {
    pub fn contains(&self, player: PlayerId) -> bool {
        self.team_a.contains(&player) || self.team_b.contains(&player)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_a.iter().chain(self.team_b.iter()).copied()
    }
}

/// One discipline match inside a team match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rubber {
    pub id: RubberId,
    pub team_match_id: TeamMatchId,
    pub match_type: MatchType,
    pub sets: RubberScores,
    /// None until decided.
    pub winner: Option<TeamId>,
    pub status: MatchStatus,
    pub lineup: Lineup,
    /// Last time scores were written.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Rubber {
    pub fn new(id: RubberId, team_match_id: TeamMatchId, match_type: MatchType) -> Self {
        Self {
            id,
            team_match_id,
            match_type,
            sets: RubberScores::default(),
            winner: None,
            status: MatchStatus::NotStarted,
            lineup: Lineup::default(),
            updated_at: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}
