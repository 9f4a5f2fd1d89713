//! Data structures for the team tournament: teams, bracket nodes, rubbers, standings.

mod event;
mod match_type;
mod rubber;
mod standing;
mod team;
mod team_match;

pub use event::{ErrorKind, Event, EventError, EventId, EventStatus};
pub use match_type::{GenderRequirement, MatchType};
pub use rubber::{
    Lineup, Rubber, RubberId, RubberScores, ScoreError, SetScore, Side, SETS_PER_RUBBER,
};
pub use standing::{CorrectionId, ScoreCorrection, Standing};
pub use team::{Gender, Player, PlayerId, Team, TeamId};
pub use team_match::{MatchStatus, TeamMatch, TeamMatchId};
