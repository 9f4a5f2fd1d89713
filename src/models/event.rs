//! Event (the aggregate owning teams, bracket, rubbers and standings) and EventError.

use crate::models::match_type::MatchType;
use crate::models::rubber::{Rubber, RubberId, ScoreError, Side};
use crate::models::standing::{ScoreCorrection, Standing};
use crate::models::team::{Gender, Player, PlayerId, Team, TeamId};
use crate::models::team_match::{TeamMatch, TeamMatchId};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a caller should treat a failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input; re-prompt with the reason.
    Validation,
    /// The event is not in a state that allows the action yet.
    Precondition,
    /// An id that does not exist in the event.
    NotFound,
}

/// Errors that can occur during event operations. A failed call leaves the event untouched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventError {
    /// Illegal score in set `set` (1-based).
    InvalidScore { set: usize, error: ScoreError },
    /// Corrections need a reason.
    EmptyCorrectionReason,
    /// Team and player names cannot be blank.
    EmptyName,
    /// A team with this name already exists (case-insensitive).
    DuplicateTeamName,
    /// Wrong number of players on one side of a lineup.
    WrongNumberOfPlayers { side: Side, needed: usize, selected: usize },
    /// A lineup player is not on the roster of the side's team.
    PlayerNotInTeam { player: PlayerId, team: TeamId },
    /// A lineup side does not fit the discipline's gender requirement.
    GenderMismatch { side: Side, match_type: MatchType },
    /// A player is already fielded in another rubber of the same team match.
    PlayerAlreadyFielded { player: PlayerId, rubber: RubberId },
    /// Need at least 2 teams to generate a bracket.
    NotEnoughTeams { found: usize },
    /// The event already has a bracket; clear it first.
    BracketExists,
    /// No bracket has been generated yet.
    NoBracket,
    /// The current round still has unfinished team matches.
    RoundNotFinished { round: u32, unfinished: usize },
    /// Fewer than 2 winners remain; the tournament is decided.
    TournamentDecided,
    /// Byes have no opponent, so no rubbers.
    ByeHasNoRubbers(TeamMatchId),
    /// Rubbers were already created for this team match.
    RubbersAlreadyCreated(TeamMatchId),
    /// The team is part of the bracket and cannot be removed.
    TeamInBracket(TeamId),
    /// The player is fielded in a rubber and cannot be removed.
    PlayerFielded(PlayerId),
    TeamNotFound(TeamId),
    PlayerNotFound(PlayerId),
    TeamMatchNotFound(TeamMatchId),
    RubberNotFound(RubberId),
}

impl EventError {
    pub fn kind(&self) -> ErrorKind {
        use EventError::*;
        match self {
            InvalidScore { .. }
            | EmptyCorrectionReason
            | EmptyName
            | DuplicateTeamName
            | WrongNumberOfPlayers { .. }
            | PlayerNotInTeam { .. }
            | GenderMismatch { .. }
            | PlayerAlreadyFielded { .. } => ErrorKind::Validation,
            NotEnoughTeams { .. }
            | BracketExists
            | NoBracket
            | RoundNotFinished { .. }
            | TournamentDecided
            | ByeHasNoRubbers(_)
            | RubbersAlreadyCreated(_)
            | TeamInBracket(_)
            | PlayerFielded(_) => ErrorKind::Precondition,
            TeamNotFound(_) | PlayerNotFound(_) | TeamMatchNotFound(_) | RubberNotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::InvalidScore { set, error } => write!(f, "Set {set}: {error}"),
            EventError::EmptyCorrectionReason => write!(f, "A correction needs a reason"),
            EventError::EmptyName => write!(f, "Name cannot be empty"),
            EventError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            EventError::WrongNumberOfPlayers { side, needed, selected } => write!(
                f,
                "Side {side:?} must field exactly {needed} player(s) (selected {selected})"
            ),
            EventError::PlayerNotInTeam { player, team } => {
                write!(f, "Player {player} is not on the roster of team {team}")
            }
            EventError::GenderMismatch { side, match_type } => {
                write!(f, "Side {side:?} does not fit the players required for {match_type}")
            }
            EventError::PlayerAlreadyFielded { player, rubber } => {
                write!(f, "Player {player} already plays rubber {rubber} of this team match")
            }
            EventError::NotEnoughTeams { found } => {
                write!(f, "Need at least 2 teams to generate a bracket (found {found})")
            }
            EventError::BracketExists => {
                write!(f, "This event already has a bracket, clear it first")
            }
            EventError::NoBracket => write!(f, "Generate the bracket first"),
            EventError::RoundNotFinished { round, unfinished } => write!(
                f,
                "Round {round} still has {unfinished} unfinished team match(es)"
            ),
            EventError::TournamentDecided => {
                write!(f, "All matches are finished, no next round to generate")
            }
            EventError::ByeHasNoRubbers(id) => {
                write!(f, "Team match {id} is a bye and has no opponent")
            }
            EventError::RubbersAlreadyCreated(id) => {
                write!(f, "Rubbers for team match {id} already exist")
            }
            EventError::TeamInBracket(id) => {
                write!(f, "Team {id} is part of the bracket and cannot be removed")
            }
            EventError::PlayerFielded(id) => {
                write!(f, "Player {id} is fielded in a rubber and cannot be removed")
            }
            EventError::TeamNotFound(id) => write!(f, "Team {id} not found"),
            EventError::PlayerNotFound(id) => write!(f, "Player {id} not found"),
            EventError::TeamMatchNotFound(id) => write!(f, "Team match {id} not found"),
            EventError::RubberNotFound(id) => write!(f, "Rubber {id} not found"),
        }
    }
}

impl std::error::Error for EventError {}

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Overall progress of an event, derived from its bracket.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Preparing,
    InProgress,
    Finished,
}

/// Full event state: roster, bracket, rubbers, corrections and standings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    /// Teams in registration order; this order seeds the first round.
    pub teams: Vec<Team>,
    pub team_matches: Vec<TeamMatch>,
    pub rubbers: Vec<Rubber>,
    /// Append-only audit trail.
    corrections: Vec<ScoreCorrection>,
    /// Last calculated standings, ordered by ranking.
    pub standings: Vec<Standing>,
    /// Next id handed out for any row of this event.
    next_id: u64,
}

impl Event {
    /// Create an empty event dated this year.
    pub fn new(name: impl Into<String>) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            year: created_at.year(),
            created_at,
            teams: Vec::new(),
            team_matches: Vec::new(),
            rubbers: Vec::new(),
            corrections: Vec::new(),
            standings: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an event with the given teams registered in order.
    pub fn with_teams<I, S>(name: impl Into<String>, team_names: I) -> Result<Self, EventError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut event = Self::new(name);
        for team_name in team_names {
            event.add_team(team_name)?;
        }
        Ok(event)
    }

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a team. Names are trimmed and must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, EventError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(EventError::EmptyName);
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(EventError::DuplicateTeamName);
        }
        let id = self.allocate_id();
        self.teams.push(Team::new(id, name));
        Ok(id)
    }

    /// Remove a team and its roster (only while no team match references it).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), EventError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(EventError::TeamNotFound(team_id))?;
        if self.team_matches.iter().any(|m| m.involves(team_id)) {
            return Err(EventError::TeamInBracket(team_id));
        }
        self.teams.remove(idx);
        self.standings.retain(|s| s.team_id != team_id);
        Ok(())
    }

    /// Add a player to a team's roster.
    pub fn add_player(
        &mut self,
        team_id: TeamId,
        name: impl Into<String>,
        gender: Gender,
    ) -> Result<PlayerId, EventError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(EventError::EmptyName);
        }
        if !self.teams.iter().any(|t| t.id == team_id) {
            return Err(EventError::TeamNotFound(team_id));
        }
        let id = self.allocate_id();
        let team = self.team_mut(team_id)?;
        team.players.push(Player {
            id,
            name: name.to_string(),
            gender,
        });
        Ok(id)
    }

    /// Remove a player (only while not fielded in any rubber).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), EventError> {
        if self.rubbers.iter().any(|r| r.lineup.contains(player_id)) {
            return Err(EventError::PlayerFielded(player_id));
        }
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.player(player_id).is_some())
            .ok_or(EventError::PlayerNotFound(player_id))?;
        team.players.retain(|p| p.id != player_id);
        Ok(())
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, EventError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(EventError::TeamNotFound(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, EventError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(EventError::TeamNotFound(id))
    }

    pub fn team_match(&self, id: TeamMatchId) -> Result<&TeamMatch, EventError> {
        self.team_matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(EventError::TeamMatchNotFound(id))
    }

    pub fn team_match_mut(&mut self, id: TeamMatchId) -> Result<&mut TeamMatch, EventError> {
        self.team_matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EventError::TeamMatchNotFound(id))
    }

    pub fn rubber(&self, id: RubberId) -> Result<&Rubber, EventError> {
        self.rubbers
            .iter()
            .find(|r| r.id == id)
            .ok_or(EventError::RubberNotFound(id))
    }

    pub fn rubber_mut(&mut self, id: RubberId) -> Result<&mut Rubber, EventError> {
        self.rubbers
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EventError::RubberNotFound(id))
    }

    /// Rubbers of one team match in serve order.
    pub fn rubbers_of(&self, team_match_id: TeamMatchId) -> impl Iterator<Item = &Rubber> + '_ {
        self.rubbers
            .iter()
            .filter(move |r| r.team_match_id == team_match_id)
    }

    /// Highest round number in the bracket.
    pub fn current_round(&self) -> Option<u32> {
        self.team_matches.iter().map(|m| m.round).max()
    }

    /// Team matches of one round, in creation order.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &TeamMatch> + '_ {
        self.team_matches.iter().filter(move |m| m.round == round)
    }

    /// Full correction history of the event, oldest first.
    pub fn corrections(&self) -> &[ScoreCorrection] {
        &self.corrections
    }

    /// Correction history of one rubber, oldest first.
    pub fn corrections_for(&self, rubber_id: RubberId) -> Vec<&ScoreCorrection> {
        self.corrections
            .iter()
            .filter(|c| c.rubber_id == rubber_id)
            .collect()
    }

    pub(crate) fn record_correction(&mut self, correction: ScoreCorrection) {
        self.corrections.push(correction);
    }
}
