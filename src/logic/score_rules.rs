//! Scoring rules: set completion, set and rubber winners, score legality.
//!
//! A set is played to 21. From 20-20 the winner needs a 2-point lead, capped at 30
//! (the set ends 30-29 at the latest).

use crate::models::{EventError, RubberScores, ScoreError, SetScore, Side};

/// Points needed to win a set outright.
pub const GAME_POINT: u32 = 21;
/// Highest possible score; the first side to reach it wins the set.
pub const MAX_SCORE: u32 = 30;
/// Sets needed to win a rubber.
pub const SETS_TO_WIN: usize = 2;

/// Result of checking a single set score.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetOutcome {
    /// Legal, still being played (or not started, for 0-0).
    InProgress,
    /// Legal and finished, won by the given side.
    Complete(Side),
}

/// Whether the set is over: someone reached 21 with a 2-point lead, or reached 30.
pub fn is_set_complete(score: SetScore) -> bool {
    let high = score.a.max(score.b);
    high >= GAME_POINT && (score.a.abs_diff(score.b) >= 2 || high == MAX_SCORE)
}

/// Winner of a finished set; None while the set is not complete.
pub fn set_winner(score: SetScore) -> Option<Side> {
    if !is_set_complete(score) {
        return None;
    }
    match score.a.cmp(&score.b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    }
}

/// Check that a set score can occur, and whether it is finished.
///
/// Only scores below 21 are a set still in play; from 21 on a legal score is final.
pub fn validate_set(score: SetScore) -> Result<SetOutcome, ScoreError> {
    let SetScore { a, b } = score;
    let (high, low) = (a.max(b), a.min(b));
    if high > MAX_SCORE {
        return Err(ScoreError::OutOfRange { a, b });
    }
    if high == low && high >= MAX_SCORE - 1 {
        return Err(ScoreError::IllegalTie { score: high });
    }
    match high {
        0..=20 => return Ok(SetOutcome::InProgress),
        GAME_POINT if low > GAME_POINT - 2 => return Err(ScoreError::InflatedWin { a, b }),
        22..=29 if high - low != 2 => return Err(ScoreError::WrongMargin { a, b }),
        MAX_SCORE if low != MAX_SCORE - 1 => {
            return Err(ScoreError::InvalidThirtyPointFinish { a, b })
        }
        _ => {}
    }
    Ok(SetOutcome::Complete(if a > b { Side::A } else { Side::B }))
}

/// Winner of a best-of-three rubber, once one side has taken 2 completed sets.
pub fn rubber_winner(sets: &[SetScore]) -> Option<Side> {
    let (mut wins_a, mut wins_b) = (0, 0);
    for set in sets {
        match set_winner(*set) {
            Some(Side::A) => wins_a += 1,
            Some(Side::B) => wins_b += 1,
            None => {}
        }
    }
    if wins_a >= SETS_TO_WIN {
        Some(Side::A)
    } else if wins_b >= SETS_TO_WIN {
        Some(Side::B)
    } else {
        None
    }
}

/// Validate the three sets of a rubber as a whole before they are stored.
///
/// Every non-empty set must be legal, and no set has points once a side has 2 sets.
/// Returns the rubber winner, if decided.
pub fn validate_rubber_scores(sets: &RubberScores) -> Result<Option<Side>, EventError> {
    let (mut wins_a, mut wins_b) = (0, 0);
    for (idx, set) in sets.iter().enumerate() {
        if set.is_empty() {
            continue;
        }
        let invalid = |error: ScoreError| EventError::InvalidScore { set: idx + 1, error };
        if wins_a >= SETS_TO_WIN || wins_b >= SETS_TO_WIN {
            return Err(invalid(ScoreError::AfterRubberDecided));
        }
        match validate_set(*set).map_err(invalid)? {
            SetOutcome::Complete(Side::A) => wins_a += 1,
            SetOutcome::Complete(Side::B) => wins_b += 1,
            SetOutcome::InProgress => {}
        }
    }
    Ok(rubber_winner(sets))
}
