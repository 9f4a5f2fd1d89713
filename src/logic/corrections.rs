//! Score corrections: audited rewrites of a rubber's set scores.

use crate::logic::rubber_ledger::apply_scores;
use crate::logic::score_rules::validate_rubber_scores;
use crate::models::{CorrectionId, Event, EventError, RubberId, RubberScores, ScoreCorrection};
use chrono::Utc;
use log::info;

/// Replace a rubber's scores, recording the old and new scores with a reason.
///
/// The new scores go through the same validation and propagation as normal entry.
/// Standings are not recalculated; call `calculate_standings` afterwards.
pub fn correct_score(
    event: &mut Event,
    rubber_id: RubberId,
    sets: RubberScores,
    reason: &str,
) -> Result<CorrectionId, EventError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(EventError::EmptyCorrectionReason);
    }
    let rubber = event.rubber(rubber_id)?;
    let original = rubber.sets;
    event.team_match(rubber.team_match_id)?;
    validate_rubber_scores(&sets)?;

    let id = event.allocate_id();
    event.record_correction(ScoreCorrection {
        id,
        rubber_id,
        original,
        corrected: sets,
        reason: reason.to_string(),
        recorded_at: Utc::now(),
    });
    info!("Recorded correction {id} for rubber {rubber_id}: {reason}");
    apply_scores(event, rubber_id, sets)?;
    Ok(id)
}
