//! Integration tests for the scoring rules: set legality, set and rubber winners.

use badminton_tournament_web::{
    is_set_complete, rubber_winner, set_winner, validate_rubber_scores, validate_set, ErrorKind,
    EventError, ScoreError, SetOutcome, SetScore, Side,
};

fn set(a: u32, b: u32) -> SetScore {
    SetScore::new(a, b)
}

#[test]
fn regular_sets_finish_at_21_with_two_point_lead() {
    assert!(is_set_complete(set(21, 19)));
    assert_eq!(set_winner(set(21, 19)), Some(Side::A));
    assert_eq!(set_winner(set(8, 21)), Some(Side::B));
    assert_eq!(validate_set(set(21, 0)), Ok(SetOutcome::Complete(Side::A)));

    assert_eq!(validate_set(set(20, 20)), Ok(SetOutcome::InProgress));
    assert_eq!(validate_set(set(20, 18)), Ok(SetOutcome::InProgress));
}

#[test]
fn twenty_one_with_loser_above_19_is_rejected() {
    assert!(!is_set_complete(set(21, 20)));
    assert_eq!(set_winner(set(21, 20)), None);
    assert_eq!(
        validate_set(set(21, 20)),
        Err(ScoreError::InflatedWin { a: 21, b: 20 })
    );
    assert_eq!(
        validate_set(set(20, 21)),
        Err(ScoreError::InflatedWin { a: 20, b: 21 })
    );
    assert_eq!(
        validate_set(set(21, 21)),
        Err(ScoreError::InflatedWin { a: 21, b: 21 })
    );
}

#[test]
fn zero_zero_is_not_played() {
    assert!(!is_set_complete(set(0, 0)));
    assert_eq!(set_winner(set(0, 0)), None);
    assert_eq!(validate_set(set(0, 0)), Ok(SetOutcome::InProgress));
}

#[test]
fn tie_at_29_or_above_is_illegal() {
    assert_eq!(
        validate_set(set(29, 29)),
        Err(ScoreError::IllegalTie { score: 29 })
    );
    assert_eq!(
        validate_set(set(30, 30)),
        Err(ScoreError::IllegalTie { score: 30 })
    );
    // ties below 21 are a set still in play
    assert_eq!(validate_set(set(19, 19)), Ok(SetOutcome::InProgress));
    assert_eq!(
        validate_set(set(25, 25)),
        Err(ScoreError::WrongMargin { a: 25, b: 25 })
    );
}

#[test]
fn thirty_point_finish_must_be_30_29() {
    assert_eq!(validate_set(set(30, 29)), Ok(SetOutcome::Complete(Side::A)));
    assert_eq!(validate_set(set(29, 30)), Ok(SetOutcome::Complete(Side::B)));
    assert_eq!(set_winner(set(30, 29)), Some(Side::A));
    assert_eq!(
        validate_set(set(30, 28)),
        Err(ScoreError::InvalidThirtyPointFinish { a: 30, b: 28 })
    );
    assert_eq!(
        validate_set(set(31, 29)),
        Err(ScoreError::OutOfRange { a: 31, b: 29 })
    );
}

#[test]
fn extended_sets_need_exactly_two_points() {
    assert_eq!(validate_set(set(22, 20)), Ok(SetOutcome::Complete(Side::A)));
    assert_eq!(validate_set(set(27, 29)), Ok(SetOutcome::Complete(Side::B)));
    for (a, b) in [(22, 21), (23, 22), (25, 24), (28, 29)] {
        assert_eq!(
            validate_set(set(a, b)),
            Err(ScoreError::WrongMargin { a, b }),
            "{a}-{b}"
        );
    }
    assert_eq!(
        validate_set(set(22, 19)),
        Err(ScoreError::WrongMargin { a: 22, b: 19 })
    );
    assert_eq!(
        validate_set(set(15, 25)),
        Err(ScoreError::WrongMargin { a: 15, b: 25 })
    );
}

#[test]
fn validation_agrees_with_completion_for_every_score() {
    for a in 0..=30 {
        for b in 0..=30 {
            let score = set(a, b);
            match validate_set(score) {
                Ok(SetOutcome::Complete(side)) => {
                    assert!(is_set_complete(score), "{a}-{b} should be complete");
                    assert_eq!(set_winner(score), Some(side), "{a}-{b}");
                }
                Ok(SetOutcome::InProgress) => {
                    assert!(!is_set_complete(score), "{a}-{b} should be in play");
                    assert_eq!(set_winner(score), None, "{a}-{b}");
                }
                Err(_) => {}
            }
        }
    }
}

#[test]
fn rubber_winner_needs_two_sets() {
    assert_eq!(rubber_winner(&[set(21, 15), set(21, 18), set(0, 0)]), Some(Side::A));
    assert_eq!(rubber_winner(&[set(21, 15), set(18, 21), set(0, 0)]), None);
    assert_eq!(rubber_winner(&[set(21, 15), set(18, 21), set(19, 21)]), Some(Side::B));
    assert_eq!(rubber_winner(&[set(21, 15), set(20, 19), set(0, 0)]), None);
}

#[test]
fn third_set_after_straight_sets_is_rejected() {
    let err = validate_rubber_scores(&[set(21, 15), set(21, 18), set(5, 3)]).unwrap_err();
    assert_eq!(
        err,
        EventError::InvalidScore {
            set: 3,
            error: ScoreError::AfterRubberDecided
        }
    );
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        err.to_string(),
        "Set 3: set has points but the rubber was already decided"
    );
}

#[test]
fn sets_are_checked_one_by_one_not_for_order() {
    assert_eq!(
        validate_rubber_scores(&[set(15, 10), set(21, 5), set(21, 8)]),
        Ok(Some(Side::A))
    );
    assert_eq!(
        validate_rubber_scores(&[set(21, 10), set(0, 0), set(5, 21)]),
        Ok(None)
    );
}

#[test]
fn a_score_only_valid_mid_set_cannot_be_stored() {
    assert_eq!(
        validate_rubber_scores(&[set(21, 21), set(0, 0), set(0, 0)]),
        Err(EventError::InvalidScore {
            set: 1,
            error: ScoreError::InflatedWin { a: 21, b: 21 }
        })
    );
    assert_eq!(
        validate_rubber_scores(&[set(21, 15), set(29, 28), set(0, 0)]),
        Err(EventError::InvalidScore {
            set: 2,
            error: ScoreError::WrongMargin { a: 29, b: 28 }
        })
    );
}

#[test]
fn rubber_validation_reports_the_offending_set() {
    assert_eq!(
        validate_rubber_scores(&[set(21, 10), set(29, 29), set(0, 0)]),
        Err(EventError::InvalidScore {
            set: 2,
            error: ScoreError::IllegalTie { score: 29 }
        })
    );
}

#[test]
fn valid_rubbers_report_their_winner() {
    assert_eq!(
        validate_rubber_scores(&[set(21, 15), set(21, 18), set(0, 0)]),
        Ok(Some(Side::A))
    );
    assert_eq!(
        validate_rubber_scores(&[set(21, 15), set(12, 21), set(29, 30)]),
        Ok(Some(Side::B))
    );
    assert_eq!(
        validate_rubber_scores(&[set(21, 15), set(12, 21), set(11, 9)]),
        Ok(None)
    );
    assert_eq!(validate_rubber_scores(&[set(0, 0); 3]), Ok(None));
}
