//! Integration tests for bracket generation and round progression.

use badminton_tournament_web::{
    clear_bracket, create_rubbers, event_status, generate_first_round, generate_next_round,
    next_round_number, round_label, submit_score, ErrorKind, Event, EventError, EventStatus,
    MatchStatus, RubberScores, SetScore, TeamId, TeamMatchId,
};

fn event_with_teams(n: usize) -> Event {
    Event::with_teams("Spring Cup", (1..=n).map(|i| format!("T{i}"))).unwrap()
}

fn team_ids(event: &Event) -> Vec<TeamId> {
    event.teams.iter().map(|t| t.id).collect()
}

fn straight_sets_for_a() -> RubberScores {
    [SetScore::new(21, 15), SetScore::new(21, 18), SetScore::default()]
}

/// Team A takes the first three rubbers of a paired team match.
fn win_for_team_a(event: &mut Event, team_match_id: TeamMatchId) {
    let rubbers = create_rubbers(event, team_match_id).unwrap();
    for &rubber in &rubbers[..3] {
        submit_score(event, rubber, straight_sets_for_a()).unwrap();
    }
}

fn finish_round_for_team_a(event: &mut Event, round: u32) {
    let paired: Vec<TeamMatchId> = event
        .round(round)
        .filter(|m| !m.is_bye())
        .map(|m| m.id)
        .collect();
    for id in paired {
        win_for_team_a(event, id);
    }
}

fn pairings(event: &Event, round: u32) -> Vec<(TeamId, Option<TeamId>)> {
    event.round(round).map(|m| (m.team_a, m.team_b)).collect()
}

#[test]
fn first_round_pairs_in_order_with_bye_for_odd_team() {
    let mut event = event_with_teams(3);
    let t = team_ids(&event);
    generate_first_round(&mut event).unwrap();

    assert_eq!(pairings(&event, 1), vec![(t[0], Some(t[1])), (t[2], None)]);

    let paired = &event.team_matches[0];
    assert_eq!(paired.status, MatchStatus::NotStarted);
    assert_eq!(paired.winner, None);

    let bye = &event.team_matches[1];
    assert!(bye.is_bye());
    assert_eq!(bye.status, MatchStatus::Finished);
    assert_eq!(bye.winner, Some(t[2]));

    // rubbers are a separate, explicit step
    assert!(event.rubbers.is_empty());
}

#[test]
fn first_round_requires_two_teams() {
    let mut event = event_with_teams(1);
    let err = generate_first_round(&mut event).unwrap_err();
    assert_eq!(err, EventError::NotEnoughTeams { found: 1 });
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(event.team_matches.is_empty());
}

#[test]
fn regenerating_requires_clearing_first() {
    let mut event = event_with_teams(4);
    generate_first_round(&mut event).unwrap();
    let first = event.team_matches.clone();

    assert_eq!(
        generate_first_round(&mut event),
        Err(EventError::BracketExists)
    );
    assert_eq!(event.team_matches, first);

    win_for_team_a(&mut event, first[0].id);
    clear_bracket(&mut event);
    assert!(event.team_matches.is_empty());
    assert!(event.rubbers.is_empty());

    generate_first_round(&mut event).unwrap();
    assert_eq!(event.team_matches.len(), 2);
}

#[test]
fn next_round_requires_a_bracket() {
    let mut event = event_with_teams(4);
    assert_eq!(generate_next_round(&mut event), Err(EventError::NoBracket));
}

#[test]
fn next_round_requires_finished_round() {
    let mut event = event_with_teams(3);
    generate_first_round(&mut event).unwrap();
    let err = generate_next_round(&mut event).unwrap_err();
    assert_eq!(
        err,
        EventError::RoundNotFinished {
            round: 1,
            unfinished: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(event.team_matches.len(), 2);
}

#[test]
fn two_winners_go_straight_to_the_final() {
    let mut event = event_with_teams(3);
    let t = team_ids(&event);
    generate_first_round(&mut event).unwrap();
    finish_round_for_team_a(&mut event, 1);

    generate_next_round(&mut event).unwrap();
    assert_eq!(event.current_round(), Some(4));
    assert_eq!(pairings(&event, 4), vec![(t[0], Some(t[2]))]);
    assert_eq!(round_label(4), "Final");
}

#[test]
fn eight_teams_play_semifinal_then_final() {
    let mut event = event_with_teams(8);
    let t = team_ids(&event);
    generate_first_round(&mut event).unwrap();
    assert_eq!(event.round(1).count(), 4);

    finish_round_for_team_a(&mut event, 1);
    generate_next_round(&mut event).unwrap();
    assert_eq!(event.current_round(), Some(3));
    assert_eq!(
        pairings(&event, 3),
        vec![(t[0], Some(t[2])), (t[4], Some(t[6]))]
    );

    finish_round_for_team_a(&mut event, 3);
    generate_next_round(&mut event).unwrap();
    assert_eq!(pairings(&event, 4), vec![(t[0], Some(t[4]))]);
    assert_eq!(event_status(&event), EventStatus::InProgress);

    finish_round_for_team_a(&mut event, 4);
    assert_eq!(
        generate_next_round(&mut event),
        Err(EventError::TournamentDecided)
    );
    assert_eq!(event_status(&event), EventStatus::Finished);
}

#[test]
fn odd_winner_counts_advance_one_round_with_byes() {
    let mut event = event_with_teams(5);
    let t = team_ids(&event);
    generate_first_round(&mut event).unwrap();
    assert_eq!(
        pairings(&event, 1),
        vec![(t[0], Some(t[1])), (t[2], Some(t[3])), (t[4], None)]
    );

    finish_round_for_team_a(&mut event, 1);
    generate_next_round(&mut event).unwrap();
    assert_eq!(pairings(&event, 2), vec![(t[0], Some(t[2])), (t[4], None)]);

    finish_round_for_team_a(&mut event, 2);
    generate_next_round(&mut event).unwrap();
    assert_eq!(pairings(&event, 4), vec![(t[0], Some(t[4]))]);
}

#[test]
fn two_team_event_is_decided_after_one_match() {
    let mut event = event_with_teams(2);
    generate_first_round(&mut event).unwrap();
    assert_eq!(event_status(&event), EventStatus::Preparing);

    finish_round_for_team_a(&mut event, 1);
    assert_eq!(event_status(&event), EventStatus::Finished);
    assert_eq!(
        generate_next_round(&mut event),
        Err(EventError::TournamentDecided)
    );
}

#[test]
fn round_numbers_use_semantic_labels() {
    assert_eq!(next_round_number(1, 2), 4);
    assert_eq!(next_round_number(1, 4), 3);
    assert_eq!(next_round_number(1, 3), 2);
    assert_eq!(next_round_number(2, 8), 3);
    assert_eq!(next_round_number(3, 3), 4);

    assert_eq!(round_label(1), "Round 1");
    assert_eq!(round_label(2), "Round 2");
    assert_eq!(round_label(3), "Semifinal");
    assert_eq!(round_label(5), "Round 5");
}

#[test]
fn generation_is_deterministic() {
    let mut first = event_with_teams(7);
    let mut second = event_with_teams(7);
    generate_first_round(&mut first).unwrap();
    generate_first_round(&mut second).unwrap();
    let names = |e: &Event| -> Vec<(String, Option<String>)> {
        e.team_matches
            .iter()
            .map(|m| {
                (
                    e.team(m.team_a).unwrap().name.clone(),
                    m.team_b.map(|b| e.team(b).unwrap().name.clone()),
                )
            })
            .collect()
    };
    assert_eq!(names(&first), names(&second));
}

#[test]
fn repeated_round_number_appends_to_the_existing_round() {
    let mut event = event_with_teams(28);
    let t = team_ids(&event);
    generate_first_round(&mut event).unwrap();
    finish_round_for_team_a(&mut event, 1);
    generate_next_round(&mut event).unwrap();
    finish_round_for_team_a(&mut event, 2);
    generate_next_round(&mut event).unwrap();
    assert_eq!(
        pairings(&event, 3),
        vec![
            (t[0], Some(t[4])),
            (t[8], Some(t[12])),
            (t[16], Some(t[20])),
            (t[24], None)
        ]
    );

    // four winners map to round 3 again
    finish_round_for_team_a(&mut event, 3);
    let appended = generate_next_round(&mut event).unwrap();
    assert_eq!(appended.len(), 2);
    assert_eq!(event.current_round(), Some(3));
    assert_eq!(event.round(3).count(), 6);
    assert_eq!(
        generate_next_round(&mut event),
        Err(EventError::RoundNotFinished {
            round: 3,
            unfinished: 2
        })
    );

    for id in appended {
        win_for_team_a(&mut event, id);
    }
    generate_next_round(&mut event).unwrap();
    assert_eq!(
        pairings(&event, 4),
        vec![
            (t[0], Some(t[8])),
            (t[16], Some(t[24])),
            (t[0], Some(t[16]))
        ]
    );
}
