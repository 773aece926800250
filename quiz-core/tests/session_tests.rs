mod common;

use chrono::NaiveDate;
use common::*;
use quiz_core::{
    EventChannel, FixedRounds, GameSession, InfiniteStats, MemoryStore, QuizConfig, QuizEvent,
    SoloDailyRecord,
};
use uuid::Uuid;

#[test]
fn test_daily_session_flow() {
    init_tracing();
    let sink = RecordingSink::new();
    let events = EventChannel::default();
    let mut subscriber = events.subscribe();
    let party_id = Uuid::new_v4();

    let mut session =
        GameSession::new(FixedRounds::new(create_daily_players()), &QuizConfig::default())
        .with_party(party_id)
        .with_score_sink(Box::new(sink.clone()))
        .with_events(events.clone());

    // Round 1: instant answer
    assert!(session.next_round().is_some());
    assert!(session.submit_guess("messi"));

    // Round 2: give up after a reveal
    session.next_round();
    session.tick(2000);
    assert_eq!(session.current_round().unwrap().revealed_count(), 2);
    assert!(session.give_up());

    // Round 3: wrong guess, then right
    session.next_round();
    assert!(!session.submit_guess("Henry"));
    session.tick(1000);
    assert!(session.submit_guess("Zlatan"));

    // Round 4: manual reveal, then right
    session.next_round();
    assert!(session.reveal_next());
    assert!(session.submit_guess("Hakimi"));

    assert!(session.next_round().is_none());

    let submitted = sink.submitted();
    assert_eq!(submitted.len(), 4);
    assert_eq!(submitted.iter().map(|(n, _)| *n).collect::<Vec<_>>(), vec![1, 2, 3, 4]);

    let summary = session.finish();
    assert_eq!(summary.rounds_played(), 4);
    assert_eq!(summary.correct_count, 3);
    assert_eq!(summary.streak, 2);
    assert_eq!(summary.outcomes[0].score, 100 + 300 + 200);
    assert_eq!(summary.outcomes[1].score, 0);
    assert_eq!(
        summary.total_score,
        summary.outcomes.iter().map(|o| o.score).sum::<u32>()
    );

    let events = subscriber.drain();
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.party_id() == Some(party_id)));
    assert!(matches!(
        events.last(),
        Some(QuizEvent::SessionCompleted { summary: s, .. }) if s.correct_count == 3
    ));
}

#[test]
fn test_streak_scenario() {
    let mut session =
        GameSession::new(FixedRounds::new(create_daily_players()), &QuizConfig::default());

    session.next_round();
    session.submit_guess("Lionel Messi");
    session.next_round();
    session.submit_guess("Cristiano Ronaldo");
    session.next_round();
    session.give_up();
    session.next_round();
    session.submit_guess("Achraf Hakimi");

    let summary = session.summary();
    assert_eq!(summary.streak, 1);
    assert_eq!(summary.correct_count, 3);
}

#[test]
fn test_failed_score_submission_keeps_outcome() {
    init_tracing();
    let mut session =
        GameSession::new(FixedRounds::new(create_daily_players()), &QuizConfig::default())
        .with_score_sink(Box::new(FailingSink));

    session.next_round();
    assert!(session.submit_guess("Messi"));
    assert_eq!(session.outcomes().len(), 1);
    assert!(session.outcomes()[0].was_correct);
}

#[test]
fn test_infinite_mode_never_repeats_players() {
    let players = create_daily_players();
    let already_played = players[0].id;
    let mut stats_store = MemoryStore::new();

    let mut session = GameSession::new(PlayerPool::new(players), &QuizConfig::default())
        .with_played(vec![already_played]);

    let mut seen = Vec::new();
    while let Some(round) = session.next_round() {
        seen.push(round.player().id);
        session.give_up();
        let outcome = session.outcomes().last().unwrap().clone();
        InfiniteStats::record(&mut stats_store, &outcome).unwrap();
    }

    assert_eq!(seen.len(), 3);
    assert!(!seen.contains(&already_played));
    assert_eq!(session.played_player_ids().len(), 4);

    let stats = InfiniteStats::load(&stats_store);
    assert_eq!(stats.played, 3);
    assert_eq!(stats.correct, 0);
}

#[test]
fn test_cadence_stops_after_resolution() {
    let config = QuizConfig {
        reveal_interval_ms: 1000,
        ..QuizConfig::default()
    };
    let mut session = GameSession::new(FixedRounds::new(create_daily_players()), &config);

    session.next_round();
    assert!(session.is_clock_running());
    assert_eq!(session.tick(1000), 1);
    assert!(session.submit_guess("Messi"));
    assert!(!session.is_clock_running());
    assert_eq!(session.tick(5000), 0);
    assert_eq!(session.outcomes()[0].clubs_revealed, 2);
    assert_eq!(session.outcomes()[0].elapsed_ms, 1000);
}

#[test]
fn test_time_bonus_decays_after_last_reveal() {
    let player = create_test_player("Andrea Pirlo", &["Pirlo"], &["Brescia", "Juventus"]);
    let mut session = GameSession::new(FixedRounds::new(vec![player]), &QuizConfig::default());
    session.next_round();

    for _ in 0..200 {
        session.tick(100);
    }
    let round = session.current_round().unwrap();
    assert_eq!(round.revealed_count(), 2);
    assert_eq!(round.elapsed_ms(), 20_000);
    assert!(!session.has_pending_reveals());
    assert!(session.is_clock_running());

    assert!(session.submit_guess("Pirlo"));
    let outcome = &session.outcomes()[0];
    assert_eq!(outcome.elapsed_ms, 20_000);
    assert_eq!(outcome.score, 200);
}

#[test]
fn test_solo_daily_completion_recorded() {
    let mut store = MemoryStore::new();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut session =
        GameSession::new(FixedRounds::new(create_daily_players()), &QuizConfig::default())
        .with_round_limit(2);

    session.next_round();
    session.submit_guess("Messi");
    session.next_round();
    session.give_up();
    assert!(session.next_round().is_none());

    let summary = session.finish();
    SoloDailyRecord::record(&mut store, today, &summary).unwrap();

    let record = SoloDailyRecord::for_date(&store, today).unwrap();
    assert_eq!(record.correct, 1);
    assert_eq!(record.total, 2);
    assert_eq!(record.score, summary.total_score);
}
