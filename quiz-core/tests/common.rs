#![allow(dead_code)]

use quiz_core::{PlayerSource, ScoreSink};
use quiz_types::{CareerEntry, Player, PlayerId, QuizError, RoundOutcome};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Route engine logs to the test harness output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Creates a career entry with plausible stats
pub fn create_career_entry(club: &str, order: i32) -> CareerEntry {
    CareerEntry {
        years: format!("{}–{}", 2000 + order, 2001 + order),
        club: club.to_string(),
        country_flag: "🏳️".to_string(),
        matches: 40,
        goals: 8,
        chronological_order: order,
    }
}

/// Creates a player whose clubs are revealed in the given order
pub fn create_test_player(name: &str, aliases: &[&str], clubs: &[&str]) -> Player {
    let career = clubs
        .iter()
        .enumerate()
        .map(|(i, club)| create_career_entry(club, i as i32))
        .collect();

    Player::new(
        Uuid::new_v4(),
        name,
        aliases.iter().map(|a| a.to_string()).collect(),
        career,
    )
    .unwrap()
}

/// Three-club player used by the scoring scenarios
pub fn create_pirlo() -> Player {
    create_test_player("Andrea Pirlo", &["Pirlo"], &["Brescia", "Inter", "Milan"])
}

/// Today's rounds for a small party
pub fn create_daily_players() -> Vec<Player> {
    vec![
        create_test_player(
            "Lionel Messi",
            &["Messi", "Leo Messi"],
            &["Barcelona", "PSG", "Inter Miami"],
        ),
        create_test_player(
            "Cristiano Ronaldo",
            &["Ronaldo", "CR7"],
            &["Sporting CP", "Manchester United", "Real Madrid", "Juventus"],
        ),
        create_test_player(
            "Zlatan Ibrahimović",
            &["Zlatan", "Ibra"],
            &["Malmö", "Ajax", "Juventus", "Inter", "Barcelona", "Milan"],
        ),
        create_test_player(
            "Achraf Hakimi",
            &["Hakimi"],
            &["Real Madrid", "Dortmund", "Inter", "PSG"],
        ),
    ]
}

/// Score sink that remembers everything submitted to it
#[derive(Clone, Default)]
pub struct RecordingSink {
    submitted: Arc<Mutex<Vec<(u32, RoundOutcome)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted(&self) -> Vec<(u32, RoundOutcome)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

impl ScoreSink for RecordingSink {
    fn submit(&mut self, round_number: u32, outcome: &RoundOutcome) -> Result<(), QuizError> {
        self.submitted
            .lock()
            .unwrap()
            .push((round_number, outcome.clone()));
        Ok(())
    }
}

/// Score sink standing in for an unreachable backend
pub struct FailingSink;

impl ScoreSink for FailingSink {
    fn submit(&mut self, _round_number: u32, _outcome: &RoundOutcome) -> Result<(), QuizError> {
        Err(QuizError::ScoreSubmission {
            message: "connection refused".to_string(),
        })
    }
}

/// Endless pool that hands out any player not yet excluded, like infinite mode
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }
}

impl PlayerSource for PlayerPool {
    fn next_player(&mut self, exclude: &[PlayerId]) -> Option<Player> {
        self.players
            .iter()
            .find(|p| !exclude.contains(&p.id))
            .cloned()
    }
}
