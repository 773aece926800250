use crate::{NameMatcher, ScoreBreakdown, ScoringEngine};
use quiz_types::{CareerEntry, Player, RoundOutcome, RoundStatus};
use std::sync::Arc;
use tracing::{debug, info};

/// Start a fresh round for a player: first club showing, clock at zero
pub fn start_round(player: impl Into<Arc<Player>>) -> RoundState {
    RoundState::new(player.into())
}

/// State of one guessing round.
///
/// Starts `Unresolved` and moves exactly once to `Correct` or `GaveUp`. Every
/// mutating call on a resolved round is a silent no-op.
#[derive(Debug, Clone)]
pub struct RoundState {
    player: Arc<Player>,
    matcher: NameMatcher,
    revealed_count: usize,
    elapsed_ms: u64,
    status: RoundStatus,
    breakdown: Option<ScoreBreakdown>,
    last_guess_text: String,
    rejected_guesses: u32,
}

impl RoundState {
    pub fn new(player: Arc<Player>) -> Self {
        let matcher = NameMatcher::for_player(&player);
        info!(
            "Round started for player {} ({} clubs)",
            player.id,
            player.career.len()
        );

        Self {
            player,
            matcher,
            revealed_count: 1, // First club always visible
            elapsed_ms: 0,
            status: RoundStatus::Unresolved,
            breakdown: None,
            last_guess_text: String::new(),
            rejected_guesses: 0,
        }
    }

    /// Reveal the next club. Returns true if a new club became visible.
    pub fn advance_reveal(&mut self) -> bool {
        if self.is_resolved() {
            debug!("Ignoring reveal on resolved round");
            return false;
        }

        if self.revealed_count >= self.total_clubs() {
            return false;
        }

        self.revealed_count += 1;
        debug!(
            "Revealed club {}/{}",
            self.revealed_count,
            self.total_clubs()
        );
        true
    }

    /// Add caller-measured wall-clock time to the round
    pub fn tick(&mut self, delta_ms: u64) {
        if self.is_resolved() {
            return;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    /// Keep the caller's current input text
    pub fn set_guess_text(&mut self, text: &str) {
        if !self.is_resolved() {
            self.last_guess_text = text.to_string();
        }
    }

    /// Submit a guess. Returns true if it named the player and resolved the round.
    pub fn submit_guess(&mut self, text: &str) -> bool {
        if self.is_resolved() || text.trim().is_empty() {
            return false;
        }

        match self.matcher.match_rule(text) {
            Some(rule) => {
                let breakdown = ScoringEngine::score_correct(
                    self.elapsed_ms,
                    self.total_clubs(),
                    self.revealed_count,
                );
                self.status = RoundStatus::Correct;
                self.breakdown = Some(breakdown);
                self.last_guess_text = text.to_string();

                info!(
                    "Player {} guessed ({:?}) in {}ms with {} clubs revealed: {} points",
                    self.player.id,
                    rule,
                    self.elapsed_ms,
                    self.revealed_count,
                    breakdown.total()
                );
                true
            }
            None => {
                self.rejected_guesses += 1;
                self.last_guess_text.clear();
                debug!("Rejected guess #{}", self.rejected_guesses);
                false
            }
        }
    }

    /// Skip the round for zero points. Returns true if the round was still open.
    pub fn give_up(&mut self) -> bool {
        if self.is_resolved() {
            return false;
        }

        self.status = RoundStatus::GaveUp;
        info!(
            "Gave up on player {} after {}ms with {} clubs revealed",
            self.player.id, self.elapsed_ms, self.revealed_count
        );
        true
    }

    /// Final record of the round, or `None` while it is still being played
    pub fn to_outcome(&self) -> Option<RoundOutcome> {
        if !self.is_resolved() {
            return None;
        }

        Some(RoundOutcome {
            player_id: self.player.id,
            player_name: self.player.name.clone(),
            score: self.score().unwrap_or(0),
            elapsed_ms: self.elapsed_ms,
            clubs_revealed: self.revealed_count as u32,
            was_correct: self.status == RoundStatus::Correct,
        })
    }

    /// Clubs the player can currently see. Everything is shown once resolved.
    pub fn visible_entries(&self) -> &[CareerEntry] {
        let entries = self.player.career.entries();
        if self.is_resolved() {
            entries
        } else {
            &entries[..self.revealed_count]
        }
    }

    pub fn has_hidden_entries(&self) -> bool {
        !self.is_resolved() && self.revealed_count < self.total_clubs()
    }

    /// Points for the round: `None` while unresolved, 0 after giving up
    pub fn score(&self) -> Option<u32> {
        match self.status {
            RoundStatus::Unresolved => None,
            RoundStatus::Correct => self.breakdown.map(|b| b.total()),
            RoundStatus::GaveUp => Some(0),
        }
    }

    pub fn score_breakdown(&self) -> Option<ScoreBreakdown> {
        self.breakdown
    }

    pub fn player(&self) -> &Arc<Player> {
        &self.player
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn total_clubs(&self) -> usize {
        self.player.career.len()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn last_guess_text(&self) -> &str {
        &self.last_guess_text
    }

    pub fn rejected_guesses(&self) -> u32 {
        self.rejected_guesses
    }
}
