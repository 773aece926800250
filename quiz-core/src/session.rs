use crate::{EventChannel, QuizConfig, QuizEvent, RevealClock, RoundState, start_round};
use quiz_types::{PartyId, Player, PlayerId, QuizError, RoundOutcome, SessionSummary};
use std::collections::VecDeque;
use tracing::{debug, error, info};

/// Where the players for a session come from (daily rounds, a random pool, ...)
pub trait PlayerSource {
    /// Next player to guess, never one listed in `exclude`
    fn next_player(&mut self, exclude: &[PlayerId]) -> Option<Player>;
}

/// Receives each finished round, e.g. to persist it remotely
pub trait ScoreSink {
    fn submit(&mut self, round_number: u32, outcome: &RoundOutcome) -> Result<(), QuizError>;
}

impl<F> ScoreSink for F
where
    F: FnMut(u32, &RoundOutcome) -> Result<(), QuizError>,
{
    fn submit(&mut self, round_number: u32, outcome: &RoundOutcome) -> Result<(), QuizError> {
        self(round_number, outcome)
    }
}

/// A fixed, ordered list of players such as today's rounds for a party
#[derive(Debug, Clone, Default)]
pub struct FixedRounds {
    players: VecDeque<Player>,
}

impl FixedRounds {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players: players.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.players.len()
    }
}

impl PlayerSource for FixedRounds {
    fn next_player(&mut self, exclude: &[PlayerId]) -> Option<Player> {
        while let Some(player) = self.players.pop_front() {
            if !exclude.contains(&player.id) {
                return Some(player);
            }
            debug!("Skipping already played player {}", player.id);
        }
        None
    }
}

/// One sitting of play: a sequence of rounds and their outcome log.
///
/// Rounds run one at a time. When a round resolves its outcome is appended to
/// the log, handed to the score sink and published as `RoundResolved`.
pub struct GameSession<S: PlayerSource> {
    source: S,
    party_id: Option<PartyId>,
    reveal_interval_ms: u64,
    round_limit: Option<u32>,
    current: Option<RoundState>,
    clock: RevealClock,
    rounds_started: u32,
    outcomes: Vec<RoundOutcome>,
    played: Vec<PlayerId>,
    score_sink: Option<Box<dyn ScoreSink>>,
    events: Option<EventChannel>,
}

impl<S: PlayerSource> GameSession<S> {
    pub fn new(source: S, config: &QuizConfig) -> Self {
        Self {
            source,
            party_id: None,
            reveal_interval_ms: config.reveal_interval_ms,
            round_limit: None,
            current: None,
            clock: RevealClock::new(config.reveal_interval_ms),
            rounds_started: 0,
            outcomes: Vec::new(),
            played: Vec::new(),
            score_sink: None,
            events: None,
        }
    }

    pub fn with_party(mut self, party_id: PartyId) -> Self {
        self.party_id = Some(party_id);
        self
    }

    /// Stop after this many rounds even if the source has more players
    pub fn with_round_limit(mut self, limit: u32) -> Self {
        self.round_limit = Some(limit);
        self
    }

    /// Players that were already played elsewhere and must not come up again
    pub fn with_played(mut self, player_ids: Vec<PlayerId>) -> Self {
        self.played = player_ids;
        self
    }

    pub fn with_score_sink(mut self, sink: Box<dyn ScoreSink>) -> Self {
        self.score_sink = Some(sink);
        self
    }

    pub fn with_events(mut self, events: EventChannel) -> Self {
        self.events = Some(events);
        self
    }

    /// Start the next round. Returns `None` while the current round is still
    /// being played, or once there are no more players.
    pub fn next_round(&mut self) -> Option<&RoundState> {
        if self.is_round_in_progress() {
            debug!("Round {} still in progress", self.rounds_started);
            return None;
        }

        if self
            .round_limit
            .is_some_and(|limit| self.rounds_started >= limit)
        {
            return None;
        }

        let player = self.source.next_player(&self.played)?;
        self.played.push(player.id);
        self.rounds_started += 1;
        self.clock = RevealClock::new(self.reveal_interval_ms);
        self.current = Some(start_round(player));

        debug!("Starting round {}", self.rounds_started);
        self.current.as_ref()
    }

    /// Feed elapsed time to the current round, applying cadence reveals
    pub fn tick(&mut self, delta_ms: u64) -> usize {
        match self.current.as_mut() {
            Some(round) => self.clock.advance(round, delta_ms),
            None => 0,
        }
    }

    /// Manual "show me the next club"
    pub fn reveal_next(&mut self) -> bool {
        self.current
            .as_mut()
            .is_some_and(|round| round.advance_reveal())
    }

    pub fn submit_guess(&mut self, text: &str) -> bool {
        let Some(round) = self.current.as_mut() else {
            return false;
        };

        if round.submit_guess(text) {
            self.record_outcome();
            true
        } else {
            false
        }
    }

    pub fn give_up(&mut self) -> bool {
        let Some(round) = self.current.as_mut() else {
            return false;
        };

        if round.give_up() {
            self.record_outcome();
            true
        } else {
            false
        }
    }

    fn record_outcome(&mut self) {
        let Some(outcome) = self.current.as_ref().and_then(RoundState::to_outcome) else {
            return;
        };
        let round_number = self.rounds_started;

        if let Some(sink) = self.score_sink.as_mut() {
            // The round still counts locally if the remote write fails
            if let Err(e) = sink.submit(round_number, &outcome) {
                error!("Failed to submit score for round {}: {}", round_number, e);
            }
        }

        if let Some(events) = &self.events {
            events.publish(QuizEvent::RoundResolved {
                party_id: self.party_id,
                round_number,
                outcome: outcome.clone(),
            });
        }

        self.outcomes.push(outcome);
    }

    pub fn is_round_in_progress(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|round| !round.is_resolved())
    }

    /// Whether the current round still needs ticks
    pub fn is_clock_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|round| !self.clock.is_finished(round))
    }

    /// Whether a cadence reveal can still happen in the current round
    pub fn has_pending_reveals(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|round| self.clock.has_pending_reveals(round))
    }

    pub fn current_round(&self) -> Option<&RoundState> {
        self.current.as_ref()
    }

    pub fn round_number(&self) -> u32 {
        self.rounds_started
    }

    pub fn outcomes(&self) -> &[RoundOutcome] {
        &self.outcomes
    }

    pub fn played_player_ids(&self) -> &[PlayerId] {
        &self.played
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_outcomes(&self.outcomes)
    }

    /// End the session. An unresolved round is abandoned without an outcome.
    pub fn finish(self) -> SessionSummary {
        let summary = self.summary();
        info!(
            "Session finished: {} points, {}/{} correct",
            summary.total_score,
            summary.correct_count,
            summary.rounds_played()
        );

        if let Some(events) = &self.events {
            events.publish(QuizEvent::SessionCompleted {
                party_id: self.party_id,
                summary: summary.clone(),
            });
        }
        summary
    }
}
