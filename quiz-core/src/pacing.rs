use crate::RoundState;
use tracing::debug;

/// Default auto-reveal cadence
pub const DEFAULT_REVEAL_INTERVAL_MS: u64 = 2000;

/// Turns caller-supplied ticks into cadence reveals for one round.
///
/// The round itself has no clock. This helper feeds it elapsed time until the
/// round is resolved, and calls `advance_reveal` once per full interval while
/// clubs are still hidden. Manual reveals go straight to the round and don't
/// reset the cadence.
#[derive(Debug, Clone)]
pub struct RevealClock {
    reveal_interval_ms: u64,
    since_last_reveal_ms: u64,
}

impl RevealClock {
    pub fn new(reveal_interval_ms: u64) -> Self {
        Self {
            reveal_interval_ms: reveal_interval_ms.max(1),
            since_last_reveal_ms: 0,
        }
    }

    /// Tick the round and apply any reveals that are due. Returns how many clubs were revealed.
    pub fn advance(&mut self, round: &mut RoundState, delta_ms: u64) -> usize {
        if self.is_finished(round) {
            return 0;
        }

        round.tick(delta_ms);
        if !self.has_pending_reveals(round) {
            self.since_last_reveal_ms = 0;
            return 0;
        }
        self.since_last_reveal_ms = self.since_last_reveal_ms.saturating_add(delta_ms);

        let mut revealed = 0;
        while self.since_last_reveal_ms >= self.reveal_interval_ms {
            self.since_last_reveal_ms -= self.reveal_interval_ms;
            if !round.advance_reveal() {
                break;
            }
            revealed += 1;
        }

        // Nothing left to count towards
        if !round.has_hidden_entries() {
            self.since_last_reveal_ms = 0;
        }

        if revealed > 0 {
            debug!(
                "Cadence revealed {} club(s), {}/{} showing",
                revealed,
                round.revealed_count(),
                round.total_clubs()
            );
        }
        revealed
    }

    /// True once the round is resolved and needs no more ticks
    pub fn is_finished(&self, round: &RoundState) -> bool {
        round.is_resolved()
    }

    /// Whether a cadence reveal can still happen for this round
    pub fn has_pending_reveals(&self, round: &RoundState) -> bool {
        !round.is_resolved() && round.has_hidden_entries()
    }

    /// Time until the next cadence reveal
    pub fn until_next_reveal_ms(&self) -> u64 {
        self.reveal_interval_ms.saturating_sub(self.since_last_reveal_ms)
    }

    pub fn reset(&mut self) {
        self.since_last_reveal_ms = 0;
    }
}

impl Default for RevealClock {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_INTERVAL_MS)
    }
}
