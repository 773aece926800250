use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    Unresolved, // Timer and reveals running
    Correct,    // Player was named
    GaveUp,     // Round skipped, scores nothing
}

impl RoundStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundStatus::Unresolved)
    }
}

/// Final record of a resolved round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundOutcome {
    pub player_id: PlayerId,
    pub player_name: String,
    pub score: u32,
    #[ts(type = "number")]
    pub elapsed_ms: u64,
    pub clubs_revealed: u32,
    pub was_correct: bool,
}

/// Aggregate over the ordered outcome log of one play session.
/// Always derived from the outcomes, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub outcomes: Vec<RoundOutcome>,
    pub total_score: u32,
    pub correct_count: u32,
    pub streak: u32,
}

impl SessionSummary {
    pub fn from_outcomes(outcomes: &[RoundOutcome]) -> Self {
        let total_score = outcomes.iter().map(|o| o.score).sum();
        let correct_count = outcomes.iter().filter(|o| o.was_correct).count() as u32;

        // Only the trailing run of correct answers counts
        let streak = outcomes
            .iter()
            .rev()
            .take_while(|o| o.was_correct)
            .count() as u32;

        Self {
            outcomes: outcomes.to_vec(),
            total_score,
            correct_count,
            streak,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.outcomes.len() as u32
    }
}
