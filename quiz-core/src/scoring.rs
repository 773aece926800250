/// Flat reward for any correct answer
pub const BASE_POINTS: u32 = 100;

/// Time bonus at zero elapsed time; loses one point per 100ms
pub const MAX_TIME_BONUS: u32 = 300;

/// Milliseconds per lost time-bonus point
pub const TIME_BONUS_STEP_MS: u64 = 100;

/// Reward per club still hidden at resolution
pub const POINTS_PER_HIDDEN_CLUB: u32 = 100;

/// Components of a correct round's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub base: u32,
    pub time_bonus: u32,
    pub reveal_bonus: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.base + self.time_bonus + self.reveal_bonus
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a correct answer given the time taken and how many clubs were showing
    pub fn score_correct(
        elapsed_ms: u64,
        total_clubs: usize,
        clubs_revealed: usize,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            base: BASE_POINTS,
            time_bonus: Self::time_bonus(elapsed_ms),
            reveal_bonus: Self::reveal_bonus(total_clubs, clubs_revealed),
        }
    }

    /// Reaches zero at 30 seconds
    pub fn time_bonus(elapsed_ms: u64) -> u32 {
        let lost = elapsed_ms / TIME_BONUS_STEP_MS;
        u64::from(MAX_TIME_BONUS).saturating_sub(lost) as u32
    }

    /// Zero once every club is revealed
    pub fn reveal_bonus(total_clubs: usize, clubs_revealed: usize) -> u32 {
        let hidden = total_clubs.saturating_sub(clubs_revealed) as u32;
        hidden * POINTS_PER_HIDDEN_CLUB
    }

    /// Best score a player can earn for a career of this length
    pub fn max_score(total_clubs: usize) -> u32 {
        Self::score_correct(0, total_clubs, 1).total()
    }
}
