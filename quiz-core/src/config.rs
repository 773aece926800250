use anyhow::{Context, Result};
use quiz_types::QuizError;
use std::env;
use std::str::FromStr;

use crate::{DEFAULT_EVENT_CAPACITY, DEFAULT_REVEAL_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub reveal_interval_ms: u64,
    pub tick_interval_ms: u64,
    pub rounds_per_day: u32,
    pub event_channel_capacity: usize,
}

impl QuizConfig {
    /// Defaults overridden by any `QUIZ_*` environment variables that are set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            reveal_interval_ms: read(
                &lookup,
                "QUIZ_REVEAL_INTERVAL_MS",
                defaults.reveal_interval_ms,
            )?,
            tick_interval_ms: read(&lookup, "QUIZ_TICK_INTERVAL_MS", defaults.tick_interval_ms)?,
            rounds_per_day: read(&lookup, "QUIZ_ROUNDS_PER_DAY", defaults.rounds_per_day)?,
            event_channel_capacity: read(
                &lookup,
                "QUIZ_EVENT_CHANNEL_CAPACITY",
                defaults.event_channel_capacity,
            )?,
        })
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: DEFAULT_REVEAL_INTERVAL_MS,
            tick_interval_ms: 100,
            rounds_per_day: 5,
            event_channel_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + PartialEq + Default,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    // Every setting must be positive
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(QuizError::InvalidConfig {
            key: key.to_string(),
            value: raw.clone(),
        })
        .with_context(|| format!("Failed to read {} from environment", key)),
    }
}
