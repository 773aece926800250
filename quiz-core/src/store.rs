//! Small persistent caches kept on the player's device.
//!
//! The host supplies a [`KeyValueStore`] (browser storage, a file, a map in
//! tests); the typed caches here serialize to JSON under fixed keys. A value
//! that fails to parse is treated as missing.

use chrono::NaiveDate;
use quiz_types::{MemberId, PartyId, QuizError, RoundOutcome, SessionSummary};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use tracing::warn;

pub const MEMBER_SESSIONS_KEY: &str = "cq_sessions";
pub const SOLO_DAILY_KEY: &str = "cq_solo_daily";
pub const INFINITE_STATS_KEY: &str = "cq_infinite_stats";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), QuizError>;
    fn remove(&mut self, key: &str) -> Result<(), QuizError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), QuizError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), QuizError> {
        self.values.remove(key);
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable cache entry {}: {}", key, e);
            None
        }
    }
}

fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), QuizError> {
    let raw = serde_json::to_string(value).map_err(|e| QuizError::Serialization {
        message: e.to_string(),
    })?;
    store.set(key, raw)
}

/// Which member this device plays as in each party it has joined
pub struct MemberSessions;

impl MemberSessions {
    pub fn all(store: &dyn KeyValueStore) -> HashMap<PartyId, MemberId> {
        load_json(store, MEMBER_SESSIONS_KEY).unwrap_or_default()
    }

    pub fn get(store: &dyn KeyValueStore, party_id: PartyId) -> Option<MemberId> {
        Self::all(store).get(&party_id).copied()
    }

    pub fn save(
        store: &mut dyn KeyValueStore,
        party_id: PartyId,
        member_id: MemberId,
    ) -> Result<(), QuizError> {
        let mut sessions = Self::all(store);
        sessions.insert(party_id, member_id);
        save_json(store, MEMBER_SESSIONS_KEY, &sessions)
    }

    /// Forget a party, e.g. once it no longer exists remotely
    pub fn remove(store: &mut dyn KeyValueStore, party_id: PartyId) -> Result<(), QuizError> {
        let mut sessions = Self::all(store);
        if sessions.remove(&party_id).is_some() {
            save_json(store, MEMBER_SESSIONS_KEY, &sessions)?;
        }
        Ok(())
    }
}

/// Result of the last completed solo daily challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoloDailyRecord {
    pub date: NaiveDate,
    pub score: u32,
    pub correct: u32,
    pub total: u32,
}

impl SoloDailyRecord {
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        load_json(store, SOLO_DAILY_KEY)
    }

    /// Today's result, if the challenge was already finished today
    pub fn for_date(store: &dyn KeyValueStore, today: NaiveDate) -> Option<Self> {
        Self::load(store).filter(|record| record.date == today)
    }

    pub fn has_completed(store: &dyn KeyValueStore, today: NaiveDate) -> bool {
        Self::for_date(store, today).is_some()
    }

    pub fn record(
        store: &mut dyn KeyValueStore,
        today: NaiveDate,
        summary: &SessionSummary,
    ) -> Result<Self, QuizError> {
        let record = Self {
            date: today,
            score: summary.total_score,
            correct: summary.correct_count,
            total: summary.rounds_played(),
        };
        save_json(store, SOLO_DAILY_KEY, &record)?;
        Ok(record)
    }
}

/// Running totals for endless solo play
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfiniteStats {
    pub played: u32,
    pub correct: u32,
    pub total_points: u64,
}

impl InfiniteStats {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_json(store, INFINITE_STATS_KEY).unwrap_or_default()
    }

    /// Add one finished round and persist the new totals
    pub fn record(
        store: &mut dyn KeyValueStore,
        outcome: &RoundOutcome,
    ) -> Result<Self, QuizError> {
        let mut stats = Self::load(store);
        stats.played += 1;
        if outcome.was_correct {
            stats.correct += 1;
        }
        stats.total_points += u64::from(outcome.score);

        save_json(store, INFINITE_STATS_KEY, &stats)?;
        Ok(stats)
    }

    pub fn reset(store: &mut dyn KeyValueStore) -> Result<(), QuizError> {
        store.remove(INFINITE_STATS_KEY)
    }

    pub fn accuracy(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.played)
        }
    }
}
