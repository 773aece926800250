use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{PlayerId, QuizError};

/// One spell at a club, as shown on the career timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CareerEntry {
    pub years: String, // Display string, e.g. "2010–2014"
    pub club: String,
    pub country_flag: String,
    pub matches: u32,
    pub goals: u32,
    pub chronological_order: i32,
}

/// A club history that is never empty and is always in playing order.
///
/// Entries are sorted by `chronological_order` on construction, so reveal order
/// never depends on the order rows came back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(try_from = "Vec<CareerEntry>", into = "Vec<CareerEntry>")]
#[ts(export)]
pub struct Career(Vec<CareerEntry>);

impl Career {
    pub fn new(mut entries: Vec<CareerEntry>) -> Result<Self, QuizError> {
        if entries.is_empty() {
            return Err(QuizError::EmptyCareer);
        }
        entries.sort_by_key(|entry| entry.chronological_order);
        Ok(Self(entries))
    }

    /// Number of clubs, always at least one
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[CareerEntry] {
        &self.0
    }

    pub fn first(&self) -> &CareerEntry {
        &self.0[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CareerEntry> {
        self.0.iter()
    }
}

impl TryFrom<Vec<CareerEntry>> for Career {
    type Error = QuizError;

    fn try_from(entries: Vec<CareerEntry>) -> Result<Self, Self::Error> {
        Career::new(entries)
    }
}

impl From<Career> for Vec<CareerEntry> {
    fn from(career: Career) -> Self {
        career.0
    }
}

/// A guessable footballer. Supplied read-only by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub aliases: Vec<String>,
    pub career: Career,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        aliases: Vec<String>,
        career: Vec<CareerEntry>,
    ) -> Result<Self, QuizError> {
        Ok(Self {
            id,
            name: name.into(),
            aliases,
            career: Career::new(career)?,
        })
    }

    /// Canonical name followed by every alternate spelling
    pub fn accepted_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(club: &str, order: i32) -> CareerEntry {
        CareerEntry {
            years: "2000–2004".to_string(),
            club: club.to_string(),
            country_flag: "🇪🇸".to_string(),
            matches: 10,
            goals: 2,
            chronological_order: order,
        }
    }

    #[test]
    fn test_empty_career_rejected() {
        let result = Player::new(uuid::Uuid::new_v4(), "Nobody", vec![], vec![]);
        assert_eq!(result.unwrap_err(), QuizError::EmptyCareer);
    }

    #[test]
    fn test_career_sorted_by_chronological_order() {
        let career = Career::new(vec![
            entry("Chelsea", 3),
            entry("Porto", 1),
            entry("Benfica", 2),
        ])
        .unwrap();
        let clubs: Vec<&str> = career.iter().map(|e| e.club.as_str()).collect();
        assert_eq!(clubs, vec!["Porto", "Benfica", "Chelsea"]);
        assert_eq!(career.first().club, "Porto");
        assert_eq!(career.len(), 3);
    }

    #[test]
    fn test_accepted_names_start_with_canonical_name() {
        let player = Player::new(
            uuid::Uuid::new_v4(),
            "Lionel Messi",
            vec!["Messi".to_string(), "Leo Messi".to_string()],
            vec![entry("Barcelona", 1)],
        )
        .unwrap();

        assert_eq!(player.accepted_names(), vec!["Lionel Messi", "Messi", "Leo Messi"]);
    }

    #[test]
    fn test_deserialize_rejects_empty_career() {
        let json = r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","name":"X","aliases":[],"career":[]}"#;
        assert!(serde_json::from_str::<Player>(json).is_err());
    }
}
