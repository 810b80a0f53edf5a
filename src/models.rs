use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk and display format for leaderboard timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Menu key used by the difficulty prompt.
    pub fn menu_key(self) -> char {
        match self {
            Difficulty::Easy => '1',
            Difficulty::Medium => '2',
            Difficulty::Hard => '3',
        }
    }

    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Difficulty::Easy),
            "2" => Some(Difficulty::Medium),
            "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character-level breakdown of a finished attempt.
///
/// `errors` counts the length difference *and* every mismatched position, so
/// a length mismatch shows up here even though it is already visible in the
/// two length fields. Kept as is for compatibility with existing outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedStats {
    pub total_characters: usize,
    pub characters_typed: usize,
    pub correct_characters: usize,
    pub errors: usize,
    pub time_elapsed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u64,
    pub wpm: u64,
    pub accuracy: f64,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
}

impl ScoreEntry {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_follow_tiers() {
        assert_eq!(Difficulty::Easy.multiplier(), 1.0);
        assert_eq!(Difficulty::Medium.multiplier(), 1.5);
        assert_eq!(Difficulty::Hard.multiplier(), 2.0);
    }

    #[test]
    fn menu_choices() {
        for difficulty in Difficulty::ALL {
            let key = difficulty.menu_key().to_string();
            assert_eq!(Difficulty::from_menu_choice(&key), Some(difficulty));
        }
        assert_eq!(Difficulty::from_menu_choice(" 2"), None);
        assert_eq!(Difficulty::from_menu_choice("2 "), None);
        assert_eq!(Difficulty::from_menu_choice("4"), None);
        assert_eq!(Difficulty::from_menu_choice("easy"), None);
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
    }

    #[test]
    fn score_entry_timestamp_format() {
        let entry: ScoreEntry = serde_json::from_str(
            r#"{"score": 42, "wpm": 40, "accuracy": 87.5, "timestamp": "2024-03-01 09:05:07"}"#,
        )
        .unwrap();

        assert_eq!(entry.formatted_timestamp(), "2024-03-01 09:05:07");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-03-01 09:05:07\""));
    }

    #[test]
    fn score_entry_rejects_bad_timestamp() {
        let parsed = serde_json::from_str::<ScoreEntry>(
            r#"{"score": 1, "wpm": 1, "accuracy": 1.0, "timestamp": "yesterday"}"#,
        );
        assert!(parsed.is_err());
    }
}
