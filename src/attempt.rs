use crate::error::Result;
use crate::metrics::{compute_accuracy, compute_detailed_stats, compute_wpm};
use crate::models::{DetailedStats, Difficulty};
use crate::scoring::compute_score;
use std::fmt;

/// One finished typing trial with everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub difficulty: Difficulty,
    pub original_text: String,
    pub typed_text: String,
    pub time_elapsed: f64,
    pub wpm: u64,
    pub accuracy: f64,
    pub score: u64,
    pub stats: DetailedStats,
}

impl Attempt {
    pub fn evaluate(
        difficulty: Difficulty,
        original_text: &str,
        typed_text: &str,
        time_elapsed: f64,
    ) -> Result<Self> {
        let wpm = compute_wpm(time_elapsed, typed_text.chars().count())?;
        let accuracy = compute_accuracy(original_text, typed_text);
        let score = compute_score(wpm, accuracy, difficulty.multiplier());
        let stats = compute_detailed_stats(original_text, typed_text, time_elapsed);

        Ok(Self {
            difficulty,
            original_text: original_text.to_string(),
            typed_text: typed_text.to_string(),
            time_elapsed,
            wpm,
            accuracy,
            score,
            stats,
        })
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Test Results ===")?;
        writeln!(f)?;
        writeln!(f, "Difficulty: {}", self.difficulty.label())?;
        writeln!(f, "Time elapsed: {:?} seconds", self.stats.time_elapsed)?;
        writeln!(f, "Words per minute (WPM): {}", self.wpm)?;
        if self.typed_text.is_empty() {
            writeln!(f, "Accuracy: 0%")?;
        } else {
            writeln!(f, "Accuracy: {:?}%", self.accuracy)?;
        }
        writeln!(f, "Final Score: {}", self.score)?;
        writeln!(f)?;
        writeln!(f, "=== Detailed Statistics ===")?;
        writeln!(f, "Total characters: {}", self.stats.total_characters)?;
        writeln!(f, "Characters typed: {}", self.stats.characters_typed)?;
        writeln!(f, "Correct characters: {}", self.stats.correct_characters)?;
        write!(f, "Errors: {}", self.stats.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;

    #[test]
    fn evaluate_exact_copy() {
        let attempt = Attempt::evaluate(Difficulty::Easy, "cat", "cat", 6.0).unwrap();

        assert_eq!(attempt.accuracy, 100.0);
        assert_eq!(attempt.wpm, 6);
        assert_eq!(attempt.score, 6);
        assert_eq!(attempt.stats.errors, 0);
    }

    #[test]
    fn evaluate_applies_multiplier() {
        let attempt = Attempt::evaluate(Difficulty::Hard, "cat", "cat", 6.0).unwrap();
        assert_eq!(attempt.score, 12);
    }

    #[test]
    fn evaluate_empty_typing() {
        let attempt = Attempt::evaluate(Difficulty::Medium, "cat", "", 2.0).unwrap();

        assert_eq!(attempt.wpm, 0);
        assert_eq!(attempt.accuracy, 0.0);
        assert_eq!(attempt.score, 0);
        assert_eq!(attempt.stats.errors, 3);
    }

    #[test]
    fn evaluate_rejects_zero_time() {
        assert_matches!(
            Attempt::evaluate(Difficulty::Easy, "cat", "cat", 0.0),
            Err(Error::InvalidInput(_))
        );
    }

    #[test]
    fn display_lists_results_and_stats() {
        let attempt = Attempt::evaluate(Difficulty::Easy, "cat", "cot", 6.0).unwrap();
        let text = attempt.to_string();

        assert!(text.starts_with("=== Test Results ==="));
        assert!(text.contains("Difficulty: Easy"));
        assert!(text.contains("Time elapsed: 6.0 seconds"));
        assert!(text.contains("Accuracy: 66.67%"));
        assert!(text.contains("=== Detailed Statistics ==="));
        assert!(text.ends_with("Errors: 1"));
    }

    #[test]
    fn display_empty_typing_as_whole_zero() {
        let empty = Attempt::evaluate(Difficulty::Easy, "cat", "", 6.0).unwrap();
        assert!(empty.to_string().contains("Accuracy: 0%\n"));

        let all_wrong = Attempt::evaluate(Difficulty::Easy, "cat", "xyz", 6.0).unwrap();
        assert!(all_wrong.to_string().contains("Accuracy: 0.0%\n"));
    }
}
