use crate::error::{Error, Result};
use crate::models::DetailedStats;

/// Characters per "word" in the WPM formula.
const CHARS_PER_WORD: f64 = 5.0;

/// Words per minute from a character count.
///
/// Very short elapsed times yield very large values; nothing is clamped.
pub fn compute_wpm(time_elapsed: f64, typed_char_count: usize) -> Result<u64> {
    if !(time_elapsed.is_finite() && time_elapsed > 0.0) {
        return Err(Error::invalid_input(format!(
            "elapsed time must be a positive number of seconds, got {}",
            time_elapsed
        )));
    }

    let words = typed_char_count as f64 / CHARS_PER_WORD;
    let minutes = time_elapsed / 60.0;
    Ok((words / minutes).round_ties_even() as u64)
}

/// Positional accuracy in percent, rounded to two decimals.
///
/// Characters are compared index by index, so an inserted or dropped
/// character shifts everything after it into a mismatch.
pub fn compute_accuracy(original: &str, typed: &str) -> f64 {
    if typed.is_empty() {
        return 0.0;
    }

    let correct = positional_matches(original, typed);
    let longest = original.chars().count().max(typed.chars().count());
    round_to_hundredths(correct as f64 / longest as f64 * 100.0)
}

pub fn compute_detailed_stats(original: &str, typed: &str, time_elapsed: f64) -> DetailedStats {
    let total_characters = original.chars().count();
    let characters_typed = typed.chars().count();
    let compared = total_characters.min(characters_typed);
    let correct_characters = positional_matches(original, typed);

    DetailedStats {
        total_characters,
        characters_typed,
        correct_characters,
        errors: total_characters.abs_diff(characters_typed) + (compared - correct_characters),
        time_elapsed: round_to_hundredths(time_elapsed),
    }
}

fn positional_matches(original: &str, typed: &str) -> usize {
    original
        .chars()
        .zip(typed.chars())
        .filter(|(expected, actual)| expected == actual)
        .count()
}

/// Two-decimal rounding of the exact binary value.
///
/// Goes through the decimal formatter rather than scaling by 100, which
/// would move values like 0.015 across the rounding boundary.
pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
