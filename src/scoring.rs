/// Composite score: accuracy-weighted WPM scaled by the tier multiplier.
pub fn compute_score(wpm: u64, accuracy: f64, difficulty_multiplier: f64) -> u64 {
    let base = wpm as f64 * (accuracy / 100.0);
    (base * difficulty_multiplier).round_ties_even() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn perfect_accuracy_easy() {
        assert_eq!(compute_score(60, 100.0, 1.0), 60);
    }

    #[test]
    fn half_accuracy_hard() {
        assert_eq!(compute_score(60, 50.0, 2.0), 60);
    }

    #[test]
    fn medium_multiplier() {
        assert_eq!(compute_score(40, 100.0, Difficulty::Medium.multiplier()), 60);
        // 33 * 0.9 * 1.5 = 44.55
        assert_eq!(compute_score(33, 90.0, Difficulty::Medium.multiplier()), 45);
    }

    #[test]
    fn zero_inputs() {
        assert_eq!(compute_score(0, 100.0, 2.0), 0);
        assert_eq!(compute_score(120, 0.0, 2.0), 0);
    }

    #[test]
    fn halves_round_to_even() {
        // 5 * 1.0 * 1.5 = 7.5
        assert_eq!(compute_score(5, 100.0, 1.5), 8);
        // 3 * 1.0 * 1.5 = 4.5
        assert_eq!(compute_score(3, 100.0, 1.5), 4);
    }
}
