// Scoring and leaderboard engine, plus the prompt-driven session that uses it.
pub mod attempt;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod metrics;
pub mod models;
pub mod passages;
pub mod scoring;
pub mod session;

pub use attempt::Attempt;
pub use error::{Error, Result};
pub use leaderboard::{Leaderboard, LeaderboardStore, Standings, MAX_ENTRIES};
pub use metrics::{compute_accuracy, compute_detailed_stats, compute_wpm};
pub use models::{DetailedStats, Difficulty, ScoreEntry};
pub use scoring::compute_score;
