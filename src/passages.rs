use crate::error::{Error, Result};
use crate::models::Difficulty;
use rand::seq::IndexedRandom;
use rand::Rng;
use rust_embed::RustEmbed;
use serde::Deserialize;

#[derive(RustEmbed)]
#[folder = "resources/"]
struct Asset;

const PASSAGES_FILE: &str = "passages.json";

/// Fixed pool of passages per difficulty. Every pool is non-empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PassagePool {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl PassagePool {
    pub fn new(easy: Vec<String>, medium: Vec<String>, hard: Vec<String>) -> Result<Self> {
        Self { easy, medium, hard }.validated()
    }

    /// The corpus bundled with the binary.
    pub fn embedded() -> Result<Self> {
        let file = Asset::get(PASSAGES_FILE)
            .ok_or_else(|| Error::Corpus(format!("missing embedded file {}", PASSAGES_FILE)))?;
        let pool: PassagePool = serde_json::from_slice(file.data.as_ref())
            .map_err(|e| Error::Corpus(format!("could not parse {}: {}", PASSAGES_FILE, e)))?;
        pool.validated()
    }

    fn validated(self) -> Result<Self> {
        for difficulty in Difficulty::ALL {
            let passages = self.passages(difficulty);
            if passages.is_empty() {
                return Err(Error::Corpus(format!("no passages for {}", difficulty)));
            }
            if passages.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::Corpus(format!("blank passage for {}", difficulty)));
            }
        }
        Ok(self)
    }

    pub fn passages(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> &str {
        // pools are validated non-empty on construction
        self.passages(difficulty)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
