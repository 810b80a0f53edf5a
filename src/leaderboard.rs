use crate::error::{Error, Result};
use crate::models::{Difficulty, ScoreEntry};
use chrono::{Local, NaiveDateTime, SubsecRound};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Entries kept per difficulty.
pub const MAX_ENTRIES: usize = 5;

const FALLBACK_FILE: &str = "typing_high_scores.json";

/// Best results per difficulty, each list sorted by descending score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub easy: Vec<ScoreEntry>,
    pub medium: Vec<ScoreEntry>,
    pub hard: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn entries(&self, difficulty: Difficulty) -> &[ScoreEntry] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn entries_mut(&mut self, difficulty: Difficulty) -> &mut Vec<ScoreEntry> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Adds an entry and trims the tier back to [`MAX_ENTRIES`].
    ///
    /// The sort is stable, so an entry tied with existing ones lands after
    /// them and is the first to be dropped.
    pub fn insert(&mut self, difficulty: Difficulty, entry: ScoreEntry) {
        let entries = self.entries_mut(difficulty);
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
    }

    pub fn render(&self, difficulty: Difficulty) -> Standings<'_> {
        let entries = self.entries(difficulty);
        if entries.is_empty() {
            return Standings::Empty { difficulty };
        }

        let rows = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| RankedRow { rank: i + 1, entry })
            .collect();
        Standings::Ranked { difficulty, rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub entry: &'a ScoreEntry,
}

/// Display form of one tier of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Standings<'a> {
    Empty {
        difficulty: Difficulty,
    },
    Ranked {
        difficulty: Difficulty,
        rows: Vec<RankedRow<'a>>,
    },
}

impl fmt::Display for Standings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standings::Empty { difficulty } => {
                writeln!(f, "High Scores for {} Level:", difficulty.label())?;
                write!(f, "No high scores yet!")
            }
            Standings::Ranked { difficulty, rows } => {
                writeln!(f, "High Scores for {} Level:", difficulty.label())?;
                writeln!(f)?;
                writeln!(f, "Rank  Score  WPM    Accuracy  Date")?;
                write!(f, "{}", "-".repeat(45))?;
                for row in rows {
                    write!(
                        f,
                        "\n{:2}.   {:5}  {:3}    {:5.1}%   {}",
                        row.rank,
                        row.entry.score,
                        row.entry.wpm,
                        row.entry.accuracy,
                        row.entry.formatted_timestamp()
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Reads and rewrites the leaderboard file. Holds no leaderboard state of
/// its own; callers own the [`Leaderboard`] value.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "typa-trial")
            .map(|dirs| dirs.data_local_dir().join("high_scores.json"))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Only a missing file yields an empty leaderboard; anything unreadable
    /// or unparsable is an error.
    pub fn load(&self) -> Result<Leaderboard> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no leaderboard file yet");
                return Ok(Leaderboard::default());
            }
            Err(source) => {
                return Err(Error::PersistenceRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let board: Leaderboard =
            serde_json::from_str(&raw).map_err(|source| Error::CorruptPersistedState {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            easy = board.easy.len(),
            medium = board.medium.len(),
            hard = board.hard.len(),
            "loaded leaderboard"
        );
        Ok(board)
    }

    /// Records a result stamped with the current local time and rewrites the
    /// whole file.
    ///
    /// `board` is updated before the write. If saving fails the update is kept
    /// in memory and the error is returned, so memory and disk can diverge.
    pub fn record_score(
        &self,
        board: &mut Leaderboard,
        difficulty: Difficulty,
        score: u64,
        wpm: u64,
        accuracy: f64,
    ) -> Result<ScoreEntry> {
        let now = Local::now().naive_local().trunc_subsecs(0);
        self.record_score_at(board, difficulty, score, wpm, accuracy, now)
    }

    pub fn record_score_at(
        &self,
        board: &mut Leaderboard,
        difficulty: Difficulty,
        score: u64,
        wpm: u64,
        accuracy: f64,
        timestamp: NaiveDateTime,
    ) -> Result<ScoreEntry> {
        let entry = ScoreEntry {
            score,
            wpm,
            accuracy,
            timestamp,
        };
        board.insert(difficulty, entry.clone());
        info!(%difficulty, score, wpm, accuracy, "recorded score");

        self.save(board)?;
        Ok(entry)
    }

    /// Writes the full document to a sibling temp file, then renames it into
    /// place.
    pub fn save(&self, board: &Leaderboard) -> Result<()> {
        let write_failure = |source: io::Error| Error::PersistenceWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_failure)?;
        }

        let json = to_json(board).map_err(|err| write_failure(err.into()))?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(write_failure)?;

        if let Err(err) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
            }
            return Err(write_failure(err));
        }

        debug!(path = %self.path.display(), "saved leaderboard");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn to_json(board: &Leaderboard) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    board.serialize(&mut serializer)?;
    Ok(buf)
}
