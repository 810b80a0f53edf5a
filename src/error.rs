use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("leaderboard file {} is corrupt: {source}", .path.display())]
    CorruptPersistedState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not read leaderboard file {}: {source}", .path.display())]
    PersistenceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not save leaderboard file {}: {source}", .path.display())]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("passage corpus: {0}")]
    Corpus(String),
}

impl Error {
    pub fn invalid_input<T: Into<String>>(message: T) -> Self {
        Self::InvalidInput(message.into())
    }

    /// True when the failure happened while writing, i.e. the in-memory
    /// result is still valid but was not persisted.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Self::PersistenceWrite { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
