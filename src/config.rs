use crate::leaderboard::LeaderboardStore;
use anyhow::Result;
use config::{Config, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Where the leaderboard JSON lives.
    pub scores_file: PathBuf,
    /// Clear the terminal between screens, as the classic prompt flow does.
    pub clear_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scores_file: LeaderboardStore::default_path(),
            clear_screen: true,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "typa-trial").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path().as_deref())
    }

    /// Defaults overlaid with `config_path` when that file exists.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default(
                "scores_file",
                defaults.scores_file.to_string_lossy().into_owned(),
            )?
            .set_default("clear_screen", defaults.clear_screen)?;

        if let Some(path) = config_path {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let cfg = AppConfig::load_from(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn no_config_dir_gives_defaults() {
        assert_eq!(AppConfig::load_from(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "scores_file = \"/srv/typing/board.json\"\nclear_screen = false\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(cfg.scores_file, PathBuf::from("/srv/typing/board.json"));
        assert!(!cfg.clear_screen);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "clear_screen = false\n").unwrap();

        let cfg = AppConfig::load_from(Some(&path)).unwrap();
        assert_eq!(cfg.scores_file, LeaderboardStore::default_path());
        assert!(!cfg.clear_screen);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "clear_screen = [").unwrap();

        assert!(AppConfig::load_from(Some(&path)).is_err());
    }
}
