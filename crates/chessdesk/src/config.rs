//! Configuration management for chessdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::RecordKind;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "chessdesk";

/// Prefix for environment overrides. Nested keys are separated by `__`,
/// e.g. `CHESSDESK_STORAGE__DATA_DIR`.
const ENV_PREFIX: &str = "CHESSDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CHESSDESK_`)
/// 2. TOML config file at `~/.config/chessdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Record file names.
    pub files: FileNames,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the record files.
    /// Defaults to `~/.local/share/chessdesk`
    pub data_dir: Option<PathBuf>,
    /// Create the data directory on first write if it is missing.
    pub create_data_dir: bool,
}

/// File name of each record store, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    /// Registered accounts.
    pub accounts: String,
    /// Lesson applications.
    pub lessons: String,
    /// Puzzle attempts.
    pub puzzles: String,
    /// Game results.
    pub games: String,
    /// Coaching requests.
    pub coaching: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will be resolved to default at runtime
            create_data_dir: true,
        }
    }
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            accounts: RecordKind::Account.default_file_name().to_string(),
            lessons: RecordKind::LessonApplication.default_file_name().to_string(),
            puzzles: RecordKind::PuzzleAttempt.default_file_name().to_string(),
            games: RecordKind::GameResult.default_file_name().to_string(),
            coaching: RecordKind::CoachingRequest.default_file_name().to_string(),
        }
    }
}

impl FileNames {
    /// File name configured for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Account => &self.accounts,
            RecordKind::LessonApplication => &self.lessons,
            RecordKind::PuzzleAttempt => &self.puzzles,
            RecordKind::GameResult => &self.games,
            RecordKind::CoachingRequest => &self.coaching,
        }
    }
}

impl Config {
    /// Load configuration, reading the TOML file at `config_path` or the
    /// default location.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// Every file name must be a bare, non-empty name and no two kinds may
    /// share a file.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for kind in RecordKind::ALL {
            let name = self.files.for_kind(kind);

            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: format!("file name for {kind} records cannot be empty"),
                });
            }

            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(Error::ConfigValidation {
                    message: format!("file name for {kind} records must not be a path: {name}"),
                });
            }

            if !seen.insert(name) {
                return Err(Error::ConfigValidation {
                    message: format!("file name {name} is used by more than one record kind"),
                });
            }
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the full path of the file backing `kind`.
    #[must_use]
    pub fn store_path(&self, kind: RecordKind) -> PathBuf {
        self.data_dir().join(self.files.for_kind(kind))
    }
}
