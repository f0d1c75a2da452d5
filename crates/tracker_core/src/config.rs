//! Runtime configuration for tracker hosts.
//!
//! # Responsibility
//! - Resolve database path, log level and log directory.
//!
//! # Invariants
//! - Explicit values win over environment variables, which win over
//!   platform defaults.
//! - Resolution never touches the filesystem.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use directories::ProjectDirs;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TRACKER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TRACKER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TRACKER_LOG_DIR";

const DB_FILE_NAME: &str = "project_tracker.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    pub log_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    /// No home directory could be determined for default paths.
    NoDataDir,
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "could not determine a data directory; set {DB_PATH_ENV} and {LOG_DIR_ENV}"
            ),
            Self::InvalidLogLevel(err) => write!(f, "{LOG_LEVEL_ENV}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoDataDir => None,
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

/// Partially specified configuration, e.g. from command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl TrackerConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves configuration with an explicit variable lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let from_env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let log_level = match overrides.log_level.or_else(|| from_env(LOG_LEVEL_ENV)) {
            Some(level) => level.parse::<LogLevel>().map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let db_path = overrides
            .db_path
            .or_else(|| from_env(DB_PATH_ENV).map(PathBuf::from));
        let log_dir = overrides
            .log_dir
            .or_else(|| from_env(LOG_DIR_ENV).map(PathBuf::from));

        let (db_path, log_dir) = match (db_path, log_dir) {
            (Some(db_path), Some(log_dir)) => (db_path, log_dir),
            (db_path, log_dir) => {
                let dirs =
                    ProjectDirs::from("", "", "project-tracker").ok_or(ConfigError::NoDataDir)?;
                (
                    db_path.unwrap_or_else(|| dirs.data_dir().join(DB_FILE_NAME)),
                    log_dir.unwrap_or_else(|| dirs.data_local_dir().join("logs")),
                )
            }
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}
