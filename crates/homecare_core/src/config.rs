//! Runtime configuration read from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `HOMECARE_LOG_LEVEL` | `trace|debug|info|warn|error` | build-mode default |
//! | `HOMECARE_LOG_DIR` | absolute log directory | logging off |
//! | `HOMECARE_AUDIT_DB` | SQLite audit database path | in-memory audit |
//! | `HOMECARE_PAGE_SIZE` | list rows per page | 15 |

use crate::logging::{default_log_level, normalize_level};
use crate::pagination::{Paginator, DEFAULT_PAGE_SIZE};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "HOMECARE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "HOMECARE_LOG_DIR";
pub const ENV_AUDIT_DB: &str = "HOMECARE_AUDIT_DB";
pub const ENV_PAGE_SIZE: &str = "HOMECARE_PAGE_SIZE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidPageSize(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::InvalidPageSize(value) => {
                write!(f, "{ENV_PAGE_SIZE} must be a positive integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub audit_db_path: Option<PathBuf>,
    pub page_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            audit_db_path: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level)
                .map_err(ConfigError::InvalidLogLevel)?
                .to_string();
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        config.audit_db_path = read(ENV_AUDIT_DB).map(PathBuf::from);

        if let Some(raw) = read(ENV_PAGE_SIZE) {
            config.page_size = match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::InvalidPageSize(raw)),
            };
        }

        Ok(config)
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page_size).unwrap_or_default()
    }
}
