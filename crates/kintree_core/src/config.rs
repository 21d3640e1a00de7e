//! Core configuration.
//!
//! # Responsibility
//! - Hold logging and dashboard settings for hosts (CLI, FFI).
//! - Load settings from JSON with every field defaulted.
//!
//! # Invariants
//! - A loaded config has already passed `validate`.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default upcoming-birthday window in days.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;
/// Default number of upcoming birthdays shown.
pub const DEFAULT_UPCOMING_LIMIT: usize = 3;
/// Default number of recently added members shown.
pub const DEFAULT_RECENT_LIMIT: usize = 3;
const MAX_UPCOMING_WINDOW_DAYS: u32 = 366;

/// Errors from loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// A field holds a value outside its accepted range.
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::InvalidValue { field, message } => {
                write!(f, "invalid config value for `{field}`: {message}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings shared by every host of the core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
    pub upcoming_window_days: u32,
    pub upcoming_limit: usize,
    pub recent_limit: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upcoming_window_days == 0 || self.upcoming_window_days > MAX_UPCOMING_WINDOW_DAYS
        {
            return Err(ConfigError::InvalidValue {
                field: "upcoming_window_days",
                message: format!(
                    "expected 1..={MAX_UPCOMING_WINDOW_DAYS}, got {}",
                    self.upcoming_window_days
                ),
            });
        }
        if self.upcoming_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "upcoming_limit",
                message: "must be at least 1".to_string(),
            });
        }
        if self.recent_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recent_limit",
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    field: "log_dir",
                    message: format!("must be an absolute path, got `{}`", dir.display()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_UPCOMING_WINDOW_DAYS};

    #[test]
    fn empty_document_uses_defaults() {
        let config = CoreConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.upcoming_window_days, DEFAULT_UPCOMING_WINDOW_DAYS);
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = CoreConfig::from_json_str(r#"{"upcoming_window_days": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "upcoming_window_days",
                ..
            }
        ));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = CoreConfig::from_json_str(r#"{"log_dir": "logs"}"#).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CoreConfig::from_json_str(r#"{"window": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
