//! Runtime configuration for the entity layer.
//!
//! Loaded from TOML. Every section and field is optional; missing values
//! fall back to [`DbConfig::default`].

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Largest page a single `list` call returns unless configured otherwise.
pub const DEFAULT_MAX_LIST_LIMIT: u32 = 1_000;

/// Retries after the first attempt before a contended write reports a conflict.
pub const DEFAULT_MAX_COMMIT_RETRIES: u32 = 8;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Config, err.to_string())
    }
}

///
/// DbConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    pub list: ListConfig,
    pub seed: SeedConfig,
    pub commit: CommitConfig,
}

impl DbConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.list.max_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "list.max_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.list.default_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "list.default_limit",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        Ok(())
    }
}

///
/// ListConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Page size used when a request carries no limit. `None` returns the
    /// full index (still capped by `max_limit`).
    pub default_limit: Option<u32>,
    pub max_limit: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            max_limit: DEFAULT_MAX_LIST_LIMIT,
        }
    }
}

///
/// SeedConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

///
/// CommitConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    /// Retries after a lost race. `0` still makes one attempt.
    pub max_retries: u32,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_COMMIT_RETRIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DbConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config, DbConfig::default());
        assert!(config.seed.enabled);
        assert_eq!(config.list.max_limit, DEFAULT_MAX_LIST_LIMIT);
        assert_eq!(config.commit.max_retries, DEFAULT_MAX_COMMIT_RETRIES);
    }

    #[test]
    fn sections_override_defaults() {
        let config = DbConfig::from_toml_str(
            r"
            [list]
            default_limit = 25
            max_limit = 100

            [seed]
            enabled = false
            ",
        )
        .expect("config should parse");

        assert_eq!(config.list.default_limit, Some(25));
        assert_eq!(config.list.max_limit, 100);
        assert!(!config.seed.enabled);
        assert_eq!(config.commit.max_retries, DEFAULT_MAX_COMMIT_RETRIES);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DbConfig::from_toml_str("[list]\npage = 3\n")
            .expect_err("unknown field should be rejected");

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_limits_fail_validation() {
        let err = DbConfig::from_toml_str("[list]\nmax_limit = 0\n")
            .expect_err("zero max_limit should be rejected");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "list.max_limit",
                ..
            }
        ));

        let err = DbConfig::from_toml_str("[list]\ndefault_limit = 0\n")
            .expect_err("zero default_limit should be rejected");
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "list.default_limit",
                ..
            }
        ));
    }

    #[test]
    fn zero_retries_is_a_single_attempt() {
        let config = DbConfig::from_toml_str("[commit]\nmax_retries = 0\n")
            .expect("zero retries should be accepted");

        assert_eq!(config.commit.max_retries, 0);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        writeln!(file, "[commit]\nmax_retries = 3").expect("temp file should be writable");

        let config = DbConfig::load(file.path()).expect("config file should load");
        assert_eq!(config.commit.max_retries, 3);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = DbConfig::load("/nonexistent/pulsedb.toml").expect_err("missing file");

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
