//! Application configuration stored as TOML.
//!
//! Missing fields take their defaults, and a missing file is the default
//! configuration. Validation reports every violation at once.

use crate::router::Catalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "postroom.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

/// Which record store backs the program.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Records live until the process exits.
    Memory,
    /// Records are kept in the JSON file at `storage.path`.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Store file for the `json` backend.
    pub path: PathBuf,

    pub authors_table: String,
    pub posts_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Navigation transitions kept in memory.
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let catalog = Catalog::default();
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from("postroom.json"),
            authors_table: catalog.authors,
            posts_table: catalog.posts,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: crate::core::DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// One reason a configuration is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("{field} must not be empty")]
    EmptyTable { field: &'static str },

    #[error("authors and posts cannot share table '{table}'")]
    SharedTable { table: String },

    #[error("session.history_limit must be > 0")]
    ZeroHistoryLimit,

    #[error("storage.path must be set for the json backend")]
    MissingStorePath,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {}", describe(.0))]
    Invalid(NonEmptyVec<ConfigViolation>),
}

fn describe(violations: &NonEmptyVec<ConfigViolation>) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn check(
    holds: bool,
    violation: impl FnOnce() -> ConfigViolation,
) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

impl AppConfig {
    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let storage = &self.storage;
        let checks = vec![
            check(!storage.authors_table.trim().is_empty(), || {
                ConfigViolation::EmptyTable {
                    field: "storage.authors_table",
                }
            }),
            check(!storage.posts_table.trim().is_empty(), || {
                ConfigViolation::EmptyTable {
                    field: "storage.posts_table",
                }
            }),
            check(storage.authors_table != storage.posts_table, || {
                ConfigViolation::SharedTable {
                    table: storage.posts_table.clone(),
                }
            }),
            check(self.session.history_limit > 0, || {
                ConfigViolation::ZeroHistoryLimit
            }),
            check(
                storage.backend != StorageBackend::Json || !storage.path.as_os_str().is_empty(),
                || ConfigViolation::MissingStorePath,
            ),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(violations)),
        }
    }

    /// Use the JSON store at `path`.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage.backend = StorageBackend::Json;
        self.storage.path = path.into();
        self
    }

    /// Table names for the router.
    pub fn catalog(&self) -> Catalog {
        Catalog {
            authors: self.storage.authors_table.clone(),
            posts: self.storage.posts_table.clone(),
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AppConfig::default()`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            let config = AppConfig::default();
            config.validate()?;
            return Ok(config);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("postroom.toml");
        fs::write(
            &path,
            "[storage]\nbackend = \"json\"\nposts_table = \"articles\"\n",
        )
        .expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.storage.posts_table, "articles");
        assert_eq!(config.storage.authors_table, "authors");
        assert_eq!(
            config.session.history_limit,
            crate::core::DEFAULT_HISTORY_LIMIT
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("postroom.toml");
        fs::write(&path, "[session]\nhistory_limit = \"lots\"\n").expect("write");

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut config = AppConfig::default().with_data_path("");
        config.storage.authors_table = String::new();
        config.storage.posts_table = String::new();
        config.session.history_limit = 0;

        match config.validate() {
            Err(ConfigError::Invalid(violations)) => {
                let violations: Vec<ConfigViolation> = violations.iter().cloned().collect();
                assert_eq!(violations.len(), 5);
                assert!(violations.contains(&ConfigViolation::ZeroHistoryLimit));
                assert!(violations.contains(&ConfigViolation::MissingStorePath));
                assert!(violations.contains(&ConfigViolation::SharedTable {
                    table: String::new()
                }));
            }
            other => panic!("expected violations, got {other:?}"),
        }
    }

    #[test]
    fn invalid_message_lists_violations() {
        let mut config = AppConfig::default();
        config.session.history_limit = 0;

        let message = config.validate().unwrap_err().to_string();
        assert_eq!(
            message,
            "Invalid configuration: session.history_limit must be > 0"
        );
    }

    #[test]
    fn catalog_follows_table_names() {
        let mut config = AppConfig::default();
        config.storage.authors_table = "writers".to_string();

        let catalog = config.catalog();
        assert_eq!(catalog.authors, "writers");
        assert_eq!(catalog.posts, "posts");
    }
}
