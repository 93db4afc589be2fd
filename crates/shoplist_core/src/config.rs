//! Runtime configuration resolved from the process environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid levels fall back to the build default.

use crate::logging::{default_log_level, parse_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "SHOPLIST_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SHOPLIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SHOPLIST_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "shoplist.sqlite3";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file backing the entity store.
    pub db_path: PathBuf,
    /// Normalized log level.
    pub log_level: &'static str,
    /// Absolute log directory. `None` keeps file logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads `SHOPLIST_DB_PATH`, `SHOPLIST_LOG_LEVEL` and `SHOPLIST_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: read(LOG_LEVEL_ENV)
                .and_then(|value| parse_level(&value).ok())
                .unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CoreConfig::default());
        assert!(config.db_path.ends_with("shoplist.sqlite3"));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /data/list.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, "/data/logs"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/list.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/data/logs")));
    }

    #[test]
    fn blank_or_invalid_values_fall_back() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "   "),
            (LOG_LEVEL_ENV, "chatty"),
            (LOG_DIR_ENV, ""),
        ]));
        assert_eq!(config.db_path, CoreConfig::default().db_path);
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
    }
}
