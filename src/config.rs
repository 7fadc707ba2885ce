//! Runtime settings read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `RISKCHECK_LOG_MODE` | `auto` (`file` on an interactive terminal, else `stderr`) |
//! | `RISKCHECK_LOG_FILE` | `riskcheck.log` |
//! | `RISKCHECK_DB_PATH` | unset: assessments are kept in memory only |
//! | `RISKCHECK_SANITIZE_MAX_BYTES` | 16 KiB |

use std::path::PathBuf;

use crate::adapters::sanitize::DEFAULT_SANITIZE_MAX_BYTES;

pub const LOG_MODE_ENV: &str = "RISKCHECK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "RISKCHECK_LOG_FILE";
pub const DB_PATH_ENV: &str = "RISKCHECK_DB_PATH";
pub const SANITIZE_MAX_BYTES_ENV: &str = "RISKCHECK_SANITIZE_MAX_BYTES";

const DEFAULT_LOG_FILE: &str = "riskcheck.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal, stderr otherwise
    #[default]
    Auto,
    File,
    Stderr,
}

impl LogMode {
    fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "file" => Self::File,
            "stderr" => Self::Stderr,
            _ => Self::Auto,
        }
    }

    /// Whether to log to a file given terminal interactivity.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stderr => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub db_path: Option<PathBuf>,
    pub sanitize_max_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            db_path: None,
            sanitize_max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            log_mode: non_empty(LOG_MODE_ENV).map_or(defaults.log_mode, |v| LogMode::parse(&v)),
            log_file: non_empty(LOG_FILE_ENV).map_or(defaults.log_file, PathBuf::from),
            db_path: non_empty(DB_PATH_ENV).map(PathBuf::from),
            sanitize_max_bytes: non_empty(SANITIZE_MAX_BYTES_ENV)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.sanitize_max_bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(settings(&[]), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            (LOG_MODE_ENV, "STDERR"),
            (LOG_FILE_ENV, "/tmp/rc.log"),
            (DB_PATH_ENV, "/tmp/rc.db"),
            (SANITIZE_MAX_BYTES_ENV, "4096"),
        ]);
        assert_eq!(s.log_mode, LogMode::Stderr);
        assert_eq!(s.log_file, PathBuf::from("/tmp/rc.log"));
        assert_eq!(s.db_path, Some(PathBuf::from("/tmp/rc.db")));
        assert_eq!(s.sanitize_max_bytes, 4096);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let s = settings(&[
            (LOG_MODE_ENV, "syslog"),
            (DB_PATH_ENV, "  "),
            (SANITIZE_MAX_BYTES_ENV, "0"),
        ]);
        assert_eq!(s.log_mode, LogMode::Auto);
        assert_eq!(s.db_path, None);
        assert_eq!(s.sanitize_max_bytes, DEFAULT_SANITIZE_MAX_BYTES);
    }

    #[test]
    fn test_log_mode_selection() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stderr.use_file(true));
    }
}
