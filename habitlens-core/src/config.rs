//! Configuration
//!
//! Read from `$XDG_CONFIG_HOME/habitlens/config.toml` (default
//! `~/.config/habitlens/config.toml`):
//!
//! ```toml
//! [rules]
//! sleep_low = 6.5
//! steps_target = 10000
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Logs go to `$XDG_STATE_HOME/habitlens/`. Nothing else is written to disk.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analytics::rules::RuleThresholds;
use crate::error::{Error, Result};

const APP_DIR: &str = "habitlens";

/// `$var` if set, else `$HOME/<fallback>`.
fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    if let Some(dir) = std::env::var_os(var).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(fallback)
}

/// Settings read from `config.toml`; every table is optional.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Advice band boundaries and correlation note thresholds
    pub rules: RuleThresholds,
    pub logging: LoggingConfig,
}

/// The `[logging]` table
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive when `RUST_LOG` is unset (e.g. "info", "habitlens_core=debug")
    pub level: String,

    /// Rotated daily log files kept on disk
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            max_files: 5,
        }
    }
}

impl Config {
    /// Read [`Config::config_path`], falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.is_file() {
            Self::load_from(&path)
        } else {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Read and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))?;

        config.rules.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/habitlens/config.toml`
    pub fn config_path() -> PathBuf {
        xdg_dir("XDG_CONFIG_HOME", ".config")
            .join(APP_DIR)
            .join("config.toml")
    }

    /// `$XDG_STATE_HOME/habitlens/`, where logs are written
    pub fn state_dir() -> PathBuf {
        xdg_dir("XDG_STATE_HOME", ".local/state").join(APP_DIR)
    }

    /// `$XDG_STATE_HOME/habitlens/habitlens.log`; rotated files add a date suffix.
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("habitlens.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rules.sleep_low, 6.0);
        assert_eq!(config.rules.steps_target, 8000.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[rules]
sleep_low = 6.5
steps_target = 10000

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rules.sleep_low, 6.5);
        assert_eq!(config.rules.steps_target, 10000.0);
        // Untouched keys keep their defaults
        assert_eq!(config.rules.sleep_high, 9.5);
        assert_eq!(config.rules.sleep_mood_correlation, 0.25);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_rejects_inverted_bands() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rules]\nwater_low = 5000\nwater_high = 4000").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("water_low"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/habitlens.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_log_path() {
        assert!(Config::log_path().ends_with("habitlens/habitlens.log"));
    }
}
