//! Configuration loading with precedence handling.
//!
//! Precedence chain, lowest to highest: defaults → config file → environment
//! variables (`TAILVIEW_*`) → CLI arguments.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read the config file (permissions, I/O).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; unset fields fall back to defaults.
/// Corresponds to `~/.config/tailview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Start in follow mode (auto-scroll anchored to the newest line).
    #[serde(default)]
    pub follow: Option<bool>,

    /// Interval in milliseconds between stream pumps in the event loop.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Path to the file tracing output is written to.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Start in follow mode.
    pub follow: bool,
    /// Stream pump interval in milliseconds.
    pub poll_interval_ms: u64,
    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            follow: true,
            poll_interval_ms: 100,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve the default tracing log file path.
///
/// `~/.local/state/tailview/tailview.log` on Unix-like systems, the
/// platform equivalent elsewhere, falling back to the current directory if
/// no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tailview").join("tailview.log")
    } else {
        PathBuf::from("tailview.log")
    }
}

/// Resolve the default config file path.
///
/// `~/.config/tailview/config.toml` on Unix, the platform equivalent
/// elsewhere. `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tailview").join("config.toml"))
}

/// Load a configuration file from a specific path.
///
/// A missing file is not an error (`Ok(None)`): defaults apply.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with path precedence.
///
/// Highest to lowest: explicit `config_path` (CLI `--config`), the
/// `TAILVIEW_CONFIG` environment variable, then the default path.
///
/// # Errors
///
/// Returns [`ConfigError`] only if a config file exists but cannot be read
/// or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TAILVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file into the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        follow: config.follow.unwrap_or(defaults.follow),
        poll_interval_ms: config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// `TAILVIEW_LOG_FILE` overrides the tracing log file path.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(path) = std::env::var("TAILVIEW_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }

    config
}

/// Apply CLI argument overrides.
///
/// CLI args have the highest precedence. Only flags the user explicitly set
/// are applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    follow_override: Option<bool>,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(follow) = follow_override {
        config.follow = follow;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}
