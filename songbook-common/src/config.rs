//! Configuration file loading and tiered value resolution
//!
//! Every setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 are merged by the binary's argument parser before they reach
//! this module, so the helpers here only see "explicit value or not".

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Default log level when neither `--debug` nor a configured level is present
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Levels accepted by `log_level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Contents of the optional TOML config file
///
/// All fields are optional; a missing file behaves exactly like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// HTTP bind address (`host:port`)
    pub bind: Option<String>,
    /// SQLite database file
    pub database: Option<PathBuf>,
    /// Base URL of the external song metadata source
    pub external_api_url: Option<String>,
    /// One of trace, debug, info, warn, error
    pub log_level: Option<String>,
    /// Enrichment client tuning
    pub enrichment: EnrichmentSettings,
}

/// Retry and timeout settings for the enrichment client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnrichmentSettings {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_backoff_ms: u64,
    /// Upper bound for the doubling delay
    pub max_backoff_ms: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 1000,
            max_backoff_ms: 10_000,
            request_timeout_secs: 30,
        }
    }
}

impl TomlConfig {
    /// Load a TOML config file
    ///
    /// A missing file is not an error: a warning is logged and defaults are
    /// returned. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config file: {}", path.display());
        Ok(config)
    }
}

/// Pick the first explicit value, falling back to `default`
pub fn resolve<T>(explicit: Option<T>, from_file: Option<T>, default: impl FnOnce() -> T) -> T {
    explicit.or(from_file).unwrap_or_else(default)
}

/// Validate a log level name, returning it lowercased
pub fn validate_log_level(level: &str) -> Result<String> {
    let level = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&level.as_str()) {
        Ok(level)
    } else {
        Err(Error::Config(format!(
            "Unknown log level '{}' (expected one of: {})",
            level,
            LOG_LEVELS.join(", ")
        )))
    }
}

/// OS-dependent default database location
///
/// `~/.local/share/songbook/songbook.db` on Linux, the platform's local data
/// directory elsewhere, `./songbook_data/songbook.db` when none is known.
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("songbook"))
        .unwrap_or_else(|| PathBuf::from("./songbook_data"))
        .join("songbook.db")
}
