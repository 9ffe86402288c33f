//! Service configuration
//!
//! Command-line arguments and environment variables are merged by clap;
//! [`ServiceConfig::resolve`] layers the optional TOML file and compiled
//! defaults underneath them.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use songbook_common::config::{
    default_database_path, resolve, validate_log_level, EnrichmentSettings, TomlConfig,
    DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LEVEL,
};
use songbook_common::{Error, Result};

/// Command-line arguments for songbook-api
#[derive(Parser, Debug, Default)]
#[command(name = "songbook-api")]
#[command(about = "Song catalog HTTP service")]
#[command(version)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "SONGBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(short, long, env = "SONGBOOK_BIND")]
    pub bind: Option<String>,

    /// SQLite database file
    #[arg(long, env = "SONGBOOK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Base URL of the external song metadata source
    #[arg(long, env = "EXTERNAL_API_URL")]
    pub external_api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, env = "SONGBOOK_DEBUG")]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SONGBOOK_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub database: PathBuf,
    pub external_api_url: String,
    pub log_level: String,
    pub enrichment: EnrichmentSettings,
}

impl ServiceConfig {
    /// Merge arguments with the config file and defaults
    ///
    /// `--debug` wins over any configured log level.
    pub fn resolve(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        let bind_str = resolve(args.bind, file.bind, || DEFAULT_BIND_ADDRESS.to_string());
        let bind = bind_str
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_str, e)))?;

        let database = resolve(args.database, file.database, default_database_path);

        let external_api_url = args
            .external_api_url
            .or(file.external_api_url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "External API URL is required (--external-api-url or EXTERNAL_API_URL)"
                        .to_string(),
                )
            })?;

        let log_level = if args.debug {
            "debug".to_string()
        } else {
            validate_log_level(&resolve(args.log_level, file.log_level, || {
                DEFAULT_LOG_LEVEL.to_string()
            }))?
        };

        Ok(Self {
            bind,
            database,
            external_api_url,
            log_level,
            enrichment: file.enrichment,
        })
    }

    /// Default tracing filter directive for this service's crates
    pub fn filter_directive(&self) -> String {
        format!(
            "songbook_api={lvl},songbook_common={lvl},tower_http={lvl}",
            lvl = self.log_level
        )
    }
}
