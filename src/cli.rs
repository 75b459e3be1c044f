//! Command-line interface parsing for NPS Explorer
//!
//! This module handles parsing of CLI arguments using clap and turns them,
//! together with the environment, into the settings needed at startup.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::cache::default_cache_path;

/// Cache file used when no cache directory can be determined
const FALLBACK_CACHE_FILE: &str = "nps_cache.json";

/// Error types for startup configuration
#[derive(Debug, Error)]
pub enum CliError {
    /// No MapQuest key was given on the command line, in the environment, or in `.env`
    #[error("Missing MapQuest API key: set MAPQUEST_API_KEY (or add it to .env) or pass --api-key")]
    MissingApiKey,
}

/// NPS Explorer - Browse national park sites by state and find places nearby
#[derive(Parser, Debug)]
#[command(name = "nps-explorer")]
#[command(about = "Browse US national park sites by state and find places nearby")]
#[command(version)]
pub struct Cli {
    /// Path of the response cache file
    ///
    /// Defaults to nps_cache.json in the user cache directory
    /// (e.g. ~/.cache/nps-explorer/ on Linux).
    #[arg(long, env = "NPS_CACHE_FILE", value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// MapQuest API key used for nearby-place searches
    #[arg(long, env = "MAPQUEST_API_KEY", hide_env_values = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Give up on HTTP requests after this many seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Location of the response cache file
    pub cache_path: PathBuf,
    /// MapQuest API key
    pub api_key: String,
    /// Per-request timeout, if any
    pub timeout: Option<Duration>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the cache path resolved
    /// * `Err(CliError::MissingApiKey)` if no non-blank API key was supplied
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(CliError::MissingApiKey)?
            .to_string();

        let cache_path = cli
            .cache_file
            .clone()
            .or_else(default_cache_path)
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_FILE));

        Ok(StartupConfig {
            cache_path,
            api_key,
            timeout: cli.timeout_secs.map(Duration::from_secs),
        })
    }
}
