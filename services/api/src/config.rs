//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub data_dir: PathBuf,
    pub llm_api_key: String,
    pub llm_api_base: Option<String>,
    pub completion_model: String,
    pub completion_temperature: f32,
    pub completion_max_tokens: u32,
    pub history_max_turns: Option<usize>,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. The model credential is the
    /// only mandatory value: without it nothing can be generated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data"));

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- Model Endpoint ---
        let llm_api_key = lookup("LLM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingVar("LLM_API_KEY".to_string()))?;
        let llm_api_base = lookup("LLM_API_BASE").filter(|base| !base.trim().is_empty());

        let completion_model =
            lookup("COMPLETION_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());
        let completion_temperature = parse_or("COMPLETION_TEMPERATURE", &lookup, 0.2_f32)?;
        let completion_max_tokens = parse_or("COMPLETION_MAX_TOKENS", &lookup, 4096_u32)?;

        // --- Session Settings ---
        let history_max_turns = match lookup("HISTORY_MAX_TURNS") {
            Some(raw) => Some(raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("HISTORY_MAX_TURNS".to_string(), e.to_string())
            })?),
            None => None,
        };

        Ok(Self {
            bind_address,
            log_level,
            data_dir,
            llm_api_key,
            llm_api_base,
            completion_model,
            completion_temperature,
            completion_max_tokens,
            history_max_turns,
            cors_origin,
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
