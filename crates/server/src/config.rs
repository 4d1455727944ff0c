//! # Application Configuration
//!
//! This module defines the configuration structure for the `contentgen-server`
//! and loads it from an optional `config.yml` plus environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use contentgen::constants::{DEFAULT_API_KEY_ENV_VAR, DEFAULT_SECRET_NAME};
use contentgen::ProviderSettings;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// How long an untouched session is kept in memory, in minutes.
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,
    /// Settings for the completion provider.
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Where the API key is looked up.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_minutes() -> u64 {
    120
}

/// Sources for the model API key, consulted in the order listed here.
#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    /// A TOML file of named secrets. Missing files are treated as empty.
    #[serde(default = "default_secrets_path")]
    pub secrets_path: String,
    /// The entry in the secrets file holding the API key.
    #[serde(default = "default_secret_name")]
    pub secret_name: String,
    /// The environment variable holding the API key.
    #[serde(default = "default_env_var")]
    pub env_var: String,
}

fn default_secrets_path() -> String {
    "secrets.toml".to_string()
}

fn default_secret_name() -> String {
    DEFAULT_SECRET_NAME.to_string()
}

fn default_env_var() -> String {
    DEFAULT_API_KEY_ENV_VAR.to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            secrets_path: default_secrets_path(),
            secret_name: default_secret_name(),
            env_var: default_env_var(),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - An explicit `config_path_override` must exist; otherwise `config.yml` next
///   to the crate is used when present.
/// - `${VAR}` references in the file are replaced with environment values.
/// - Top-level keys like `port` are overridden by `PORT`.
/// - Nested keys are overridden by `CONTENTGEN_...` variables
///   (e.g., `CONTENTGEN_PROVIDER__MODEL_NAME`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let main_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            let content = read_and_substitute(&user_config_path)?;
            if content.is_some() {
                info!("Loading user-defined configuration from '{user_config_path}'.");
            } else {
                info!("'{user_config_path}' not found. Using built-in defaults.");
            }
            content
        }
    };
    if let Some(content) = main_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default().try_parsing(true))
        .add_source(
            Environment::with_prefix("CONTENTGEN")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config)
}
