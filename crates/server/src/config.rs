//! # Application Configuration
//!
//! This module defines the configuration structure for the `faqrelay-server` and
//! provides the logic for loading it from an optional `config.yml` file and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
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
    /// Path of the JSON file holding every client's configuration.
    #[serde(default = "default_client_config_path")]
    pub client_config_path: String,
    /// Directory that relative `faqFile` paths are resolved against.
    /// Defaults to the directory containing `client_config_path`.
    #[serde(default)]
    pub faq_base_dir: Option<String>,
    /// The tenant used when a request names no client or an unknown one.
    #[serde(default = "default_client_id")]
    pub default_client_id: String,
    /// The client answered by the demo `/chat` route.
    #[serde(default = "default_demo_client_id")]
    pub demo_client_id: String,
    /// Directory of the static widget files.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Output ceiling for each completion.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// The completion provider.
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_port() -> u16 {
    5000
}

fn default_client_config_path() -> String {
    "client-config.json".to_string()
}

fn default_client_id() -> String {
    "demo-hair-salon".to_string()
}

fn default_demo_client_id() -> String {
    "demo-gym".to_string()
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_max_output_tokens() -> u32 {
    faqrelay::constants::DEFAULT_MAX_OUTPUT_TOKENS
}

impl AppConfig {
    /// The directory FAQ files are resolved against.
    pub fn faq_base_dir(&self) -> PathBuf {
        match &self.faq_base_dir {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => Path::new(&self.client_config_path)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }
}

/// Configuration for the completion provider.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// The type of provider: "openai", "local" (any OpenAI-compatible server) or "gemini".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Optional for "openai" and "gemini", where it can be derived.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Timeout for a single provider request. No timeout when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model_name() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model_name(),
            request_timeout_secs: None,
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest priority first:
/// - built-in defaults;
/// - the YAML file: `config_path_override`, else `FAQRELAY_CONFIG`, else
///   `config.yml` in the working directory if present;
/// - top-level keys from the environment (`PORT`, `CLIENT_CONFIG_PATH`, ...);
/// - nested keys from `FAQRELAY_...` variables (e.g. `FAQRELAY_PROVIDER__MODEL_NAME`).
///
/// An explicitly requested file that does not exist is an error; the implicit
/// `config.yml` is optional.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let explicit_path = config_path_override
        .map(str::to_string)
        .or_else(|| env::var("FAQRELAY_CONFIG").ok().filter(|p| !p.is_empty()));

    match explicit_path {
        Some(path) => {
            let content = read_and_substitute(&path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute("config.yml")? {
                info!("Loading configuration from 'config.yml'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("No 'config.yml' found. Using defaults and environment variables.");
            }
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("FAQRELAY")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // Pick up the provider's conventional key variable when nothing else set one.
    if config.provider.api_key.as_deref().unwrap_or_default().is_empty() {
        let key_var = match config.provider.provider.as_str() {
            "gemini" => "GEMINI_API_KEY",
            _ => "OPENAI_API_KEY",
        };
        config.provider.api_key = env::var(key_var).ok().filter(|k| !k.is_empty());
    }

    Ok(config)
}
