use anyhow::Result;
use dirs_next::config_dir;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::canon::Canon;
use crate::utils::error::AppError;

pub const DEFAULT_TRANSLATION: &str = "GNT";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 250;
pub const DEFAULT_PASSAGE_BASE_URL: &str = "https://www.biblegateway.com";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Optional settings read from `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub translation: Option<String>,
    pub canon: Option<Canon>,
    pub model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub passage_base_url: Option<String>,
    pub gemini_endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub translation: String,
    pub canon: Canon,
    pub model: String,
    pub max_output_tokens: u32,
    pub passage_base_url: String,
    pub gemini_endpoint: String,
    pub timeout_secs: u64,
    pub gemini_api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            translation: DEFAULT_TRANSLATION.to_string(),
            canon: Canon::default(),
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            passage_base_url: DEFAULT_PASSAGE_BASE_URL.to_string(),
            gemini_endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            gemini_api_key: None,
        }
    }
}

impl AppConfig {
    /// Layers defaults, then the config file, then environment variables.
    pub fn resolve<F>(file: Option<FileConfig>, lookup: F) -> Result<AppConfig, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(file) = file {
            if let Some(translation) = file.translation {
                config.translation = translation;
            }
            if let Some(canon) = file.canon {
                config.canon = canon;
            }
            if let Some(model) = file.model {
                config.model = model;
            }
            if let Some(tokens) = file.max_output_tokens {
                config.max_output_tokens = tokens;
            }
            if let Some(url) = file.passage_base_url {
                config.passage_base_url = url;
            }
            if let Some(endpoint) = file.gemini_endpoint {
                config.gemini_endpoint = endpoint;
            }
            if let Some(secs) = file.timeout_secs {
                config.timeout_secs = secs;
            }
        }

        if let Some(translation) = env_var("VERSICLE_TRANSLATION") {
            config.translation = translation;
        }
        if let Some(canon) = env_var("VERSICLE_CANON") {
            config.canon = Canon::parse(&canon).ok_or_else(|| {
                AppError::ConfigError(format!("unknown canon '{}' in VERSICLE_CANON", canon))
            })?;
        }
        if let Some(model) = env_var("VERSICLE_MODEL") {
            config.model = model;
        }
        if let Some(url) = env_var("VERSICLE_PASSAGE_URL") {
            config.passage_base_url = url;
        }
        if let Some(endpoint) = env_var("VERSICLE_GEMINI_ENDPOINT") {
            config.gemini_endpoint = endpoint;
        }
        config.gemini_api_key = env_var("GEMINI_API_KEY");

        config.translation = config.translation.trim().to_uppercase();
        if config.translation.is_empty() {
            return Err(AppError::ConfigError("translation must not be empty".to_string()));
        }
        if config.max_output_tokens == 0 {
            return Err(AppError::ConfigError(
                "max_output_tokens must be greater than zero".to_string(),
            ));
        }
        if config.timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

/// Get the configuration directory inside `$HOME/.config/versicle`.
/// Creates the directory if it doesn’t exist.
pub fn get_config_dir() -> Result<PathBuf, AppError> {
    let Some(mut conf_dir) = config_dir() else {
        return Err(AppError::ConfigError(String::from(
            "Could not find the configuration directory",
        )));
    };

    conf_dir.push("versicle");

    if !conf_dir.exists() {
        fs::create_dir_all(&conf_dir).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to create configuration directory {}: {}",
                &conf_dir.to_string_lossy(),
                e
            ))
        })?;
    }

    Ok(conf_dir)
}

/// Reads and parses a config file. A missing file is not an error.
pub fn read_config(config_path: &Path) -> Result<Option<FileConfig>, AppError> {
    if !config_path.exists() {
        return Ok(None);
    }

    let toml_content = fs::read_to_string(config_path).map_err(|e| {
        log::error!(
            "Failed to read file {}: {}",
            &config_path.to_string_lossy(),
            e
        );
        AppError::ConfigError(format!(
            "Failed to read file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    let file_config: FileConfig = toml::from_str(&toml_content).map_err(|e| {
        log::error!(
            "Failed to parse file {}: {}",
            &config_path.to_string_lossy(),
            e
        );
        AppError::ConfigError(format!(
            "Failed to parse file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    Ok(Some(file_config))
}

/// Loads `.env`, then `config.toml` from the config directory, then the
/// process environment.
pub fn load_config() -> Result<AppConfig> {
    dotenv::dotenv().ok();
    let config_path = get_config_dir()?.join("config.toml");
    let file_config = read_config(&config_path)?;
    let config = AppConfig::resolve(file_config, |name| env::var(name).ok())?;
    Ok(config)
}
