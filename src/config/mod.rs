use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the stats API, including scheme and version path.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Key sent in the `Authorization` header. Required; there is no built-in default.
    #[serde(default)]
    pub api_key: String,
    /// Team whose perspective every game is normalized from.
    #[serde(default = "default_team_id")]
    pub team_id: u32,
    /// Season queried when none is given on the command line.
    #[serde(default = "default_season")]
    pub season: i32,
    /// Number of games requested per query.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Freshness window for cached responses in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// HTTP timeout in seconds for a single upstream request.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_team_id() -> u32 {
    constants::DEFAULT_TEAM_ID
}

fn default_season() -> i32 {
    constants::DEFAULT_SEASON
}

fn default_per_page() -> u32 {
    constants::page_size::DEFAULT
}

fn default_cache_ttl() -> u64 {
    constants::cache_ttl::DEFAULT_SECONDS
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            api_key: String::new(),
            team_id: default_team_id(),
            season: default_season(),
            per_page: default_per_page(),
            cache_ttl_seconds: default_cache_ttl(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}

impl Config {
    /// Loads configuration from the default config file location.
    ///
    /// # Environment Variables
    /// - `HOOPSTATS_API_BASE_URL` - Override API base URL
    /// - `BALLDONTLIE_API_KEY` - API key
    /// - `HOOPSTATS_TEAM_ID`, `HOOPSTATS_SEASON`, `HOOPSTATS_PER_PAGE` - Query defaults
    /// - `HOOPSTATS_CACHE_TTL` - Override cache TTL in seconds (default: 300)
    /// - `HOOPSTATS_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 10)
    /// - `HOOPSTATS_LOG_FILE` - Override log file path
    ///
    /// # Notes
    /// - A missing config file is fine; defaults plus environment are used
    /// - Environment variables take precedence over config file
    /// - Fails with `AppError::Config` when no API key is configured anywhere
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Loads the file at `path` if it exists, applies environment overrides and validates.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overrides fields with environment variables that are set and parse.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(env_vars::API_BASE_URL) {
            self.api_base_url = base_url;
        }

        if let Ok(api_key) = std::env::var(env_vars::API_KEY) {
            self.api_key = api_key;
        }

        if let Some(team_id) = env_parsed(env_vars::TEAM_ID) {
            self.team_id = team_id;
        }

        if let Some(season) = env_parsed(env_vars::SEASON) {
            self.season = season;
        }

        if let Some(per_page) = env_parsed(env_vars::PER_PAGE) {
            self.per_page = per_page;
        }

        if let Some(ttl) = env_parsed(env_vars::CACHE_TTL) {
            self.cache_ttl_seconds = ttl;
        }

        if let Some(timeout) = env_parsed(env_vars::HTTP_TIMEOUT) {
            self.http_timeout_seconds = timeout;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Freshness window for cached responses
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Upper bound for a single upstream call
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// API key with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let count = self.api_key.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.api_key.chars().skip(count - 4).collect();
        format!("****{tail}")
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - The API key is masked
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            Config::default()
        };
        config.apply_env_overrides();

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", config.api_base_url);
        println!("────────────────────────────────────");
        println!("API Key:");
        if config.api_key.is_empty() {
            println!("(not set)");
        } else {
            println!("{}", config.masked_api_key());
        }
        println!("────────────────────────────────────");
        println!("Team / Season / Page Size:");
        println!("{} / {} / {}", config.team_id, config.season, config.per_page);
        println!("────────────────────────────────────");
        println!("Cache TTL / HTTP Timeout:");
        println!(
            "{} seconds / {} seconds",
            config.cache_ttl_seconds, config.http_timeout_seconds
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}", constants::LOG_FILE_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and strips a trailing
    /// slash from the base URL so URL builders can append paths.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let content = toml::to_string_pretty(&Config {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
