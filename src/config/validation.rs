use crate::constants::page_size;
use crate::error::AppError;
use std::path::Path;

use super::Config;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL cannot be empty and must carry an http(s) scheme
/// - API key cannot be empty (there is no built-in fallback key)
/// - Cache TTL and HTTP timeout must be non-zero
/// - Page size must be within the range the upstream accepts
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.api_base_url.trim().is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }

    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://")
    {
        return Err(AppError::config_error(
            "API base URL must start with http:// or https://",
        ));
    }

    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "API key is required: set {} or api_key in the config file",
            crate::constants::env_vars::API_KEY
        )));
    }

    if config.cache_ttl_seconds == 0 {
        return Err(AppError::config_error("Cache TTL must be greater than zero"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be greater than zero",
        ));
    }

    if !(page_size::MIN..=page_size::MAX).contains(&config.per_page) {
        return Err(AppError::config_error(format!(
            "Page size must be between {} and {}, got {}",
            page_size::MIN,
            page_size::MAX,
            config.per_page
        )));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
