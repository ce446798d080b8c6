use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from API: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API rejected credentials ({status}): {url}")]
    ApiUnauthorized { status: u16, url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an unauthorized error (401/403)
    pub fn api_unauthorized(status: u16, url: impl Into<String>) -> Self {
        Self::ApiUnauthorized {
            status,
            url: url.into(),
        }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes without a dedicated variant)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// True for every error an HTTP call to the upstream API can produce.
    ///
    /// The cache fallback recovers from any error; this only decides how a
    /// failed fetch is logged.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::ApiParse(_)
                | AppError::ApiNotFound { .. }
                | AppError::ApiUnauthorized { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiRateLimit { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiMalformedJson { .. }
                | AppError::ApiUnexpectedStructure { .. }
                | AppError::ApiNoData { .. }
        )
    }

    /// Check if error is transient (network issues, server errors, rate limits).
    ///
    /// Only used to pick the log level; upstream calls are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::ApiRateLimit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("API key is required");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: API key is required");
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_api_not_found_helper() {
        let error = AppError::api_not_found("https://api.example.com/teams/99");
        assert!(matches!(error, AppError::ApiNotFound { .. }));
        assert_eq!(
            error.to_string(),
            "API request not found (404): https://api.example.com/teams/99"
        );
    }

    #[test]
    fn test_api_unauthorized_helper() {
        let error = AppError::api_unauthorized(401, "https://api.example.com/games");
        assert!(matches!(error, AppError::ApiUnauthorized { status: 401, .. }));
        assert_eq!(
            error.to_string(),
            "API rejected credentials (401): https://api.example.com/games"
        );
    }

    #[test]
    fn test_api_rate_limit_helper() {
        let error = AppError::api_rate_limit("Too Many Requests", "https://api.example.com");
        assert_eq!(
            error.to_string(),
            "API rate limit exceeded (429): Too Many Requests (URL: https://api.example.com)"
        );
    }

    #[test]
    fn test_network_timeout_helper() {
        let error = AppError::network_timeout("https://api.example.com/games");
        assert!(matches!(error, AppError::NetworkTimeout { .. }));
        assert_eq!(
            error.to_string(),
            "Network timeout while fetching data from: https://api.example.com/games"
        );
    }

    #[test]
    fn test_upstream_failures_are_recoverable() {
        let upstream_errors = vec![
            AppError::api_not_found("u"),
            AppError::api_unauthorized(403, "u"),
            AppError::api_server_error(500, "boom", "u"),
            AppError::api_client_error(400, "bad", "u"),
            AppError::api_rate_limit("slow down", "u"),
            AppError::api_service_unavailable(503, "down", "u"),
            AppError::network_timeout("u"),
            AppError::network_connection("u", "refused"),
            AppError::api_malformed_json("not json", "u"),
            AppError::api_unexpected_structure("missing data", "u"),
            AppError::api_no_data("empty", "u"),
        ];

        for error in upstream_errors {
            assert!(
                error.is_upstream_failure(),
                "Error {error:?} should be an upstream failure"
            );
        }
    }

    #[test]
    fn test_local_errors_are_not_upstream_failures() {
        let local_errors = vec![
            AppError::config_error("missing key"),
            AppError::log_setup_error("no dir"),
            AppError::Io(std::io::Error::other("disk")),
        ];

        for error in local_errors {
            assert!(
                !error.is_upstream_failure(),
                "Error {error:?} should not be an upstream failure"
            );
        }
    }

    #[test]
    fn test_is_retryable() {
        assert!(AppError::network_timeout("u").is_retryable());
        assert!(AppError::api_rate_limit("r", "u").is_retryable());
        assert!(AppError::api_service_unavailable(502, "bad gateway", "u").is_retryable());
        assert!(!AppError::api_not_found("u").is_retryable());
        assert!(!AppError::api_unauthorized(401, "u").is_retryable());
        assert!(!AppError::config_error("c").is_retryable());
    }
}
