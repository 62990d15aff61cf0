use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(#[source] std::io::Error),

    #[error("invalid yaml format: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("the config {field} is missing")]
    MissingField { field: &'static str },

    #[error("failed to read repos file {path}: {source}")]
    ReposFileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by GitHub API calls
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("api returned error status: {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },
}

impl ApiError {
    /// Get a user-friendly error message for common HTTP status codes
    pub fn user_friendly_message(&self) -> String {
        match self {
            ApiError::UnexpectedStatus { status } => match status.as_u16() {
                401 => "unauthorized - invalid or expired token".to_string(),
                403 => "forbidden - the token lacks admin:org scope or access to this resource"
                    .to_string(),
                404 => "not found - the organization, repository or secret does not exist"
                    .to_string(),
                429 => "rate limited - too many requests, please try again later".to_string(),
                _ => format!("api error - GitHub returned status {status}"),
            },
            ApiError::RequestFailed(e) => {
                let error_str = e.to_string().to_lowercase();
                if error_str.contains("timeout") {
                    "request timeout - GitHub did not respond in time".to_string()
                } else if error_str.contains("dns") || error_str.contains("name resolution") {
                    "DNS error - could not resolve the GitHub API hostname".to_string()
                } else {
                    format!("network error - {e}")
                }
            }
        }
    }
}

/// Convenience type for Results
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_message_for_status_codes() {
        let unauthorized = ApiError::UnexpectedStatus {
            status: reqwest::StatusCode::UNAUTHORIZED,
        };
        assert!(unauthorized.user_friendly_message().contains("unauthorized"));

        let forbidden = ApiError::UnexpectedStatus {
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert!(forbidden.user_friendly_message().contains("admin:org"));

        let teapot = ApiError::UnexpectedStatus {
            status: reqwest::StatusCode::IM_A_TEAPOT,
        };
        assert!(teapot.user_friendly_message().contains("418"));
    }

    #[test]
    fn test_missing_field_message_names_the_field() {
        let err = ConfigError::MissingField { field: "secrets" };
        assert_eq!(err.to_string(), "the config secrets is missing");
    }

    #[test]
    fn test_config_error_converts_to_app_error() {
        let err: AppError = ConfigError::MissingField { field: "org" }.into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().starts_with("configuration error"));
    }
}
