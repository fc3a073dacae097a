use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    ApiError { status: u16, detail: Option<String> },

    #[error("Malformed API response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    /// HTTP status of the API response, when the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::NetworkError(_) | Self::ApiError { .. } | Self::MalformedResponse { .. } => {
                ErrorSeverity::Medium
            }
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorSeverity::High
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::NetworkError(_) => "Unable to reach the authentication API".to_string(),
            Self::ApiError { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
            Self::MalformedResponse { .. } => "Unexpected response from server".to_string(),
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                "Unable to access local session storage".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "Check the form values and submit again",
            Self::NetworkError(_) => "Make sure the backend is running and --api-url points at it",
            Self::ApiError { status: 401, .. } => "Log in again with valid credentials",
            Self::ApiError { .. } | Self::MalformedResponse { .. } => {
                "Check the backend logs for details"
            }
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                "Check that the storage path is writable, or remove the corrupted file"
            }
            _ => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_and_friendly_message() {
        let err = AuthError::ApiError {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 400: Email already registered"
        );
        assert_eq!(err.user_friendly_message(), "Email already registered");
        assert_eq!(err.status(), Some(400));

        let err = AuthError::ApiError {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_friendly_message(), "Unknown error");
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(
            AuthError::validation("Passwords do not match").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(AuthError::storage("locked").severity(), ErrorSeverity::High);
        assert_eq!(
            AuthError::ConfigError {
                message: "bad".to_string()
            }
            .severity(),
            ErrorSeverity::Critical
        );
    }
}
