use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutofillError {
    #[error("Directory request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Directory returned HTTP {status} for {url}")]
    StatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Form error: {message}")]
    FormError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Ui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AutofillError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AutofillError::HttpError(_) | AutofillError::StatusError { .. } => {
                ErrorCategory::Network
            }
            AutofillError::SerializationError(_) => ErrorCategory::Data,
            AutofillError::IoError(_) => ErrorCategory::System,
            AutofillError::UrlError(_)
            | AutofillError::ConfigError { .. }
            | AutofillError::InvalidConfigValueError { .. }
            | AutofillError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AutofillError::FormError { .. } => ErrorCategory::Ui,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Ui => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AutofillError::HttpError(_) => {
                "Check that the directory service is reachable and the base URL is correct"
            }
            AutofillError::StatusError { status, .. } if *status == 401 || *status == 403 => {
                "The search endpoint is admin-only; provide a valid session cookie"
            }
            AutofillError::StatusError { .. } => "Retry later or inspect the backend logs",
            AutofillError::SerializationError(_) => {
                "The directory response was not the expected JSON shape"
            }
            AutofillError::IoError(_) => "Check file permissions and paths",
            AutofillError::UrlError(_) => "Use an absolute http(s) URL for the directory base URL",
            AutofillError::ConfigError { .. }
            | AutofillError::InvalidConfigValueError { .. }
            | AutofillError::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            AutofillError::FormError { .. } => "Make sure the page contains the expected fields",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the pincode directory: {}", self),
            ErrorCategory::Data => format!("Unexpected directory response: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
            ErrorCategory::Ui => format!("Page error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AutofillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_network_medium() {
        let err = AutofillError::StatusError {
            status: 500,
            url: "http://localhost/admin/pincodes/search".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("pincode directory"));
    }

    #[test]
    fn test_forbidden_suggests_session_cookie() {
        let err = AutofillError::StatusError {
            status: 403,
            url: "http://localhost".to_string(),
        };
        assert!(err.recovery_suggestion().contains("session cookie"));
    }

    #[test]
    fn test_config_errors_are_high() {
        let err = AutofillError::InvalidConfigValueError {
            field: "directory.base_url".to_string(),
            value: "ftp://directory".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
