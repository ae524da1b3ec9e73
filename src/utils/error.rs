use thiserror::Error;

pub const INVALID_NUMERIC_MESSAGE: &str = "Numeric fields must be valid numeric values.";

#[derive(Error, Debug)]
pub enum PricerError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{}", INVALID_NUMERIC_MESSAGE)]
    InvalidNumeric { field: String, value: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unknown {field} category: '{value}'")]
    UnknownCategory { field: String, value: String },

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Reference data error: {message}")]
    ReferenceError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Data,
    Model,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PricerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricerError::InvalidNumeric { .. }
            | PricerError::MissingField { .. }
            | PricerError::UnknownCategory { .. }
            | PricerError::MalformedBody { .. } => ErrorCategory::Input,
            PricerError::ConfigError { .. }
            | PricerError::InvalidConfigValueError { .. }
            | PricerError::MissingConfigError { .. }
            | PricerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PricerError::HttpError(_) => ErrorCategory::Network,
            PricerError::CsvError(_)
            | PricerError::SerializationError(_)
            | PricerError::ReferenceError { .. } => ErrorCategory::Data,
            PricerError::ModelError { .. } => ErrorCategory::Model,
            PricerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Model => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status a handler should answer with when this error reaches it.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Input => 400,
            ErrorCategory::Network => 502,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PricerError::InvalidNumeric { field, .. } => {
                format!("Send a plain decimal number for '{}'", field)
            }
            PricerError::MissingField { field } => {
                format!("Include the '{}' field in the request", field)
            }
            PricerError::UnknownCategory { field, .. } => {
                format!("Use one of the documented {} grades", field)
            }
            PricerError::MalformedBody { .. } => {
                "Send a JSON object or a form-encoded body".to_string()
            }
            PricerError::HttpError(_) => {
                "Check network connectivity and the reference dataset URL".to_string()
            }
            PricerError::CsvError(_) | PricerError::ReferenceError { .. } => {
                "Verify the reference dataset is a CSV with carat,cut,color,clarity,depth,table,x,y,z,price columns".to_string()
            }
            PricerError::IoError(_) => "Check file paths and permissions".to_string(),
            PricerError::SerializationError(_) => "Check the payload is valid JSON".to_string(),
            PricerError::ConfigError { .. }
            | PricerError::InvalidConfigValueError { .. }
            | PricerError::MissingConfigError { .. }
            | PricerError::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML configuration file".to_string()
            }
            PricerError::ModelError { .. } => {
                "Check the training sample and model parameters".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PricerError::HttpError(_) => {
                "Could not download the reference dataset".to_string()
            }
            PricerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            PricerError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PricerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        let err = PricerError::InvalidNumeric {
            field: "carat".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), INVALID_NUMERIC_MESSAGE);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = PricerError::MissingConfigError {
            field: "reference.source".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.status_code(), 500);
        assert!(err.user_friendly_message().contains("reference.source"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err: PricerError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.recovery_suggestion().is_empty());
    }
}
