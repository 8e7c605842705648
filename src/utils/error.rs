use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Contract data validation error: {message}")]
    ValidationError { message: String },

    #[error("Generation service returned {status}: {message}")]
    GenerationError { status: u16, message: String },

    #[error("Contract not found: {id}")]
    NotFound { id: String },
}

impl RadarError {
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RadarError::ApiError(_) | RadarError::GenerationError { .. } => {
                "Check network access and the API key, or unset API_KEY to use the offline brief"
            }
            RadarError::CsvError(_) | RadarError::IoError(_) => {
                "Check that the file path exists and is readable"
            }
            RadarError::SerializationError(_) | RadarError::ValidationError { .. } => {
                "Check the contract data file: it must be a JSON array of contracts with unique ids"
            }
            RadarError::ConfigValidationError { .. }
            | RadarError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command-line arguments"
            }
            RadarError::NotFound { .. } => "Run `renewal-radar radar` to list contract ids",
        }
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_and_suggestions() {
        let err = RadarError::GenerationError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Generation service returned 503: unavailable");
        assert!(err.recovery_suggestion().contains("API_KEY"));

        let err = RadarError::NotFound { id: "c42".to_string() };
        assert_eq!(err.to_string(), "Contract not found: c42");
        assert!(err.recovery_suggestion().contains("renewal-radar radar"));

        let err: RadarError = std::io::Error::other("denied").into();
        assert!(matches!(err, RadarError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: denied");
    }
}
