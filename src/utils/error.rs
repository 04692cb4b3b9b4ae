use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP {status}: {snippet}")]
    HttpError { status: u16, snippet: String },

    #[error("Could not extract a PDF from the response. Snippet: {snippet}")]
    ExtractionError { snippet: String },

    #[error("Base64 decoding failed: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FetchError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Fatal errors abort the run before any request is sent.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => {
                "Set FPT_EINV_USER/FPT_EINV_PASS (or pass --username/--password) and check the sec file"
            }
            Self::HttpError { status: 401 | 403, .. } => "Check the API credentials",
            Self::HttpError { .. } => "Check the invoice code, tax id and serial",
            Self::ExtractionError { .. } | Self::DecodeError(_) => {
                "The API answered with an unexpected payload; inspect the snippet"
            }
            Self::RequestError(_) => "Check network connectivity and the base URL",
            Self::IoError(_) => "Check that the output directory is writable",
            Self::SerializationError(_) => "Check the report path",
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_errors_are_fatal() {
        assert!(FetchError::config("missing").is_fatal());
        assert!(!FetchError::HttpError {
            status: 404,
            snippet: String::new()
        }
        .is_fatal());
        assert!(!FetchError::IoError(std::io::Error::other("disk")).is_fatal());
    }

    #[test]
    fn test_http_error_message_carries_status_and_snippet() {
        let err = FetchError::HttpError {
            status: 404,
            snippet: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: not found");
    }
}
