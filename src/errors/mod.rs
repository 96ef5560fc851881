use serde::Serialize;
use thiserror::Error;
use warp::http::StatusCode;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    // Bad or missing request input, raised before any network call
    #[error("Validation error for field '{field}': {reason}")]
    ValidationError {
        field: String,
        reason: String,
    },

    // Non-2xx or malformed response from Sonar or Ollama
    #[error("{service} request failed{}: {body}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    UpstreamError {
        service: String,
        status: Option<u16>,
        body: String,
    },

    #[error("{resource} not found: {name}")]
    NotFoundError {
        resource: String,
        name: String,
    },

    #[error("I/O error during {operation}: {reason}")]
    IoError {
        operation: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        suggestion: Option<String>,
    },
}

impl AnalyzerError {
    pub fn validation_error(field: &str, reason: &str) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn upstream_error(service: &str, status: Option<u16>, body: &str) -> Self {
        Self::UpstreamError {
            service: service.to_string(),
            status,
            body: body.to_string(),
        }
    }

    pub fn not_found(resource: &str, name: &str) -> Self {
        Self::NotFoundError {
            resource: resource.to_string(),
            name: name.to_string(),
        }
    }

    pub fn io_error(operation: &str, reason: &str) -> Self {
        Self::IoError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Status code used when the error ends an HTTP request.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::NotFoundError { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamError { .. } => StatusCode::BAD_GATEWAY,
            Self::IoError { .. } | Self::ConfigurationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } => "ValidationError",
            Self::UpstreamError { .. } => "UpstreamError",
            Self::NotFoundError { .. } => "NotFoundError",
            Self::IoError { .. } => "IOError",
            Self::ConfigurationError { .. } => "ConfigurationError",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::UpstreamError { service, status, body } => {
                let mut msg = format!("{} request failed", service);
                if let Some(code) = status {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str(&format!(": {}", body));
                msg.push_str(&format!("\n💡 Check that {} is reachable and the credentials are valid", service));
                msg
            }
            other => other.to_string(),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind().to_string(),
            details: self.to_string(),
        }
    }
}

/// JSON body returned by the HTTP API on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

pub struct ErrorHandler;

impl ErrorHandler {
    /// Log technical details and print the user-facing message.
    pub fn handle_error(error: &AnalyzerError) {
        log::error!("[{}] {:?}", error.kind(), error);
        eprintln!("❌ {}", error.user_message());

        if matches!(error, AnalyzerError::ValidationError { .. } | AnalyzerError::ConfigurationError { .. }) {
            eprintln!("ℹ️ Fix the input or configuration and run the command again");
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(error: std::io::Error) -> Self {
        AnalyzerError::IoError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalyzerError {
    fn from(error: serde_json::Error) -> Self {
        AnalyzerError::IoError {
            operation: "JSON serialization".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(error: toml::de::Error) -> Self {
        AnalyzerError::ConfigurationError {
            message: format!("Invalid TOML: {}", error.message()),
            suggestion: Some("Check the syntax of your config.toml".to_string()),
        }
    }
}

impl From<reqwest::Error> for AnalyzerError {
    fn from(error: reqwest::Error) -> Self {
        AnalyzerError::UpstreamError {
            service: error
                .url()
                .and_then(|u| u.host_str().map(|h| h.to_string()))
                .unwrap_or_else(|| "HTTP".to_string()),
            status: error.status().map(|s| s.as_u16()),
            body: error.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for AnalyzerError {
    fn from(error: zip::result::ZipError) -> Self {
        AnalyzerError::IoError {
            operation: "archive creation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for AnalyzerError {
    fn from(error: walkdir::Error) -> Self {
        AnalyzerError::IoError {
            operation: "results traversal".to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_http_statuses() {
        assert_eq!(AnalyzerError::validation_error("projectKey", "required").http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(AnalyzerError::not_found("Issue", "X-1").http_status(), StatusCode::NOT_FOUND);
        assert_eq!(AnalyzerError::upstream_error("Sonar", Some(500), "boom").http_status(), StatusCode::BAD_GATEWAY);
        assert_eq!(AnalyzerError::io_error("write", "disk full").http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_display_includes_status_and_body() {
        let error = AnalyzerError::upstream_error("Sonar", Some(401), "Unauthorized");
        assert_eq!(error.to_string(), "Sonar request failed with status 401: Unauthorized");

        let error = AnalyzerError::upstream_error("Ollama", None, "connection refused");
        assert_eq!(error.to_string(), "Ollama request failed: connection refused");
    }
}
