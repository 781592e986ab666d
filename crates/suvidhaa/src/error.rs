//! Error types for the Suvidhaa backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for Suvidhaa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Suvidhaa errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed request (missing form field, bad body)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unsupported upload content type
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// File parsing error
    #[error("Failed to parse {format} file: {message}")]
    FileParse { format: String, message: String },

    /// Remote object store error
    #[error("Object store error: {0}")]
    ObjectStore(String),

    /// LLM completion error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Record not found
    #[error("{0} not found")]
    NotFound(String),

    /// Persistence error
    #[error("Database error: {0}")]
    Database(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a file parse error
    pub fn file_parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Create an object store error
    pub fn object_store(message: impl Into<String>) -> Self {
        Self::ObjectStore(message.into())
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Whether the caller is at fault (4xx) rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest(_) | Self::UnsupportedFileType(_) | Self::NotFound(_)
        )
    }

    /// Wrap unexpected errors with an operation prefix, leaving client errors untouched.
    ///
    /// Route handlers use this so a failed upload reads "Upload failed: ..." while
    /// a rejected content type still surfaces as a 400.
    pub fn with_operation(self, operation: Operation) -> Self {
        if self.is_client_error() {
            self
        } else {
            Self::Internal(format!("{} failed: {}", operation.label(), self))
        }
    }
}

/// Write operations whose server-side failures are reported with a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Document upload
    Upload,
    /// Question or suggestion submission
    Submission,
    /// Suggestion co-sign
    CoSignature,
    /// Grievance filing
    Filing,
    /// Watchlist creation
    Creation,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Submission => "Submission",
            Self::CoSignature => "Co-signature",
            Self::Filing => "Filing",
            Self::Creation => "Creation",
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for Error {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Error::BadRequest(format!("Failed to read multipart body: {}", err))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "config_error",
                msg.clone(),
            ),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            Error::UnsupportedFileType(content_type) => (
                StatusCode::BAD_REQUEST,
                "unsupported_type",
                format!("Unsupported file type: {}", content_type),
            ),
            Error::FileParse { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "parse_error",
                self.to_string(),
            ),
            Error::ObjectStore(msg) => {
                (StatusCode::BAD_GATEWAY, "object_store_error", msg.clone())
            }
            Error::Llm(msg) => (StatusCode::SERVICE_UNAVAILABLE, "llm_error", msg.clone()),
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{} not found", what),
            ),
            Error::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                msg.clone(),
            ),
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
