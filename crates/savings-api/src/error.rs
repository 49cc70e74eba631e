//! Error types for savings-api

use std::path::{Path, PathBuf};

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for savings-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in savings-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from savings-core
    #[error("Core error: {0}")]
    Core(#[from] savings_core::Error),

    /// Request body could not be read as JSON
    #[error("Rejected request body: {message}")]
    Rejected {
        /// Status to answer with
        status: StatusCode,
        /// Why the body was rejected
        message: String,
    },

    /// Invalid server configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error while reading configuration or serving
    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error that concerns `path`.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(savings_core::Error::Validation { .. }) => StatusCode::BAD_REQUEST,
            Error::Core(savings_core::Error::NotFound { .. }) => StatusCode::NOT_FOUND,
            Error::Rejected { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        match self {
            Error::Core(savings_core::Error::Validation { message, .. }) => message.clone(),
            Error::Core(savings_core::Error::NotFound { .. }) => "not found".to_string(),
            Error::Rejected { message, .. } => message.clone(),
            _ => "internal error".to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: format!("invalid JSON body: {e}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { path: None, source }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
