//! Error types for savings-client

use thiserror::Error;

use crate::RecordState;

/// Result type alias for savings-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in savings-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from savings-core
    #[error("Core error: {0}")]
    Core(#[from] savings_core::Error),

    /// Transport failure or undecodable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `error` field of the response body, or the raw body
        message: String,
    },

    /// Base URL cannot address the API
    #[error("Invalid server URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// The board has no record with this id
    #[error("Unknown project: {id}")]
    UnknownProject {
        /// Requested id
        id: String,
    },

    /// The record's current state does not allow the requested step
    #[error("Project {id} cannot {action} while {state}")]
    InvalidTransition {
        /// Record id
        id: String,
        /// Attempted step
        action: &'static str,
        /// State the record was in
        state: RecordState,
    },
}

impl Error {
    /// Returns `true` if the server reported the project as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Returns whether repeating the request may succeed.
    ///
    /// Only transport failures and server-side (5xx) errors qualify; the API
    /// reports every client error deterministically.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
