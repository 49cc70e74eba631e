//! Error types for savings-core.

/// Errors reported by the savings stores.
///
/// Every error is deterministic given the same input and store state; the
/// stores perform no I/O and have no transient failure modes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input rejected before touching any store
    #[error("{message}")]
    Validation {
        /// Field that failed validation, if a single one did
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// No project with the requested id
    #[error("project not found: {id}")]
    NotFound {
        /// Project id that was not found
        id: String,
    },
}

/// Convenience `Result` type alias for savings-core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new not-found error for a project id.
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Returns whether this error is retryable.
    ///
    /// Always `false`: repeating the same request against the same state
    /// produces the same error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Validation { .. } => false,
            Error::NotFound { .. } => false,
        }
    }
}
