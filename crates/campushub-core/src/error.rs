// Error taxonomy for remote store operations
//
// The gateway classifies remote failures into these variants; everything
// above it (coordinators, typed collection APIs, UI handlers) matches on the
// variant or renders the Display string in the error banner. Classification
// happens only at the gateway boundary.

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the record store and the layers built on it.
///
/// Display strings are the user-facing banner messages; the original remote
/// message is preserved only in `Remote`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No active session; the caller must log in again.
    #[error("Not authenticated. Please log in again.")]
    Unauthenticated,

    /// The remote denied read or write permission on a collection.
    #[error("Access denied to {collection}. Check the row-level security policies for the authenticated user.")]
    AccessDenied { collection: String },

    /// Unique-constraint violation.
    #[error("A record with this information already exists.")]
    DuplicateKey,

    /// Foreign-key violation.
    #[error("Invalid reference. Please check related data.")]
    InvalidReference,

    /// Not-null violation.
    #[error("Required field is missing. Please fill in all required fields.")]
    MissingRequiredField,

    /// Check-constraint violation.
    #[error("Invalid value provided. Please check your input.")]
    ConstraintViolation,

    /// The targeted record no longer exists.
    #[error("Record not found. It may have been deleted.")]
    RecordNotFound,

    /// A write named a column the collection does not have. The gateway
    /// consumes this internally for the update-timestamp retry; it only
    /// surfaces when some other column is missing.
    #[error("{message}")]
    UndefinedColumn { message: String },

    /// The remote response did not match the expected record shape.
    #[error("Unexpected response shape from {collection}: {message}")]
    Decode { collection: String, message: String },

    /// Configuration error (bad URL, missing environment variable).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catch-all preserving the original remote message.
    #[error("{message}")]
    Remote { message: String },
}

impl StoreError {
    /// Create an access-denied error naming the collection
    pub fn access_denied(collection: impl Into<String>) -> Self {
        StoreError::AccessDenied {
            collection: collection.into(),
        }
    }

    /// Create a decode error for a malformed response
    pub fn decode(collection: impl Into<String>, message: impl std::fmt::Display) -> Self {
        StoreError::Decode {
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        StoreError::Configuration(message.into())
    }

    /// Create a catch-all remote error
    pub fn remote(message: impl Into<String>) -> Self {
        StoreError::Remote {
            message: message.into(),
        }
    }
}
