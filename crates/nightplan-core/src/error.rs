//! Error types for the nightplan library.
//!
//! Store operations report missing entities through `Option` rather than
//! through this type; `NightplanError` covers configuration, file loading
//! and parameter validation.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all nightplan operations.
#[derive(Error, Debug)]
pub enum NightplanError {
    /// Thread not found for the given ID
    #[error("Thread with ID {id} not found")]
    ThreadNotFound { id: String },
    /// Invitation not found for the given ID
    #[error("Invitation with ID {id} not found")]
    InvitationNotFound { id: String },
    /// Friend request not found for the given ID
    #[error("Friend request with ID {id} not found")]
    FriendRequestNotFound { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Malformed configuration file
    #[error("Failed to parse configuration: {source}")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> NightplanError {
        NightplanError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl NightplanError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps an I/O error together with the path it happened at.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for nightplan operations
pub type Result<T> = std::result::Result<T, NightplanError>;
