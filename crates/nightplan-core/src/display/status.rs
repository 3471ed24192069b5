//! Feedback lines for store operations.

use std::fmt;

/// One-line result of an operation, as shown after a shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// The operation changed something
    Done(String),
    /// The operation was valid but had nothing to change
    Unchanged(String),
    /// The referenced entity does not exist
    NotFound(String),
}

impl OperationStatus {
    /// `Done` when `found` holds, `NotFound` otherwise.
    pub fn found_or<T>(found: Option<T>, done: impl Into<String>, what: impl Into<String>) -> Self {
        match found {
            Some(_) => Self::Done(done.into()),
            None => Self::NotFound(what.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Done(message) => writeln!(f, "✓ {message}"),
            Self::Unchanged(message) => writeln!(f, "· {message}"),
            Self::NotFound(what) => writeln!(f, "Not found: {what}"),
        }
    }
}
