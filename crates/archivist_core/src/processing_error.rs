//! Per-item failure record.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A generation failure for one requested identifier.
///
/// The identifier is kept exactly as the user typed it, not canonicalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_more::Display)]
#[display("{}: {}", identifier, message)]
pub struct ProcessingError {
    /// Identifier as requested by the user
    identifier: String,
    /// Human-readable failure message
    message: String,
}

impl ProcessingError {
    /// Pair a requested identifier with a failure message.
    pub fn new(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}
