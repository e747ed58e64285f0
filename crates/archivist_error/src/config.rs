//! Destination and settings errors.

/// Something the user must fix in their setup before the pipeline can run.
///
/// Covers a missing or invalid destination (no connection, blank table, empty
/// field mapping) and settings or tunables files that cannot be read, parsed
/// or written. The message is shown to the user verbatim.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistError, ConfigError};
///
/// let err: ArchivistError =
///     ConfigError::new("Database not connected. Please connect via settings to save.").into();
/// assert!(err.user_message().starts_with("Database not connected."));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Message shown to the user
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Raise a setup problem at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
