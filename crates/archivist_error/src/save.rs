//! Save reconciliation error types.

/// Save failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SaveErrorKind {
    /// Persisting one record failed
    #[display("Failed to save {}: {}", name, message)]
    Single {
        /// Name of the record that was not saved
        name: String,
        /// Underlying failure message
        message: String,
    },
    /// The multi-row insert failed and no record was marked saved
    #[display("Failed to save all items ({} records): {}", count, message)]
    Bulk {
        /// Number of records in the failed snapshot
        count: usize,
        /// Underlying failure message
        message: String,
    },
}

/// Save error with source location tracking.
///
/// # Examples
///
/// ```
/// use archivist_error::{SaveError, SaveErrorKind};
///
/// let err = SaveError::new(SaveErrorKind::Single {
///     name: "SCP-173".into(),
///     message: "permission denied".into(),
/// });
/// assert!(format!("{}", err).contains("Failed to save SCP-173"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Save Error: {} at line {} in {}", kind, line, file)]
pub struct SaveError {
    /// The kind of error that occurred
    pub kind: SaveErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SaveError {
    /// Create a new SaveError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SaveErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
