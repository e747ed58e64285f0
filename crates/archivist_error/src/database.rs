//! Errors from the destination table.

/// What went wrong talking to the destination table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DatabaseErrorKind {
    /// No connection could be checked out or established
    #[display("Database connection error: {}", _0)]
    Connection(String),
    /// An insert or lookup was rejected
    #[display("Database query error: {}", _0)]
    Query(String),
    /// The destination table has no columns in the current schema
    #[display("Table '{}' not found in database", _0)]
    TableNotFound(String),
    /// A table or column name cannot be spliced into SQL
    #[display("Invalid identifier: {}", _0)]
    InvalidIdentifier(String),
    /// The blocking query task panicked or was cancelled
    #[display("Database task failed: {}", _0)]
    Task(String),
}

/// Destination table error with source location tracking.
///
/// Save failures surface this kind's message in the session notice, e.g.
/// `Failed to save SCP-173: Database query error: permission denied`.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistError, DatabaseError, DatabaseErrorKind};
///
/// let err: ArchivistError =
///     DatabaseError::new(DatabaseErrorKind::TableNotFound("scp_visualizations".into())).into();
/// assert_eq!(
///     err.user_message(),
///     "Table 'scp_visualizations' not found in database"
/// );
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Database Error: {} at line {} in {}", kind, line, file)]
pub struct DatabaseError {
    /// The kind of error that occurred
    pub kind: DatabaseErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DatabaseError {
    /// Create a new DatabaseError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DatabaseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<diesel::result::Error> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        DatabaseError::new(DatabaseErrorKind::Query(err.to_string()))
    }
}

impl From<diesel::r2d2::PoolError> for DatabaseError {
    #[track_caller]
    fn from(err: diesel::r2d2::PoolError) -> Self {
        DatabaseError::new(DatabaseErrorKind::Connection(err.to_string()))
    }
}
