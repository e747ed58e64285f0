//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{ConfigError, GenerationError, HttpError, SaveError, ValidationError};

/// Every error condition an Archivist crate can surface.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistError, HttpError};
///
/// let http_err = HttpError::new("gemini-2.5-flash:generateContent", "connection refused");
/// let err: ArchivistError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error calling gemini-2.5-flash"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ArchivistErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Input validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Generation service error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Save reconciliation error
    #[from(SaveError)]
    Save(SaveError),
}

impl ArchivistErrorKind {
    /// The human-readable message, without source location.
    pub fn user_message(&self) -> String {
        match self {
            ArchivistErrorKind::Http(e) => e.user_message(),
            ArchivistErrorKind::Config(e) => e.message.clone(),
            ArchivistErrorKind::Validation(e) => e.message.clone(),
            ArchivistErrorKind::Generation(e) => e.kind.to_string(),
            #[cfg(feature = "database")]
            ArchivistErrorKind::Database(e) => e.kind.to_string(),
            ArchivistErrorKind::Save(e) => e.kind.to_string(),
        }
    }
}

/// Archivist error with kind discrimination.
///
/// # Examples
///
/// ```
/// use archivist_error::{ArchivistResult, ConfigError};
///
/// fn might_fail() -> ArchivistResult<()> {
///     Err(ConfigError::new("Missing table name"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.user_message(), "Missing table name");
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Archivist Error: {}", _0)]
pub struct ArchivistError(Box<ArchivistErrorKind>);

impl ArchivistError {
    /// Create a new error from a kind.
    pub fn new(kind: ArchivistErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ArchivistErrorKind {
        &self.0
    }

    /// The human-readable message, without source location.
    pub fn user_message(&self) -> String {
        self.0.user_message()
    }
}

// Generic From implementation for any type that converts to ArchivistErrorKind
impl<T> From<T> for ArchivistError
where
    T: Into<ArchivistErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Archivist operations.
pub type ArchivistResult<T> = std::result::Result<T, ArchivistError>;
