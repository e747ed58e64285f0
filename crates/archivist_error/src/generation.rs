//! Generation service error types.

/// Generation-specific error conditions.
///
/// The pipeline never branches on these; every kind is terminal for the one
/// identifier being generated and collapses to its display message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to build the HTTP client
    #[display("Failed to create generation client: {}", _0)]
    ClientCreation(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body did not have the expected shape
    #[display("Malformed generation response: {}", _0)]
    MalformedResponse(String),
    /// Response carried no usable content
    #[display("Generation returned no content for '{}'", _0)]
    EmptyResponse(String),
    /// Upstream refused the prompt
    #[display("Generation blocked by content policy: {}", _0)]
    Blocked(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use archivist_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
