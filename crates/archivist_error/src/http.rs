//! Transport failures talking to the generation service.

/// A request that never produced an HTTP response.
///
/// `endpoint` names the remote method that was being called, such as
/// `gemini-2.5-flash:generateContent` for dossier text or
/// `imagen-3.0-generate-002:predict` for the dossier image, so a failed item
/// says which half of the dossier was lost.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error calling {}: {} at line {} in {}", endpoint, message, line, file)]
pub struct HttpError {
    /// Remote method that was called
    pub endpoint: String,
    /// Transport failure reported by the client
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Record a transport failure against `endpoint`.
    ///
    /// # Examples
    ///
    /// ```
    /// use archivist_error::HttpError;
    ///
    /// let err = HttpError::new("imagen-3.0-generate-002:predict", "operation timed out");
    /// assert_eq!(
    ///     err.user_message(),
    ///     "Request to imagen-3.0-generate-002:predict failed: operation timed out"
    /// );
    /// ```
    #[track_caller]
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The failure as shown against a processing error.
    pub fn user_message(&self) -> String {
        format!("Request to {} failed: {}", self.endpoint, self.message)
    }
}
