//! Identifier normalization.
//!
//! Manual input is split on newlines and commas, file input on newlines
//! only. Tokens are trimmed, blanks dropped, and later duplicates removed
//! under upper-case comparison while the first spelling is kept.

use archivist_error::{ArchivistResult, ValidationError};
use derive_getters::Getters;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

static TEXT_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n,]+").expect("Valid separator regex"));

const EMPTY_TEXT_MESSAGE: &str = "Please enter at least one SCP designation.";
const EMPTY_FILE_MESSAGE: &str = "The imported CSV file is empty or invalid.";
const UNREADABLE_FILE_MESSAGE: &str = "Failed to read the imported file.";

/// Comparison key for an identifier: trimmed and upper-cased.
///
/// # Examples
///
/// ```
/// assert_eq!(archivist_pipeline::canonicalize("  scp-173 "), "SCP-173");
/// ```
pub fn canonicalize(token: &str) -> String {
    token.trim().to_uppercase()
}

/// One requested identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Identifier {
    /// Trimmed token as the user typed it
    requested: String,
    /// Upper-cased comparison key
    canonical: String,
}

impl Identifier {
    fn new(token: &str) -> Self {
        let requested = token.trim().to_string();
        let canonical = canonicalize(&requested);
        Self {
            requested,
            canonical,
        }
    }
}

/// Ordered, deduplicated, non-empty identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBatch {
    identifiers: Vec<Identifier>,
}

impl IdentifierBatch {
    /// Identifiers in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.identifiers.iter()
    }

    /// Number of identifiers, always at least one.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Always `false`; an empty batch cannot be built.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Tokens to submit to generation.
    pub fn requested(&self) -> Vec<String> {
        self.identifiers.iter().map(|i| i.requested.clone()).collect()
    }

    /// Comparison keys, in the same order.
    pub fn canonical_names(&self) -> Vec<String> {
        self.identifiers.iter().map(|i| i.canonical.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a IdentifierBatch {
    type Item = &'a Identifier;
    type IntoIter = std::slice::Iter<'a, Identifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.identifiers.iter()
    }
}

fn collect_unique<'a>(
    tokens: impl Iterator<Item = &'a str>,
    empty_message: &str,
) -> ArchivistResult<IdentifierBatch> {
    let mut seen = HashSet::new();
    let identifiers: Vec<Identifier> = tokens
        .filter(|t| !t.trim().is_empty())
        .map(Identifier::new)
        .filter(|id| seen.insert(id.canonical.clone()))
        .collect();

    if identifiers.is_empty() {
        return Err(ValidationError::new(empty_message).into());
    }
    debug!(count = identifiers.len(), "Normalized identifiers");
    Ok(IdentifierBatch { identifiers })
}

/// Normalize manually entered text (newline and/or comma separated).
///
/// # Errors
///
/// Returns a validation error if no non-empty token remains.
///
/// # Examples
///
/// ```
/// use archivist_pipeline::normalize_text;
///
/// let batch = normalize_text("SCP-173, scp-173\n\nSCP-049,,").unwrap();
/// assert_eq!(batch.requested(), vec!["SCP-173", "SCP-049"]);
/// ```
pub fn normalize_text(raw: &str) -> ArchivistResult<IdentifierBatch> {
    collect_unique(TEXT_SEPARATORS.split(raw), EMPTY_TEXT_MESSAGE)
}

/// Normalize imported file content (one identifier per line).
///
/// # Errors
///
/// Returns a validation error if no non-empty line remains.
pub fn normalize_file(content: &str) -> ArchivistResult<IdentifierBatch> {
    collect_unique(content.lines(), EMPTY_FILE_MESSAGE)
}

/// Read and normalize an identifier file.
///
/// # Errors
///
/// Returns a validation error if the file cannot be read or holds no
/// identifiers.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_identifier_file(path: impl AsRef<Path>) -> ArchivistResult<IdentifierBatch> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        warn!(error = %e, "Could not read identifier file");
        ValidationError::new(UNREADABLE_FILE_MESSAGE)
    })?;
    normalize_file(&content)
}
