//! SQL identifier validation.
//!
//! Table and column names come from user settings and are spliced into SQL
//! text. Table names are restricted to plain PostgreSQL identifiers. Column
//! names are whatever the table declares, so they are quoted with embedded
//! quotes doubled.

use crate::DatabaseResult;
use archivist_error::{DatabaseError, DatabaseErrorKind};

const MAX_IDENTIFIER_LEN: usize = 63;

/// Check that `name` is a plain identifier: ASCII letters, digits and
/// underscores, not starting with a digit, at most 63 bytes.
///
/// # Examples
///
/// ```
/// use archivist_database::validate_identifier;
///
/// assert!(validate_identifier("scp_visualizations").is_ok());
/// assert!(validate_identifier("scp; DROP TABLE x").is_err());
/// ```
pub fn validate_identifier(name: &str) -> DatabaseResult<&str> {
    let valid = !name.is_empty()
        && name.len() <= MAX_IDENTIFIER_LEN
        && name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(name)
    } else {
        Err(DatabaseError::new(DatabaseErrorKind::InvalidIdentifier(
            name.to_string(),
        )))
    }
}

/// Wrap `name` in double quotes, doubling any embedded quote.
///
/// Any non-empty name of at most 63 bytes without NUL is accepted, so
/// columns such as `Object Class` can be addressed.
///
/// # Examples
///
/// ```
/// use archivist_database::quote_identifier;
///
/// assert_eq!(quote_identifier("Object Class").unwrap(), "\"Object Class\"");
/// assert_eq!(quote_identifier("say \"hi\"").unwrap(), "\"say \"\"hi\"\"\"");
/// ```
pub fn quote_identifier(name: &str) -> DatabaseResult<String> {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN || name.contains('\0') {
        return Err(DatabaseError::new(DatabaseErrorKind::InvalidIdentifier(
            name.to_string(),
        )));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Validate `name` as a plain table name and quote it.
pub fn quote_table(name: &str) -> DatabaseResult<String> {
    validate_identifier(name).and_then(quote_identifier)
}
