//! Validated persistence destination.

use crate::{FieldMapping, RecordField};
use archivist_error::{ArchivistResult, ConfigError};
use derive_getters::Getters;

/// A table plus the field mapping used to write into it.
///
/// A `Destination` is a read-only snapshot handed to each pipeline call; it
/// can only be built from a non-empty table name and a non-empty mapping.
///
/// # Examples
///
/// ```
/// use archivist_core::{Destination, FieldMapping};
///
/// let destination = Destination::new("scp_visualizations", FieldMapping::default_columns()).unwrap();
/// assert_eq!(destination.name_column(), Some("name"));
///
/// assert!(Destination::new("  ", FieldMapping::default_columns()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Destination {
    /// Destination table
    table_name: String,
    /// Field-to-column mapping
    mapping: FieldMapping,
}

impl Destination {
    /// Validate and build a destination.
    #[track_caller]
    pub fn new(table_name: impl Into<String>, mapping: FieldMapping) -> ArchivistResult<Self> {
        let table_name = table_name.into().trim().to_string();
        if table_name.is_empty() {
            return Err(ConfigError::new("A destination table name is required.").into());
        }
        if mapping.is_empty() {
            return Err(ConfigError::new(format!(
                "No fields are mapped to columns of table '{}'.",
                table_name
            ))
            .into());
        }
        Ok(Self {
            table_name,
            mapping,
        })
    }

    /// Column believed to hold record names.
    pub fn name_column(&self) -> Option<&str> {
        self.mapping.column(RecordField::Name)
    }
}
