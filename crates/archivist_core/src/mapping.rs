//! Mapping between logical record fields and destination columns.

use crate::{Record, RecordField};
use archivist_error::{ArchivistError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::debug;

/// One row ready for insertion, keyed by destination column.
pub type RowPayload = Map<String, Value>;

/// Partial function from [`RecordField`] to destination column name.
///
/// Fields without a column are dropped when a record is mapped; nothing is
/// ever inferred at persistence time.
///
/// # Examples
///
/// ```
/// use archivist_core::{FieldMapping, RecordField, RecordBuilder};
///
/// let mut mapping = FieldMapping::new();
/// mapping.set(RecordField::Name, "n");
/// mapping.set(RecordField::Description, "d");
///
/// let record = RecordBuilder::default()
///     .name("SCP-049")
///     .classification("Euclid")
///     .containment("Humanoid containment cell.")
///     .description("The Plague Doctor.")
///     .image_reference("")
///     .build()
///     .unwrap();
///
/// let row = mapping.map_record(&record);
/// assert_eq!(row.len(), 2);
/// assert_eq!(row["n"], "SCP-049");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct FieldMapping {
    columns: BTreeMap<RecordField, String>,
}

impl FieldMapping {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping used for a freshly created or empty table.
    pub fn default_columns() -> Self {
        RecordField::iter()
            .map(|field| (field, field.default_column().to_string()))
            .collect()
    }

    /// Map `field` to `column`. A blank column removes the field.
    pub fn set(&mut self, field: RecordField, column: impl Into<String>) {
        let column = column.into();
        let column = column.trim();
        if column.is_empty() {
            self.columns.remove(&field);
        } else {
            self.columns.insert(field, column.to_string());
        }
    }

    /// Remove the column for `field`.
    pub fn remove(&mut self, field: RecordField) -> Option<String> {
        self.columns.remove(&field)
    }

    /// The destination column for `field`, if mapped.
    pub fn column(&self, field: RecordField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    /// Whether no field is mapped.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Mapped fields in [`RecordField`] order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.columns.iter().map(|(f, c)| (*f, c.as_str()))
    }

    /// Build the row payload for `record`, containing exactly the mapped
    /// columns.
    pub fn map_record(&self, record: &Record) -> RowPayload {
        let mut row = Map::new();
        for (field, column) in &self.columns {
            row.insert(
                column.clone(),
                Value::String(field.value_of(record).to_string()),
            );
        }
        row
    }

    /// Drop every mapping whose column is not in `columns`.
    pub fn retain_columns(&mut self, columns: &[String]) {
        let known: HashSet<&str> = columns.iter().map(String::as_str).collect();
        self.columns.retain(|field, column| {
            let keep = known.contains(column.as_str());
            if !keep {
                debug!(%field, column = %column, "Discarding mapping to unknown column");
            }
            keep
        });
    }

    /// Guess a mapping from a table's column names.
    ///
    /// Exact matches on normalized names win over substring matches, and a
    /// column is assigned to at most one field.
    pub fn infer_from_columns(columns: &[String]) -> Self {
        let normalized: Vec<(String, &String)> =
            columns.iter().map(|c| (normalize_column(c), c)).collect();
        let mut taken: HashSet<&String> = HashSet::new();
        let mut mapping = FieldMapping::new();

        for field in RecordField::iter() {
            let synonyms = field.column_synonyms();
            let exact = synonyms.iter().find_map(|syn| {
                normalized
                    .iter()
                    .find(|(norm, col)| norm == syn && !taken.contains(col))
                    .map(|(_, col)| *col)
            });
            let found = exact.or_else(|| {
                synonyms.iter().find_map(|syn| {
                    normalized
                        .iter()
                        .find(|(norm, col)| norm.contains(syn) && !taken.contains(col))
                        .map(|(_, col)| *col)
                })
            });
            if let Some(column) = found {
                taken.insert(column);
                mapping.set(field, column.clone());
            }
        }

        debug!(mapped = mapping.len(), "Inferred field mapping from columns");
        mapping
    }
}

fn normalize_column(column: &str) -> String {
    column
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromIterator<(RecordField, String)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (RecordField, String)>>(iter: I) -> Self {
        let mut mapping = FieldMapping::new();
        for (field, column) in iter {
            mapping.set(field, column);
        }
        mapping
    }
}

impl TryFrom<BTreeMap<String, String>> for FieldMapping {
    type Error = ArchivistError;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut mapping = FieldMapping::new();
        for (key, column) in raw {
            let field = RecordField::from_str(&key)
                .map_err(|_| ValidationError::new(format!("Unknown record field '{}'", key)))?;
            mapping.set(field, column);
        }
        Ok(mapping)
    }
}

impl From<FieldMapping> for BTreeMap<String, String> {
    fn from(mapping: FieldMapping) -> Self {
        mapping
            .columns
            .into_iter()
            .map(|(field, column)| (field.to_string(), column))
            .collect()
    }
}

/// A single `field=column` override, as accepted on the command line.
///
/// # Examples
///
/// ```
/// use archivist_core::{FieldAssignment, RecordField};
///
/// let assignment: FieldAssignment = "imageReference=picture_url".parse().unwrap();
/// assert_eq!(*assignment.field(), RecordField::ImageReference);
/// assert_eq!(assignment.column(), "picture_url");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct FieldAssignment {
    /// Logical field
    field: RecordField,
    /// Destination column (empty to unmap)
    column: String,
}

impl FromStr for FieldAssignment {
    type Err = ArchivistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, column) = s.split_once('=').ok_or_else(|| {
            ValidationError::new(format!("Expected field=column, got '{}'", s))
        })?;
        let field = RecordField::from_str(field.trim())
            .map_err(|_| ValidationError::new(format!("Unknown record field '{}'", field.trim())))?;
        Ok(Self {
            field,
            column: column.trim().to_string(),
        })
    }
}

impl FieldAssignment {
    /// Apply this override to `mapping`.
    pub fn apply(&self, mapping: &mut FieldMapping) {
        mapping.set(self.field, self.column.clone());
    }
}
