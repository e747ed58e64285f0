//! The fixed set of logical record fields.

use crate::Record;
use serde::{Deserialize, Serialize};

/// A logical field of a [`Record`] that can be mapped to a destination column.
///
/// The set is closed; `saved` is session state and never persisted.
///
/// # Examples
///
/// ```
/// use archivist_core::RecordField;
/// use std::str::FromStr;
///
/// assert_eq!(RecordField::from_str("imageReference").unwrap(), RecordField::ImageReference);
/// assert_eq!(RecordField::Classification.to_string(), "classification");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum RecordField {
    /// Name / item number
    Name,
    /// Object class
    Classification,
    /// Containment procedures
    Containment,
    /// Description
    Description,
    /// Image URL or data handle
    ImageReference,
}

impl RecordField {
    /// Human-readable label used when presenting the mapping.
    pub fn label(&self) -> &'static str {
        match self {
            RecordField::Name => "Name / Item #",
            RecordField::Classification => "Class",
            RecordField::Containment => "Containment Procedures",
            RecordField::Description => "Description",
            RecordField::ImageReference => "Image URL",
        }
    }

    /// Column name used when no mapping has been configured.
    pub fn default_column(&self) -> &'static str {
        match self {
            RecordField::Name => "name",
            RecordField::Classification => "class",
            RecordField::Containment => "containment",
            RecordField::Description => "description",
            RecordField::ImageReference => "image_url",
        }
    }

    /// Column names commonly used for this field, normalized to lowercase
    /// alphanumerics.
    pub(crate) fn column_synonyms(&self) -> &'static [&'static str] {
        match self {
            RecordField::Name => &["name", "itemnumber", "item", "designation", "scp", "title"],
            RecordField::Classification => &["class", "objectclass", "classification"],
            RecordField::Containment => &[
                "containment",
                "containmentprocedures",
                "specialcontainmentprocedures",
                "procedures",
            ],
            RecordField::Description => &["description", "desc", "details", "summary"],
            RecordField::ImageReference => &[
                "imageurl",
                "image",
                "imagereference",
                "img",
                "picture",
            ],
        }
    }

    /// Read this field's value out of a record.
    pub fn value_of<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            RecordField::Name => record.name(),
            RecordField::Classification => record.classification(),
            RecordField::Containment => record.containment(),
            RecordField::Description => record.description(),
            RecordField::ImageReference => record.image_reference(),
        }
    }
}
