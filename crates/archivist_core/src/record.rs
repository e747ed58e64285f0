//! The generated dossier record.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One structured entity produced by the generation service.
///
/// `name` is the record's identity: within a batch no two records share a
/// name, and save-state is tracked by it.
///
/// # Examples
///
/// ```
/// use archivist_core::RecordBuilder;
///
/// let record = RecordBuilder::default()
///     .name("SCP-173")
///     .classification("Euclid")
///     .containment("Keep in a locked container.")
///     .description("Concrete statue.")
///     .image_reference("https://example.com/173.png")
///     .build()
///     .unwrap();
///
/// assert_eq!(record.name(), "SCP-173");
/// assert!(!record.saved());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Record {
    /// Canonical display name and primary identifier (e.g. `SCP-173`)
    name: String,
    /// Object class (e.g. `Euclid`)
    classification: String,
    /// Special containment procedures
    containment: String,
    /// Free-text description
    description: String,
    /// Image URL or data handle
    image_reference: String,
    /// Whether this record is known to exist in the destination table
    #[builder(default)]
    #[serde(default)]
    #[getter(skip)]
    saved: bool,
}

impl Record {
    /// Whether this record is known to exist in the destination table.
    pub fn saved(&self) -> bool {
        self.saved
    }

    /// Flag the record as persisted. The transition is one-way.
    pub fn mark_saved(&mut self) {
        self.saved = true;
    }

    /// Return the record with its saved flag set to `saved`.
    pub fn with_saved(mut self, saved: bool) -> Self {
        self.saved = saved;
        self
    }
}
