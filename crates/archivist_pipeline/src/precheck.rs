//! Existence precheck against the destination table.

use archivist_core::Destination;
use archivist_interface::RecordStore;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Names among `canonical_names` already present in the destination's name
/// column.
///
/// Returns an empty set without contacting the store when there is no
/// destination, no column is mapped to the record name, or there are no
/// candidates. A store failure also yields an empty set: the precheck fails
/// open so a flaky store never blocks generation.
#[instrument(skip(store, destination, canonical_names), fields(candidates = canonical_names.len()))]
pub async fn precheck_existing<S>(
    store: &S,
    destination: Option<&Destination>,
    canonical_names: &[String],
) -> HashSet<String>
where
    S: RecordStore + ?Sized,
{
    let Some(destination) = destination else {
        debug!("No destination configured, skipping precheck");
        return HashSet::new();
    };
    let Some(column) = destination.name_column() else {
        debug!(table = %destination.table_name(), "No name column mapped, skipping precheck");
        return HashSet::new();
    };
    if canonical_names.is_empty() {
        return HashSet::new();
    }

    match store
        .existing_values(destination.table_name(), column, canonical_names)
        .await
    {
        Ok(existing) => {
            debug!(existing = existing.len(), "Precheck complete");
            existing
        }
        Err(e) => {
            warn!(
                table = %destination.table_name(),
                error = %e,
                "Existence precheck failed, treating every record as unsaved"
            );
            HashSet::new()
        }
    }
}
