//! Persisting generated records and tracking what is saved.

use crate::flag::FlagGuard;
use crate::RecordLedger;
use archivist_core::{Destination, RowPayload};
use archivist_error::{
    ArchivistError, ArchivistResult, ConfigError, SaveError, SaveErrorKind, ValidationError,
};
use archivist_interface::RecordStore;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument};

const NOT_CONNECTED_MESSAGE: &str = "Database not connected. Please connect via settings to save.";
const NOTHING_TO_SAVE_MESSAGE: &str = "No unsaved items to save.";

/// Result of a bulk save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot was inserted and marked saved
    Saved {
        /// Records inserted
        count: usize,
    },
    /// Every record was already saved; nothing was sent
    NothingToSave,
    /// Another bulk save is in flight; nothing was sent
    AlreadySaving,
}

/// Writes records to the destination table and flips their saved flag on
/// confirmed success.
///
/// Single and bulk saves are not mutually excluded. Both only ever move a
/// record from unsaved to saved, so a record saved by both ends up saved
/// either way.
pub struct SaveReconciler<S> {
    store: S,
    ledger: RecordLedger,
    saving: AtomicBool,
}

impl<S: RecordStore> SaveReconciler<S> {
    /// Create a reconciler over `ledger`.
    pub fn new(store: S, ledger: RecordLedger) -> Self {
        Self {
            store,
            ledger,
            saving: AtomicBool::new(false),
        }
    }

    /// Whether a bulk save is in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// The ledger this reconciler updates.
    pub fn ledger(&self) -> &RecordLedger {
        &self.ledger
    }

    fn require_destination<'d>(
        &self,
        destination: Option<&'d Destination>,
    ) -> ArchivistResult<&'d Destination> {
        destination.ok_or_else(|| {
            self.ledger.set_notice(NOT_CONNECTED_MESSAGE);
            ArchivistError::from(ConfigError::new(NOT_CONNECTED_MESSAGE))
        })
    }

    /// Save the record named `name`.
    ///
    /// Returns `true` if a row was inserted and `false` if the record was
    /// already saved.
    ///
    /// # Errors
    ///
    /// - Configuration error when there is no destination
    /// - Validation error when no record has that name
    /// - Save error naming the record when the insert fails; the record
    ///   stays unsaved
    #[instrument(skip(self, destination))]
    pub async fn save_one(
        &self,
        name: &str,
        destination: Option<&Destination>,
    ) -> ArchivistResult<bool> {
        let destination = self.require_destination(destination)?;
        let record = self.ledger.find(name).ok_or_else(|| {
            ArchivistError::from(ValidationError::new(format!(
                "No record named '{}' in this session.",
                name
            )))
        })?;
        if record.saved() {
            debug!("Record already saved");
            return Ok(false);
        }

        let rows = vec![destination.mapping().map_record(&record)];
        match self
            .store
            .insert_rows(destination.table_name(), &rows)
            .await
        {
            Ok(()) => {
                self.ledger.mark_saved(&[record.name().clone()]);
                info!(table = %destination.table_name(), "Record saved");
                Ok(true)
            }
            Err(e) => {
                let message = e.user_message();
                error!(table = %destination.table_name(), error = %e, "Save failed");
                self.ledger
                    .set_notice(format!("Failed to save {}: {}", record.name(), message));
                Err(SaveError::new(SaveErrorKind::Single {
                    name: record.name().clone(),
                    message,
                })
                .into())
            }
        }
    }

    /// Save every record that is unsaved right now as one multi-row insert.
    ///
    /// Records appended after the snapshot is taken are left alone.
    ///
    /// # Errors
    ///
    /// - Configuration error when there is no destination
    /// - Save error when the insert fails; no record is marked saved
    #[instrument(skip(self, destination))]
    pub async fn save_all_unsaved(
        &self,
        destination: Option<&Destination>,
    ) -> ArchivistResult<SaveOutcome> {
        let destination = self.require_destination(destination)?;
        let Some(_saving) = FlagGuard::acquire(&self.saving) else {
            debug!("Bulk save already in flight");
            return Ok(SaveOutcome::AlreadySaving);
        };

        let snapshot = self.ledger.unsaved();
        if snapshot.is_empty() {
            self.ledger.set_notice(NOTHING_TO_SAVE_MESSAGE);
            return Ok(SaveOutcome::NothingToSave);
        }

        let rows: Vec<RowPayload> = snapshot
            .iter()
            .map(|r| destination.mapping().map_record(r))
            .collect();
        let names: Vec<String> = snapshot.iter().map(|r| r.name().clone()).collect();
        debug!(count = names.len(), "Saving unsaved snapshot");

        match self
            .store
            .insert_rows(destination.table_name(), &rows)
            .await
        {
            Ok(()) => {
                let marked = self.ledger.mark_saved(&names);
                info!(table = %destination.table_name(), count = names.len(), marked, "Bulk save complete");
                Ok(SaveOutcome::Saved { count: names.len() })
            }
            Err(e) => {
                let message = e.user_message();
                error!(table = %destination.table_name(), error = %e, "Bulk save failed");
                self.ledger
                    .set_notice(format!("Failed to save all items: {}", message));
                Err(SaveError::new(SaveErrorKind::Bulk {
                    count: names.len(),
                    message,
                })
                .into())
            }
        }
    }
}
