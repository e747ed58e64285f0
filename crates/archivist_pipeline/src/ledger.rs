//! Session state shared by the batch generator and the save reconciler.

use archivist_core::{ProcessingError, Record};
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct LedgerState {
    records: Vec<Record>,
    errors: Vec<ProcessingError>,
    notice: Option<String>,
}

/// Records, per-item errors and the current user notice for one session.
///
/// Cloning yields another handle to the same state. Locks are only held
/// for the duration of each call, never across an await.
///
/// # Examples
///
/// ```
/// use archivist_core::RecordBuilder;
/// use archivist_pipeline::RecordLedger;
///
/// let ledger = RecordLedger::new();
/// let record = RecordBuilder::default()
///     .name("SCP-173")
///     .classification("Euclid")
///     .containment("")
///     .description("")
///     .image_reference("")
///     .build()
///     .unwrap();
/// ledger.push(record);
///
/// assert_eq!(ledger.unsaved().len(), 1);
/// ledger.mark_saved(&["SCP-173".to_string()]);
/// assert!(ledger.unsaved().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordLedger {
    state: Arc<RwLock<LedgerState>>,
}

impl RecordLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear records, errors and the notice.
    pub fn reset(&self) {
        let mut state = self.write();
        state.records.clear();
        state.errors.clear();
        state.notice = None;
    }

    /// Append a record.
    pub fn push(&self, record: Record) {
        self.write().records.push(record);
    }

    /// Append a per-item failure.
    pub fn push_error(&self, error: ProcessingError) {
        self.write().errors.push(error);
    }

    /// Snapshot of all records in append order.
    pub fn records(&self) -> Vec<Record> {
        self.read().records.clone()
    }

    /// Snapshot of all per-item failures in append order.
    pub fn errors(&self) -> Vec<ProcessingError> {
        self.read().errors.clone()
    }

    /// Snapshot of the records not yet saved.
    pub fn unsaved(&self) -> Vec<Record> {
        self.read()
            .records
            .iter()
            .filter(|r| !r.saved())
            .cloned()
            .collect()
    }

    /// The record named `name`, if any.
    pub fn find(&self, name: &str) -> Option<Record> {
        self.read().records.iter().find(|r| r.name() == name).cloned()
    }

    /// Whether a record named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read().records.iter().any(|r| r.name() == name)
    }

    /// Flag every record whose name is in `names` as saved. Returns how many
    /// records changed.
    pub fn mark_saved(&self, names: &[String]) -> usize {
        let names: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut state = self.write();
        let mut changed = 0;
        for record in state.records.iter_mut() {
            if !record.saved() && names.contains(record.name().as_str()) {
                record.mark_saved();
                changed += 1;
            }
        }
        changed
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    /// Whether no record has been appended.
    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// The current user-facing notice.
    pub fn notice(&self) -> Option<String> {
        self.read().notice.clone()
    }

    /// Replace the user-facing notice.
    pub fn set_notice(&self, notice: impl Into<String>) {
        self.write().notice = Some(notice.into());
    }

    /// Clear the user-facing notice.
    pub fn clear_notice(&self) {
        self.write().notice = None;
    }
}
