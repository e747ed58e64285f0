//! Tests for single and bulk save reconciliation.

mod test_utils;

use archivist_core::{Destination, FieldMapping, RecordBuilder, RecordField};
use archivist_pipeline::{RecordLedger, SaveOutcome, SaveReconciler};
use std::sync::Arc;
use test_utils::{destination, record, Gate, MemoryStore};

fn reconciler(store: MemoryStore, names: &[&str]) -> (SaveReconciler<Arc<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let ledger = RecordLedger::new();
    for name in names {
        ledger.push(record(name));
    }
    (SaveReconciler::new(store.clone(), ledger), store)
}

#[tokio::test]
async fn test_single_save_marks_record() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173", "SCP-049"]);
    let dest = destination();

    assert!(reconciler.save_one("SCP-173", Some(&dest)).await.unwrap());

    let ledger = reconciler.ledger();
    assert!(ledger.find("SCP-173").unwrap().saved());
    assert!(!ledger.find("SCP-049").unwrap().saved());
    let inserts = store.inserts();
    assert_eq!(inserts.len(), 1);
    assert_eq!(inserts[0].0, "scp_visualizations");
    assert_eq!(inserts[0].1[0]["name"], "SCP-173");
}

#[tokio::test]
async fn test_double_single_save_inserts_once() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173"]);
    let dest = destination();

    assert!(reconciler.save_one("SCP-173", Some(&dest)).await.unwrap());
    assert!(!reconciler.save_one("SCP-173", Some(&dest)).await.unwrap());

    assert!(reconciler.ledger().find("SCP-173").unwrap().saved());
    assert_eq!(store.inserts().len(), 1);
}

#[tokio::test]
async fn test_single_save_failure_keeps_record_unsaved() {
    let (reconciler, _) = reconciler(MemoryStore::new().failing_inserts(), &["SCP-173"]);
    let dest = destination();

    let err = reconciler.save_one("SCP-173", Some(&dest)).await.unwrap_err();

    assert!(err.user_message().contains("SCP-173"));
    assert!(err.user_message().contains("permission denied"));
    let ledger = reconciler.ledger();
    assert!(!ledger.find("SCP-173").unwrap().saved());
    assert_eq!(
        ledger.notice().as_deref(),
        Some("Failed to save SCP-173: Database query error: permission denied for table")
    );
}

#[tokio::test]
async fn test_save_without_destination_is_config_error() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173"]);

    let err = reconciler.save_one("SCP-173", None).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Database not connected. Please connect via settings to save."
    );
    assert!(reconciler.save_all_unsaved(None).await.is_err());
    assert!(store.inserts().is_empty());
}

#[tokio::test]
async fn test_single_save_unknown_name() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173"]);
    let dest = destination();

    let err = reconciler.save_one("SCP-999", Some(&dest)).await.unwrap_err();
    assert!(err.user_message().contains("SCP-999"));
    assert!(store.inserts().is_empty());
}

#[tokio::test]
async fn test_row_contains_only_mapped_columns() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-049"]);
    let mut mapping = FieldMapping::new();
    mapping.set(RecordField::Name, "n");
    mapping.set(RecordField::Description, "d");
    let dest = Destination::new("custom", mapping).unwrap();

    reconciler.save_one("SCP-049", Some(&dest)).await.unwrap();

    let row = &store.inserts()[0].1[0];
    let mut keys: Vec<&String> = row.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["d", "n"]);
    assert_eq!(row["n"], "SCP-049");
    assert_eq!(row["d"], "Description of SCP-049");
}

#[tokio::test]
async fn test_blank_fields_still_fill_every_mapped_column() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173"]);
    reconciler.ledger().push(
        RecordBuilder::default()
            .name("SCP-5000")
            .classification("")
            .containment("")
            .description("")
            .image_reference("")
            .build()
            .unwrap(),
    );
    let mut mapping = FieldMapping::new();
    mapping.set(RecordField::Description, "d");
    let dest = Destination::new("custom", mapping).unwrap();

    let outcome = reconciler.save_all_unsaved(Some(&dest)).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved { count: 2 });
    let rows = &store.inserts()[0].1;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["d"], "");
    assert!(reconciler.ledger().find("SCP-5000").unwrap().saved());
}

#[tokio::test]
async fn test_bulk_save_with_nothing_unsaved_is_noop() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173"]);
    let dest = destination();
    reconciler.ledger().mark_saved(&["SCP-173".to_string()]);

    let outcome = reconciler.save_all_unsaved(Some(&dest)).await.unwrap();

    assert_eq!(outcome, SaveOutcome::NothingToSave);
    assert!(store.inserts().is_empty());
    assert_eq!(
        reconciler.ledger().notice().as_deref(),
        Some("No unsaved items to save.")
    );
}

#[tokio::test]
async fn test_bulk_save_sends_one_insert_for_unsaved_only() {
    let (reconciler, store) = reconciler(MemoryStore::new(), &["SCP-173", "SCP-049", "SCP-096"]);
    let dest = destination();
    reconciler.ledger().mark_saved(&["SCP-049".to_string()]);

    let outcome = reconciler.save_all_unsaved(Some(&dest)).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved { count: 2 });
    let inserts = store.inserts();
    assert_eq!(inserts.len(), 1);
    let names: Vec<&str> = inserts[0]
        .1
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["SCP-173", "SCP-096"]);
    assert!(reconciler.ledger().unsaved().is_empty());
}

#[tokio::test]
async fn test_bulk_save_failure_marks_none() {
    let (reconciler, _) = reconciler(MemoryStore::new().failing_inserts(), &["SCP-173", "SCP-049"]);
    let dest = destination();

    let err = reconciler.save_all_unsaved(Some(&dest)).await.unwrap_err();

    assert!(err.user_message().contains("permission denied"));
    assert_eq!(reconciler.ledger().unsaved().len(), 2);
    assert_eq!(
        reconciler.ledger().notice().as_deref(),
        Some("Failed to save all items: Database query error: permission denied for table")
    );
    assert!(!reconciler.is_saving());
}

#[tokio::test]
async fn test_bulk_save_uses_snapshot_and_excludes_late_records() {
    let gate = Gate::default();
    let (reconciler, store) = reconciler(
        MemoryStore::new().gated(gate.clone()),
        &["SCP-173", "SCP-049"],
    );
    let reconciler = Arc::new(reconciler);
    let dest = destination();

    let save = {
        let reconciler = reconciler.clone();
        let dest = dest.clone();
        tokio::spawn(async move { reconciler.save_all_unsaved(Some(&dest)).await })
    };
    gate.started().await;

    // Appended while the insert is in flight
    reconciler.ledger().push(record("SCP-096"));
    assert!(reconciler.is_saving());
    assert_eq!(
        reconciler.save_all_unsaved(Some(&dest)).await.unwrap(),
        SaveOutcome::AlreadySaving
    );

    gate.release();
    let outcome = save.await.unwrap().unwrap();

    assert_eq!(outcome, SaveOutcome::Saved { count: 2 });
    assert_eq!(store.inserts().len(), 1);
    let ledger = reconciler.ledger();
    assert!(ledger.find("SCP-173").unwrap().saved());
    assert!(ledger.find("SCP-049").unwrap().saved());
    assert!(!ledger.find("SCP-096").unwrap().saved());
    assert!(!reconciler.is_saving());
}
