//! Test doubles for the pipeline's collaborators.

#![allow(dead_code)]

use archivist_core::{Destination, FieldMapping, Record, RecordBuilder, RowPayload};
use archivist_error::{ArchivistResult, DatabaseError, DatabaseErrorKind, HttpError};
use archivist_interface::{Pacer, RecordGenerator, RecordStore};
use archivist_pipeline::canonicalize;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Build a record with placeholder text.
pub fn record(name: &str) -> Record {
    RecordBuilder::default()
        .name(name)
        .classification("Euclid")
        .containment(format!("Containment for {}", name))
        .description(format!("Description of {}", name))
        .image_reference(format!("https://example.com/{}.png", name))
        .build()
        .expect("valid test record")
}

/// Destination using the default column mapping.
pub fn destination() -> Destination {
    Destination::new("scp_visualizations", FieldMapping::default_columns())
        .expect("valid test destination")
}

/// A pair of signals used to hold a fake call open.
#[derive(Debug, Default, Clone)]
pub struct Gate {
    started: Arc<Notify>,
    proceed: Arc<Notify>,
}

impl Gate {
    /// Wait until the gated call has started.
    pub async fn started(&self) {
        self.started.notified().await;
    }

    /// Let the gated call finish.
    pub fn release(&self) {
        self.proceed.notify_one();
    }

    async fn pass(&self) {
        self.started.notify_one();
        self.proceed.notified().await;
    }
}

/// Generator answering from a script. Unscripted identifiers produce a
/// record named after their canonical form.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    failures: HashMap<String, String>,
    renames: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
    gate: Option<Gate>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail generation of `identifier` with `message`.
    pub fn failing(mut self, identifier: &str, message: &str) -> Self {
        self.failures
            .insert(identifier.to_string(), message.to_string());
        self
    }

    /// Report `name` as the record name for `identifier`.
    pub fn renaming(mut self, identifier: &str, name: &str) -> Self {
        self.renames.insert(identifier.to_string(), name.to_string());
        self
    }

    /// Hold every call until the gate is released.
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Identifiers passed to `generate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordGenerator for ScriptedGenerator {
    async fn generate(&self, identifier: &str) -> ArchivistResult<Record> {
        self.calls.lock().unwrap().push(identifier.to_string());
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if let Some(message) = self.failures.get(identifier) {
            return Err(HttpError::new("scripted:generateContent", message.clone()).into());
        }
        let name = self
            .renames
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| canonicalize(identifier));
        Ok(record(&name))
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// In-memory row store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    existing: HashSet<String>,
    fail_inserts: bool,
    fail_lookups: bool,
    inserts: Mutex<Vec<(String, Vec<RowPayload>)>>,
    lookups: Mutex<Vec<(String, String, Vec<String>)>>,
    gate: Option<Gate>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the lookup reports as present.
    pub fn with_existing(mut self, names: &[&str]) -> Self {
        self.existing = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// Hold every insert until the gate is released.
    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Insert calls received, with their rows.
    pub fn inserts(&self) -> Vec<(String, Vec<RowPayload>)> {
        self.inserts.lock().unwrap().clone()
    }

    /// Lookup calls received.
    pub fn lookups(&self) -> Vec<(String, String, Vec<String>)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_rows(&self, table: &str, rows: &[RowPayload]) -> ArchivistResult<()> {
        self.inserts
            .lock()
            .unwrap()
            .push((table.to_string(), rows.to_vec()));
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        if self.fail_inserts {
            return Err(DatabaseError::new(DatabaseErrorKind::Query(
                "permission denied for table".to_string(),
            ))
            .into());
        }
        Ok(())
    }

    async fn existing_values(
        &self,
        table: &str,
        column: &str,
        candidates: &[String],
    ) -> ArchivistResult<HashSet<String>> {
        self.lookups.lock().unwrap().push((
            table.to_string(),
            column.to_string(),
            candidates.to_vec(),
        ));
        if self.fail_lookups {
            return Err(DatabaseError::new(DatabaseErrorKind::Connection(
                "connection reset".to_string(),
            ))
            .into());
        }
        Ok(candidates
            .iter()
            .filter(|c| self.existing.contains(*c))
            .cloned()
            .collect())
    }
}

/// Pacer that records requested pauses without sleeping.
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}
