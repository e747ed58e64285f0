//! Trait definitions for the pipeline's external collaborators.

use archivist_core::{FieldMapping, Record, RowPayload};
use archivist_error::ArchivistResult;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Service that turns one identifier into a structured record.
///
/// Any failure is terminal for that identifier; callers do not retry.
#[async_trait]
pub trait RecordGenerator: Send + Sync {
    /// Generate the record for `identifier`.
    ///
    /// The returned record's `name` is authoritative and may differ from
    /// `identifier` in casing or decoration.
    async fn generate(&self, identifier: &str) -> ArchivistResult<Record>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Row store holding persisted records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert `rows` into `table` as one atomic call.
    async fn insert_rows(&self, table: &str, rows: &[RowPayload]) -> ArchivistResult<()>;

    /// Return the subset of `candidates` present in `column` of `table`.
    async fn existing_values(
        &self,
        table: &str,
        column: &str,
        candidates: &[String],
    ) -> ArchivistResult<HashSet<String>>;
}

/// Schema access used when connecting to a destination table.
#[async_trait]
pub trait TableInspector: Send + Sync {
    /// Column names of `table`, in ordinal order.
    ///
    /// Fails if the table does not exist or cannot be reached.
    async fn table_columns(&self, table: &str) -> ArchivistResult<Vec<String>>;
}

/// Suggests a field mapping from a table's column names.
#[async_trait]
pub trait MappingAdvisor: Send + Sync {
    /// Propose a mapping onto `columns`. The result may be empty.
    async fn suggest_mapping(&self, columns: &[String]) -> ArchivistResult<FieldMapping>;
}

/// Scheduler primitive: suspend the caller for a duration.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait for `duration` before returning.
    async fn pause(&self, duration: Duration);
}

/// [`Pacer`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<T: RecordGenerator + ?Sized> RecordGenerator for Arc<T> {
    async fn generate(&self, identifier: &str) -> ArchivistResult<Record> {
        (**self).generate(identifier).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn insert_rows(&self, table: &str, rows: &[RowPayload]) -> ArchivistResult<()> {
        (**self).insert_rows(table, rows).await
    }

    async fn existing_values(
        &self,
        table: &str,
        column: &str,
        candidates: &[String],
    ) -> ArchivistResult<HashSet<String>> {
        (**self).existing_values(table, column, candidates).await
    }
}

#[async_trait]
impl<T: Pacer + ?Sized> Pacer for Arc<T> {
    async fn pause(&self, duration: Duration) {
        (**self).pause(duration).await
    }
}
