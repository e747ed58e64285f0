//! [`RecordStore`] and [`TableInspector`] over a PostgreSQL pool.

use crate::{
    existing_values_sql, insert_rows_sql, table_columns_sql, validate_identifier, DatabaseResult,
    PgPool,
};
use archivist_core::RowPayload;
use archivist_error::{ArchivistResult, DatabaseError, DatabaseErrorKind};
use archivist_interface::{RecordStore, TableInspector};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Array, Json, Text};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

#[derive(Debug, QueryableByName)]
struct ValueRow {
    #[diesel(sql_type = Text)]
    value: String,
}

#[derive(Debug, QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Record store writing into user tables through a pooled connection.
///
/// Diesel is synchronous, so each call runs on tokio's blocking pool.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRecordStore")
            .field("max_size", &self.pool.max_size())
            .finish()
    }
}

impl PgRecordStore {
    /// Wrap an established pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_connection<T, F>(&self, op: F) -> ArchivistResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || -> DatabaseResult<T> {
            let mut conn = pool
                .get()
                .map_err(DatabaseError::from)?;
            op(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?;
        Ok(result?)
    }
}

/// Union of row keys in first-seen order.
fn row_columns(rows: &[RowPayload]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .flat_map(|row| row.keys())
        .filter(|key| seen.insert(key.as_str()))
        .cloned()
        .collect()
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert_rows(&self, table: &str, rows: &[RowPayload]) -> ArchivistResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let sql = insert_rows_sql(table, &row_columns(rows))?;
        let payload = Value::Array(rows.iter().cloned().map(Value::Object).collect());
        let count = rows.len();

        let inserted = self
            .with_connection(move |conn| {
                diesel::sql_query(sql)
                    .bind::<Json, _>(payload)
                    .execute(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        info!(inserted, expected = count, "Inserted rows");
        Ok(())
    }

    #[instrument(skip(self, candidates), fields(candidate_count = candidates.len()))]
    async fn existing_values(
        &self,
        table: &str,
        column: &str,
        candidates: &[String],
    ) -> ArchivistResult<HashSet<String>> {
        if candidates.is_empty() {
            return Ok(HashSet::new());
        }
        let sql = existing_values_sql(table, column)?;
        let candidates = candidates.to_vec();

        let rows: Vec<ValueRow> = self
            .with_connection(move |conn| {
                diesel::sql_query(sql)
                    .bind::<Array<Text>, _>(candidates)
                    .load(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        debug!(found = rows.len(), "Loaded existing values");
        Ok(rows.into_iter().map(|row| row.value).collect())
    }
}

#[async_trait]
impl TableInspector for PgRecordStore {
    #[instrument(skip(self))]
    async fn table_columns(&self, table: &str) -> ArchivistResult<Vec<String>> {
        let table = validate_identifier(table)?.to_string();
        let lookup = table.clone();

        let rows: Vec<ColumnRow> = self
            .with_connection(move |conn| {
                diesel::sql_query(table_columns_sql())
                    .bind::<Text, _>(lookup)
                    .load(conn)
                    .map_err(DatabaseError::from)
            })
            .await?;

        if rows.is_empty() {
            return Err(DatabaseError::new(DatabaseErrorKind::TableNotFound(table)).into());
        }

        debug!(columns = rows.len(), "Reflected table columns");
        Ok(rows.into_iter().map(|row| row.name).collect())
    }
}
