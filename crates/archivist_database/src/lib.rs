//! PostgreSQL integration for Archivist.
//!
//! This crate persists generated records into a user-chosen table whose
//! shape is only known at runtime, so every statement is built from
//! validated identifiers and executed with `diesel::sql_query`.
//!
//! # Example
//!
//! ```rust,ignore
//! use archivist_database::{establish_pool, PgRecordStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = establish_pool("postgres://localhost/archive")?;
//! let store = PgRecordStore::new(pool);
//! let columns = store.table_columns("scp_visualizations").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod identifier;
mod sql;
mod store;

pub use connection::{database_url, establish_pool, PgPool};
pub use identifier::{quote_identifier, quote_table, validate_identifier};
pub use sql::{create_table_sql, existing_values_sql, insert_rows_sql, table_columns_sql};
pub use store::PgRecordStore;

/// Result type for database operations.
/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, archivist_error::DatabaseError>;
