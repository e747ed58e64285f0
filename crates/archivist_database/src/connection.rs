//! Database connection utilities.

use crate::DatabaseResult;
use archivist_error::{DatabaseError, DatabaseErrorKind};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use tracing::{debug, instrument};

/// Pooled PostgreSQL connections.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Read the connection string from `DATABASE_URL`.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or blank.
pub fn database_url() -> DatabaseResult<String> {
    std::env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Connection(
                "DATABASE_URL environment variable not set".to_string(),
            ))
        })
}

/// Build a small connection pool and check out one connection to prove the
/// database is reachable.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or no connection can be made.
#[instrument(skip(database_url))]
pub fn establish_pool(database_url: &str) -> DatabaseResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(DatabaseError::from)?;

    // Warm up the pool
    {
        let _conn = pool
            .get()
            .map_err(DatabaseError::from)?;
    }

    debug!("Database pool established");
    Ok(pool)
}
