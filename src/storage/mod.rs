//! PostgreSQL backends for the session core.

mod sessions;
mod students;

pub use sessions::PgSessionStore;
pub use students::PgStudentDirectory;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{Instrument, info};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

/// Create the tables and indexes when missing. Safe to run on every start.
///
/// # Errors
/// Returns an error if any schema statement fails.
pub async fn apply_schema(pool: &PgPool) -> Result<()> {
    let span = tracing::info_span!("db.schema", db.system = "postgresql");
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to apply database schema")?;

    info!("Database schema is up to date");

    Ok(())
}
