//! Schema migrations, applied at startup from the crate's `migrations/` directory

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use std::path::Path;

pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

/// Apply all pending migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(Path::new(MIGRATIONS_DIR)).await?;
    migrator.run(pool).await?;
    tracing::info!(dir = MIGRATIONS_DIR, "Database migrations applied");
    Ok(())
}
