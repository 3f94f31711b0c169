//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::migrate::Migrator;
use tracing::info;

use gatehouse_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration to the pool's database.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    info!(known = MIGRATOR.iter().count(), "Applying user schema migrations");

    MIGRATOR.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("User schema is up to date");
    Ok(())
}
