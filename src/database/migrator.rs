//! # Database Migration Support
//!
//! The schema lives in `migrations/` as timestamped SQL files and is embedded
//! at compile time.
//!
//! ```rust,ignore
//! phonebook_core::database::migrator::MIGRATOR.run(&pool).await?;
//! ```

use sqlx::SqlitePool;
use tracing::info;

/// Migrator for the contacts and contact_images tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, sqlx::migrate::MigrateError>;

/// Apply all outstanding migrations
pub async fn run_migrations(pool: &SqlitePool) -> MigrationResult<()> {
    info!(
        migrations = MIGRATOR.iter().count(),
        "Running database migrations"
    );
    MIGRATOR.run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}
