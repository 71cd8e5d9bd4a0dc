//! Temp-file SQLite databases for integration tests.
//!
//! A file (not `sqlite::memory:`) so that every pooled connection sees the same
//! database, which the concurrency tests depend on.

use phonebook_core::config::DatabaseConfig;
use phonebook_core::database::{DatabaseConnection, TransactionCoordinator};
use phonebook_core::services::ContactLifecycleService;
use phonebook_core::stores::{ContactStore, ImageStore};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// A migrated database that lives as long as this value
pub struct TestDatabase {
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("phonebook.db").display()),
            max_connections: 4,
            acquire_timeout_seconds: 10,
            busy_timeout_ms: 5000,
        };
        let db = DatabaseConnection::connect_and_migrate(&config)
            .await
            .expect("Failed to open test database");

        Self {
            pool: db.pool().clone(),
            _dir: dir,
        }
    }

    pub fn coordinator(&self) -> TransactionCoordinator {
        TransactionCoordinator::new(self.pool.clone())
    }

    /// Service over the SQL stores
    pub fn service(&self) -> ContactLifecycleService {
        ContactLifecycleService::new(self.pool.clone())
    }

    /// Service over caller-supplied stores
    pub fn service_with<C: ContactStore, I: ImageStore>(
        &self,
        contacts: C,
        images: I,
    ) -> ContactLifecycleService<C, I> {
        ContactLifecycleService::with_stores(self.coordinator(), contacts, images)
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}
