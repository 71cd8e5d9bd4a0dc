//! # Database Operations
//!
//! SQLite access through SQLx.
//!
//! - [`connection`] - Pool creation from [`crate::config::DatabaseConfig`] and health checks
//! - [`migrator`] - Embedded schema migrations
//! - [`unit_of_work`] - Transaction coordinator and units of work
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use phonebook_core::config::DatabaseConfig;
//! use phonebook_core::database::{DatabaseConnection, TransactionCoordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = DatabaseConnection::connect_and_migrate(&DatabaseConfig::default()).await?;
//! let coordinator = TransactionCoordinator::new(db.pool().clone());
//!
//! let mut uow = coordinator.begin().await?;
//! sqlx::query("SELECT 1").execute(uow.connection()).await?;
//! uow.commit().await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod migrator;
pub mod unit_of_work;

pub use connection::DatabaseConnection;
pub use migrator::{run_migrations, MIGRATOR};
pub use unit_of_work::{TransactionCoordinator, UnitOfWork};
