//! # Transaction Coordinator
//!
//! Opens units of work over the pool. A [`UnitOfWork`] owns one database
//! transaction; stores borrow its connection through [`UnitOfWork::connection`],
//! so every read and write issued between `begin` and `commit`/`rollback`
//! commits or rolls back as one group.
//!
//! Nesting is ruled out by the types: `begin` lives on the coordinator, and a
//! unit of work only offers savepoints inside itself. Dropping an unfinished
//! unit of work rolls it back. Nothing here retries.

use crate::error::StoreResult;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

/// Hands out units of work and plain connections for reads
#[derive(Debug, Clone)]
pub struct TransactionCoordinator {
    pool: SqlitePool,
}

impl TransactionCoordinator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Open a unit of work holding the write lock from its first statement,
    /// so a competing writer waits (up to the busy timeout) and then reads
    /// what this one committed
    pub async fn begin(&self) -> StoreResult<UnitOfWork> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        debug!("Unit of work opened");
        Ok(UnitOfWork { tx })
    }

    /// Check out a connection for transaction-free reads
    pub async fn acquire(&self) -> StoreResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }
}

/// One open transaction spanning the contact and image stores
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Connection to pass to store operations that belong to this unit of work
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Open a savepoint inside this unit of work. Committing the returned
    /// transaction releases the savepoint; rolling it back (or dropping it)
    /// undoes only what was done since it was opened.
    pub async fn savepoint(&mut self) -> StoreResult<Transaction<'_, Sqlite>> {
        let savepoint = Connection::begin(&mut *self.tx).await?;
        debug!("Savepoint opened");
        Ok(savepoint)
    }

    /// Make every write since `begin` durable and visible
    pub async fn commit(self) -> StoreResult<()> {
        self.tx.commit().await?;
        debug!("Unit of work committed");
        Ok(())
    }

    /// Discard every write since `begin`
    pub async fn rollback(self) -> StoreResult<()> {
        self.tx.rollback().await?;
        debug!("Unit of work rolled back");
        Ok(())
    }
}
