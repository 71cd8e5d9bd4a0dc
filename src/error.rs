//! Error types for the phone book core.
//!
//! Three layers:
//! - [`StoreError`] is what the stores and the transaction coordinator return.
//! - [`ContactError`] is the closed set of outcomes the lifecycle service hands to
//!   its caller. Store internals never cross this boundary.
//! - [`PhoneBookError`] covers setup: configuration, connecting, migrating.

use crate::config::ConfigurationError;
use crate::constants::constraints;
use crate::models::ContactId;
use crate::validation::FieldViolation;
use thiserror::Error;
use tracing::error;

/// Failure reported by a store or by transaction control
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index rejected the write. `target` names the index or column.
    #[error("Unique constraint violated: {target}")]
    UniqueViolation { target: String },
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// Whether this is the contacts mobile number index rejecting a write
    pub fn is_duplicate_mobile_number(&self) -> bool {
        match self {
            StoreError::UniqueViolation { target } => {
                target.contains(constraints::CONTACTS_MOBILE_NUMBER_UNIQUE)
                    || target.contains(constraints::CONTACTS_MOBILE_NUMBER_COLUMN)
            }
            StoreError::Database(_) => false,
        }
    }

    /// Whether this is the one-image-per-contact index rejecting a write
    pub fn is_duplicate_image(&self) -> bool {
        match self {
            StoreError::UniqueViolation { target } => {
                target.contains(constraints::CONTACT_IMAGES_CONTACT_ID_UNIQUE)
                    || target.contains(constraints::CONTACT_IMAGES_CONTACT_ID_COLUMN)
            }
            StoreError::Database(_) => false,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                // SQLite reports "UNIQUE constraint failed: table.column" without a
                // constraint name, so fall back to the message.
                let target = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                return StoreError::UniqueViolation { target };
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Outcome of a contact lifecycle operation that did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// Field-level rule violations; nothing was written
    #[error("Validation failed: {}", describe_violations(.0))]
    ValidationFailed(Vec<FieldViolation>),
    /// Another contact already owns the mobile number
    #[error("Mobile number is already registered to another contact")]
    DuplicateMobileNumber,
    #[error("Contact {0} not found")]
    NotFound(ContactId),
    /// The store or the transaction failed; the unit of work was rolled back
    #[error("Persistence failure during {operation}")]
    PersistenceFailure { operation: String },
    /// Rolling back after `cause` failed as well; the connection's transaction
    /// state is unknown
    #[error("Rollback failed during {operation} (original failure: {cause})")]
    RollbackFailed { operation: String, cause: String },
}

impl ContactError {
    /// Translate a store failure into an outcome, logging the details that the
    /// outcome deliberately does not carry.
    pub fn from_store(operation: &str, err: StoreError) -> Self {
        if err.is_duplicate_mobile_number() {
            return ContactError::DuplicateMobileNumber;
        }

        if err.is_duplicate_image() {
            error!(
                operation = %operation,
                error = %err,
                "Contact already has an image; attachment invariant violated"
            );
            return ContactError::PersistenceFailure {
                operation: operation.to_string(),
            };
        }

        error!(operation = %operation, error = %err, "Store operation failed");
        ContactError::PersistenceFailure {
            operation: operation.to_string(),
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ContactError::ValidationFailed(_)
                | ContactError::DuplicateMobileNumber
                | ContactError::NotFound(_)
        )
    }
}

fn describe_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ContactResult<T> = std::result::Result<T, ContactError>;

/// Setup failures: configuration, connecting to the store, applying the schema
#[derive(Debug, Error)]
pub enum PhoneBookError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type Result<T> = std::result::Result<T, PhoneBookError>;
