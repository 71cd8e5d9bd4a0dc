#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Phone Book Core
//!
//! Contact lifecycle and attachment consistency engine for a personal phone book.
//!
//! ## Overview
//!
//! A contact carries at most one photograph. This crate turns create, update
//! and delete requests into atomic, invariant-preserving changes to the contact
//! row and its image row:
//!
//! - Mobile numbers are unique across contacts, enforced by a unique index and
//!   re-checked inside every writing transaction.
//! - A contact owns at most one image, enforced by a unique index; the image
//!   never outlives its contact.
//! - A failure anywhere inside a create, update or delete rolls back every
//!   write of that request.
//!
//! ## Module Organization
//!
//! - [`validation`] - Pure field-level request checks
//! - [`models`] - Row types with their SQL, and request payloads
//! - [`stores`] - Contact and image store traits with SQL implementations
//! - [`database`] - Connection pool, migrations, transaction coordinator
//! - [`services`] - The contact lifecycle service
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phonebook_core::config::PhoneBookConfig;
//! use phonebook_core::database::DatabaseConnection;
//! use phonebook_core::logging::init_structured_logging;
//! use phonebook_core::models::CreateContactRequest;
//! use phonebook_core::services::ContactLifecycleService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PhoneBookConfig::load()?;
//! init_structured_logging(&config.logging);
//!
//! let db = DatabaseConnection::connect_and_migrate(&config.database).await?;
//! let service = ContactLifecycleService::new(db.pool().clone());
//!
//! let id = service
//!     .create_contact(CreateContactRequest::new("Ali Rezaei", "09121234567"))
//!     .await?;
//! println!("created contact {id}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod stores;
pub mod validation;

pub use config::{DatabaseConfig, LoggingConfig, PhoneBookConfig};
pub use database::{DatabaseConnection, TransactionCoordinator, UnitOfWork};
pub use error::{ContactError, ContactResult, PhoneBookError, Result, StoreError};
pub use models::{
    Contact, ContactId, ContactImage, ContactSearch, ContactSummary, CreateContactRequest,
    ImageUpload, UpdateContactRequest,
};
pub use services::ContactLifecycleService;
pub use validation::{ContactField, FieldViolation};
