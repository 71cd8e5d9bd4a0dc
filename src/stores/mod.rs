//! # Stores
//!
//! Persistence seams of the lifecycle service. Every operation takes the
//! connection it runs on, so the caller decides whether it belongs to a unit of
//! work ([`crate::database::UnitOfWork::connection`]) or is a standalone read.
//!
//! The SQL implementations delegate to the row types in [`crate::models`];
//! tests substitute their own implementations to inject failures.

pub mod contact_store;
pub mod image_store;

use crate::error::StoreResult;
use crate::models::{
    Contact, ContactId, ContactImage, ContactSearch, ContactSummary, ContactWithImage,
    NewContact, NewContactImage,
};
use async_trait::async_trait;
use sqlx::SqliteConnection;

pub use contact_store::SqlContactStore;
pub use image_store::SqlImageStore;

/// Persistence of the `Contact` aggregate root
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<Contact>>;

    /// The contact and its image in a single read
    async fn get_by_id_with_image(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<ContactWithImage>>;

    /// Exact match on the mobile number, ignoring `exclude_id` when given
    async fn exists_by_mobile_number(
        &self,
        conn: &mut SqliteConnection,
        mobile_number: &str,
        exclude_id: Option<ContactId>,
    ) -> StoreResult<bool>;

    async fn search_by(
        &self,
        conn: &mut SqliteConnection,
        criteria: &ContactSearch,
    ) -> StoreResult<Vec<ContactSummary>>;

    async fn list_all(&self, conn: &mut SqliteConnection) -> StoreResult<Vec<ContactSummary>>;

    /// Assigns the identity and creation timestamp
    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_contact: &NewContact,
    ) -> StoreResult<Contact>;

    /// Persists the mutable fields and sets the last-updated timestamp
    async fn update(&self, conn: &mut SqliteConnection, contact: &Contact)
        -> StoreResult<Contact>;

    /// Returns whether a row was removed
    async fn delete(&self, conn: &mut SqliteConnection, id: ContactId) -> StoreResult<bool>;
}

/// Persistence of the single optional image owned by a contact
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn get_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<Option<ContactImage>>;

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<ContactImage>;

    /// Replace payload and metadata of the existing row for `new_image.contact_id`;
    /// `None` when the contact has no image
    async fn update(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<Option<ContactImage>>;

    /// No-op when the contact has no image; returns whether a row was removed
    async fn delete_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<bool>;
}
