//! Store wrappers that fail on demand, for rollback tests.

use async_trait::async_trait;
use phonebook_core::error::{StoreError, StoreResult};
use phonebook_core::models::{
    Contact, ContactId, ContactImage, ContactSearch, ContactSummary, ContactWithImage,
    NewContact, NewContactImage,
};
use phonebook_core::stores::{ContactStore, ImageStore, SqlContactStore, SqlImageStore};
use sqlx::SqliteConnection;

fn injected(operation: &str) -> StoreError {
    StoreError::Database(sqlx::Error::Protocol(format!(
        "injected failure in {operation}"
    )))
}

/// SQL image store whose selected operations fail
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultyImageStore {
    pub fail_insert: bool,
    pub fail_update: bool,
    pub fail_delete: bool,
}

impl FaultyImageStore {
    pub fn failing_insert() -> Self {
        Self {
            fail_insert: true,
            ..Self::default()
        }
    }

    pub fn failing_update() -> Self {
        Self {
            fail_update: true,
            ..Self::default()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ImageStore for FaultyImageStore {
    async fn get_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<Option<ContactImage>> {
        SqlImageStore.get_by_contact_id(conn, contact_id).await
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<ContactImage> {
        if self.fail_insert {
            return Err(injected("image insert"));
        }
        SqlImageStore.insert(conn, new_image).await
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<Option<ContactImage>> {
        if self.fail_update {
            return Err(injected("image update"));
        }
        SqlImageStore.update(conn, new_image).await
    }

    async fn delete_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<bool> {
        if self.fail_delete {
            return Err(injected("image delete"));
        }
        SqlImageStore.delete_by_contact_id(conn, contact_id).await
    }
}

/// SQL contact store whose duplicate check always answers "free", as a
/// pre-check that lost a race would
#[derive(Debug, Clone, Copy, Default)]
pub struct StaleCheckContactStore;

#[async_trait]
impl ContactStore for StaleCheckContactStore {
    async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<Contact>> {
        SqlContactStore.get_by_id(conn, id).await
    }

    async fn get_by_id_with_image(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<ContactWithImage>> {
        SqlContactStore.get_by_id_with_image(conn, id).await
    }

    async fn exists_by_mobile_number(
        &self,
        _conn: &mut SqliteConnection,
        _mobile_number: &str,
        _exclude_id: Option<ContactId>,
    ) -> StoreResult<bool> {
        Ok(false)
    }

    async fn search_by(
        &self,
        conn: &mut SqliteConnection,
        criteria: &ContactSearch,
    ) -> StoreResult<Vec<ContactSummary>> {
        SqlContactStore.search_by(conn, criteria).await
    }

    async fn list_all(&self, conn: &mut SqliteConnection) -> StoreResult<Vec<ContactSummary>> {
        SqlContactStore.list_all(conn).await
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_contact: &NewContact,
    ) -> StoreResult<Contact> {
        SqlContactStore.insert(conn, new_contact).await
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        contact: &Contact,
    ) -> StoreResult<Contact> {
        SqlContactStore.update(conn, contact).await
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: ContactId) -> StoreResult<bool> {
        SqlContactStore.delete(conn, id).await
    }
}

/// SQL image store whose insert ends the surrounding transaction before
/// failing, so the unit of work can no longer be rolled back
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionEndingImageStore;

#[async_trait]
impl ImageStore for TransactionEndingImageStore {
    async fn get_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<Option<ContactImage>> {
        SqlImageStore.get_by_contact_id(conn, contact_id).await
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        _new_image: &NewContactImage,
    ) -> StoreResult<ContactImage> {
        sqlx::query("ROLLBACK").execute(&mut *conn).await?;
        Err(injected("image insert"))
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<Option<ContactImage>> {
        SqlImageStore.update(conn, new_image).await
    }

    async fn delete_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<bool> {
        SqlImageStore.delete_by_contact_id(conn, contact_id).await
    }
}
