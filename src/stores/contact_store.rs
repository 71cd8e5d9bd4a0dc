use super::ContactStore;
use crate::error::StoreResult;
use crate::models::{
    Contact, ContactId, ContactSearch, ContactSummary, ContactWithImage, NewContact,
};
use async_trait::async_trait;
use sqlx::SqliteConnection;

/// [`ContactStore`] backed by the `contacts` table
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlContactStore;

#[async_trait]
impl ContactStore for SqlContactStore {
    async fn get_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<Contact>> {
        Ok(Contact::find_by_id(conn, id).await?)
    }

    async fn get_by_id_with_image(
        &self,
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> StoreResult<Option<ContactWithImage>> {
        Ok(Contact::find_by_id_with_image(conn, id).await?)
    }

    async fn exists_by_mobile_number(
        &self,
        conn: &mut SqliteConnection,
        mobile_number: &str,
        exclude_id: Option<ContactId>,
    ) -> StoreResult<bool> {
        Ok(Contact::mobile_number_exists(conn, mobile_number, exclude_id).await?)
    }

    async fn search_by(
        &self,
        conn: &mut SqliteConnection,
        criteria: &ContactSearch,
    ) -> StoreResult<Vec<ContactSummary>> {
        Ok(Contact::search(conn, criteria).await?)
    }

    async fn list_all(&self, conn: &mut SqliteConnection) -> StoreResult<Vec<ContactSummary>> {
        Ok(Contact::list_all(conn).await?)
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_contact: &NewContact,
    ) -> StoreResult<Contact> {
        Ok(Contact::create(conn, new_contact).await?)
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        contact: &Contact,
    ) -> StoreResult<Contact> {
        Ok(Contact::update(conn, contact).await?)
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: ContactId) -> StoreResult<bool> {
        Ok(Contact::delete(conn, id).await?)
    }
}
