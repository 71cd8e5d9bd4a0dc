use super::ImageStore;
use crate::error::StoreResult;
use crate::models::{ContactId, ContactImage, NewContactImage};
use async_trait::async_trait;
use sqlx::SqliteConnection;

/// [`ImageStore`] backed by the `contact_images` table. One row per contact is
/// enforced by a unique index, so a racing second insert fails at the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlImageStore;

#[async_trait]
impl ImageStore for SqlImageStore {
    async fn get_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<Option<ContactImage>> {
        Ok(ContactImage::find_by_contact_id(conn, contact_id).await?)
    }

    async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<ContactImage> {
        Ok(ContactImage::create(conn, new_image).await?)
    }

    async fn update(
        &self,
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> StoreResult<Option<ContactImage>> {
        Ok(ContactImage::replace(conn, new_image).await?)
    }

    async fn delete_by_contact_id(
        &self,
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> StoreResult<bool> {
        Ok(ContactImage::delete_by_contact_id(conn, contact_id).await?)
    }
}
