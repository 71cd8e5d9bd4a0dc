use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use super::contact::ContactId;
use super::requests::ImageUpload;

/// ContactImage is the single optional photograph owned by a contact
/// Maps to `contact_images` table
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactImage {
    pub id: i64,
    pub contact_id: ContactId,
    pub image_data: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
    pub file_size: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

// Payloads run to megabytes; keep them out of logs and assertion output.
impl std::fmt::Debug for ContactImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactImage")
            .field("id", &self.id)
            .field("contact_id", &self.contact_id)
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .field("file_size", &self.file_size)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// New ContactImage for creation or replacement (without generated fields)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactImage {
    pub contact_id: ContactId,
    pub image_data: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl NewContactImage {
    pub fn from_upload(contact_id: ContactId, upload: ImageUpload) -> Self {
        Self {
            contact_id,
            image_data: upload.data,
            content_type: upload.content_type,
            file_name: upload.file_name,
        }
    }

    pub fn file_size(&self) -> i64 {
        self.image_data.len() as i64
    }
}

impl ContactImage {
    /// Attach an image to a contact. The unique index on `contact_id` rejects a
    /// second image for the same contact.
    pub async fn create(
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> Result<ContactImage, sqlx::Error> {
        sqlx::query_as::<_, ContactImage>(
            r#"
            INSERT INTO contact_images (contact_id, image_data, content_type, file_name, file_size, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, contact_id, image_data, content_type, file_name, file_size, created_at, updated_at
            "#,
        )
        .bind(new_image.contact_id)
        .bind(&new_image.image_data)
        .bind(&new_image.content_type)
        .bind(&new_image.file_name)
        .bind(new_image.file_size())
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *conn)
        .await
    }

    /// Find the image owned by a contact
    pub async fn find_by_contact_id(
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> Result<Option<ContactImage>, sqlx::Error> {
        sqlx::query_as::<_, ContactImage>(
            r#"
            SELECT id, contact_id, image_data, content_type, file_name, file_size, created_at, updated_at
            FROM contact_images
            WHERE contact_id = ?1
            "#,
        )
        .bind(contact_id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Replace payload and metadata of the image owned by `new_image.contact_id`.
    /// Returns `None` when the contact has no image.
    pub async fn replace(
        conn: &mut SqliteConnection,
        new_image: &NewContactImage,
    ) -> Result<Option<ContactImage>, sqlx::Error> {
        sqlx::query_as::<_, ContactImage>(
            r#"
            UPDATE contact_images
            SET image_data = ?2,
                content_type = ?3,
                file_name = ?4,
                file_size = ?5,
                updated_at = ?6
            WHERE contact_id = ?1
            RETURNING id, contact_id, image_data, content_type, file_name, file_size, created_at, updated_at
            "#,
        )
        .bind(new_image.contact_id)
        .bind(&new_image.image_data)
        .bind(&new_image.content_type)
        .bind(&new_image.file_name)
        .bind(new_image.file_size())
        .bind(Utc::now().naive_utc())
        .fetch_optional(&mut *conn)
        .await
    }

    /// Delete the image owned by a contact; no-op when there is none
    pub async fn delete_by_contact_id(
        conn: &mut SqliteConnection,
        contact_id: ContactId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM contact_images
            WHERE contact_id = ?1
            "#,
        )
        .bind(contact_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
