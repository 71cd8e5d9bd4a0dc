use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, SqliteConnection};

use super::contact_image::ContactImage;
use super::requests::ContactSearch;

/// Store-assigned contact identity
pub type ContactId = i64;

/// Contact represents one directory entry
/// Maps to `contacts` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: ContactId,
    pub full_name: String,
    pub mobile_number: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// New Contact for creation (without generated fields)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub full_name: String,
    pub mobile_number: String,
    pub birth_date: Option<NaiveDate>,
}

/// Contact row as listed or searched, flagged with whether an image is attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub contact: Contact,
    pub has_image: bool,
}

/// A contact together with its attachment, read in one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactWithImage {
    pub contact: Contact,
    pub image: Option<ContactImage>,
}

impl Contact {
    /// Insert a contact; the store assigns `id` and `created_at`
    pub async fn create(
        conn: &mut SqliteConnection,
        new_contact: &NewContact,
    ) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (full_name, mobile_number, birth_date, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, full_name, mobile_number, birth_date, created_at, updated_at
            "#,
        )
        .bind(&new_contact.full_name)
        .bind(&new_contact.mobile_number)
        .bind(new_contact.birth_date)
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *conn)
        .await
    }

    /// Find a contact by ID
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, full_name, mobile_number, birth_date, created_at, updated_at
            FROM contacts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Find a contact by ID and eager-load its image through a LEFT JOIN
    pub async fn find_by_id_with_image(
        conn: &mut SqliteConnection,
        id: ContactId,
    ) -> Result<Option<ContactWithImage>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT c.id, c.full_name, c.mobile_number, c.birth_date, c.created_at, c.updated_at,
                   ci.id AS image_id, ci.image_data, ci.content_type, ci.file_name,
                   ci.file_size, ci.created_at AS image_created_at,
                   ci.updated_at AS image_updated_at
            FROM contacts c
            LEFT JOIN contact_images ci ON ci.contact_id = c.id
            WHERE c.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let contact = Contact::from_row(&row)?;
        let image = match row.try_get::<Option<i64>, _>("image_id")? {
            Some(image_id) => Some(ContactImage {
                id: image_id,
                contact_id: contact.id,
                image_data: row.try_get("image_data")?,
                content_type: row.try_get("content_type")?,
                file_name: row.try_get("file_name")?,
                file_size: row.try_get("file_size")?,
                created_at: row.try_get("image_created_at")?,
                updated_at: row.try_get("image_updated_at")?,
            }),
            None => None,
        };

        Ok(Some(ContactWithImage { contact, image }))
    }

    /// Check whether a mobile number is taken, optionally ignoring one contact.
    /// Exact, case-sensitive comparison.
    pub async fn mobile_number_exists(
        conn: &mut SqliteConnection,
        mobile_number: &str,
        exclude_id: Option<ContactId>,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM contacts
                WHERE mobile_number = ?1 AND id != ?2
                "#,
            )
            .bind(mobile_number)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?
        } else {
            sqlx::query_scalar(
                r#"
                SELECT COUNT(*)
                FROM contacts
                WHERE mobile_number = ?1
                "#,
            )
            .bind(mobile_number)
            .fetch_one(&mut *conn)
            .await?
        };

        Ok(count > 0)
    }

    /// Search by name or mobile substring (case-insensitive) and inclusive
    /// birth date bounds. A blank term matches everything.
    pub async fn search(
        conn: &mut SqliteConnection,
        criteria: &ContactSearch,
    ) -> Result<Vec<ContactSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContactSummary>(
            r#"
            SELECT c.id, c.full_name, c.mobile_number, c.birth_date, c.created_at, c.updated_at,
                   EXISTS (SELECT 1 FROM contact_images ci WHERE ci.contact_id = c.id) AS has_image
            FROM contacts c
            WHERE (?1 IS NULL
                   OR instr(lower(c.full_name), lower(?1)) > 0
                   OR instr(lower(c.mobile_number), lower(?1)) > 0)
              AND (?2 IS NULL OR c.birth_date >= ?2)
              AND (?3 IS NULL OR c.birth_date <= ?3)
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(criteria.normalized_term())
        .bind(criteria.birth_date_from)
        .bind(criteria.birth_date_to)
        .fetch_all(&mut *conn)
        .await
    }

    /// List all contacts, newest first
    pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<ContactSummary>, sqlx::Error> {
        sqlx::query_as::<_, ContactSummary>(
            r#"
            SELECT c.id, c.full_name, c.mobile_number, c.birth_date, c.created_at, c.updated_at,
                   EXISTS (SELECT 1 FROM contact_images ci WHERE ci.contact_id = c.id) AS has_image
            FROM contacts c
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Persist the mutable fields of this contact and stamp `updated_at`
    pub async fn update(
        conn: &mut SqliteConnection,
        contact: &Contact,
    ) -> Result<Contact, sqlx::Error> {
        sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET full_name = ?2,
                mobile_number = ?3,
                birth_date = ?4,
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, full_name, mobile_number, birth_date, created_at, updated_at
            "#,
        )
        .bind(contact.id)
        .bind(&contact.full_name)
        .bind(&contact.mobile_number)
        .bind(contact.birth_date)
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *conn)
        .await
    }

    /// Delete a contact
    pub async fn delete(conn: &mut SqliteConnection, id: ContactId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
