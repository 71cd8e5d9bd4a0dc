//! # Phone Book Constants
//!
//! Operational boundaries shared by the validator, the stores and the schema.
//! The schema in `migrations/` repeats the size limit as a CHECK constraint, so
//! both sides must change together.

/// Image attachment limits
pub mod image {
    /// Largest accepted image payload (5 MiB)
    pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

    /// Accepted file extensions, compared case-insensitively and without the dot
    pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

    /// Accepted declared content types, compared case-insensitively
    pub const ALLOWED_CONTENT_TYPES: &[&str] =
        &["image/jpeg", "image/jpg", "image/png", "image/gif"];
}

/// Mobile number format
pub mod mobile {
    pub const LENGTH: usize = 11;
    pub const PREFIX: &str = "09";
    pub const PATTERN: &str = r"^09\d{9}$";
}

/// Contact field limits
pub mod contact {
    pub const MAX_FULL_NAME_LENGTH: usize = 100;
}

/// Constraint names used by the schema, matched when classifying unique violations
pub mod constraints {
    pub const CONTACTS_MOBILE_NUMBER_UNIQUE: &str = "ix_contacts_mobile_number_unique";
    pub const CONTACT_IMAGES_CONTACT_ID_UNIQUE: &str = "ix_contact_images_contact_id_unique";

    /// Column references SQLite reports instead of the index name
    pub const CONTACTS_MOBILE_NUMBER_COLUMN: &str = "contacts.mobile_number";
    pub const CONTACT_IMAGES_CONTACT_ID_COLUMN: &str = "contact_images.contact_id";
}
