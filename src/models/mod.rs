//! # Data Layer
//!
//! Row types for the two persisted tables and the request payloads that feed
//! them. Each row type carries its own SQL, taking an explicit
//! `&mut SqliteConnection` so every statement runs on whatever transaction the
//! caller holds.

pub mod contact;
pub mod contact_image;
pub mod requests;

pub use contact::{Contact, ContactId, ContactSummary, ContactWithImage, NewContact};
pub use contact_image::{ContactImage, NewContactImage};
pub use requests::{ContactSearch, CreateContactRequest, ImageUpload, UpdateContactRequest};
