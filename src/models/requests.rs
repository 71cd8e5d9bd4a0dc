//! Request payloads accepted by the contact lifecycle service.
//!
//! These mirror what a form submission carries: raw, untrimmed text and an
//! optional uploaded file. Validation happens in [`crate::validation`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An uploaded image file as received from the client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// An upload without bytes counts as no upload at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Lower-cased file extension without the dot, if the file name has one
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Request to create a contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub full_name: String,
    pub mobile_number: String,
    pub birth_date: Option<NaiveDate>,
    pub image: Option<ImageUpload>,
}

impl CreateContactRequest {
    pub fn new(full_name: impl Into<String>, mobile_number: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            mobile_number: mobile_number.into(),
            birth_date: None,
            image: None,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Request to overwrite a contact's fields and optionally change its image.
///
/// `remove_image` wins over a supplied image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateContactRequest {
    pub full_name: String,
    pub mobile_number: String,
    pub birth_date: Option<NaiveDate>,
    pub image: Option<ImageUpload>,
    pub remove_image: bool,
}

impl UpdateContactRequest {
    pub fn new(full_name: impl Into<String>, mobile_number: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            mobile_number: mobile_number.into(),
            birth_date: None,
            image: None,
            remove_image: false,
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    pub fn removing_image(mut self) -> Self {
        self.remove_image = true;
        self
    }
}

/// Search criteria; every field is optional and unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSearch {
    pub term: Option<String>,
    pub birth_date_from: Option<NaiveDate>,
    pub birth_date_to: Option<NaiveDate>,
}

impl ContactSearch {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn born_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.birth_date_from = from;
        self.birth_date_to = to;
        self
    }

    /// Trimmed term, or `None` when it is absent or blank
    pub fn normalized_term(&self) -> Option<String> {
        self.term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string)
    }
}
