//! Input validation for contact requests
//!
//! Pure field-level checks run before any store access. Duplicate mobile numbers
//! are not detected here; that needs a store round trip and belongs to the
//! lifecycle service.

use crate::constants::{contact, image, mobile};
use crate::models::{ContactId, CreateContactRequest, ImageUpload, UpdateContactRequest};
use chrono::{Local, NaiveDate};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Field of a contact request that a violation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Id,
    FullName,
    MobileNumber,
    BirthDate,
    Image,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Id => "id",
            ContactField::FullName => "full_name",
            ContactField::MobileNumber => "mobile_number",
            ContactField::BirthDate => "birth_date",
            ContactField::Image => "image",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: ContactField,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: ContactField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn mobile_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // ASCII digits only; `\d` would otherwise accept any Unicode digit.
        RegexBuilder::new(mobile::PATTERN)
            .unicode(false)
            .build()
            .expect("mobile number pattern is a valid regex")
    })
}

/// Validates a create request against today's local date
pub fn validate_create_request(request: &CreateContactRequest) -> Vec<FieldViolation> {
    validate_create_request_as_of(request, Local::now().date_naive())
}

/// Validates a create request with an explicit "today"
pub fn validate_create_request_as_of(
    request: &CreateContactRequest,
    today: NaiveDate,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    validate_full_name(&request.full_name, &mut violations);
    validate_mobile_number(&request.mobile_number, &mut violations);
    validate_birth_date(request.birth_date, today, &mut violations);
    if let Some(upload) = request.image.as_ref() {
        validate_image(upload, &mut violations);
    }
    violations
}

/// Validates an update request against today's local date
pub fn validate_update_request(
    id: ContactId,
    request: &UpdateContactRequest,
) -> Vec<FieldViolation> {
    validate_update_request_as_of(id, request, Local::now().date_naive())
}

/// Validates an update request with an explicit "today"
pub fn validate_update_request_as_of(
    id: ContactId,
    request: &UpdateContactRequest,
    today: NaiveDate,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    if id <= 0 {
        violations.push(FieldViolation::new(ContactField::Id, "contact id is invalid"));
    }
    validate_full_name(&request.full_name, &mut violations);
    validate_mobile_number(&request.mobile_number, &mut violations);
    validate_birth_date(request.birth_date, today, &mut violations);
    if let Some(upload) = request.image.as_ref() {
        validate_image(upload, &mut violations);
    }
    violations
}

fn validate_full_name(full_name: &str, violations: &mut Vec<FieldViolation>) {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        violations.push(FieldViolation::new(
            ContactField::FullName,
            "full name is required",
        ));
    } else if full_name.chars().count() > contact::MAX_FULL_NAME_LENGTH {
        violations.push(FieldViolation::new(
            ContactField::FullName,
            format!(
                "full name must not exceed {} characters",
                contact::MAX_FULL_NAME_LENGTH
            ),
        ));
    }
}

fn validate_mobile_number(mobile_number: &str, violations: &mut Vec<FieldViolation>) {
    let mobile_number = mobile_number.trim();
    if mobile_number.is_empty() {
        violations.push(FieldViolation::new(
            ContactField::MobileNumber,
            "mobile number is required",
        ));
    } else if mobile_number.chars().count() != mobile::LENGTH
        || !mobile_number_pattern().is_match(mobile_number)
    {
        violations.push(FieldViolation::new(
            ContactField::MobileNumber,
            format!(
                "mobile number must be {} digits starting with {}",
                mobile::LENGTH,
                mobile::PREFIX
            ),
        ));
    }
}

/// Date-only comparison; a birth date of today is valid
fn validate_birth_date(
    birth_date: Option<NaiveDate>,
    today: NaiveDate,
    violations: &mut Vec<FieldViolation>,
) {
    if let Some(birth_date) = birth_date {
        if birth_date > today {
            violations.push(FieldViolation::new(
                ContactField::BirthDate,
                "birth date cannot be in the future",
            ));
        }
    }
}

fn validate_image(upload: &ImageUpload, violations: &mut Vec<FieldViolation>) {
    let extension_allowed = upload
        .extension()
        .is_some_and(|ext| image::ALLOWED_EXTENSIONS.contains(&ext.as_str()));
    if !extension_allowed {
        violations.push(FieldViolation::new(
            ContactField::Image,
            format!(
                "image must be one of: {}",
                image::ALLOWED_EXTENSIONS.join(", ")
            ),
        ));
    }

    let content_type = upload.content_type.trim().to_lowercase();
    if !image::ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        violations.push(FieldViolation::new(
            ContactField::Image,
            format!("content type {content_type:?} is not an accepted image type"),
        ));
    }

    if upload.len() > image::MAX_IMAGE_SIZE_BYTES {
        violations.push(FieldViolation::new(
            ContactField::Image,
            format!(
                "image must not exceed {} bytes (got {})",
                image::MAX_IMAGE_SIZE_BYTES,
                upload.len()
            ),
        ));
    }
}
