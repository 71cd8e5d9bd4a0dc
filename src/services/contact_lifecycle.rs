//! # Contact Lifecycle Service
//!
//! Turns create, update and delete requests into atomic changes to a contact
//! and its image attachment.
//!
//! Every mutating operation follows the same shape:
//!
//! 1. Validate the request. Violations are returned before any transaction opens.
//! 2. Open a unit of work.
//! 3. Re-check existence and the mobile number inside the unit of work, right
//!    before writing. [`ContactLifecycleService::mobile_number_exists`] is an
//!    advisory probe for forms and is never trusted here.
//! 4. Write the contact, then apply the attachment transition.
//! 5. Commit, or roll back on any outcome other than success.
//!
//! The unique indexes on `contacts.mobile_number` and `contact_images.contact_id`
//! are what actually serialize competing requests; a write or commit rejected by
//! the mobile number index is reported as [`ContactError::DuplicateMobileNumber`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use phonebook_core::models::{CreateContactRequest, ImageUpload, UpdateContactRequest};
//! use phonebook_core::services::ContactLifecycleService;
//!
//! # async fn example(pool: sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let service = ContactLifecycleService::new(pool);
//!
//! let id = service
//!     .create_contact(CreateContactRequest::new("Ali Rezaei", "09121234567"))
//!     .await?;
//!
//! let photo = ImageUpload::new("ali.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
//! service
//!     .update_contact(id, UpdateContactRequest::new("Ali Rezaei", "09121234567").with_image(photo))
//!     .await?;
//!
//! service.delete_contact(id).await?;
//! # Ok(())
//! # }
//! ```

use crate::database::{TransactionCoordinator, UnitOfWork};
use crate::error::{ContactError, ContactResult, StoreError};
use crate::logging::log_contact_operation;
use crate::models::{
    ContactId, ContactImage, ContactSearch, ContactSummary, ContactWithImage,
    CreateContactRequest, NewContact, NewContactImage, UpdateContactRequest,
};
use crate::stores::{ContactStore, ImageStore, SqlContactStore, SqlImageStore};
use crate::validation;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};

/// What an update did to the attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTransition {
    Unchanged,
    Attached,
    Replaced,
    Removed,
}

/// Orchestrates validation, duplicate checks and the two stores inside one
/// unit of work per request. Holds no mutable state; clones share the pool.
#[derive(Debug, Clone)]
pub struct ContactLifecycleService<C = SqlContactStore, I = SqlImageStore> {
    coordinator: TransactionCoordinator,
    contacts: C,
    images: I,
}

impl ContactLifecycleService {
    /// Service over the SQL stores
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_stores(
            TransactionCoordinator::new(pool),
            SqlContactStore,
            SqlImageStore,
        )
    }
}

fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> ContactError {
    move |err| ContactError::from_store(operation, err)
}

impl<C: ContactStore, I: ImageStore> ContactLifecycleService<C, I> {
    pub fn with_stores(coordinator: TransactionCoordinator, contacts: C, images: I) -> Self {
        Self {
            coordinator,
            contacts,
            images,
        }
    }

    pub fn coordinator(&self) -> &TransactionCoordinator {
        &self.coordinator
    }

    /// Create a contact, attaching the image if one was uploaded
    #[instrument(skip(self, request), fields(mobile_number = %request.mobile_number.trim()))]
    pub async fn create_contact(&self, request: CreateContactRequest) -> ContactResult<ContactId> {
        let violations = validation::validate_create_request(&request);
        if !violations.is_empty() {
            warn!(violations = violations.len(), "Create request failed validation");
            return Err(ContactError::ValidationFailed(violations));
        }

        let mut uow = self
            .coordinator
            .begin()
            .await
            .map_err(store_failure("begin unit of work"))?;
        let outcome = self.create_in(&mut uow, request).await;
        let id = self.finish(uow, outcome, "create_contact").await?;

        info!(contact_id = id, "Contact created");
        log_contact_operation("create_contact", Some(id), "created", None);
        Ok(id)
    }

    async fn create_in(
        &self,
        uow: &mut UnitOfWork,
        request: CreateContactRequest,
    ) -> ContactResult<ContactId> {
        let CreateContactRequest {
            full_name,
            mobile_number,
            birth_date,
            image,
        } = request;
        let mobile_number = mobile_number.trim().to_string();

        if self
            .contacts
            .exists_by_mobile_number(uow.connection(), &mobile_number, None)
            .await
            .map_err(store_failure("check mobile number"))?
        {
            return Err(ContactError::DuplicateMobileNumber);
        }

        let new_contact = NewContact {
            full_name: full_name.trim().to_string(),
            mobile_number,
            birth_date,
        };
        let contact = self
            .contacts
            .insert(uow.connection(), &new_contact)
            .await
            .map_err(store_failure("insert contact"))?;

        if let Some(upload) = image.filter(|upload| !upload.is_empty()) {
            let new_image = NewContactImage::from_upload(contact.id, upload);
            self.images
                .insert(uow.connection(), &new_image)
                .await
                .map_err(store_failure("insert image"))?;
            debug!(contact_id = contact.id, "Image attached");
        }

        Ok(contact.id)
    }

    /// Overwrite a contact's fields and apply the requested image transition
    #[instrument(skip(self, request))]
    pub async fn update_contact(
        &self,
        id: ContactId,
        request: UpdateContactRequest,
    ) -> ContactResult<()> {
        let violations = validation::validate_update_request(id, &request);
        if !violations.is_empty() {
            warn!(violations = violations.len(), "Update request failed validation");
            return Err(ContactError::ValidationFailed(violations));
        }

        let mut uow = self
            .coordinator
            .begin()
            .await
            .map_err(store_failure("begin unit of work"))?;
        let outcome = self.update_in(&mut uow, id, request).await;
        let transition = self.finish(uow, outcome, "update_contact").await?;

        info!(contact_id = id, image = ?transition, "Contact updated");
        log_contact_operation(
            "update_contact",
            Some(id),
            "updated",
            Some(&format!("image: {transition:?}")),
        );
        Ok(())
    }

    async fn update_in(
        &self,
        uow: &mut UnitOfWork,
        id: ContactId,
        request: UpdateContactRequest,
    ) -> ContactResult<ImageTransition> {
        let UpdateContactRequest {
            full_name,
            mobile_number,
            birth_date,
            image,
            remove_image,
        } = request;

        let Some(mut contact) = self
            .contacts
            .get_by_id(uow.connection(), id)
            .await
            .map_err(store_failure("load contact"))?
        else {
            return Err(ContactError::NotFound(id));
        };

        let mobile_number = mobile_number.trim().to_string();
        if self
            .contacts
            .exists_by_mobile_number(uow.connection(), &mobile_number, Some(id))
            .await
            .map_err(store_failure("check mobile number"))?
        {
            return Err(ContactError::DuplicateMobileNumber);
        }

        contact.full_name = full_name.trim().to_string();
        contact.mobile_number = mobile_number;
        contact.birth_date = birth_date;
        self.contacts
            .update(uow.connection(), &contact)
            .await
            .map_err(store_failure("update contact"))?;

        if remove_image {
            let removed = self
                .images
                .delete_by_contact_id(uow.connection(), id)
                .await
                .map_err(store_failure("remove image"))?;
            return Ok(if removed {
                ImageTransition::Removed
            } else {
                ImageTransition::Unchanged
            });
        }

        let Some(upload) = image.filter(|upload| !upload.is_empty()) else {
            return Ok(ImageTransition::Unchanged);
        };

        let new_image = NewContactImage::from_upload(id, upload);
        let replaced = self
            .images
            .update(uow.connection(), &new_image)
            .await
            .map_err(store_failure("replace image"))?;
        if replaced.is_some() {
            return Ok(ImageTransition::Replaced);
        }

        self.images
            .insert(uow.connection(), &new_image)
            .await
            .map_err(store_failure("insert image"))?;
        Ok(ImageTransition::Attached)
    }

    /// Delete a contact together with its image
    #[instrument(skip(self))]
    pub async fn delete_contact(&self, id: ContactId) -> ContactResult<()> {
        let mut uow = self
            .coordinator
            .begin()
            .await
            .map_err(store_failure("begin unit of work"))?;
        let outcome = self.delete_in(&mut uow, id).await;
        self.finish(uow, outcome, "delete_contact").await?;

        info!(contact_id = id, "Contact deleted");
        log_contact_operation("delete_contact", Some(id), "deleted", None);
        Ok(())
    }

    async fn delete_in(&self, uow: &mut UnitOfWork, id: ContactId) -> ContactResult<()> {
        if self
            .contacts
            .get_by_id(uow.connection(), id)
            .await
            .map_err(store_failure("load contact"))?
            .is_none()
        {
            return Err(ContactError::NotFound(id));
        }

        self.images
            .delete_by_contact_id(uow.connection(), id)
            .await
            .map_err(store_failure("remove image"))?;
        self.contacts
            .delete(uow.connection(), id)
            .await
            .map_err(store_failure("delete contact"))?;
        Ok(())
    }

    /// Commit a successful outcome, roll back anything else.
    ///
    /// A failed rollback is reported as [`ContactError::RollbackFailed`] rather
    /// than masked by the outcome that triggered it.
    async fn finish<T>(
        &self,
        uow: UnitOfWork,
        outcome: ContactResult<T>,
        operation: &'static str,
    ) -> ContactResult<T> {
        match outcome {
            Ok(value) => {
                uow.commit().await.map_err(store_failure("commit"))?;
                Ok(value)
            }
            Err(cause) => {
                if let Err(rollback_err) = uow.rollback().await {
                    error!(
                        operation = operation,
                        cause = %cause,
                        error = %rollback_err,
                        "Rollback failed"
                    );
                    return Err(ContactError::RollbackFailed {
                        operation: operation.to_string(),
                        cause: cause.to_string(),
                    });
                }

                debug!(operation = operation, cause = %cause, "Unit of work rolled back");
                log_contact_operation(operation, None, "rolled_back", Some(&cause.to_string()));
                Err(cause)
            }
        }
    }

    /// The contact with its image flag, or `None`
    pub async fn get_contact(&self, id: ContactId) -> ContactResult<Option<ContactSummary>> {
        let mut conn = self
            .coordinator
            .acquire()
            .await
            .map_err(store_failure("acquire connection"))?;
        let found = self
            .contacts
            .get_by_id_with_image(&mut conn, id)
            .await
            .map_err(store_failure("load contact"))?;

        Ok(found.map(|ContactWithImage { contact, image }| ContactSummary {
            contact,
            has_image: image.is_some(),
        }))
    }

    /// The image attached to a contact, or `None`
    pub async fn get_contact_image(&self, id: ContactId) -> ContactResult<Option<ContactImage>> {
        let mut conn = self
            .coordinator
            .acquire()
            .await
            .map_err(store_failure("acquire connection"))?;
        self.images
            .get_by_contact_id(&mut conn, id)
            .await
            .map_err(store_failure("load image"))
    }

    pub async fn search_contacts(
        &self,
        criteria: &ContactSearch,
    ) -> ContactResult<Vec<ContactSummary>> {
        let mut conn = self
            .coordinator
            .acquire()
            .await
            .map_err(store_failure("acquire connection"))?;
        self.contacts
            .search_by(&mut conn, criteria)
            .await
            .map_err(store_failure("search contacts"))
    }

    /// Every contact, newest first
    pub async fn list_contacts(&self) -> ContactResult<Vec<ContactSummary>> {
        let mut conn = self
            .coordinator
            .acquire()
            .await
            .map_err(store_failure("acquire connection"))?;
        self.contacts
            .list_all(&mut conn)
            .await
            .map_err(store_failure("list contacts"))
    }

    /// Advisory availability probe for forms.
    ///
    /// Runs outside any transaction and may be stale by the time a write
    /// happens. Create and update re-check inside their unit of work.
    pub async fn mobile_number_exists(
        &self,
        mobile_number: &str,
        exclude_id: Option<ContactId>,
    ) -> ContactResult<bool> {
        let mut conn = self
            .coordinator
            .acquire()
            .await
            .map_err(store_failure("acquire connection"))?;
        self.contacts
            .exists_by_mobile_number(&mut conn, mobile_number.trim(), exclude_id)
            .await
            .map_err(store_failure("check mobile number"))
    }
}
