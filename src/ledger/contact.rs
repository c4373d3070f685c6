//! Contact management

use uuid::Uuid;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// Manager for contact CRUD with the deletion policy enforced
pub struct ContactManager<S: RecordStore> {
    pub(crate) storage: S,
}

impl<S: RecordStore> ContactManager<S> {
    /// Create a new contact manager
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create a new contact with a zero opening balance
    pub async fn create_contact(&mut self, input: NewContact) -> BooksResult<Contact> {
        validation::validate_new_contact(&input)?;

        let contact = Contact::new(input);
        self.storage.save_contact(&contact).await?;
        Ok(contact)
    }

    /// Get a contact by ID
    pub async fn get_contact(&self, contact_id: Uuid) -> BooksResult<Option<Contact>> {
        self.storage.get_contact(contact_id).await
    }

    /// Get a contact by ID, returning an error if not found
    pub async fn get_contact_required(&self, contact_id: Uuid) -> BooksResult<Contact> {
        self.storage
            .get_contact(contact_id)
            .await?
            .ok_or(BooksError::ContactNotFound(contact_id))
    }

    /// List all contacts, sorted by name
    pub async fn list_contacts(&self) -> BooksResult<Vec<Contact>> {
        self.storage.list_contacts(None).await
    }

    /// List contacts of one type, sorted by name
    pub async fn list_contacts_by_type(
        &self,
        contact_type: ContactType,
    ) -> BooksResult<Vec<Contact>> {
        self.storage.list_contacts(Some(contact_type)).await
    }

    /// Update an existing contact
    pub async fn update_contact(&mut self, contact: &Contact) -> BooksResult<()> {
        if contact.name.trim().is_empty() {
            return Err(BooksError::Validation(
                "Contact name cannot be empty".to_string(),
            ));
        }

        if self.storage.get_contact(contact.id).await?.is_none() {
            return Err(BooksError::ContactNotFound(contact.id));
        }

        self.storage.update_contact(contact).await
    }

    /// Delete a contact
    ///
    /// Deletion is blocked while any transaction still references the
    /// contact; the caller must delete (and thereby reverse) those
    /// transactions first.
    pub async fn delete_contact(&mut self, contact_id: Uuid) -> BooksResult<()> {
        if self.storage.get_contact(contact_id).await?.is_none() {
            return Err(BooksError::ContactNotFound(contact_id));
        }

        let referencing = self
            .storage
            .list_contact_transactions(contact_id, None, None)
            .await?;
        if !referencing.is_empty() {
            return Err(BooksError::Validation(format!(
                "Contact {} has {} transaction(s) and cannot be deleted",
                contact_id,
                referencing.len()
            )));
        }

        self.storage.delete_contact(contact_id).await
    }
}
