//! Contact book use-case service.
//!
//! # Responsibility
//! - Orchestrate category/contact repositories into the operations the
//!   presentation layer calls.
//! - Build card views by resolving a contact's category and running the pure
//!   projection and vCard encoder.
//!
//! # Invariants
//! - The service holds no global state; callers construct it with explicit
//!   repositories and pass it where needed.
//! - Card views are recomputed from stored rows on every call.
//! - Text fields are forwarded as given; the service does not reject blanks.

use crate::card::{project, to_vcard, DisplayContact};
use crate::model::category::{Category, CategoryId};
use crate::model::contact::{Contact, ContactId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::contact_repo::{
    CategoryFilter, ContactListItem, ContactListQuery, ContactRepository,
};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact book use-cases.
#[derive(Debug)]
pub enum ContactBookError {
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Target category does not exist.
    CategoryNotFound(CategoryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ContactBookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent contact book state: {details}")
            }
        }
    }
}

impl Error for ContactBookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactBookError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ContactNotFound(id) => Self::ContactNotFound(id),
            RepoError::CategoryNotFound(id) => Self::CategoryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Input for creating one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub title: String,
    pub email: String,
    pub category_uuid: Option<CategoryId>,
}

/// Everything the card screen renders for one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub contact_uuid: ContactId,
    pub display: DisplayContact,
    /// vCard payload for the QR code on the card back.
    pub vcard: String,
}

/// Contact book facade over category and contact repositories.
pub struct ContactBookService<C: CategoryRepository, K: ContactRepository> {
    categories: C,
    contacts: K,
}

impl<C: CategoryRepository, K: ContactRepository> ContactBookService<C, K> {
    /// Creates a service using the provided repository implementations.
    pub fn new(categories: C, contacts: K) -> Self {
        Self {
            categories,
            contacts,
        }
    }

    /// Creates one category with a generated id.
    pub fn create_category(
        &self,
        name: impl Into<String>,
    ) -> Result<Category, ContactBookError> {
        let category = Category::new(name);
        let id = self.categories.create_category(&category)?;
        info!("event=category_create module=service status=ok category_id={id}");
        self.categories
            .get_category(id)?
            .ok_or(ContactBookError::InconsistentState(
                "created category not found in read-back",
            ))
    }

    /// Lists every stored category in creation order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.categories.list_categories()
    }

    /// Renames one category. Existing cards pick the new name up on next view.
    pub fn rename_category(
        &self,
        id: CategoryId,
        name: impl Into<String>,
    ) -> Result<Category, ContactBookError> {
        let name = name.into();
        self.categories.rename_category(id, name.as_str())?;
        self.categories
            .get_category(id)?
            .ok_or(ContactBookError::InconsistentState(
                "renamed category not found in read-back",
            ))
    }

    /// Deletes one category, releasing its members to "no category".
    ///
    /// Returns how many contacts were released.
    pub fn delete_category(&self, id: CategoryId) -> Result<usize, ContactBookError> {
        match self.categories.delete_category(id) {
            Ok(released) => {
                info!(
                    "event=category_delete module=service status=ok category_id={id} released={released}"
                );
                Ok(released)
            }
            Err(err) => {
                warn!(
                    "event=category_delete module=service status=error category_id={id} error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Lists the contacts currently linked to one category.
    pub fn category_members(&self, id: CategoryId) -> Result<Vec<Contact>, ContactBookError> {
        if self.categories.get_category(id)?.is_none() {
            return Err(ContactBookError::CategoryNotFound(id));
        }
        let query = ContactListQuery {
            category: CategoryFilter::In(id),
            ..ContactListQuery::default()
        };
        Ok(self.contacts.list_contacts(&query)?)
    }

    /// Creates one contact with a generated id and optional category.
    pub fn create_contact(&self, request: NewContact) -> Result<Contact, ContactBookError> {
        let contact = Contact {
            category_uuid: request.category_uuid,
            ..Contact::new(request.name, request.title, request.email)
        };
        let id = self.contacts.create_contact(&contact)?;
        info!(
            "event=contact_create module=service status=ok contact_id={id} categorized={}",
            contact.category_uuid.is_some()
        );
        self.contacts
            .get_contact(id)?
            .ok_or(ContactBookError::InconsistentState(
                "created contact not found in read-back",
            ))
    }

    /// Gets one contact by stable id.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.contacts.get_contact(id)
    }

    /// Lists contacts with filter and pagination options.
    pub fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        self.contacts.list_contacts(query)
    }

    /// Lists rows for the contact list screen.
    pub fn contact_rows(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactListItem>> {
        self.contacts.list_contact_items(query)
    }

    /// Reassigns the category of one contact; `None` clears it.
    pub fn assign_category(
        &self,
        id: ContactId,
        category_uuid: Option<CategoryId>,
    ) -> Result<Contact, ContactBookError> {
        self.contacts.set_contact_category(id, category_uuid)?;
        self.contacts
            .get_contact(id)?
            .ok_or(ContactBookError::InconsistentState(
                "updated contact not found in read-back",
            ))
    }

    /// Deletes one contact. Its category is left untouched.
    pub fn delete_contact(&self, id: ContactId) -> Result<(), ContactBookError> {
        self.contacts.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }

    /// Builds the card view for one contact.
    pub fn contact_card(&self, id: ContactId) -> Result<ContactCard, ContactBookError> {
        let contact = self
            .contacts
            .get_contact(id)?
            .ok_or(ContactBookError::ContactNotFound(id))?;
        let category = match contact.category_uuid {
            Some(category_uuid) => Some(self.categories.get_category(category_uuid)?.ok_or(
                ContactBookError::InconsistentState("contact references a missing category"),
            )?),
            None => None,
        };

        let display = project(&contact, category.as_ref());
        let vcard = to_vcard(&display);
        Ok(ContactCard {
            contact_uuid: contact.uuid,
            display,
            vcard,
        })
    }
}
