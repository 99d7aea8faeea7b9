//! Contact domain model.
//!
//! # Responsibility
//! - Define the stored person record shown in the contact list.
//!
//! # Invariants
//! - `name` is stored as entered and only split at display time.
//! - `category_uuid`, when set, points at an existing category. Repositories
//!   enforce this on write and the relationship maintainer clears it when the
//!   category is deleted.

use super::category::{Category, CategoryId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a contact.
pub type ContactId = Uuid;

/// Stored person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub uuid: ContactId,
    /// Full name, not pre-split.
    pub name: String,
    pub title: String,
    pub email: String,
    /// Optional link to the owning category.
    pub category_uuid: Option<CategoryId>,
}

impl Contact {
    /// Creates an uncategorized contact with a generated stable ID.
    pub fn new(name: impl Into<String>, title: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, title, email)
    }

    /// Creates an uncategorized contact with a caller-provided ID.
    pub fn with_id(
        uuid: ContactId,
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            title: title.into(),
            email: email.into(),
            category_uuid: None,
        }
    }

    /// Returns this contact linked to `category`, or unlinked for `None`.
    pub fn in_category(mut self, category: Option<&Category>) -> Self {
        self.category_uuid = category.map(|value| value.uuid);
        self
    }

    /// Returns whether this contact currently belongs to `category_uuid`.
    pub fn belongs_to(&self, category_uuid: CategoryId) -> bool {
        self.category_uuid == Some(category_uuid)
    }
}
