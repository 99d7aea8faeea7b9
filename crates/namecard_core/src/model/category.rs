//! Category domain model.
//!
//! # Invariants
//! - `uuid` is generated once and never reused for another category.
//! - `name` is not validated here; callers reject blank input.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Named grouping that contacts may optionally belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: CategoryId,
    /// User-facing label, also rendered as the card organization.
    pub name: String,
}

impl Category {
    /// Creates a new category with a generated stable ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a category with a caller-provided ID (import and test paths).
    pub fn with_id(uuid: CategoryId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
        }
    }
}
