//! Core domain logic for NameCard.
//! This crate is the single source of truth for contact/category invariants.

pub mod card;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use card::{project, split_name, to_vcard, DisplayContact};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::contact::{Contact, ContactId};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::contact_repo::{
    CategoryFilter, ContactListItem, ContactListQuery, ContactRepository, SqliteContactRepository,
};
pub use repo::{RepoError, RepoResult};
pub use service::contact_book::{ContactBookError, ContactBookService, ContactCard, NewContact};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
