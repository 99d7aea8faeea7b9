//! Persisted domain model for categories and contacts.
//!
//! # Responsibility
//! - Define the canonical records stored by core.
//! - Keep identity generation in one place.
//!
//! # Invariants
//! - Every stored record is identified by a stable UUID.
//! - A contact references at most one category; membership is derived from
//!   that reference, never stored on the category.

pub mod category;
pub mod contact;
