//! Display-ready card projections.
//!
//! # Responsibility
//! - Map stored contact/category pairs into the record rendered on a card.
//! - Encode that record as the vCard payload fed to the QR renderer.
//!
//! # Invariants
//! - Everything here is pure and total: no I/O, no errors, no persistence.
//! - `DisplayContact` is recomputed on demand and never written back.

pub mod display;
pub mod vcard;

pub use display::{project, split_name, DisplayContact};
pub use vcard::to_vcard;
