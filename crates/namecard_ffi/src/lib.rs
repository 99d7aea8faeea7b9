//! Flutter-facing bridge for NameCard core.

pub mod api;
