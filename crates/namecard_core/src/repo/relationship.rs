//! Category/contact relationship maintenance.
//!
//! # Responsibility
//! - Own the nullify-on-delete rule between contacts and categories.
//!
//! # Invariants
//! - This is the only code path that clears `contacts.category_uuid` because
//!   its category is going away.
//! - Callers run it inside the same transaction that removes the category, so
//!   no reader can observe a contact pointing at a deleted category.
//! - Contacts are never deleted here.

use super::RepoResult;
use crate::model::category::CategoryId;
use log::debug;
use rusqlite::Connection;

/// Clears the category reference on every contact in `category_uuid`.
///
/// Returns the number of contacts released.
pub(crate) fn release_category_members(
    conn: &Connection,
    category_uuid: CategoryId,
) -> RepoResult<usize> {
    let released = conn.execute(
        "UPDATE contacts
         SET category_uuid = NULL,
             updated_at = (strftime('%s', 'now') * 1000)
         WHERE category_uuid = ?1;",
        [category_uuid.to_string()],
    )?;
    debug!("event=category_release module=repo status=ok released={released}");
    Ok(released)
}
