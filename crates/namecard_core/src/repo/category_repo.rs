//! Category repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `categories` storage.
//! - Route deletion through the relationship maintainer.
//!
//! # Invariants
//! - Listing follows insertion order: `created_at ASC, rowid ASC`. The
//!   timestamp has second resolution, so `rowid` breaks same-second ties.
//! - `delete_category` is atomic: members are released and the category row
//!   removed in one IMMEDIATE transaction, or nothing changes.

use super::relationship::release_category_members;
use super::schema::ensure_table_ready;
use super::{parse_uuid, RepoError, RepoResult};
use crate::model::category::{Category, CategoryId};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CATEGORY_COLUMNS: &[&str] = &["uuid", "name", "created_at", "updated_at"];

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Persists a new category and returns its stable id.
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    /// Loads one category by id.
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Lists all categories in creation order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Replaces the display name of one category.
    fn rename_category(&self, id: CategoryId, name: &str) -> RepoResult<()>;
    /// Deletes one category and clears it from every member contact.
    ///
    /// Returns the number of contacts that were released.
    fn delete_category(&self, id: CategoryId) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "categories", CATEGORY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        self.conn.execute(
            "INSERT INTO categories (uuid, name) VALUES (?1, ?2);",
            params![category.uuid.to_string(), category.name.as_str()],
        )?;
        Ok(category.uuid)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        self.conn
            .query_row(
                "SELECT uuid, name FROM categories WHERE uuid = ?1;",
                [id.to_string()],
                read_category_columns,
            )
            .optional()?
            .map(parse_category)
            .transpose()
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name
             FROM categories
             ORDER BY created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category(read_category_columns(row)?)?);
        }
        Ok(categories)
    }

    fn rename_category(&self, id: CategoryId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), name],
        )?;
        if changed == 0 {
            return Err(RepoError::CategoryNotFound(id));
        }
        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !category_exists(&tx, id)? {
            return Err(RepoError::CategoryNotFound(id));
        }

        let released = release_category_members(&tx, id)?;
        tx.execute("DELETE FROM categories WHERE uuid = ?1;", [id.to_string()])?;
        tx.commit()?;
        Ok(released)
    }
}

/// Returns whether a category row exists for `id`.
pub(crate) fn category_exists(conn: &Connection, id: CategoryId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn read_category_columns(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get("uuid")?, row.get("name")?))
}

fn parse_category((uuid_text, name): (String, String)) -> RepoResult<Category> {
    let uuid = parse_uuid(&uuid_text, "categories.uuid")?;
    Ok(Category::with_id(uuid, name))
}
