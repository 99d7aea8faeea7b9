//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `contacts` storage.
//! - Serve list-view rows joined with their category name.
//!
//! # Invariants
//! - Writes that set `category_uuid` check the category exists in the same
//!   IMMEDIATE transaction and fail with `CategoryNotFound` otherwise.
//! - Deleting a contact never touches `categories`.
//! - Listing follows insertion order: `created_at ASC, rowid ASC`.

use super::category_repo::category_exists;
use super::schema::ensure_table_ready;
use super::{parse_uuid, RepoError, RepoResult};
use crate::model::category::CategoryId;
use crate::model::contact::{Contact, ContactId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};

const CONTACT_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "title",
    "email",
    "category_uuid",
    "created_at",
    "updated_at",
];

/// Category filter for contact listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every contact.
    #[default]
    Any,
    /// Members of one category.
    In(CategoryId),
    /// Contacts without a category.
    Uncategorized,
}

/// Query options for listing contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListQuery {
    pub category: CategoryFilter,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Read model for one contact list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListItem {
    pub contact_uuid: ContactId,
    pub name: String,
    pub title: String,
    /// Badge text; `None` for uncategorized contacts.
    pub category_name: Option<String>,
}

/// Repository interface for contact operations.
pub trait ContactRepository {
    /// Persists a new contact and returns its stable id.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Replaces all stored fields of an existing contact.
    fn update_contact(&self, contact: &Contact) -> RepoResult<()>;
    /// Loads one contact by id.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    /// Lists contacts using filter and pagination options.
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>>;
    /// Lists list-view rows using filter and pagination options.
    fn list_contact_items(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactListItem>>;
    /// Reassigns (or clears) the category of one contact.
    fn set_contact_category(
        &self,
        id: ContactId,
        category_uuid: Option<CategoryId>,
    ) -> RepoResult<()>;
    /// Removes one contact.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "contacts", CONTACT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_category_target(&tx, contact.category_uuid)?;
        tx.execute(
            "INSERT INTO contacts (uuid, name, title, email, category_uuid)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                contact.uuid.to_string(),
                contact.name.as_str(),
                contact.title.as_str(),
                contact.email.as_str(),
                contact.category_uuid.map(|value| value.to_string()),
            ],
        )?;
        tx.commit()?;
        Ok(contact.uuid)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_category_target(&tx, contact.category_uuid)?;
        let changed = tx.execute(
            "UPDATE contacts
             SET name = ?2,
                 title = ?3,
                 email = ?4,
                 category_uuid = ?5,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                contact.uuid.to_string(),
                contact.name.as_str(),
                contact.title.as_str(),
                contact.email.as_str(),
                contact.category_uuid.map(|value| value.to_string()),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::ContactNotFound(contact.uuid));
        }
        tx.commit()?;
        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, title, email, category_uuid
             FROM contacts
             WHERE uuid = ?1;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }
        Ok(None)
    }

    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        let (sql, bind_values) = build_list_sql(
            "SELECT
                c.uuid AS uuid,
                c.name AS name,
                c.title AS title,
                c.email AS email,
                c.category_uuid AS category_uuid
             FROM contacts c",
            query,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn list_contact_items(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactListItem>> {
        let (sql, bind_values) = build_list_sql(
            "SELECT
                c.uuid AS uuid,
                c.name AS name,
                c.title AS title,
                g.name AS category_name
             FROM contacts c
             LEFT JOIN categories g ON g.uuid = c.category_uuid",
            query,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            items.push(ContactListItem {
                contact_uuid: parse_uuid(&uuid_text, "contacts.uuid")?,
                name: row.get("name")?,
                title: row.get("title")?,
                category_name: row.get("category_name")?,
            });
        }
        Ok(items)
    }

    fn set_contact_category(
        &self,
        id: ContactId,
        category_uuid: Option<CategoryId>,
    ) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_category_target(&tx, category_uuid)?;
        let changed = tx.execute(
            "UPDATE contacts
             SET category_uuid = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![id.to_string(), category_uuid.map(|value| value.to_string())],
        )?;
        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::ContactNotFound(id));
        }
        Ok(())
    }
}

fn ensure_category_target(conn: &Connection, category_uuid: Option<CategoryId>) -> RepoResult<()> {
    if let Some(id) = category_uuid {
        if !category_exists(conn, id)? {
            return Err(RepoError::CategoryNotFound(id));
        }
    }
    Ok(())
}

fn build_list_sql(select: &str, query: &ContactListQuery) -> (String, Vec<Value>) {
    let mut sql = format!("{select} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    match query.category {
        CategoryFilter::Any => {}
        CategoryFilter::In(id) => {
            sql.push_str(" AND c.category_uuid = ?");
            bind_values.push(Value::Text(id.to_string()));
        }
        CategoryFilter::Uncategorized => sql.push_str(" AND c.category_uuid IS NULL"),
    }

    sql.push_str(" ORDER BY c.created_at ASC, c.rowid ASC");

    if let Some(limit) = query.limit {
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }
    } else if query.offset > 0 {
        sql.push_str(" LIMIT -1 OFFSET ?");
        bind_values.push(Value::Integer(i64::from(query.offset)));
    }

    (sql, bind_values)
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid(&uuid_text, "contacts.uuid")?;
    let category_uuid = row
        .get::<_, Option<String>>("category_uuid")?
        .map(|value| parse_uuid(&value, "contacts.category_uuid"))
        .transpose()?;

    Ok(Contact {
        uuid,
        name: row.get("name")?,
        title: row.get("title")?,
        email: row.get("email")?,
        category_uuid,
    })
}
