//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level contact book functions to Dart via FRB.
//! - Act as the form boundary: trim input and reject blank required fields
//!   before anything reaches core.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - IDs cross the boundary as UUID strings.
//! - Every call opens the store explicitly and passes it to core; no
//!   connection is cached between calls.

use namecard_core::db::open_db;
use namecard_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, CategoryId, ContactBookService, ContactCard, ContactListItem, ContactListQuery, NewContact,
    SqliteCategoryRepository, SqliteContactRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "namecard.sqlite3";
const DB_PATH_ENV: &str = "NAMECARD_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type BookService<'conn> =
    ContactBookService<SqliteCategoryRepository<'conn>, SqliteContactRepository<'conn>>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// A blank `level` falls back to the build's default level.
/// Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(resolve_log_level(&level), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

fn resolve_log_level(level: &str) -> &str {
    if level.trim().is_empty() {
        default_log_level()
    } else {
        level
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Created or affected record ID.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Category option for the contact form picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
}

/// Category list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListResponse {
    pub ok: bool,
    pub items: Vec<CategoryItem>,
    pub message: String,
}

/// One row on the contact list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRowItem {
    pub id: String,
    pub name: String,
    pub title: String,
    /// Badge text; absent for uncategorized contacts.
    pub category_name: Option<String>,
}

/// Contact list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactListResponse {
    pub ok: bool,
    pub items: Vec<ContactRowItem>,
    pub message: String,
}

/// Card view model for both card faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub organization: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub department: String,
    /// Payload for the QR code on the card back.
    pub vcard: String,
}

/// Card envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardResponse {
    pub ok: bool,
    pub card: Option<CardView>,
    pub message: String,
}

/// Creates a category from the "Add Category" form.
#[flutter_rust_bridge::frb(sync)]
pub fn category_create(name: String) -> ActionResponse {
    let name = match require_field("category name", &name) {
        Ok(value) => value,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_book(|book| book.create_category(name).map_err(|err| err.to_string())) {
        Ok(category) => {
            ActionResponse::success("Category created.", Some(category.uuid.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("category_create failed: {err}")),
    }
}

/// Lists categories for the form picker.
#[flutter_rust_bridge::frb(sync)]
pub fn category_list() -> CategoryListResponse {
    match with_book(|book| book.list_categories().map_err(|err| err.to_string())) {
        Ok(categories) => CategoryListResponse {
            ok: true,
            message: format!("Found {} category(ies).", categories.len()),
            items: categories
                .into_iter()
                .map(|category| CategoryItem {
                    id: category.uuid.to_string(),
                    name: category.name,
                })
                .collect(),
        },
        Err(err) => CategoryListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("category_list failed: {err}"),
        },
    }
}

/// Deletes a category; its contacts become uncategorized.
#[flutter_rust_bridge::frb(sync)]
pub fn category_delete(category_id: String) -> ActionResponse {
    let id = match parse_id(&category_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_book(|book| book.delete_category(id).map_err(|err| err.to_string())) {
        Ok(released) => ActionResponse::success(
            format!("Category deleted; {released} contact(s) uncategorized."),
            Some(category_id),
        ),
        Err(err) => ActionResponse::failure(format!("category_delete failed: {err}")),
    }
}

/// Creates a contact from the "Add Contact" form.
///
/// `name`, `title` and `email` must be non-blank; `category_id` is optional.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_create(
    name: String,
    title: String,
    email: String,
    category_id: Option<String>,
) -> ActionResponse {
    let request = match build_new_contact(&name, &title, &email, category_id.as_deref()) {
        Ok(request) => request,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_book(|book| book.create_contact(request).map_err(|err| err.to_string())) {
        Ok(contact) => ActionResponse::success("Contact created.", Some(contact.uuid.to_string())),
        Err(err) => ActionResponse::failure(format!("contact_create failed: {err}")),
    }
}

/// Lists rows for the contact list screen.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_list() -> ContactListResponse {
    let query = ContactListQuery::default();
    match with_book(|book| book.contact_rows(&query).map_err(|err| err.to_string())) {
        Ok(rows) => ContactListResponse {
            ok: true,
            message: format!("Found {} contact(s).", rows.len()),
            items: rows.into_iter().map(to_contact_row_item).collect(),
        },
        Err(err) => ContactListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("contact_list failed: {err}"),
        },
    }
}

/// Reassigns a contact's category; `None` clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_set_category(contact_id: String, category_id: Option<String>) -> ActionResponse {
    let parsed = parse_id(&contact_id).and_then(|id| {
        parse_optional_id(category_id.as_deref()).map(|category| (id, category))
    });
    let (id, category) = match parsed {
        Ok(value) => value,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_book(|book| {
        book.assign_category(id, category)
            .map_err(|err| err.to_string())
    }) {
        Ok(_) => ActionResponse::success("Contact category updated.", Some(contact_id)),
        Err(err) => ActionResponse::failure(format!("contact_set_category failed: {err}")),
    }
}

/// Deletes a contact from the list.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_delete(contact_id: String) -> ActionResponse {
    let id = match parse_id(&contact_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_book(|book| book.delete_contact(id).map_err(|err| err.to_string())) {
        Ok(()) => ActionResponse::success("Contact deleted.", Some(contact_id)),
        Err(err) => ActionResponse::failure(format!("contact_delete failed: {err}")),
    }
}

/// Builds the flippable card view and QR payload for one contact.
#[flutter_rust_bridge::frb(sync)]
pub fn contact_card(contact_id: String) -> CardResponse {
    let id = match parse_id(&contact_id) {
        Ok(id) => id,
        Err(message) => {
            return CardResponse {
                ok: false,
                card: None,
                message,
            }
        }
    };
    match with_book(|book| book.contact_card(id).map_err(|err| err.to_string())) {
        Ok(card) => CardResponse {
            ok: true,
            card: Some(to_card_view(card)),
            message: "Card ready.".to_string(),
        },
        Err(err) => CardResponse {
            ok: false,
            card: None,
            message: format!("contact_card failed: {err}"),
        },
    }
}

fn build_new_contact(
    name: &str,
    title: &str,
    email: &str,
    category_id: Option<&str>,
) -> Result<NewContact, String> {
    Ok(NewContact {
        name: require_field("name", name)?,
        title: require_field("title", title)?,
        email: require_field("email", email)?,
        category_uuid: parse_optional_id(category_id)?,
    })
}

/// Rejects whitespace-only input; accepted text is stored as entered.
fn require_field(field: &str, value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be blank"));
    }
    Ok(value.to_string())
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{value}`"))
}

fn parse_optional_id(value: Option<&str>) -> Result<Option<CategoryId>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_id(text).map(Some),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_book<T>(f: impl FnOnce(&BookService<'_>) -> Result<T, String>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("store open failed: {err}")
    })?;
    let categories = SqliteCategoryRepository::try_new(&conn)
        .map_err(|err| format!("category repo init failed: {err}"))?;
    let contacts = SqliteContactRepository::try_new(&conn)
        .map_err(|err| format!("contact repo init failed: {err}"))?;
    let book = ContactBookService::new(categories, contacts);
    f(&book)
}

fn to_contact_row_item(row: ContactListItem) -> ContactRowItem {
    ContactRowItem {
        id: row.contact_uuid.to_string(),
        name: row.name,
        title: row.title,
        category_name: row.category_name,
    }
}

fn to_card_view(card: ContactCard) -> CardView {
    let display = card.display;
    CardView {
        contact_id: card.contact_uuid.to_string(),
        first_name: display.first_name,
        last_name: display.last_name,
        title: display.title,
        organization: display.organization,
        email: display.email,
        phone: display.phone,
        address: display.address,
        website: display.website,
        department: display.department,
        vcard: card.vcard,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        category_create, category_delete, category_list, contact_card, contact_create,
        contact_delete, contact_list, contact_set_category, core_version, init_logging, ping,
        resolve_log_level,
    };
    use namecard_core::db::open_db;
    use namecard_core::default_log_level;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn blank_log_level_falls_back_to_default() {
        assert_eq!(resolve_log_level(""), default_log_level());
        assert_eq!(resolve_log_level("  "), default_log_level());
        assert_eq!(resolve_log_level("warn"), "warn");
    }

    #[test]
    fn contact_fields_are_stored_as_entered() {
        let token = unique_token("ffi-raw");
        let name = format!("  Ada {token} ");
        let title = " Staff Engineer".to_string();
        let contact = contact_create(
            name.clone(),
            title.clone(),
            "ada@example.com ".to_string(),
            None,
        );
        assert!(contact.ok, "{}", contact.message);
        let contact_id = contact.id.expect("contact id");

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let stored: (String, String, String) = conn
            .query_row(
                "SELECT name, title, email FROM contacts WHERE uuid = ?1",
                [contact_id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .expect("query contact row");
        assert_eq!(stored, (name, title, "ada@example.com ".to_string()));

        let card = contact_card(contact_id.clone()).card.expect("card view");
        assert_eq!(card.first_name, "Ada");
        assert_eq!(card.last_name, token);

        assert!(contact_delete(contact_id).ok);
    }

    #[test]
    fn contact_create_rejects_blank_required_fields() {
        let response = contact_create(
            "  ".to_string(),
            "Manager".to_string(),
            "r@example.com".to_string(),
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("name"));

        let response = contact_create(
            "Roger".to_string(),
            "Manager".to_string(),
            String::new(),
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("email"));
    }

    #[test]
    fn category_create_rejects_blank_name() {
        let response = category_create(" \t ".to_string());
        assert!(!response.ok);
        assert!(response.id.is_none());
    }

    #[test]
    fn malformed_ids_are_rejected_without_touching_store() {
        assert!(!contact_delete("not-a-uuid".to_string()).ok);
        assert!(!category_delete("not-a-uuid".to_string()).ok);
        assert!(!contact_card("not-a-uuid".to_string()).ok);
        assert!(
            !contact_set_category("not-a-uuid".to_string(), Some("also-bad".to_string())).ok
        );
    }

    #[test]
    fn card_flow_tracks_category_deletion() {
        let token = unique_token("ffi-card");
        let category = category_create(format!("Org {token}"));
        assert!(category.ok, "{}", category.message);
        let category_id = category.id.expect("category id");

        assert!(category_list()
            .items
            .iter()
            .any(|item| item.id == category_id));

        let contact = contact_create(
            format!("  Roger {token}  "),
            "Senior Smooth Replies Manager".to_string(),
            "roger@liftwithroger.com".to_string(),
            Some(category_id.clone()),
        );
        assert!(contact.ok, "{}", contact.message);
        let contact_id = contact.id.expect("contact id");

        let card = contact_card(contact_id.clone()).card.expect("card view");
        assert_eq!(card.first_name, "Roger");
        assert_eq!(card.last_name, token);
        assert_eq!(card.organization, format!("Org {token}"));
        assert!(card.vcard.contains(&format!("ORG:Org {token};")));

        let row = contact_list()
            .items
            .into_iter()
            .find(|item| item.id == contact_id)
            .expect("row for created contact");
        assert_eq!(row.category_name, Some(format!("Org {token}")));

        let deleted = category_delete(category_id);
        assert!(deleted.ok, "{}", deleted.message);
        let card = contact_card(contact_id.clone()).card.expect("card view");
        assert_eq!(card.organization, "Unknown Organization");

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let category_uuid: Option<String> = conn
            .query_row(
                "SELECT category_uuid FROM contacts WHERE uuid = ?1",
                [contact_id.as_str()],
                |row| row.get(0),
            )
            .expect("query contact row");
        assert_eq!(category_uuid, None);

        assert!(contact_delete(contact_id.clone()).ok);
        assert!(!contact_card(contact_id).ok);
    }

    #[test]
    fn contact_set_category_assigns_and_clears() {
        let token = unique_token("ffi-assign");
        let category_id = category_create(token.clone()).id.expect("category id");
        let contact_id = contact_create(
            "Roger".to_string(),
            "Manager".to_string(),
            "r@example.com".to_string(),
            None,
        )
        .id
        .expect("contact id");

        assert!(contact_set_category(contact_id.clone(), Some(category_id)).ok);
        let card = contact_card(contact_id.clone()).card.expect("card view");
        assert_eq!(card.organization, token);

        assert!(contact_set_category(contact_id.clone(), None).ok);
        let card = contact_card(contact_id).card.expect("card view");
        assert_eq!(card.organization, "Unknown Organization");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
