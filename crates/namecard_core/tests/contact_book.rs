use namecard_core::card::display::{
    PLACEHOLDER_ADDRESS, PLACEHOLDER_DEPARTMENT, PLACEHOLDER_PHONE, PLACEHOLDER_WEBSITE,
    UNKNOWN_ORGANIZATION,
};
use namecard_core::db::{open_db, open_db_in_memory};
use namecard_core::{
    project, to_vcard, ContactBookError, ContactBookService, ContactListQuery, DisplayContact,
    NewContact, SqliteCategoryRepository, SqliteContactRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

type Service<'conn> =
    ContactBookService<SqliteCategoryRepository<'conn>, SqliteContactRepository<'conn>>;

fn service(conn: &Connection) -> Service<'_> {
    ContactBookService::new(
        SqliteCategoryRepository::try_new(conn).unwrap(),
        SqliteContactRepository::try_new(conn).unwrap(),
    )
}

fn roger(category_uuid: Option<Uuid>) -> NewContact {
    NewContact {
        name: "Roger Chen".to_string(),
        title: "Senior Smooth Replies Manager".to_string(),
        email: "roger@liftwithroger.com".to_string(),
        category_uuid,
    }
}

#[test]
fn end_to_end_card_follows_category_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let university = book.create_category("University").unwrap();
    let contact = book.create_contact(roger(Some(university.uuid))).unwrap();

    let card = book.contact_card(contact.uuid).unwrap();
    assert_eq!(
        card.display,
        DisplayContact {
            first_name: "Roger".to_string(),
            last_name: "Chen".to_string(),
            title: "Senior Smooth Replies Manager".to_string(),
            organization: "University".to_string(),
            email: "roger@liftwithroger.com".to_string(),
            phone: PLACEHOLDER_PHONE.to_string(),
            address: PLACEHOLDER_ADDRESS.to_string(),
            website: PLACEHOLDER_WEBSITE.to_string(),
            department: PLACEHOLDER_DEPARTMENT.to_string(),
        }
    );
    assert_eq!(card.vcard, to_vcard(&card.display));

    assert_eq!(book.delete_category(university.uuid).unwrap(), 1);
    let contact = book.get_contact(contact.uuid).unwrap().unwrap();
    assert_eq!(contact.category_uuid, None);

    let card = book.contact_card(contact.uuid).unwrap();
    assert_eq!(card.display.organization, UNKNOWN_ORGANIZATION);
    assert!(card.vcard.contains("ORG:Unknown Organization;Unknown Department"));
}

#[test]
fn card_reflects_category_rename_without_stored_copy() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let category = book.create_category("Uni").unwrap();
    let contact = book.create_contact(roger(Some(category.uuid))).unwrap();
    assert_eq!(book.contact_card(contact.uuid).unwrap().display.organization, "Uni");

    let renamed = book.rename_category(category.uuid, "University").unwrap();
    assert_eq!(renamed.name, "University");
    assert_eq!(
        book.contact_card(contact.uuid).unwrap().display.organization,
        "University"
    );
}

#[test]
fn projection_and_payload_are_deterministic() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let category = book.create_category("University").unwrap();
    let contact = book.create_contact(roger(Some(category.uuid))).unwrap();

    let first = project(&contact, Some(&category));
    let second = project(&contact, Some(&category));
    assert_eq!(first, second);
    assert_eq!(to_vcard(&first), to_vcard(&second));

    let card_a = book.contact_card(contact.uuid).unwrap();
    let card_b = book.contact_card(contact.uuid).unwrap();
    assert_eq!(card_a, card_b);
}

#[test]
fn service_accepts_blank_fields() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let category = book.create_category("").unwrap();
    let contact = book
        .create_contact(NewContact {
            name: String::new(),
            title: String::new(),
            email: String::new(),
            category_uuid: Some(category.uuid),
        })
        .unwrap();

    let card = book.contact_card(contact.uuid).unwrap();
    assert_eq!(card.display.first_name, "");
    assert_eq!(card.display.last_name, "");
    assert_eq!(card.display.organization, "");
    assert!(card.vcard.starts_with("BEGIN:VCARD"));
}

#[test]
fn category_members_and_rows_track_assignments() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let team = book.create_category("Team").unwrap();
    let contact = book.create_contact(roger(None)).unwrap();
    assert!(book.category_members(team.uuid).unwrap().is_empty());

    book.assign_category(contact.uuid, Some(team.uuid)).unwrap();
    let members = book.category_members(team.uuid).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].uuid, contact.uuid);

    let rows = book.contact_rows(&ContactListQuery::default()).unwrap();
    assert_eq!(rows[0].category_name.as_deref(), Some("Team"));

    let cleared = book.assign_category(contact.uuid, None).unwrap();
    assert_eq!(cleared.category_uuid, None);
    assert!(book.category_members(team.uuid).unwrap().is_empty());
}

#[test]
fn not_found_errors_are_semantic() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        book.contact_card(missing),
        Err(ContactBookError::ContactNotFound(id)) if id == missing
    ));
    assert!(matches!(
        book.delete_contact(missing),
        Err(ContactBookError::ContactNotFound(id)) if id == missing
    ));
    assert!(matches!(
        book.delete_category(missing),
        Err(ContactBookError::CategoryNotFound(id)) if id == missing
    ));
    assert!(matches!(
        book.category_members(missing),
        Err(ContactBookError::CategoryNotFound(id)) if id == missing
    ));
    assert!(matches!(
        book.create_contact(roger(Some(missing))),
        Err(ContactBookError::CategoryNotFound(id)) if id == missing
    ));
}

#[test]
fn deleting_contact_keeps_its_category() {
    let conn = open_db_in_memory().unwrap();
    let book = service(&conn);

    let team = book.create_category("Team").unwrap();
    let contact = book.create_contact(roger(Some(team.uuid))).unwrap();

    book.delete_contact(contact.uuid).unwrap();
    assert!(book.get_contact(contact.uuid).unwrap().is_none());
    assert_eq!(book.list_categories().unwrap(), vec![team]);
}

#[test]
fn store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("namecard.db");

    let (category_uuid, contact_uuid) = {
        let conn = open_db(&path).unwrap();
        let book = service(&conn);
        let category = book.create_category("University").unwrap();
        let contact = book.create_contact(roger(Some(category.uuid))).unwrap();
        (category.uuid, contact.uuid)
    };

    let conn = open_db(&path).unwrap();
    let book = service(&conn);
    let contact = book.get_contact(contact_uuid).unwrap().unwrap();
    assert_eq!(contact.category_uuid, Some(category_uuid));
    assert_eq!(
        book.contact_card(contact_uuid).unwrap().display.organization,
        "University"
    );
}

#[test]
fn display_contact_serializes_with_camel_case_fields() {
    let value = serde_json::to_value(DisplayContact::sample()).unwrap();
    assert_eq!(value["firstName"], "Roger");
    assert_eq!(value["lastName"], "Chen");
    assert_eq!(value["organization"], "University");
    assert!(value.get("first_name").is_none());
}
