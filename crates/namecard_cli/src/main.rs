//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `namecard_core` linkage without the Flutter/FFI runtime.
//! - Render one demo card from an in-memory store with deterministic output.

use namecard_core::db::open_db_in_memory;
use namecard_core::{
    ContactBookService, NewContact, SqliteCategoryRepository, SqliteContactRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("namecard_core ping={}", namecard_core::ping());
    println!("namecard_core version={}", namecard_core::core_version());

    match render_demo_card() {
        Ok(vcard) => {
            print!("{vcard}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("demo card failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_demo_card() -> Result<String, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let book = ContactBookService::new(
        SqliteCategoryRepository::try_new(&conn)?,
        SqliteContactRepository::try_new(&conn)?,
    );

    let category = book.create_category("University")?;
    let contact = book.create_contact(NewContact {
        name: "Roger Chen".to_string(),
        title: "Senior Smooth Replies Manager".to_string(),
        email: "roger@liftwithroger.com".to_string(),
        category_uuid: Some(category.uuid),
    })?;
    Ok(book.contact_card(contact.uuid)?.vcard)
}
