//! Stored contact to display contact projection.

use crate::model::category::Category;
use crate::model::contact::Contact;
use serde::{Deserialize, Serialize};

/// Organization shown when the contact has no category.
pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";
/// The stored model carries no phone, address, website or department; these
/// fill the card until it does.
pub const PLACEHOLDER_PHONE: &str = "+1-555-000-0000";
pub const PLACEHOLDER_ADDRESS: &str = "Unknown Address";
pub const PLACEHOLDER_WEBSITE: &str = "example.com";
pub const PLACEHOLDER_DEPARTMENT: &str = "Unknown Department";

/// Render-ready contact shown on both sides of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayContact {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub organization: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub department: String,
}

impl DisplayContact {
    /// Demo card for previews and tests.
    pub fn sample() -> Self {
        Self {
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
    }

    /// First and last name joined for headings, without stray spaces.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, _) => self.last_name.clone(),
        }
    }
}

/// Projects a stored contact and its (optional) category into a display card.
///
/// The caller passes the category it resolved for `contact.category_uuid`;
/// this function does not look anything up.
pub fn project(contact: &Contact, category: Option<&Category>) -> DisplayContact {
    let (first_name, last_name) = split_name(&contact.name);
    DisplayContact {
        first_name,
        last_name,
        title: contact.title.clone(),
        organization: category
            .map(|value| value.name.clone())
            .unwrap_or_else(|| UNKNOWN_ORGANIZATION.to_string()),
        email: contact.email.clone(),
        phone: PLACEHOLDER_PHONE.to_string(),
        address: PLACEHOLDER_ADDRESS.to_string(),
        website: PLACEHOLDER_WEBSITE.to_string(),
        department: PLACEHOLDER_DEPARTMENT.to_string(),
    }
}

/// Splits a full name on whitespace runs into `(first, rest)`.
///
/// Lossy: irregular whitespace collapses to single spaces in `rest`.
pub fn split_name(name: &str) -> (String, String) {
    let mut tokens = name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, rest)
}
