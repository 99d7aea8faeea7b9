//! vCard payload encoder for QR sharing.
//!
//! # Invariants
//! - Output is a pure function of the input: same `DisplayContact`, same bytes.
//! - Field values are substituted literally; nothing is escaped or dropped.
//! - Lines end with CRLF and appear in a fixed order.

use super::display::DisplayContact;

const VCARD_VERSION: &str = "3.0";
const LINE_END: &str = "\r\n";

/// Encodes a display contact as a vCard 3.0 text block.
pub fn to_vcard(contact: &DisplayContact) -> String {
    let lines = [
        "BEGIN:VCARD".to_string(),
        format!("VERSION:{VCARD_VERSION}"),
        format!("N:{};{};;;", contact.last_name, contact.first_name),
        format!("FN:{}", contact.full_name()),
        format!("ORG:{};{}", contact.organization, contact.department),
        format!("TITLE:{}", contact.title),
        format!("EMAIL;TYPE=INTERNET:{}", contact.email),
        format!("TEL;TYPE=CELL:{}", contact.phone),
        format!("ADR;TYPE=WORK:;;{};;;;", contact.address),
        format!("URL:{}", contact.website),
        "END:VCARD".to_string(),
    ];

    let mut payload = lines.join(LINE_END);
    payload.push_str(LINE_END);
    payload
}

#[cfg(test)]
mod tests {
    use super::to_vcard;
    use crate::card::display::DisplayContact;

    #[test]
    fn sample_card_encodes_expected_lines() {
        let payload = to_vcard(&DisplayContact::sample());
        let lines = payload.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "BEGIN:VCARD",
                "VERSION:3.0",
                "N:Chen;Roger;;;",
                "FN:Roger Chen",
                "ORG:University;Unknown Department",
                "TITLE:Senior Smooth Replies Manager",
                "EMAIL;TYPE=INTERNET:roger@liftwithroger.com",
                "TEL;TYPE=CELL:+1-555-000-0000",
                "ADR;TYPE=WORK:;;Unknown Address;;;;",
                "URL:example.com",
                "END:VCARD",
            ]
        );
        assert!(payload.ends_with("END:VCARD\r\n"));
    }

    #[test]
    fn encoding_is_byte_stable() {
        let contact = DisplayContact::sample();
        assert_eq!(to_vcard(&contact).as_bytes(), to_vcard(&contact.clone()).as_bytes());
    }

    #[test]
    fn empty_fields_still_produce_a_complete_card() {
        let contact = DisplayContact {
            first_name: String::new(),
            last_name: String::new(),
            title: String::new(),
            organization: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            website: String::new(),
            department: String::new(),
        };
        let payload = to_vcard(&contact);
        assert!(payload.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert!(payload.contains("\r\nN:;;;;\r\n"));
        assert!(payload.contains("\r\nFN:\r\n"));
    }
}
