#![allow(dead_code)]

use cardbook::{Contact, TypedValue};
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;

/// Year pinned for anything that anchors or displays year-less birthdays.
pub const TEST_YEAR: i32 = 2026;

/// Wrap property lines into one CRLF-terminated card block.
pub fn card(lines: &[&str]) -> String {
    let mut out = String::from("BEGIN:VCARD\r\nVERSION:3.0\r\n");
    for l in lines {
        out.push_str(l);
        out.push_str("\r\n");
    }
    out.push_str("END:VCARD\r\n");
    out
}

/// Write `content` at `rel` below `dir`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// The canonical example card: John Doe, home email, birthday 1990-01-15.
pub fn john_doe_card() -> String {
    card(&[
        "FN:John Doe",
        "N:Doe;John;;;",
        "EMAIL;TYPE=HOME:john@example.com",
        "BDAY:1990-01-15",
    ])
}

/// A small address book:
/// - alice.vcf: Alice Brown (work email, cell phone, birthday --03-04)
/// - bob.vcf:   Bob Stone, no birthday
/// - team/acme.vcf: two cards (an organization card, Carol Acme with birthday 1985-12-01)
pub fn make_address_book() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_file(
        root,
        "alice.vcf",
        &card(&[
            "FN:Alice Brown",
            "N:Brown;Alice;;;",
            "EMAIL;TYPE=WORK:alice@work.example",
            "TEL;CELL:+1 555 0100",
            "BDAY:--03-04",
        ]),
    );
    write_file(
        root,
        "bob.vcf",
        &card(&["FN:Bob Stone", "N:Stone;Bob;;;", "EMAIL:bob@example.com", "NOTE:met at the conference"]),
    );
    let mut acme = card(&["FN:Acme Corp", "ORG:Acme Corporation", "TEL;TYPE=work:+1 555 0199"]);
    acme.push_str(&card(&["FN:Carol Acme", "N:Acme;Carol;;;", "BDAY:1985-12-01"]));
    write_file(root, "team/acme.vcf", &acme);

    dir
}

/// In-memory contact with just a formatted name.
pub fn named(name: &str) -> Contact {
    Contact { name: name.to_string(), ..Contact::new("test.vcf") }
}

pub fn person(name: &str, family: &str, given: &str) -> Contact {
    Contact {
        family_name: Some(family.to_string()),
        given_name: Some(given.to_string()),
        ..named(name)
    }
}

pub fn with_birthday(mut c: Contact, date: Date) -> Contact {
    c.birthday = Some(date);
    c
}

pub fn with_email(mut c: Contact, value: &str, kind: &str) -> Contact {
    c.emails.push(TypedValue::new(value, kind));
    c
}

pub fn with_phone(mut c: Contact, value: &str, kind: &str) -> Contact {
    c.phones.push(TypedValue::new(value, kind));
    c
}

pub fn names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.name.as_str()).collect()
}
