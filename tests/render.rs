#[path = "common/mod.rs"]
mod common;

use cardbook::{
    contact_fields, write_address_books, write_birthday_list, write_contact_list, write_email_list, write_phone_list,
    AppConfig, Contact,
};
use common::*;
use time::macros::date;

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn alice() -> Contact {
    let mut c = with_email(person("Alice Brown", "Brown", "Alice"), "alice@work.example", "WORK");
    c = with_email(c, "alice@home.example", "");
    c = with_phone(c, "555 0100", "CELL");
    c.organization = "Acme".into();
    c.note = "VIP".into();
    c
}

/// Short form: name, then typed emails and phones; long form adds org/note/address.
#[test]
fn contact_lines() {
    let c = alice();
    assert_eq!(
        contact_fields(&c, false),
        vec!["Brown, Alice", "work: alice@work.example", "email: alice@home.example", "cell: 555 0100"]
    );
    let long = contact_fields(&c, true);
    assert_eq!(&long[4..], ["org: Acme", "note: VIP"]);

    let out = render(|w| write_contact_list(w, &[c], false));
    assert_eq!(out, "Brown, Alice\twork: alice@work.example\temail: alice@home.example\tcell: 555 0100\n");
}

#[test]
fn empty_contact_list() {
    assert_eq!(render(|w| write_contact_list(w, &[], true)), "No contacts found\n");
}

#[test]
fn email_list_standard_and_parsable() {
    let contacts = [alice(), named("No Email")];
    assert_eq!(
        render(|w| write_email_list(w, &contacts, false)),
        "Name\tEmail\nBrown, Alice\twork: alice@work.example\nBrown, Alice\temail: alice@home.example\n"
    );
    assert_eq!(
        render(|w| write_email_list(w, &contacts, true)),
        "alice@work.example\tAlice Brown\twork\nalice@home.example\tAlice Brown\temail\n"
    );
}

#[test]
fn phone_list_defaults_type() {
    let c = with_phone(named("Bob"), "123", "");
    assert_eq!(render(|w| write_phone_list(w, &[c])), "Name\tPhone\nBob\tphone: 123\n");
}

/// Birthdays in the listing year print without the year.
#[test]
fn birthday_list() {
    let contacts = [
        with_birthday(named("Anchored"), date!(2026 - 03 - 04)),
        with_birthday(person("John Doe", "Doe", "John"), date!(1990 - 01 - 15)),
    ];
    assert_eq!(
        render(|w| write_birthday_list(w, &contacts, TEST_YEAR)),
        "Name\tBirthday\nAnchored\t03/04\nDoe, John\t01/15/1990\n"
    );
    assert_eq!(render(|w| write_birthday_list(w, &[], TEST_YEAR)), "No contacts with birthdays found\n");
}

#[test]
fn address_book_table() {
    let cfg = AppConfig::from_toml_str("[addressbook.work]\npath = \"/w\"\n[addressbook.home]\npath = \"~/h\"\n").unwrap();
    assert_eq!(render(|w| write_address_books(w, &cfg)), "Name\tPath\nhome\t~/h\nwork\t/w\n");
    assert_eq!(render(|w| write_address_books(w, &AppConfig::default())), "No address books configured\n");
}
