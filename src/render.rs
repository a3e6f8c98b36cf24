//! Tab-separated listing views used by the CLI commands.

use crate::config::AppConfig;
use crate::contact::{Contact, TypedValue};
use crate::date::format_birthday_in;
use crate::names::display_name;
use std::io::{self, Write};

pub const DEFAULT_EMAIL_TYPE: &str = "email";
pub const DEFAULT_PHONE_TYPE: &str = "phone";

/// Lowercased entry type, or `default` when the entry has none.
pub fn entry_type_label(entry: &TypedValue, default: &str) -> String {
    if entry.has_kind() { entry.kind.to_lowercase() } else { default.to_string() }
}

/// Display name, then `type: value` per email and phone; `long` adds org/note/address.
pub fn contact_fields(contact: &Contact, long: bool) -> Vec<String> {
    let mut parts = vec![display_name(contact)];

    for email in &contact.emails {
        parts.push(format!("{}: {}", entry_type_label(email, DEFAULT_EMAIL_TYPE), email.value));
    }
    for phone in &contact.phones {
        parts.push(format!("{}: {}", entry_type_label(phone, DEFAULT_PHONE_TYPE), phone.value));
    }

    if long {
        if !contact.organization.is_empty() {
            parts.push(format!("org: {}", contact.organization));
        }
        if !contact.note.is_empty() {
            parts.push(format!("note: {}", contact.note));
        }
        if !contact.address.is_empty() {
            parts.push(format!("address: {}", contact.address));
        }
    }
    parts
}

pub fn write_contact_list<W: Write>(w: &mut W, contacts: &[Contact], long: bool) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(w, "No contacts found");
    }
    for contact in contacts {
        writeln!(w, "{}", contact_fields(contact, long).join("\t"))?;
    }
    Ok(())
}

/// Standard: `Name\tEmail` header, then `display\ttype: value`.
/// Parsable (mutt-style query): `value\tname\ttype`, no header.
pub fn write_email_list<W: Write>(w: &mut W, contacts: &[Contact], parsable: bool) -> io::Result<()> {
    if !parsable {
        writeln!(w, "Name\tEmail")?;
    }
    for contact in contacts {
        for email in &contact.emails {
            let kind = entry_type_label(email, DEFAULT_EMAIL_TYPE);
            if parsable {
                writeln!(w, "{}\t{}\t{}", email.value, contact.name, kind)?;
            } else {
                writeln!(w, "{}\t{}: {}", display_name(contact), kind, email.value)?;
            }
        }
    }
    Ok(())
}

pub fn write_phone_list<W: Write>(w: &mut W, contacts: &[Contact]) -> io::Result<()> {
    writeln!(w, "Name\tPhone")?;
    for contact in contacts {
        for phone in &contact.phones {
            let kind = entry_type_label(phone, DEFAULT_PHONE_TYPE);
            writeln!(w, "{}\t{}: {}", display_name(contact), kind, phone.value)?;
        }
    }
    Ok(())
}

/// Expects contacts that already have a birthday, in the order to print.
pub fn write_birthday_list<W: Write>(w: &mut W, contacts: &[Contact], current_year: i32) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(w, "No contacts with birthdays found");
    }
    writeln!(w, "Name\tBirthday")?;
    for contact in contacts {
        writeln!(w, "{}\t{}", display_name(contact), format_birthday_in(contact.birthday, current_year))?;
    }
    Ok(())
}

pub fn write_address_books<W: Write>(w: &mut W, config: &AppConfig) -> io::Result<()> {
    if config.address_books.is_empty() {
        return writeln!(w, "No address books configured");
    }
    writeln!(w, "Name\tPath")?;
    for (name, ab) in &config.address_books {
        writeln!(w, "{}\t{}", name, ab.path)?;
    }
    Ok(())
}
