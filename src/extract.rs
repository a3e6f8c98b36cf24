//! Field extraction: one decoded `Card` into one `Contact`.

use crate::card::{Card, Property};
use crate::contact::{Contact, TypedValue};
use crate::date::parse_birthday_in;
use crate::observer::{LoadEvent, LoadObserver};
use std::path::Path;

/// vCard properties read by the extractor. Anything else on the card is ignored.
pub mod props {
    pub const FORMATTED_NAME: &str = "FN";
    pub const NAME: &str = "N";
    pub const EMAIL: &str = "EMAIL";
    pub const TELEPHONE: &str = "TEL";
    pub const ORGANIZATION: &str = "ORG";
    pub const NOTE: &str = "NOTE";
    pub const ADDRESS: &str = "ADR";
    pub const BIRTHDAY: &str = "BDAY";
}

/// vCard 2.1 style bare type flags (`TEL;CELL:...`).
pub const LEGACY_TYPE_FLAGS: [&str; 7] = ["HOME", "WORK", "CELL", "FAX", "PAGER", "VOICE", "MSG"];

// ADR components kept for display: street, locality, region, postal code, country.
const ADDRESS_DISPLAY_INDICES: [usize; 5] = [2, 3, 4, 5, 6];

/// Build a `Contact` from a card. Never drops a card, even one with no identity at all.
pub fn extract_contact(
    card: &Card,
    source_file: &Path,
    current_year: i32,
    observer: &dyn LoadObserver,
) -> Contact {
    let mut contact = Contact::new(source_file);

    if let Some(fn_prop) = card.first(props::FORMATTED_NAME) {
        contact.name = fn_prop.text();
    }

    if let Some(n) = card.first(props::NAME) {
        let mut parts = n.components().into_iter().map(non_empty);
        contact.family_name = parts.next().flatten();
        contact.given_name = parts.next().flatten();
        contact.middle_name = parts.next().flatten();
        contact.prefix = parts.next().flatten();
        contact.suffix = parts.next().flatten();
    }

    contact.emails = card.all(props::EMAIL).map(typed_value).collect();
    contact.phones = card.all(props::TELEPHONE).map(typed_value).collect();

    if let Some(org) = card.first(props::ORGANIZATION) {
        contact.organization = org.text();
    }
    if let Some(note) = card.first(props::NOTE) {
        contact.note = note.text();
    }
    if let Some(adr) = card.first(props::ADDRESS) {
        contact.address = format_address(&adr.components());
    }

    if let Some(bday) = card.first(props::BIRTHDAY) {
        let raw = bday.text();
        contact.birthday = parse_birthday_in(&raw, current_year);
        if contact.birthday.is_none() && !raw.trim().is_empty() {
            observer.on_event(&LoadEvent::UnparsedBirthday { file: source_file, raw: &raw });
        }
    }

    contact
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn typed_value(prop: &Property) -> TypedValue {
    TypedValue::new(prop.text(), resolve_type(prop))
}

/// First non-empty TYPE value wins; otherwise the first legacy bare flag; otherwise "".
pub fn resolve_type(prop: &Property) -> String {
    if let Some(kind) = prop.param_values("TYPE").find(|v| !v.is_empty()) {
        return kind.to_uppercase();
    }
    prop.params
        .iter()
        .map(|p| p.name.to_uppercase())
        .find(|name| LEGACY_TYPE_FLAGS.contains(&name.as_str()))
        .unwrap_or_default()
}

/// Join the non-empty street/locality/region/postal code/country components with ", ".
pub fn format_address<S: AsRef<str>>(components: &[S]) -> String {
    ADDRESS_DISPLAY_INDICES
        .iter()
        .filter_map(|&i| components.get(i).map(AsRef::as_ref))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
