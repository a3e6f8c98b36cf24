//! Filtering: one lowercase search blob per contact, tested against a `FilterQuery`.

use crate::contact::{Contact, TypedValue};
use crate::query::FilterQuery;

/// Lowercase blob in fixed order: FN, emails (value then type), phones (value then type),
/// organization, note, address. Space separated and trimmed.
pub fn search_text(contact: &Contact) -> String {
    let mut hay = String::new();

    push_word(&mut hay, &contact.name);
    push_typed(&mut hay, &contact.emails);
    push_typed(&mut hay, &contact.phones);
    push_word(&mut hay, &contact.organization);
    push_word(&mut hay, &contact.note);
    push_word(&mut hay, &contact.address);

    hay.trim().to_lowercase()
}

fn push_word(hay: &mut String, s: &str) {
    if !s.is_empty() {
        hay.push_str(s);
        hay.push(' ');
    }
}

fn push_typed(hay: &mut String, entries: &[TypedValue]) {
    for entry in entries {
        hay.push_str(&entry.value);
        hay.push(' ');
        push_word(hay, &entry.kind);
    }
}

impl FilterQuery {
    pub fn matches(&self, contact: &Contact) -> bool {
        match self.phrase() {
            None => true,
            Some(phrase) => search_text(contact).contains(phrase),
        }
    }
}

/// True when the joined, lowercased `terms` occur contiguously in the contact's blob.
/// An empty term list matches every contact.
pub fn matches<S: AsRef<str>>(contact: &Contact, terms: &[S]) -> bool {
    FilterQuery::from_terms(terms).matches(contact)
}

/// Keep the contacts matching `query`, preserving order.
pub fn filter_contacts(contacts: Vec<Contact>, query: &FilterQuery) -> Vec<Contact> {
    if query.is_match_all() {
        return contacts;
    }
    contacts.into_iter().filter(|c| query.matches(c)).collect()
}
