#[path = "common/mod.rs"]
mod common;

use cardbook::{display_name, filter_contacts, matches, search_text, sort_key, Contact, FilterQuery};
use common::*;

fn org_contact(name: &str, org: &str) -> Contact {
    Contact { organization: org.to_string(), ..named(name) }
}

/// John Doe: "Doe, John" on display, "doe" as sort key.
#[test]
fn john_doe_names() {
    let c = person("John Doe", "Doe", "John");
    assert_eq!(display_name(&c), "Doe, John");
    assert_eq!(sort_key(&c), "doe");
}

#[test]
fn display_name_variants() {
    let full = Contact {
        prefix: Some("Dr.".into()),
        middle_name: Some("Q".into()),
        suffix: Some("Jr.".into()),
        ..person("John Doe", "Doe", "John")
    };
    assert_eq!(display_name(&full), "Doe, Dr. John Q Jr.");

    let given_only = Contact { given_name: Some("Cher".into()), ..named("Cher") };
    assert_eq!(display_name(&given_only), "Cher");

    let family_only = Contact { family_name: Some("Stone".into()), ..named("") };
    assert_eq!(display_name(&family_only), "Stone");

    assert_eq!(display_name(&named("Acme Corp")), "Acme Corp");
    assert_eq!(display_name(&named("")), "");
}

/// Organization is the key for organization cards with a formatted name.
#[test]
fn sort_key_uses_organization_when_no_family_name() {
    assert_eq!(sort_key(&org_contact("Acme Corp", "Acme Corporation")), "acme corporation");
}

/// Family name beats organization.
#[test]
fn sort_key_prefers_family_over_organization() {
    let c = Contact { organization: "Initech".into(), ..person("Peter Gibbons", "Gibbons", "Peter") };
    assert_eq!(sort_key(&c), "gibbons");
}

#[test]
fn sort_key_fallbacks() {
    // Organization alone is not enough without a formatted name.
    assert_eq!(sort_key(&org_contact("", "Orphan Org")), "");
    // Empty family falls through.
    let c = Contact { family_name: Some(String::new()), ..named("Plain Name") };
    assert_eq!(sort_key(&c), "plain name");
    assert_eq!(sort_key(&named("")), "");
}

/// Blob order: name, emails (value, type), phones (value, type), org, note, address.
#[test]
fn search_text_field_order() {
    let mut c = with_email(named("Alice Brown"), "Alice@Work.example", "WORK");
    c = with_email(c, "alice@home.example", "");
    c = with_phone(c, "555 0100", "CELL");
    c.organization = "Acme".into();
    c.note = "Likes Tea".into();
    c.address = "Berlin, Germany".into();

    assert_eq!(
        search_text(&c),
        "alice brown alice@work.example work alice@home.example 555 0100 cell acme likes tea berlin, germany"
    );
    assert_eq!(search_text(&named("")), "");
}

#[test]
fn empty_terms_match_everything() {
    let none: [&str; 0] = [];
    assert!(matches(&named(""), &none));
    assert!(matches(&named("Anyone"), &none));
    assert!(FilterQuery::from_terms(none).is_match_all());
}

/// Terms must occur contiguously and in order, case-insensitively.
#[test]
fn multi_word_terms_are_a_phrase() {
    let forward = named("Alice Brown");
    let reversed = named("Brown Alice");
    assert!(matches(&forward, &["alice", "brown"]));
    assert!(matches(&forward, &["ALICE", "Brown"]));
    assert!(!matches(&reversed, &["alice", "brown"]));
    assert!(matches(&reversed, &["brown"]));
}

/// Types, notes and addresses are searchable too.
#[test]
fn matches_across_fields() {
    let c = with_phone(named("Bob"), "123", "CELL");
    assert!(matches(&c, &["cell"]));
    assert!(matches(&c, &["bob", "123"]));
    assert!(!matches(&c, &["work"]));
}

#[test]
fn filter_keeps_order() {
    let contacts = vec![named("Ann Lee"), named("Bob"), named("Lee Ann"), named("Ann Leeds")];
    let kept = filter_contacts(contacts, &FilterQuery::from_terms(["ann", "lee"]));
    assert_eq!(names(&kept), vec!["Ann Lee", "Ann Leeds"]);
}
