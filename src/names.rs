//! Display names and sort keys derived from the structured (N) and formatted (FN) names.

use crate::contact::Contact;

/// `"Family, Prefix Given Middle Suffix"` when N carries a family or given name,
/// otherwise the formatted name (possibly empty).
pub fn display_name(contact: &Contact) -> String {
    if contact.family_name.is_none() && contact.given_name.is_none() {
        return contact.name.clone();
    }

    let family = contact.family_name.as_deref().unwrap_or_default();
    let secondary = [&contact.prefix, &contact.given_name, &contact.middle_name, &contact.suffix]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect::<Vec<_>>()
        .join(" ");

    match (family.is_empty(), secondary.is_empty()) {
        (false, false) => format!("{family}, {secondary}"),
        (true, false) => secondary,
        (false, true) => family.to_string(),
        (true, true) => contact.name.clone(),
    }
}

/// Lowercase ordering key. A structured family name always wins; an organization is used
/// only for contacts that also carry a formatted name; otherwise the formatted name.
pub fn sort_key(contact: &Contact) -> String {
    if let Some(family) = contact.family_name.as_deref().filter(|f| !f.is_empty()) {
        return family.to_lowercase();
    }
    if !contact.organization.is_empty() && !contact.name.is_empty() {
        return contact.organization.to_lowercase();
    }
    contact.name.to_lowercase()
}
