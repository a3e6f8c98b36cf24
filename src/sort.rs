//! Ordering of contact lists. Both sorts are stable: equal keys keep encounter order.

use crate::contact::Contact;
use crate::names::sort_key;
use std::cmp::{Ordering, Reverse};

/// Which ordering a listing uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Name,
    Birthday,
}

/// Ascending comparison of `sort_key`.
pub fn compare_by_sort_key(a: &Contact, b: &Contact) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Month, then day. `reverse` flips month/day comparisons only: a missing birthday
/// sorts after any present one in both directions.
pub fn compare_by_birthday(a: &Contact, b: &Contact, reverse: bool) -> Ordering {
    match (a.birthday, b.birthday) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = (x.month() as u8, x.day()).cmp(&(y.month() as u8, y.day()));
            if reverse { ord.reverse() } else { ord }
        }
    }
}

pub fn sort_by_key(contacts: &mut [Contact], reverse: bool) {
    if reverse {
        contacts.sort_by_cached_key(|c| Reverse(sort_key(c)));
    } else {
        contacts.sort_by_cached_key(sort_key);
    }
}

pub fn sort_by_birthday(contacts: &mut [Contact], reverse: bool) {
    contacts.sort_by(|a, b| compare_by_birthday(a, b, reverse));
}

pub fn sort_contacts(contacts: &mut [Contact], order: SortOrder, reverse: bool) {
    match order {
        SortOrder::Name => sort_by_key(contacts, reverse),
        SortOrder::Birthday => sort_by_birthday(contacts, reverse),
    }
}
