//! Birthday normalization.
//!
//! A vCard BDAY can be a full calendar date, a compact date, a year-less `--MM-DD`
//! form or a date-time. Year-less dates are anchored onto the current calendar year;
//! there is no separate "year unknown" flag. The display side uses the same rule in
//! reverse, so a real birthday that falls in the current year also prints without
//! its year. That ambiguity is inherent to the representation and kept as is.

use regex::Regex;
use std::sync::OnceLock;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const COMPACT_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year][month][day]");
const ISO_DATETIME_UTC: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
const ISO_DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Accepted encodings, tried in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    IsoDate,
    CompactDate,
    YearUnknownDashed,
    YearUnknownCompact,
    IsoDateTimeUtc,
    IsoDateTime,
}

const PATTERNS: [Pattern; 6] = [
    Pattern::IsoDate,
    Pattern::CompactDate,
    Pattern::YearUnknownDashed,
    Pattern::YearUnknownCompact,
    Pattern::IsoDateTimeUtc,
    Pattern::IsoDateTime,
];

fn year_unknown_dashed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^--(\d{2})-(\d{2})$").expect("static regex"))
}

fn year_unknown_compact() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^--(\d{2})(\d{2})$").expect("static regex"))
}

/// Calendar year of the local clock (UTC when the local offset cannot be determined).
pub fn current_year() -> i32 {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .year()
}

/// Parse a BDAY value against the local clock's year.
pub fn parse_birthday(raw: &str) -> Option<Date> {
    parse_birthday_in(raw, current_year())
}

/// Parse a BDAY value, anchoring year-less forms onto `current_year`.
pub fn parse_birthday_in(raw: &str, current_year: i32) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = PATTERNS.iter().find_map(|p| try_pattern(*p, raw, current_year)) {
        return Some(date);
    }

    // Trailing content we do not understand (offsets, fractions): keep the date part.
    raw.get(..10).and_then(|head| Date::parse(head, ISO_DATE).ok())
}

fn try_pattern(pattern: Pattern, raw: &str, current_year: i32) -> Option<Date> {
    match pattern {
        Pattern::IsoDate => Date::parse(raw, ISO_DATE).ok(),
        Pattern::CompactDate => Date::parse(raw, COMPACT_DATE).ok(),
        Pattern::YearUnknownDashed => month_day(year_unknown_dashed(), raw, current_year),
        Pattern::YearUnknownCompact => month_day(year_unknown_compact(), raw, current_year),
        Pattern::IsoDateTimeUtc => PrimitiveDateTime::parse(raw, ISO_DATETIME_UTC).ok().map(|dt| dt.date()),
        Pattern::IsoDateTime => PrimitiveDateTime::parse(raw, ISO_DATETIME).ok().map(|dt| dt.date()),
    }
}

/// Month/day validated as if in a leap year, then placed in `year`.
/// Feb 29 in a common year normalizes forward to Mar 1.
fn month_day(re: &Regex, raw: &str, year: i32) -> Option<Date> {
    let caps = re.captures(raw)?;
    let month: u8 = caps[1].parse().ok()?;
    let day: u8 = caps[2].parse().ok()?;
    let month = Month::try_from(month).ok()?;
    if day == 0 || day > month.length(2000) {
        return None;
    }
    Date::from_calendar_date(year, month, day)
        .ok()
        .or_else(|| Date::from_calendar_date(year, Month::March, 1).ok())
}

/// `MM/DD` for dates in the current year, `MM/DD/YYYY` otherwise, empty when absent.
pub fn format_birthday(date: Option<Date>) -> String {
    format_birthday_in(date, current_year())
}

pub fn format_birthday_in(date: Option<Date>, current_year: i32) -> String {
    match date {
        None => String::new(),
        Some(d) if d.year() == current_year => format!("{:02}/{:02}", u8::from(d.month()), d.day()),
        Some(d) => format!("{:02}/{:02}/{:04}", u8::from(d.month()), d.day(), d.year()),
    }
}

/// `YYYY-MM-DD`, used by the JSON export.
pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}
