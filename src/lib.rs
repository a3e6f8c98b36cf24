mod contact;
mod error;
mod card;
mod date;
mod extract;
mod observer;

mod config;
mod paths;
mod progress;
mod concurrency;
mod util;
mod aggregate;

mod names;
mod query;
mod filters;
mod sort;
mod export;
mod render;
mod pipeline;

pub use crate::contact::{Contact, TypedValue};
pub use crate::error::{CardbookError, ConfigError, DecodeError, DecodeErrorKind, FileError, Result, SourceError};
pub use crate::pipeline::{CardBook, ScanPlan};

// vCard decoding and per-card extraction.
pub use crate::card::{decode_bytes, decode_cards, parse_content_line, unescape, unfold, Card, Parameter, Property};
pub use crate::extract::{extract_contact, format_address, props, resolve_type, LEGACY_TYPE_FLAGS};
pub use crate::date::{current_year, format_birthday, format_birthday_in, iso_date, parse_birthday, parse_birthday_in};

// Loading from address-book directories.
pub use crate::aggregate::{load_contacts, load_contacts_from_path, load_file};
pub use crate::paths::{discover_vcard_files, is_vcard_file, VCARD_EXTENSION};
pub use crate::observer::{LoadEvent, LoadObserver, NullObserver, PathStats, RecordedEvent, RecordingObserver, TracingObserver};
pub use crate::config::{
    default_config_path, expand_path, AddressBookConfig, AppConfig, LoadOptions, APP_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
pub use crate::progress::make_count_progress;
pub use crate::concurrency::map_ordered_limited;

// Names, filtering, ordering.
pub use crate::names::{display_name, sort_key};
pub use crate::query::FilterQuery;
pub use crate::filters::{filter_contacts, matches, search_text};
pub use crate::sort::{compare_by_birthday, compare_by_sort_key, sort_by_birthday, sort_by_key, sort_contacts, SortOrder};

// Output.
pub use crate::export::{csv_delimiter, encode, encode_csv, encode_json, format_entries_for_export, ExportFormat, ExportTarget, DEFAULT_DELIMITER};
pub use crate::render::{
    contact_fields, entry_type_label, write_address_books, write_birthday_list, write_contact_list, write_email_list, write_phone_list,
    DEFAULT_EMAIL_TYPE, DEFAULT_PHONE_TYPE,
};

pub use crate::util::{create_new_with_backoff, init_tracing_once};
