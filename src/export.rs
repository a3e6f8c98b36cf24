//! Export encodings (CSV, JSON) and export destinations.
//!
//! Each format has its own field table here; `Contact` itself carries no
//! serialization attributes. Encoding always completes in memory before the
//! destination is opened, so a failed encode never leaves a partial file behind.

use crate::contact::{Contact, TypedValue};
use crate::date::iso_date;
use crate::error::{CardbookError, Result};
use crate::util::create_new_with_backoff;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = CardbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(CardbookError::UnsupportedExportFormat { name: s.to_string() }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

// ----------------------------- CSV ------------------------------------

struct CsvColumn {
    header: &'static str,
    render: fn(&Contact) -> String,
}

const CSV_COLUMNS: [CsvColumn; 6] = [
    CsvColumn { header: "Name", render: |c| c.name.clone() },
    CsvColumn { header: "Emails", render: |c| format_entries_for_export(&c.emails) },
    CsvColumn { header: "Phones", render: |c| format_entries_for_export(&c.phones) },
    CsvColumn { header: "Organization", render: |c| c.organization.clone() },
    CsvColumn { header: "Note", render: |c| c.note.clone() },
    CsvColumn { header: "Address", render: |c| c.address.clone() },
];

pub const DEFAULT_DELIMITER: u8 = b',';

/// `value (type)` per entry, type lowercased and omitted when empty, joined with "; ".
pub fn format_entries_for_export(entries: &[TypedValue]) -> String {
    entries
        .iter()
        .map(|e| {
            if e.has_kind() {
                format!("{} ({})", e.value, e.kind.to_lowercase())
            } else {
                e.value.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// First character of `delimiter`; empty means comma. Must be ASCII.
pub fn csv_delimiter(delimiter: &str) -> Result<u8> {
    match delimiter.chars().next() {
        None => Ok(DEFAULT_DELIMITER),
        Some(c) if c.is_ascii() => Ok(c as u8),
        Some(_) => Err(CardbookError::InvalidDelimiter { delimiter: delimiter.to_string() }),
    }
}

pub fn encode_csv(contacts: &[Contact], delimiter: &str) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(csv_delimiter(delimiter)?)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_COLUMNS.iter().map(|col| col.header))?;
    for contact in contacts {
        wtr.write_record(CSV_COLUMNS.iter().map(|col| (col.render)(contact)))?;
    }
    wtr.into_inner().map_err(|e| {
        let io_err = io::Error::new(e.error().kind(), e.error().to_string());
        CardbookError::Csv(csv::Error::from(io_err))
    })
}

// ----------------------------- JSON ------------------------------------

/// JSON view of one contact. Field names and order are fixed here.
struct JsonContact<'a>(&'a Contact);

struct JsonEntries<'a>(&'a [TypedValue]);

struct JsonEntry<'a>(&'a TypedValue);

fn or_empty(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or_default()
}

impl Serialize for JsonContact<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let c = self.0;
        let mut st = serializer.serialize_struct("Contact", 13)?;
        st.serialize_field("Name", &c.name)?;
        st.serialize_field("FamilyName", or_empty(&c.family_name))?;
        st.serialize_field("GivenName", or_empty(&c.given_name))?;
        st.serialize_field("MiddleName", or_empty(&c.middle_name))?;
        st.serialize_field("Prefix", or_empty(&c.prefix))?;
        st.serialize_field("Suffix", or_empty(&c.suffix))?;
        st.serialize_field("Emails", &JsonEntries(&c.emails))?;
        st.serialize_field("Phones", &JsonEntries(&c.phones))?;
        st.serialize_field("Organization", &c.organization)?;
        st.serialize_field("Note", &c.note)?;
        st.serialize_field("Address", &c.address)?;
        st.serialize_field("Birthday", &c.birthday.map(iso_date))?;
        st.serialize_field("SourceFile", &c.source_file.to_string_lossy())?;
        st.end()
    }
}

impl Serialize for JsonEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for entry in self.0 {
            seq.serialize_element(&JsonEntry(entry))?;
        }
        seq.end()
    }
}

impl Serialize for JsonEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Entry", 2)?;
        st.serialize_field("Value", &self.0.value)?;
        st.serialize_field("Type", &self.0.kind)?;
        st.end()
    }
}

/// Pretty-printed (two-space indent) array of contact objects, newline-terminated.
pub fn encode_json(contacts: &[Contact]) -> Result<Vec<u8>> {
    let records: Vec<JsonContact<'_>> = contacts.iter().map(JsonContact).collect();
    let mut out = serde_json::to_vec_pretty(&records)?;
    out.push(b'\n');
    Ok(out)
}

pub fn encode(contacts: &[Contact], format: ExportFormat, delimiter: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => encode_csv(contacts, delimiter),
        ExportFormat::Json => encode_json(contacts),
    }
}

// ----------------------------- Destinations ------------------------------------

/// Where an export goes. A file destination must not exist yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    pub fn from_output(output: Option<PathBuf>) -> Self {
        match output {
            Some(path) => ExportTarget::File(path),
            None => ExportTarget::Stdout,
        }
    }

    /// Fail early when the file destination already exists.
    pub fn ensure_available(&self) -> Result<()> {
        match self {
            ExportTarget::File(path) if path.exists() => {
                Err(CardbookError::OutputDestinationExists { path: path.clone() })
            }
            _ => Ok(()),
        }
    }

    /// Write the encoded bytes. Files are opened create-new, never truncated.
    pub fn write_all(&self, bytes: &[u8]) -> Result<()> {
        match self {
            ExportTarget::Stdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                lock.write_all(bytes)
                    .and_then(|_| lock.flush())
                    .map_err(|source| CardbookError::Io { path: PathBuf::from("<stdout>"), source })
            }
            ExportTarget::File(path) => {
                let mut file = create_new_with_backoff(path, 16, 50).map_err(|source| {
                    if source.kind() == io::ErrorKind::AlreadyExists {
                        CardbookError::OutputDestinationExists { path: path.clone() }
                    } else {
                        CardbookError::Io { path: path.clone(), source }
                    }
                })?;
                file.write_all(bytes)
                    .and_then(|_| file.flush())
                    .map_err(|source| CardbookError::Io { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "Export written");
                Ok(())
            }
        }
    }
}
