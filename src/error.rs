//! Error taxonomy. Per-path and per-file errors are recovered inside the aggregator;
//! `CardbookError` is what escapes to callers.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Why a whole address-book path contributed nothing.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{}: path does not exist", .path.display())]
    PathNotFound { path: PathBuf },

    #[error("{}: directory is not readable: {source}", .path.display())]
    PathUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: no .vcf files found in directory", .path.display())]
    NoEligibleFiles { path: PathBuf },

    #[error("{}: none of {failed} .vcf files could be loaded", .path.display())]
    NoLoadableFiles { path: PathBuf, failed: usize },
}

impl SourceError {
    pub fn path(&self) -> &PathBuf {
        match self {
            SourceError::PathNotFound { path }
            | SourceError::PathUnreadable { path, .. }
            | SourceError::NoEligibleFiles { path }
            | SourceError::NoLoadableFiles { path, .. } => path,
        }
    }
}

/// Why a single `.vcf` file was skipped.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{}: failed to read file: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: failed to decode vCard: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("{}: no valid contacts found in file", .path.display())]
    NoValidContacts { path: PathBuf },
}

/// Syntax problem found while splitting a file into card blocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct DecodeError {
    pub line: usize, // 1-based physical line in the file
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(line: usize, kind: DecodeErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    NotUtf8,
    MissingSeparator,
    InvalidPropertyName,
    PropertyOutsideCard,
    NestedBegin,
    UnexpectedEnd,
    UnterminatedCard,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUtf8 => write!(f, "content is not valid UTF-8"),
            Self::MissingSeparator => write!(f, "missing ':' between property and value"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::PropertyOutsideCard => write!(f, "property outside of BEGIN:VCARD/END:VCARD"),
            Self::NestedBegin => write!(f, "BEGIN:VCARD inside an open card"),
            Self::UnexpectedEnd => write!(f, "END:VCARD without a matching BEGIN:VCARD"),
            Self::UnterminatedCard => write!(f, "missing END:VCARD"),
        }
    }
}

/// Fatal conditions surfaced to the caller of a command.
#[derive(Debug, thiserror::Error)]
pub enum CardbookError {
    #[error("failed to load contacts from any address book:{}", bullet_list(.failures))]
    AllSourcesFailed { failures: Vec<SourceError> },

    #[error("output file already exists: {}", .path.display())]
    OutputDestinationExists { path: PathBuf },

    #[error("unsupported export format: {name} (expected csv or json)")]
    UnsupportedExportFormat { name: String },

    #[error("CSV delimiter must be a single ASCII character, got {delimiter:?}")]
    InvalidDelimiter { delimiter: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn bullet_list(failures: &[SourceError]) -> String {
    failures.iter().map(|f| format!("\n  - {f}")).collect()
}

pub type Result<T, E = CardbookError> = std::result::Result<T, E>;

/// Problems with the TOML configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDirectory,

    #[error("config file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration validation failed:{}", bullet_lines(.problems))]
    Validation { problems: Vec<String> },
}

fn bullet_lines(problems: &[String]) -> String {
    problems.iter().map(|p| format!("\n  - {p}")).collect()
}
