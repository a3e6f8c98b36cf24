//! Reporting of recovered conditions during loading.
//!
//! The aggregator and the field extractor never log directly; they hand every event to a
//! `LoadObserver`. `TracingObserver` is what the binary uses, `RecordingObserver` keeps
//! owned copies so tests can assert on what happened.

use crate::error::{FileError, SourceError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Borrowed view of something that happened while loading.
#[derive(Debug)]
pub enum LoadEvent<'a> {
    PathStarted { path: &'a Path },
    FileSkipped { error: &'a FileError },
    EntrySkipped { path: &'a Path, error: &'a walkdir::Error },
    ContactLoaded { file: &'a Path, name: &'a str },
    UnparsedBirthday { file: &'a Path, raw: &'a str },
    PathFinished { path: &'a Path, stats: &'a PathStats },
    /// Emitted only when the run continues without this path (degraded mode).
    PathFailed { error: &'a SourceError },
    NothingLoaded { paths: usize },
}

/// Per-path counters reported with `PathFinished`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathStats {
    pub files_found: usize,
    pub files_loaded: usize,
    pub files_failed: usize,
    pub contacts: usize,
}

/// Must be `Sync`: per-path loads may run on the rayon pool.
pub trait LoadObserver: Sync {
    fn on_event(&self, event: &LoadEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_event(&self, event: &LoadEvent<'_>) {
        match event {
            LoadEvent::PathStarted { path } => {
                tracing::debug!(path = %path.display(), "Loading contacts from path");
            }
            LoadEvent::FileSkipped { error } => {
                tracing::warn!(error = %error, "Failed to process vCard file");
            }
            LoadEvent::EntrySkipped { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "Error accessing entry during directory walk");
            }
            LoadEvent::ContactLoaded { file, name } => {
                tracing::trace!(name = %name, file = %file.display(), "Loaded contact");
            }
            LoadEvent::UnparsedBirthday { file, raw } => {
                tracing::warn!(file = %file.display(), value = %raw, "Ignoring unparseable birthday");
            }
            LoadEvent::PathFinished { path, stats } => {
                tracing::debug!(
                    path = %path.display(),
                    vcf_files_found = stats.files_found,
                    successfully_processed = stats.files_loaded,
                    errors = stats.files_failed,
                    contacts_loaded = stats.contacts,
                    "Finished processing directory"
                );
            }
            LoadEvent::PathFailed { error } => {
                tracing::warn!(error = %error, "Failed to load contacts from address book");
            }
            LoadEvent::NothingLoaded { paths } => {
                tracing::info!(paths = paths, "No contacts found in any address book");
            }
        }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl LoadObserver for NullObserver {
    fn on_event(&self, _event: &LoadEvent<'_>) {}
}

/// Owned, comparable form of a `LoadEvent`. Errors are flattened to their messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    PathStarted(PathBuf),
    FileSkipped(String),
    EntrySkipped(PathBuf),
    ContactLoaded(String),
    UnparsedBirthday(String),
    PathFinished(PathBuf, PathStats),
    PathFailed(String),
    NothingLoaded(usize),
}

impl RecordedEvent {
    /// Events the tracing observer reports at warn level.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            RecordedEvent::FileSkipped(_)
                | RecordedEvent::EntrySkipped(_)
                | RecordedEvent::UnparsedBirthday(_)
                | RecordedEvent::PathFailed(_)
        )
    }
}

impl From<&LoadEvent<'_>> for RecordedEvent {
    fn from(event: &LoadEvent<'_>) -> Self {
        match event {
            LoadEvent::PathStarted { path } => RecordedEvent::PathStarted(path.to_path_buf()),
            LoadEvent::FileSkipped { error } => RecordedEvent::FileSkipped(error.to_string()),
            LoadEvent::EntrySkipped { path, .. } => RecordedEvent::EntrySkipped(path.to_path_buf()),
            LoadEvent::ContactLoaded { name, .. } => RecordedEvent::ContactLoaded(name.to_string()),
            LoadEvent::UnparsedBirthday { raw, .. } => RecordedEvent::UnparsedBirthday(raw.to_string()),
            LoadEvent::PathFinished { path, stats } => RecordedEvent::PathFinished(path.to_path_buf(), **stats),
            LoadEvent::PathFailed { error } => RecordedEvent::PathFailed(error.to_string()),
            LoadEvent::NothingLoaded { paths } => RecordedEvent::NothingLoaded(*paths),
        }
    }
}

/// Collects every event. Safe to share across the rayon pool.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn warnings(&self) -> Vec<RecordedEvent> {
        self.events.lock().iter().filter(|e| e.is_warning()).cloned().collect()
    }
}

impl LoadObserver for RecordingObserver {
    fn on_event(&self, event: &LoadEvent<'_>) {
        self.events.lock().push(RecordedEvent::from(event));
    }
}
