//! Contact aggregation across address-book directories.
//!
//! Failures are absorbed at the narrowest level that can recover: a bad file is skipped
//! within its directory, a bad directory is skipped within the run. The run itself only
//! fails when every directory failed and nothing at all was collected.

use crate::card::decode_bytes;
use crate::concurrency::map_ordered_limited;
use crate::config::LoadOptions;
use crate::contact::Contact;
use crate::error::{CardbookError, FileError, Result, SourceError};
use crate::extract::extract_contact;
use crate::observer::{LoadEvent, LoadObserver, PathStats};
use crate::paths::discover_vcard_files;
use crate::progress::address_book_progress;
use std::fs;
use std::path::Path;

/// Load every contact below `paths`, concatenated in path order.
///
/// Per-path failures are reported through the observer when at least one contact was
/// collected; when every path failed they are returned together in
/// `CardbookError::AllSourcesFailed`.
pub fn load_contacts<P>(paths: &[P], opts: &LoadOptions, observer: &dyn LoadObserver) -> Result<Vec<Contact>>
where
    P: AsRef<Path> + Sync,
{
    let year = opts.resolved_year();
    let results = map_ordered_limited(paths, opts.parallelism, |p| {
        load_contacts_from_path(p.as_ref(), opts, year, observer)
    });

    let mut contacts = Vec::new();
    let mut failures = Vec::new();
    for res in results {
        match res {
            Ok(part) => contacts.extend(part),
            Err(e) => failures.push(e),
        }
    }

    if !failures.is_empty() && contacts.is_empty() {
        return Err(CardbookError::AllSourcesFailed { failures });
    }
    for error in &failures {
        observer.on_event(&LoadEvent::PathFailed { error });
    }
    if contacts.is_empty() {
        observer.on_event(&LoadEvent::NothingLoaded { paths: paths.len() });
    }
    Ok(contacts)
}

/// Load one address-book directory. Files that fail are skipped and reported.
pub fn load_contacts_from_path(
    path: &Path,
    opts: &LoadOptions,
    current_year: i32,
    observer: &dyn LoadObserver,
) -> std::result::Result<Vec<Contact>, SourceError> {
    observer.on_event(&LoadEvent::PathStarted { path });

    let files = discover_vcard_files(path, observer)?;
    let pb = address_book_progress(opts.progress, files.len(), opts.progress_label.as_deref(), path);

    let mut contacts = Vec::new();
    let mut stats = PathStats { files_found: files.len(), ..Default::default() };

    for file in &files {
        match load_file(file, current_year, observer) {
            Ok(part) => {
                stats.files_loaded += 1;
                stats.contacts += part.len();
                contacts.extend(part);
            }
            Err(error) => {
                stats.files_failed += 1;
                observer.on_event(&LoadEvent::FileSkipped { error: &error });
            }
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    observer.on_event(&LoadEvent::PathFinished { path, stats: &stats });

    if stats.files_loaded == 0 && stats.files_failed > 0 {
        return Err(SourceError::NoLoadableFiles { path: path.to_path_buf(), failed: stats.files_failed });
    }
    Ok(contacts)
}

/// Decode one `.vcf` file into one contact per card block.
pub fn load_file(
    file: &Path,
    current_year: i32,
    observer: &dyn LoadObserver,
) -> std::result::Result<Vec<Contact>, FileError> {
    let bytes = fs::read(file).map_err(|source| FileError::Read { path: file.to_path_buf(), source })?;
    let cards = decode_bytes(&bytes).map_err(|source| FileError::Decode { path: file.to_path_buf(), source })?;
    if cards.is_empty() {
        return Err(FileError::NoValidContacts { path: file.to_path_buf() });
    }

    Ok(cards
        .iter()
        .map(|card| {
            let contact = extract_contact(card, file, current_year, observer);
            observer.on_event(&LoadEvent::ContactLoaded { file, name: &contact.name });
            contact
        })
        .collect())
}
