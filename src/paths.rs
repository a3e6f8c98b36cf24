use crate::error::SourceError;
use crate::observer::{LoadEvent, LoadObserver};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of eligible source files, compared case-insensitively.
pub const VCARD_EXTENSION: &str = ".vcf";

pub fn is_vcard_file(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(VCARD_EXTENSION))
        .unwrap_or(false)
}

/// Recursively list every `.vcf` file under `root`, sorted by file name per directory.
///
/// Unreadable entries below the root are reported to the observer and skipped.
/// A missing root, an unreadable root, or a root without any `.vcf` file is an error
/// for the whole path.
pub fn discover_vcard_files(root: &Path, observer: &dyn LoadObserver) -> Result<Vec<PathBuf>, SourceError> {
    match root.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(SourceError::PathNotFound { path: root.to_path_buf() }),
        Err(e) => return Err(SourceError::PathUnreadable { path: root.to_path_buf(), source: e }),
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Ok(ent) => {
                if ent.file_type().is_dir() {
                    continue;
                }
                if is_vcard_file(ent.path()) {
                    files.push(ent.into_path());
                }
            }
            Err(e) if e.depth() == 0 => {
                return Err(SourceError::PathUnreadable { path: root.to_path_buf(), source: io::Error::from(e) });
            }
            Err(e) => {
                let at = e.path().unwrap_or(root).to_path_buf();
                observer.on_event(&LoadEvent::EntrySkipped { path: &at, error: &e });
            }
        }
    }

    if files.is_empty() {
        return Err(SourceError::NoEligibleFiles { path: root.to_path_buf() });
    }
    Ok(files)
}
