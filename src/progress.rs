//! Progress reporting: one bar per address book, ticking once per `.vcf` file.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

const FILE_COUNT_TEMPLATE: &str = "{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}/{len} files  {elapsed}";

/// Count-style bar over `total` files, labelled with `label` when non-empty.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(FILE_COUNT_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let pb = ProgressBar::new(total).with_style(style);
    if !label.is_empty() {
        pb.set_message(label.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Bar for one address book, or `None` when progress is disabled.
pub fn address_book_progress(enabled: bool, total_files: usize, prefix: Option<&str>, path: &Path) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let label = match prefix {
        Some(p) => format!("{p} {}", path.display()),
        None => path.display().to_string(),
    };
    Some(make_count_progress(total_files as u64, &label))
}
