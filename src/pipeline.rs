use crate::aggregate::load_contacts;
use crate::config::LoadOptions;
use crate::contact::Contact;
use crate::error::Result;
use crate::export::{encode, ExportFormat, ExportTarget};
use crate::filters::filter_contacts;
use crate::observer::{LoadObserver, TracingObserver};
use crate::query::FilterQuery;
use crate::sort::{sort_contacts, SortOrder};
use std::path::{Path, PathBuf};

/// Entry point: a set of address-book directories plus load options.
///
///   CardBook::new().path(dir).scan().filter(["alice"]).sort_by(SortOrder::Birthday).collect()?
#[derive(Clone, Debug, Default)]
pub struct CardBook {
    pub(crate) paths: Vec<PathBuf>,
    pub(crate) opts: LoadOptions,
}

impl CardBook {
    pub fn new() -> Self {
        Self::default()
    }

    // -------- Builder methods --------
    pub fn path(mut self, p: impl AsRef<Path>) -> Self { self.paths.push(p.as_ref().to_path_buf()); self }
    pub fn paths<I, P>(mut self, iter: I) -> Self where I: IntoIterator<Item = P>, P: AsRef<Path> {
        self.paths.extend(iter.into_iter().map(|p| p.as_ref().to_path_buf())); self
    }
    pub fn options(mut self, opts: LoadOptions) -> Self { self.opts = opts; self }
    pub fn parallelism(mut self, n: usize) -> Self { self.opts = self.opts.with_parallelism(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn current_year(mut self, year: i32) -> Self { self.opts = self.opts.with_current_year(year); self }

    pub fn address_books(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Year used for anchoring year-less birthdays and for display.
    pub fn year(&self) -> i32 {
        self.opts.resolved_year()
    }

    /// Load everything, unfiltered and in file order.
    pub fn load_with(&self, observer: &dyn LoadObserver) -> Result<Vec<Contact>> {
        load_contacts(&self.paths, &self.opts, observer)
    }

    pub fn load(&self) -> Result<Vec<Contact>> {
        self.load_with(&TracingObserver)
    }

    // -------- Query mode --------
    /// The current year is read once here; loading and display both use it.
    pub fn scan(self) -> ScanPlan {
        let year = self.year();
        let book = self.current_year(year);
        ScanPlan { book, query: FilterQuery::match_all(), order: SortOrder::Name, reverse: false, birthdays_only: false }
    }
}

/// Filter / sort selection applied after loading.
#[derive(Clone, Debug)]
pub struct ScanPlan {
    book: CardBook,
    query: FilterQuery,
    order: SortOrder,
    reverse: bool,
    birthdays_only: bool,
}

impl ScanPlan {
    pub fn filter<I, S>(mut self, terms: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> {
        self.query = FilterQuery::from_terms(terms); self
    }
    pub fn query(mut self, query: FilterQuery) -> Self { self.query = query; self }
    pub fn sort_by(mut self, order: SortOrder) -> Self { self.order = order; self }
    pub fn reverse(mut self, yes: bool) -> Self { self.reverse = yes; self }
    /// Drop contacts without a birthday (the birthday listing).
    pub fn birthdays_only(mut self) -> Self { self.birthdays_only = true; self }

    /// Year pinned when the plan was built.
    pub fn year(&self) -> i32 {
        self.book.year()
    }

    /// Load, filter, then sort.
    pub fn collect_with(&self, observer: &dyn LoadObserver) -> Result<Vec<Contact>> {
        let loaded = self.book.load_with(observer)?;
        let mut contacts = filter_contacts(loaded, &self.query);
        if self.birthdays_only {
            contacts.retain(Contact::has_birthday);
        }
        sort_contacts(&mut contacts, self.order, self.reverse);
        Ok(contacts)
    }

    pub fn collect(&self) -> Result<Vec<Contact>> {
        self.collect_with(&TracingObserver)
    }

    /// Callback style: invoke `f` for each selected contact in order.
    pub fn for_each_contact<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&Contact),
    {
        for contact in self.collect()? {
            f(&contact);
        }
        Ok(())
    }

    /// Export the selection. A file target is checked before anything is loaded and is
    /// never overwritten.
    pub fn export_with(&self, format: ExportFormat, delimiter: &str, target: &ExportTarget, observer: &dyn LoadObserver) -> Result<()> {
        target.ensure_available()?;
        let contacts = self.collect_with(observer)?;
        let bytes = encode(&contacts, format, delimiter)?;
        target.write_all(&bytes)?;
        tracing::debug!(format = %format, contacts = contacts.len(), "Exported contacts");
        Ok(())
    }

    pub fn export(&self, format: ExportFormat, delimiter: &str, target: &ExportTarget) -> Result<()> {
        self.export_with(format, delimiter, target, &TracingObserver)
    }
}
