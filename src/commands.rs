//! Command implementations. Each returns after writing its whole output to stdout.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cardbook::{
    default_config_path, write_address_books, write_birthday_list, write_contact_list, write_email_list,
    write_phone_list, AppConfig, CardBook, ExportFormat, ExportTarget, ScanPlan, SortOrder,
};

use crate::cli::{EmailArgs, ExportArgs, ListArgs, SelectArgs};

/// Resolved config plus the global load flags.
pub struct Session {
    pub config: AppConfig,
    progress: bool,
    jobs: usize,
}

impl Session {
    pub fn open(config_path: Option<&Path>, progress: bool, jobs: usize) -> Result<Self, cardbook::ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };
        let config = AppConfig::load(&path)?;
        Ok(Self { config, progress, jobs })
    }

    fn book(&self) -> CardBook {
        CardBook::new()
            .paths(self.config.address_book_paths())
            .parallelism(self.jobs)
            .progress(self.progress)
    }

    fn plan(&self, select: &SelectArgs) -> ScanPlan {
        self.book().scan().filter(&select.filter).reverse(select.reverse)
    }
}

pub fn run_list(session: &Session, args: &ListArgs) -> Result<()> {
    let contacts = session.plan(&args.select).collect()?;
    with_stdout(|out| write_contact_list(out, &contacts, args.long))
}

pub fn run_email(session: &Session, args: &EmailArgs) -> Result<()> {
    let contacts = session.plan(&args.select).collect()?;
    with_stdout(|out| write_email_list(out, &contacts, args.parsable))
}

pub fn run_phone(session: &Session, args: &SelectArgs) -> Result<()> {
    let contacts = session.plan(args).collect()?;
    with_stdout(|out| write_phone_list(out, &contacts))
}

pub fn run_birthday(session: &Session, args: &SelectArgs) -> Result<()> {
    let plan = session.plan(args).sort_by(SortOrder::Birthday).birthdays_only();
    let contacts = plan.collect()?;
    let year = plan.year();
    with_stdout(|out| write_birthday_list(out, &contacts, year))
}

pub fn run_addressbooks(session: &Session) -> Result<()> {
    with_stdout(|out| write_address_books(out, &session.config))
}

pub fn run_export(session: &Session, args: &ExportArgs) -> Result<()> {
    let format = ExportFormat::from(args.format);
    let target = ExportTarget::from_output(args.output.clone());
    session
        .book()
        .scan()
        .filter(&args.filter)
        .export(format, &args.delimiter, &target)?;
    if let ExportTarget::File(path) = &target {
        tracing::info!(path = %path.display(), format = %format, "Export complete");
    }
    Ok(())
}

pub fn run_version() -> Result<()> {
    with_stdout(|out| writeln!(out, "cardbook {}", env!("CARGO_PKG_VERSION")))
}

fn with_stdout<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    let mut out = io::stdout().lock();
    f(&mut out).and_then(|_| out.flush()).context("writing to stdout")
}
