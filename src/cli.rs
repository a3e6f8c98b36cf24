//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cardbook::{ExportFormat, CONFIG_ENV_VAR};

#[derive(Parser)]
#[command(
    name = "cardbook",
    version,
    about = "Query and export contacts from vCard address books",
    long_about = "Reads every .vcf file under the configured address-book directories,\n\
                  then lists, filters, sorts or exports the contacts they hold.\n\n\
                  Without a command, `cardbook [FILTER...]` behaves like `cardbook list`.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments of the default `list` command.
    #[command(flatten)]
    pub list: ListArgs,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file to use instead of ~/.config/cardbook/cardbook.toml.
    #[arg(long, value_name = "PATH", env = CONFIG_ENV_VAR, global = true)]
    pub config: Option<PathBuf>,

    /// Show a progress bar per address book.
    #[arg(long, global = true)]
    pub progress: bool,

    /// Number of address books loaded in parallel.
    #[arg(long, value_name = "N", default_value_t = 1, global = true)]
    pub jobs: usize,
}

#[derive(Subcommand)]
pub enum Command {
    /// List contacts sorted by name.
    List(ListArgs),

    /// List email addresses.
    Email(EmailArgs),

    /// List phone numbers.
    Phone(SelectArgs),

    /// List contacts with a birthday, in calendar order.
    Birthday(SelectArgs),

    /// Show the configured address books.
    Addressbooks,

    /// Export contacts as CSV or JSON.
    Export(ExportArgs),

    /// Print the version.
    Version,
}

/// Filter terms plus direction, shared by every listing.
#[derive(Args)]
pub struct SelectArgs {
    /// Reverse the sort order.
    #[arg(short, long)]
    pub reverse: bool,

    /// Words that must appear, in this order, in the contact's searchable text.
    #[arg(value_name = "FILTER")]
    pub filter: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Also show organization, note and address.
    #[arg(short, long)]
    pub long: bool,

    #[command(flatten)]
    pub select: SelectArgs,
}

#[derive(Args)]
pub struct EmailArgs {
    /// Machine-readable `address<TAB>name<TAB>type` lines with no header.
    #[arg(short, long)]
    pub parsable: bool,

    #[command(flatten)]
    pub select: SelectArgs,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, ignore_case = true, default_value = "csv")]
    pub format: ExportFormatArg,

    /// CSV field delimiter (first character is used).
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Write to this file instead of stdout. The file must not exist.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Words that must appear, in this order, in the contact's searchable text.
    #[arg(value_name = "FILTER")]
    pub filter: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}
