use clap::Parser;
use cardbook::init_tracing_once;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_addressbooks, run_birthday, run_email, run_export, run_list, run_phone, run_version, Session};

fn main() {
    let Cli { command, list, debug, config, progress, jobs } = Cli::parse();
    init_tracing_once(debug);

    // `cardbook [FILTER...]` is `cardbook list [FILTER...]`.
    let command = command.unwrap_or(Command::List(list));
    if let Command::Version = command {
        exit_on_error(run_version());
        return;
    }

    let session = match Session::open(config.as_deref(), progress, jobs) {
        Ok(s) => s,
        Err(error) => {
            eprintln!("Error: {error}\n");
            eprintln!("{}", error.guidance());
            std::process::exit(1);
        }
    };

    let result = match &command {
        Command::List(args) => run_list(&session, args),
        Command::Email(args) => run_email(&session, args),
        Command::Phone(args) => run_phone(&session, args),
        Command::Birthday(args) => run_birthday(&session, args),
        Command::Addressbooks => run_addressbooks(&session),
        Command::Export(args) => run_export(&session, args),
        Command::Version => run_version(),
    };
    exit_on_error(result);
}

fn exit_on_error(result: anyhow::Result<()>) {
    if let Err(error) = result {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
