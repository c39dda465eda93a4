mod cli;
mod commands;
mod config;
mod logging;
mod plotting;
mod request;
mod workflow;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Lsi(args) => commands::lsi(args),
        Command::Balance(args) => commands::balance(args),
        Command::Breakpoint(args) => commands::breakpoint(args),
        Command::Salt(args) => commands::salt(args),
        Command::Thiosulfate(args) => commands::thiosulfate(args),
        Command::Report(args) => workflow::run(args),
        Command::History(args) => commands::history(args),
    }
}
