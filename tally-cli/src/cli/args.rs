//! CLI argument definitions for `tally`.

use clap::{Arg, Command};

/// Build the CLI argument parser and command definitions.
pub fn build_cli() -> Command {
    Command::new("tally")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A single-screen terminal timer for task time tracking")
        .arg(
            Arg::new("grace")
                .long("grace")
                .value_name("SECONDS")
                .default_value("2")
                .help("Lockout window after committing a task, in seconds"),
        )
        .arg(
            Arg::new("tick-ms")
                .long("tick-ms")
                .value_name("MS")
                .default_value("100")
                .help("Screen refresh and input poll interval"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .short('e')
                .value_name("PATH")
                .help("Append each committed task as a JSON line to PATH"),
        )
        .arg(
            Arg::new("TASK")
                .help("Initial task name")
                .required(false)
                .index(1),
        )
}
