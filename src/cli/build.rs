//! Function for building the command line hierarchy.

use super::{dump::create_dump_subcommand, evaluate::create_evaluate_subcommand};
use clap::{self, Arg, Command};

/// Build the `cylfield` command line hierarchy.
pub fn build() -> Command<'static> {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about(clap::crate_description!())
        .propagate_version(true)
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .help("Display elapsed time when done"),
        )
        .subcommand(create_evaluate_subcommand())
        .subcommand(create_dump_subcommand())
}
