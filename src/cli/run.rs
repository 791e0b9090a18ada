//! Function for running the command line program.

use super::{build, dump::run_dump_subcommand, evaluate::run_evaluate_subcommand};
use clap::ArgMatches;
use std::time::Instant;

/// Runs the `cylfield` command line program.
pub fn run() {
    run_with_args(build::build().get_matches());
}

/// Runs the `cylfield` command line program with the given parsed arguments.
pub fn run_with_args(arguments: ArgMatches) {
    let start_instant = Instant::now();

    if let Some(evaluate_arguments) = arguments.subcommand_matches("evaluate") {
        run_evaluate_subcommand(evaluate_arguments);
    }
    if let Some(dump_arguments) = arguments.subcommand_matches("dump") {
        run_dump_subcommand(dump_arguments);
    }

    if arguments.is_present("timing") {
        println!("Elapsed time: {} s", start_instant.elapsed().as_secs_f64());
    }
}
