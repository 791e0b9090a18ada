//! Command line interface for evaluating the field at a single position.

use super::{field, utils};
use crate::{exit_on_error, geometry::Point3, interpolation::fip};
use clap::{Arg, ArgMatches, Command};

/// Builds a representation of the `evaluate` command line subcommand.
pub fn create_evaluate_subcommand() -> Command<'static> {
    let command = Command::new("evaluate")
        .about("Evaluate the interpolated field at a position")
        .long_about(
            "Evaluate the interpolated field at a position.\n\
             Positions outside the tabulated domain are clamped to its boundary in r and z.",
        )
        .arg(
            Arg::new("point")
                .short('p')
                .long("point")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["X", "Y", "Z"])
                .help("Cartesian coordinates of the position")
                .takes_value(true)
                .number_of_values(3)
                .required(true),
        )
        .arg(
            Arg::new("jacobian")
                .short('j')
                .long("jacobian")
                .help("Also evaluate the Jacobian of the field"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        );
    field::add_field_arguments(command)
}

/// Runs the actions for the `evaluate` subcommand using the given arguments.
pub fn run_evaluate_subcommand(arguments: &ArgMatches) {
    let verbosity = utils::parse_verbosity(arguments, false);
    let mut engine = field::construct_engine_from_options(arguments, &verbosity);

    let position: Point3<fip> = utils::parse_point3(arguments, "point");

    if arguments.is_present("jacobian") {
        let (field, jacobian) = exit_on_error!(
            engine.evaluate_with_jacobian(&position),
            "Error: Could not evaluate field: {}"
        );
        println!("B = {}", field);
        println!("Jacobian =\n{}", jacobian);
    } else {
        let field = exit_on_error!(
            engine.evaluate(&position),
            "Error: Could not evaluate field: {}"
        );
        println!("B = {}", field);
    }
}
