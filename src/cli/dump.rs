//! Command line interface for dumping the field over a Cartesian plane.

use super::{field, utils};
use crate::{
    dump::{self, DumpPlane, DumpQuantity, FieldDumpConfig},
    exit_on_error, exit_on_none, exit_with_error,
    interpolation::fip,
    io::utils::{self as io_utils, AtomicOutputPath},
};
use clap::{Arg, ArgMatches, Command};
use std::{path::PathBuf, str::FromStr};

/// Builds a representation of the `dump` command line subcommand.
pub fn create_dump_subcommand() -> Command<'static> {
    let command = Command::new("dump")
        .about("Write the interpolated field over a plane to a text file")
        .long_about(
            "Write the interpolated field over a plane to a text file.\n\
             Each line of the output holds the values for one value of the first\n\
             coordinate of the plane, separated by whitespace. If the file has the\n\
             extension .json and JSON support is enabled, the values are instead\n\
             written as a serialized array.",
        )
        .arg(
            Arg::new("output-file")
                .value_name("OUTPUT_FILE")
                .help("Path of the file to write")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Automatically overwrite any existing file"),
        )
        .arg(
            Arg::new("plane")
                .long("plane")
                .require_equals(true)
                .value_name("PLANE")
                .help("Cartesian plane to sample")
                .takes_value(true)
                .possible_values(&["xy", "xz", "yz"])
                .default_value("xz"),
        )
        .arg(
            Arg::new("fixed")
                .long("fixed")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Value of the coordinate normal to the plane")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("first-bounds")
                .long("first-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Lower and upper bound for the first coordinate of the plane")
                .takes_value(true)
                .number_of_values(2)
                .default_value("3.5,8.9"),
        )
        .arg(
            Arg::new("second-bounds")
                .long("second-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Lower and upper bound for the second coordinate of the plane")
                .takes_value(true)
                .number_of_values(2)
                .default_value("-5.5,5.5"),
        )
        .arg(
            Arg::new("shape")
                .short('s')
                .long("shape")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_names(&["N1", "N2"])
                .help("Number of samples along the first and second coordinate")
                .takes_value(true)
                .number_of_values(2)
                .default_value("110,220"),
        )
        .arg(
            Arg::new("quantity")
                .short('q')
                .long("quantity")
                .require_equals(true)
                .value_name("NAME")
                .help("Field quantity to write")
                .takes_value(true)
                .possible_values(DumpQuantity::names())
                .default_value("bz"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print status messages"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .help("Show progress bar (also implies `verbose`)"),
        );
    field::add_field_arguments(command)
}

/// Runs the actions for the `dump` subcommand using the given arguments.
pub fn run_dump_subcommand(arguments: &ArgMatches) {
    let output_file_path = exit_on_error!(
        PathBuf::from_str(
            arguments
                .value_of("output-file")
                .expect("No value for required argument"),
        ),
        "Error: Could not interpret path to output file: {}"
    );

    let verbosity = utils::parse_verbosity(arguments, true);
    let overwrite_mode = utils::overwrite_mode_from_arguments(arguments);

    let config = construct_dump_config_from_options(arguments);

    let atomic_output_path = exit_on_error!(
        AtomicOutputPath::new(&output_file_path),
        "Error: Could not create temporary output file: {}"
    );
    if !atomic_output_path.write_allowed(overwrite_mode) {
        exit_with_error!(
            "Error: {} already exists\n\
             Tip: Use --overwrite to replace it",
            output_file_path.display()
        );
    }

    let engine = field::construct_engine_from_options(arguments, &verbosity);

    let values = exit_on_error!(
        dump::dump_field_component(&engine, &config, &verbosity),
        "Error: Could not dump field: {}"
    );

    #[cfg(feature = "json")]
    let write_json = output_file_path
        .extension()
        .map_or(false, |extension| extension == "json");
    #[cfg(not(feature = "json"))]
    let write_json = false;

    if write_json {
        #[cfg(feature = "json")]
        exit_on_error!(
            io_utils::save_data_as_json(atomic_output_path.temporary_path(), &values),
            "Error: Could not write output file: {}"
        );
    } else {
        exit_on_error!(
            io_utils::save_text_matrix(atomic_output_path.temporary_path(), &values),
            "Error: Could not write output file: {}"
        );
    }

    if verbosity.print_messages() {
        println!("Saved {}", output_file_path.display());
    }
    exit_on_error!(
        atomic_output_path.perform_replace(),
        "Error: Could not move temporary output file to target path: {}"
    );
}

/// Determines dump parameters based on provided options.
fn construct_dump_config_from_options(arguments: &ArgMatches) -> FieldDumpConfig {
    let plane = exit_on_none!(
        DumpPlane::from_name(
            arguments
                .value_of("plane")
                .expect("No value for argument with default")
        ),
        "Error: Invalid plane"
    );
    let fixed_coord: fip =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "fixed");
    let first_bounds: (fip, fip) = utils::parse_limits(
        arguments,
        "first-bounds",
        utils::AllowSameValue::No,
        utils::AllowInfinity::No,
    );
    let second_bounds: (fip, fip) = utils::parse_limits(
        arguments,
        "second-bounds",
        utils::AllowSameValue::No,
        utils::AllowInfinity::No,
    );
    let shape: (usize, usize) = utils::parse_2d_values(arguments, "shape", Some(2));
    let quantity = exit_on_none!(
        DumpQuantity::from_name(
            arguments
                .value_of("quantity")
                .expect("No value for argument with default")
        ),
        "Error: Invalid quantity"
    );
    FieldDumpConfig {
        plane,
        fixed_coord,
        first_bounds,
        second_bounds,
        shape,
        quantity,
    }
}
