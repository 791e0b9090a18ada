//! Command line options for the tabulated field and the interpolation engine.

use crate::{
    cli::utils,
    engine::{AxisPolicy, EngineConfig, InterpolationEngine},
    exit_on_error, exit_on_false,
    interpolation::fip,
    io::Verbosity,
    synthetic::SyntheticTokamakField,
    table::FieldTableProvider,
};
use clap::{Arg, ArgMatches, Command};

/// Adds the arguments describing the synthetic field table and the engine
/// configuration to the given command.
pub fn add_field_arguments(command: Command<'static>) -> Command<'static> {
    command
        .arg(
            Arg::new("r-bounds")
                .long("r-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Lower and upper bound for the tabulated radial coordinates")
                .takes_value(true)
                .number_of_values(2)
                .default_value("3.5,8.9"),
        )
        .arg(
            Arg::new("z-bounds")
                .long("z-bounds")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .allow_hyphen_values(true)
                .value_names(&["LOWER", "UPPER"])
                .help("Lower and upper bound for the tabulated axial coordinates")
                .takes_value(true)
                .number_of_values(2)
                .default_value("-5.5,5.5"),
        )
        .arg(
            Arg::new("grid-shape")
                .long("grid-shape")
                .require_equals(true)
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .value_names(&["NR", "NZ"])
                .help("Number of tabulated points along r and z")
                .takes_value(true)
                .number_of_values(2)
                .default_value("55,111"),
        )
        .arg(
            Arg::new("major-radius")
                .long("major-radius")
                .require_equals(true)
                .value_name("VALUE")
                .help("Major radius of the magnetic axis of the synthetic field")
                .takes_value(true)
                .default_value("6.2"),
        )
        .arg(
            Arg::new("toroidal-field")
                .long("toroidal-field")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Toroidal field strength at the magnetic axis")
                .takes_value(true)
                .default_value("5.3"),
        )
        .arg(
            Arg::new("poloidal-field")
                .long("poloidal-field")
                .require_equals(true)
                .allow_hyphen_values(true)
                .value_name("VALUE")
                .help("Scale of the poloidal field")
                .takes_value(true)
                .default_value("0.8"),
        )
        .arg(
            Arg::new("axis-policy")
                .long("axis-policy")
                .require_equals(true)
                .value_name("POLICY")
                .long_help(
                    "How to handle positions on the symmetry axis\n\
                     reject: Fail with an error\n\
                     axial-only: Return only the axial field component",
                )
                .next_line_help(true)
                .takes_value(true)
                .possible_values(&["reject", "axial-only"])
                .default_value("reject"),
        )
        .arg(
            Arg::new("axis-tolerance")
                .long("axis-tolerance")
                .require_equals(true)
                .value_name("VALUE")
                .help("Distance from the symmetry axis within which positions count as on the axis")
                .takes_value(true)
                .default_value("1e-12"),
        )
}

/// Determines synthetic field parameters based on provided options.
pub fn construct_synthetic_field_from_options(arguments: &ArgMatches) -> SyntheticTokamakField {
    let r_bounds: (fip, fip) = utils::parse_limits(
        arguments,
        "r-bounds",
        utils::AllowSameValue::No,
        utils::AllowInfinity::No,
    );
    exit_on_false!(r_bounds.0 > 0.0, "Error: Radial bounds must be positive");

    let z_bounds: (fip, fip) = utils::parse_limits(
        arguments,
        "z-bounds",
        utils::AllowSameValue::No,
        utils::AllowInfinity::No,
    );
    let grid_shape: (usize, usize) = utils::parse_2d_values(arguments, "grid-shape", Some(4));

    let major_radius: fip =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "major-radius");
    exit_on_false!(major_radius > 0.0, "Error: Major radius must be positive");

    SyntheticTokamakField {
        major_radius,
        toroidal_field: utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "toroidal-field",
        ),
        poloidal_field: utils::get_finite_float_value_from_required_parseable_argument(
            arguments,
            "poloidal-field",
        ),
        r_bounds,
        z_bounds,
        grid_shape,
    }
}

/// Determines engine configuration parameters based on provided options.
pub fn construct_engine_config_from_options(arguments: &ArgMatches) -> EngineConfig {
    let axis_policy = utils::get_value_from_required_constrained_argument(
        arguments,
        "axis-policy",
        &["reject", "axial-only"],
        &[AxisPolicy::Reject, AxisPolicy::AxialOnly],
    );
    let axis_tolerance: fip =
        utils::get_finite_float_value_from_required_parseable_argument(arguments, "axis-tolerance");
    exit_on_false!(
        axis_tolerance >= 0.0,
        "Error: Axis tolerance must be non-negative"
    );
    EngineConfig {
        axis_policy,
        axis_tolerance,
    }
}

/// Tabulates the synthetic field described by the options and builds an
/// interpolation engine for it.
pub fn construct_engine_from_options(
    arguments: &ArgMatches,
    verbosity: &Verbosity,
) -> InterpolationEngine {
    let mut provider = construct_synthetic_field_from_options(arguments);
    let config = construct_engine_config_from_options(arguments);

    if verbosity.print_messages() {
        println!(
            "Tabulating synthetic field on {}x{} grid with r in [{}, {}] and z in [{}, {}]",
            provider.grid_shape.0,
            provider.grid_shape.1,
            provider.r_bounds.0,
            provider.r_bounds.1,
            provider.z_bounds.0,
            provider.z_bounds.1
        );
    }
    let table = exit_on_error!(
        provider.provide_field_table(),
        "Error: Could not tabulate field: {}"
    );

    if verbosity.print_messages() {
        println!("Building interpolation engine");
    }
    exit_on_error!(
        InterpolationEngine::from_table(&table, config),
        "Error: Could not initialize interpolation engine: {}"
    )
}
