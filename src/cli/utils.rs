//! Utilities for creating the command line interface.

use crate::{
    exit_on_error, exit_on_false, exit_with_error,
    geometry::{Dim3, Point3},
    io::{OverwriteMode, Verbosity},
    num::BFloat,
};
use clap::ArgMatches;
use indicatif::ProgressStyle;
use lazy_static::lazy_static;
use std::{fmt, str::FromStr};

lazy_static! {
    static ref DEFAULT_PROGRESS_STYLE: ProgressStyle = ProgressStyle::default_bar()
        .template("Progress: {bar:40}  {percent}% | ETA: {eta}")
        .expect("Invalid progress bar template");
}

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

fn parse_value_strings<'a, T, I>(argument_name: &str, value_strings: I) -> Vec<T>
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
    I: Iterator<Item = &'a str>,
{
    value_strings
        .filter_map(|value_string| {
            if value_string.is_empty() {
                None
            } else {
                Some(parse_value_string(argument_name, value_string))
            }
        })
        .collect()
}

fn verify_finite_float_value<F: BFloat>(argument_name: &str, value: F) {
    exit_on_false!(value.is_finite(), "Error: {} must be finite", argument_name);
}

fn verify_argument_value_count<T>(argument_name: &str, values: &[T], required_count: usize) {
    let count = values.len();
    exit_on_false!(
        count == required_count,
        "Error: {} must have {} values, got {}",
        argument_name,
        required_count,
        count
    );
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .value_of(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_finite_float_value_from_required_parseable_argument<F>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: fmt::Display,
{
    let value: F = get_value_from_required_parseable_argument(arguments, argument_name);
    verify_finite_float_value(argument_name, value);
    value
}

pub fn get_value_from_required_constrained_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
    possible_value_strings: &[&str],
    possible_values: &[T],
) -> T
where
    T: Copy,
{
    let value_string = arguments
        .value_of(argument_name)
        .expect("No value for required argument");
    possible_value_strings
        .iter()
        .zip(possible_values)
        .find(|(possible_value_string, _)| **possible_value_string == value_string)
        .map(|(_, possible_value)| *possible_value)
        .unwrap_or_else(|| {
            exit_with_error!(
                "Error: Invalid value for {}: {}",
                argument_name,
                value_string
            )
        })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllowSameValue {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllowInfinity {
    Yes,
    No,
}

pub fn parse_limits<F>(
    arguments: &ArgMatches,
    argument_name: &str,
    allow_same_value: AllowSameValue,
    allow_infinity: AllowInfinity,
) -> (F, F)
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: fmt::Display,
{
    let limits: Vec<F> = parse_value_strings(
        argument_name,
        arguments
            .values_of(argument_name)
            .expect("No value for argument with default"),
    );

    verify_argument_value_count(argument_name, &limits, 2);

    let (lower_limit, upper_limit) = (limits[0], limits[1]);

    exit_on_false!(
        !(lower_limit.is_nan() || upper_limit.is_nan()),
        "Error: {} contains a NaN value",
        argument_name
    );

    exit_on_false!(
        allow_infinity == AllowInfinity::Yes
            || (lower_limit.is_finite() && upper_limit.is_finite()),
        "Error: {} must be finite",
        argument_name
    );

    match allow_same_value {
        AllowSameValue::Yes => exit_on_false!(
            upper_limit >= lower_limit,
            "Error: Second value in {} ({}) must be larger than or equal to first value ({})",
            argument_name,
            upper_limit,
            lower_limit
        ),
        AllowSameValue::No => exit_on_false!(
            upper_limit > lower_limit,
            "Error: Second value in {} ({}) must be larger than first value ({})",
            argument_name,
            upper_limit,
            lower_limit
        ),
    };
    (lower_limit, upper_limit)
}

pub fn parse_2d_values<T>(arguments: &ArgMatches, argument_name: &str, min_value: Option<T>) -> (T, T)
where
    T: FromStr + PartialOrd + Copy + fmt::Display,
    <T as FromStr>::Err: fmt::Display,
{
    let values: Vec<T> = parse_value_strings(
        argument_name,
        arguments
            .values_of(argument_name)
            .expect("No values for required argument"),
    );

    verify_argument_value_count(argument_name, &values, 2);

    if let Some(min_value) = min_value {
        exit_on_false!(
            values.iter().all(|&value| value >= min_value),
            "Error: All values in {} must be at least {}",
            argument_name,
            min_value
        );
    }

    (values[0], values[1])
}

pub fn parse_point3<F>(arguments: &ArgMatches, argument_name: &str) -> Point3<F>
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: fmt::Display,
{
    let values: Vec<F> = parse_value_strings(
        argument_name,
        arguments
            .values_of(argument_name)
            .expect("No values for required argument"),
    );

    verify_argument_value_count(argument_name, &values, 3);

    values
        .iter()
        .for_each(|&value| verify_finite_float_value(argument_name, value));

    Point3::with_each_component(|dim: Dim3| values[dim.num()])
}

pub fn overwrite_mode_from_arguments(arguments: &ArgMatches) -> OverwriteMode {
    OverwriteMode::from_bool(arguments.is_present("overwrite"))
}

pub fn parse_verbosity(arguments: &ArgMatches, support_progress: bool) -> Verbosity {
    if support_progress && arguments.is_present("progress") {
        Verbosity::Progress(DEFAULT_PROGRESS_STYLE.clone())
    } else if arguments.is_present("verbose") {
        Verbosity::Messages
    } else {
        Verbosity::Quiet
    }
}
