#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use cylfield::{
    engine::{EngineConfig, InterpolationEngine},
    geometry::{Dim3, Matrix3, Vec3},
    interpolation::fip,
    synthetic::SyntheticTokamakField,
    table::FieldTable,
};
use lazy_static::lazy_static;

#[cfg(feature = "cli")]
use cylfield::cli;
#[cfg(feature = "cli")]
use std::ffi::OsString;

lazy_static! {
    pub static ref SYNTHETIC_FIELD: SyntheticTokamakField = SyntheticTokamakField {
        grid_shape: (41, 81),
        ..SyntheticTokamakField::default()
    };
    pub static ref SYNTHETIC_TABLE: FieldTable = SYNTHETIC_FIELD
        .tabulate()
        .expect("Synthetic field could not be tabulated");
    pub static ref CONSTANT_TABLE: FieldTable = FieldTable::sampled(
        vec![3.5, 5.3, 7.1, 8.9],
        vec![-5.5, -1.83, 1.83, 5.5],
        |_, _| (1.0, 0.0, 2.0)
    )
    .expect("Constant field could not be tabulated");
}

#[cfg(feature = "cli")]
lazy_static! {
    static ref COMMAND: clap::Command<'static> = cli::build::build().no_binary_name(true);
}

#[cfg(feature = "cli")]
pub fn run<I, T>(args: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli::run::run_with_args(COMMAND.clone().get_matches_from(args));
}

pub fn synthetic_engine() -> InterpolationEngine {
    InterpolationEngine::from_table(&SYNTHETIC_TABLE, EngineConfig::default())
        .expect("Engine could not be initialized")
}

pub fn assert_vec3_close(actual: &Vec3<fip>, expected: &Vec3<fip>, epsilon: fip) {
    for dim in Dim3::slice() {
        assert_abs_diff_eq!(actual[dim], expected[dim], epsilon = epsilon);
    }
}

pub fn assert_matrix3_close(actual: &Matrix3<fip>, expected: &Matrix3<fip>, epsilon: fip) {
    for row in Dim3::slice() {
        for col in Dim3::slice() {
            assert_abs_diff_eq!(actual[(row, col)], expected[(row, col)], epsilon = epsilon);
        }
    }
}
