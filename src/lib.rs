//! The `cylfield` crate evaluates tabulated cylindrical magnetic fields at
//! arbitrary Cartesian positions, for use by particle orbit integrators.

pub mod coordinates;
pub mod dump;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod interpolation;
pub mod io;
pub mod num;
pub mod synthetic;
pub mod table;

#[cfg(feature = "cli")]
pub mod cli;
