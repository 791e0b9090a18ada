//! Error types and error reporting macros.

use crate::{grid::GridAxis, table::FieldComponent};
use std::io;
use thiserror::Error;

/// Result type for operations on field tables and interpolation engines.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur when building or querying an interpolation engine.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(#[from] GridDefect),

    #[error("Interpolation engine was used before it was initialized")]
    UninitializedEngine,

    #[error("Interpolation engine is already initialized")]
    AlreadyInitialized,

    #[error("Position ({x}, {y}) lies on the symmetry axis (r = {r}), where the azimuthal direction is undefined")]
    SingularAxis { x: f64, y: f64, r: f64 },

    #[error("Position ({x}, {y}, {z}) has non-finite coordinates")]
    NonFinitePosition { x: f64, y: f64, z: f64 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Ways in which a field table can fail to describe a valid interpolation grid.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GridDefect {
    #[error("{axis} axis has {count} points, but at least {required} are required")]
    TooFewPoints {
        axis: GridAxis,
        count: usize,
        required: usize,
    },

    #[error("{axis} axis is not strictly increasing at index {index}")]
    NotIncreasing { axis: GridAxis, index: usize },

    #[error("{axis} axis has a non-finite coordinate at index {index}")]
    NonFiniteCoordinate { axis: GridAxis, index: usize },

    #[error("expected {expected} field values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("samples have shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{component} samples have shape {actual:?}, expected {expected:?}")]
    ComponentShapeMismatch {
        component: FieldComponent,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("field value at flat index {index} is not finite")]
    NonFiniteValue { index: usize },
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}
