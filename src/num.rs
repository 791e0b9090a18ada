//! Utilities related to numbers.

use num;
use std::fmt;

/// Floating point marker trait for easier control over trait bounds.
pub trait BFloat:
    Sync + Send + num::Float + num::cast::FromPrimitive + fmt::Debug + fmt::Display
{
}

impl BFloat for f32 {}
impl BFloat for f64 {}

/// Clamps the value to the closed interval `[lower, upper]`.
///
/// Unlike `f64::clamp`, this never panics, and NaN is passed through.
pub fn clamp<F: BFloat>(value: F, lower: F, upper: F) -> F {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}
