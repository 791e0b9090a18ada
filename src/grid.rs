//! Axes and bounds of the cylindrical (z, r) grid.

pub mod accelerator;

use crate::{
    error::{FieldResult, GridDefect},
    num,
};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Floating-point precision to use for grid coordinates.
#[allow(non_camel_case_types)]
pub type fgr = f64;

/// Smallest number of points along an axis that supports a cubic patch.
pub const MIN_AXIS_POINTS: usize = 4;

/// Denotes the radial or axial grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum GridAxis {
    Radial,
    Axial,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Radial => "radial",
                Self::Axial => "axial",
            }
        )
    }
}

/// Creates `size` uniformly spaced coordinates from `lower` to `upper`, both included.
///
/// # Panics
///
/// If `size` is smaller than two or the bounds are not increasing.
pub fn regular_axis(size: usize, lower: fgr, upper: fgr) -> Vec<fgr> {
    assert!(size >= 2, "Cannot create axis with fewer than two points");
    assert!(upper > lower, "Upper bound must be larger than lower bound");
    let step = (upper - lower) / ((size - 1) as fgr);
    let mut coords: Vec<_> = (0..size).map(|idx| lower + (idx as fgr) * step).collect();
    // Avoids round-off at the upper end
    coords[size - 1] = upper;
    coords
}

/// Checks that the given coordinates can serve as a spline axis.
pub fn validate_axis(axis: GridAxis, coords: &[fgr]) -> FieldResult<()> {
    if coords.len() < MIN_AXIS_POINTS {
        return Err(GridDefect::TooFewPoints {
            axis,
            count: coords.len(),
            required: MIN_AXIS_POINTS,
        }
        .into());
    }
    if let Some(index) = coords.iter().position(|coord| !coord.is_finite()) {
        return Err(GridDefect::NonFiniteCoordinate { axis, index }.into());
    }
    if let Some(index) = coords
        .windows(2)
        .position(|pair| pair[1] <= pair[0])
        .map(|idx| idx + 1)
    {
        return Err(GridDefect::NotIncreasing { axis, index }.into());
    }
    Ok(())
}

/// Bounds of the tabulated cylindrical domain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct CylindricalBounds {
    pub rmin: fgr,
    pub rmax: fgr,
    pub zmin: fgr,
    pub zmax: fgr,
}

impl CylindricalBounds {
    /// Creates bounds from the first and last coordinates of the given axes.
    ///
    /// # Panics
    ///
    /// If either axis is empty.
    pub fn from_axes(z_coords: &[fgr], r_coords: &[fgr]) -> Self {
        Self {
            rmin: r_coords[0],
            rmax: r_coords[r_coords.len() - 1],
            zmin: z_coords[0],
            zmax: z_coords[z_coords.len() - 1],
        }
    }

    /// Clamps the given radius to the radial bounds.
    pub fn clamp_r(&self, r: fgr) -> fgr {
        num::clamp(r, self.rmin, self.rmax)
    }

    /// Clamps the given axial coordinate to the axial bounds.
    pub fn clamp_z(&self, z: fgr) -> fgr {
        num::clamp(z, self.zmin, self.zmax)
    }

    /// Whether the given coordinates lie inside the bounds (inclusive).
    pub fn contains(&self, z: fgr, r: fgr) -> bool {
        z >= self.zmin && z <= self.zmax && r >= self.rmin && r <= self.rmax
    }
}

impl fmt::Display for CylindricalBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r in [{}, {}], z in [{}, {}]",
            self.rmin, self.rmax, self.zmin, self.zmax
        )
    }
}
