//! Interpolation of scalar fields tabulated on the cylindrical (z, r) grid.

pub mod bicubic_spline;
pub mod cubic_spline;

use crate::grid::{accelerator::AcceleratorStatistics, CylindricalBounds};

/// Floating-point precision to use for interpolation.
#[allow(non_camel_case_types)]
pub type fip = f64;

/// Interpolated value of a scalar field together with its first partial derivatives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSample {
    pub value: fip,
    pub partial_z: fip,
    pub partial_r: fip,
}

/// Defines the properties of a 2D interpolator over the (z, r) grid.
///
/// Evaluation takes `&mut self` because implementations may cache grid
/// lookups between queries. Coordinates must lie inside `domain()`; callers
/// are responsible for clamping.
pub trait SurfaceInterpolator2 {
    /// Returns the bounds of the interpolation domain.
    fn domain(&self) -> CylindricalBounds;

    /// Computes the interpolated value and first partial derivatives at the given coordinates.
    ///
    /// # Parameters
    ///
    /// - `z`: Axial coordinate of the interpolation point.
    /// - `r`: Radial coordinate of the interpolation point.
    ///
    /// # Returns
    ///
    /// A `SurfaceSample` with the value, `∂/∂z` and `∂/∂r`.
    fn eval_with_partials(&mut self, z: fip, r: fip) -> SurfaceSample;

    /// Computes the interpolated value at the given coordinates.
    fn eval(&mut self, z: fip, r: fip) -> fip {
        self.eval_with_partials(z, r).value
    }

    /// Computes the partial derivative with respect to `z` at the given coordinates.
    fn eval_partial_z(&mut self, z: fip, r: fip) -> fip {
        self.eval_with_partials(z, r).partial_z
    }

    /// Computes the partial derivative with respect to `r` at the given coordinates.
    fn eval_partial_r(&mut self, z: fip, r: fip) -> fip {
        self.eval_with_partials(z, r).partial_r
    }

    /// Returns the lookup cache statistics accumulated by the interpolator.
    fn accelerator_statistics(&self) -> AcceleratorStatistics {
        AcceleratorStatistics::default()
    }
}
