//! Interpolation with a bicubic spline surface.

use super::{cubic_spline::natural_spline_slopes, fip, SurfaceInterpolator2, SurfaceSample};
use crate::{
    error::{FieldResult, GridDefect},
    grid::{
        self,
        accelerator::{AcceleratorStatistics, IntervalAccelerator},
        CylindricalBounds, GridAxis,
    },
};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use std::sync::Arc;

/// Read-only node data of a bicubic spline surface.
///
/// Each node holds the value and the derivatives `∂f/∂z`, `∂f/∂r` and
/// `∂²f/∂z∂r`, which together determine the bicubic Hermite patch of every
/// grid cell.
#[derive(Debug)]
struct SurfaceNodes {
    z_coords: Vec<fip>,
    r_coords: Vec<fip>,
    values: Array2<fip>,
    partials_z: Array2<fip>,
    partials_r: Array2<fip>,
    cross_partials: Array2<fip>,
}

impl SurfaceNodes {
    /// Sums the contributions of the four corner nodes of the cell with the
    /// given lower indices.
    fn combine(
        &self,
        iz: usize,
        ir: usize,
        z_weights: &HermiteWeights,
        r_weights: &HermiteWeights,
    ) -> fip {
        let mut sum = 0.0;
        for a in 0..2 {
            for b in 0..2 {
                let idx = [iz + a, ir + b];
                sum += z_weights.values[a] * r_weights.values[b] * self.values[idx]
                    + z_weights.slopes[a] * r_weights.values[b] * self.partials_z[idx]
                    + z_weights.values[a] * r_weights.slopes[b] * self.partials_r[idx]
                    + z_weights.slopes[a] * r_weights.slopes[b] * self.cross_partials[idx];
            }
        }
        sum
    }
}

/// A scalar field on the (z, r) grid interpolated by a bicubic spline.
///
/// The node derivatives are taken from natural cubic splines along each
/// grid line, so the surface passes through all samples and has continuous
/// first derivatives across cell boundaries.
///
/// Clones share the node data but get their own lookup accelerators.
#[derive(Clone, Debug)]
pub struct BicubicSplineSurface {
    nodes: Arc<SurfaceNodes>,
    z_accelerator: IntervalAccelerator,
    r_accelerator: IntervalAccelerator,
}

/// Hermite weights for the two ends of a cell along one axis.
#[derive(Clone, Copy, Debug)]
struct HermiteWeights {
    /// Weights for the values at the lower and upper node.
    values: [fip; 2],
    /// Weights for the derivatives at the lower and upper node.
    slopes: [fip; 2],
}

impl BicubicSplineSurface {
    /// Builds a bicubic spline surface through the given samples.
    ///
    /// # Parameters
    ///
    /// - `z_coords`: Strictly increasing axial coordinates (at least four).
    /// - `r_coords`: Strictly increasing radial coordinates (at least four).
    /// - `values`: Samples in row-major order, so that `values[iz*nr + ir]`
    ///   is the value at `(z_coords[iz], r_coords[ir])`.
    ///
    /// # Returns
    ///
    /// A `FieldResult` which is either:
    ///
    /// - `Ok`: Contains the new surface.
    /// - `Err`: Contains an `InvalidGrid` error describing the defect.
    pub fn build(z_coords: &[fip], r_coords: &[fip], values: &[fip]) -> FieldResult<Self> {
        let shape = (z_coords.len(), r_coords.len());
        let expected = shape.0 * shape.1;
        if values.len() != expected {
            grid::validate_axis(GridAxis::Axial, z_coords)?;
            grid::validate_axis(GridAxis::Radial, r_coords)?;
            return Err(GridDefect::ValueCountMismatch {
                expected,
                actual: values.len(),
            }
            .into());
        }
        let values = ArrayView2::from_shape(shape, values)
            .expect("Value count was checked against shape");
        Self::build_from_view(z_coords, r_coords, values)
    }

    /// Builds a bicubic spline surface through samples already arranged
    /// with shape `(z_coords.len(), r_coords.len())`.
    ///
    /// The samples are copied once into the surface's own node table.
    pub fn build_from_view(
        z_coords: &[fip],
        r_coords: &[fip],
        values: ArrayView2<fip>,
    ) -> FieldResult<Self> {
        grid::validate_axis(GridAxis::Axial, z_coords)?;
        grid::validate_axis(GridAxis::Radial, r_coords)?;

        let shape = (z_coords.len(), r_coords.len());
        if values.dim() != shape {
            return Err(GridDefect::ShapeMismatch {
                expected: shape,
                actual: values.dim(),
            }
            .into());
        }
        if let Some(index) = values.iter().position(|value| !value.is_finite()) {
            return Err(GridDefect::NonFiniteValue { index }.into());
        }

        let values = values.to_owned();

        let partials_z = Self::compute_slopes_along(&values, z_coords, Axis(0));
        let partials_r = Self::compute_slopes_along(&values, r_coords, Axis(1));
        let cross_partials = Self::compute_slopes_along(&partials_z, r_coords, Axis(1));

        Ok(Self {
            nodes: Arc::new(SurfaceNodes {
                z_coords: z_coords.to_vec(),
                r_coords: r_coords.to_vec(),
                values,
                partials_z,
                partials_r,
                cross_partials,
            }),
            z_accelerator: IntervalAccelerator::new(),
            r_accelerator: IntervalAccelerator::new(),
        })
    }

    /// Returns the axial grid coordinates.
    pub fn z_coords(&self) -> &[fip] {
        &self.nodes.z_coords
    }

    /// Returns the radial grid coordinates.
    pub fn r_coords(&self) -> &[fip] {
        &self.nodes.r_coords
    }

    /// Returns the tabulated samples, indexed `[iz, ir]`.
    pub fn values(&self) -> &Array2<fip> {
        &self.nodes.values
    }

    /// Clears the cached cell lookups.
    pub fn reset_accelerators(&mut self) {
        self.z_accelerator.reset();
        self.r_accelerator.reset();
    }

    fn compute_slopes_along(values: &Array2<fip>, coords: &[fip], axis: Axis) -> Array2<fip> {
        let mut slopes = Array2::zeros(values.dim());
        for (line, mut slope_line) in values
            .lanes(axis)
            .into_iter()
            .zip(slopes.lanes_mut(axis))
        {
            let line_slopes = natural_spline_slopes(coords, &Self::lane_to_vec(line));
            slope_line
                .iter_mut()
                .zip(line_slopes)
                .for_each(|(slope, computed)| *slope = computed);
        }
        slopes
    }

    fn lane_to_vec(lane: ArrayView1<fip>) -> Vec<fip> {
        lane.iter().copied().collect()
    }

    fn hermite_basis_00(t: fip) -> fip {
        (1.0 + 2.0 * t) * fip::powi(1.0 - t, 2)
    }

    fn hermite_basis_10(t: fip) -> fip {
        t * fip::powi(1.0 - t, 2)
    }

    fn hermite_basis_01(t: fip) -> fip {
        t * t * (3.0 - 2.0 * t)
    }

    fn hermite_basis_11(t: fip) -> fip {
        t * t * (t - 1.0)
    }

    fn hermite_basis_00_derivative(t: fip) -> fip {
        6.0 * t * (t - 1.0)
    }

    fn hermite_basis_10_derivative(t: fip) -> fip {
        (1.0 - t) * (1.0 - 3.0 * t)
    }

    fn hermite_basis_01_derivative(t: fip) -> fip {
        6.0 * t * (1.0 - t)
    }

    fn hermite_basis_11_derivative(t: fip) -> fip {
        t * (3.0 * t - 2.0)
    }

    /// Weights for interpolating along a cell of the given span at the
    /// normalized position `t`.
    fn weights(t: fip, span: fip) -> HermiteWeights {
        HermiteWeights {
            values: [Self::hermite_basis_00(t), Self::hermite_basis_01(t)],
            slopes: [
                span * Self::hermite_basis_10(t),
                span * Self::hermite_basis_11(t),
            ],
        }
    }

    /// Weights for the derivative along the cell with respect to the
    /// unnormalized coordinate.
    fn derivative_weights(t: fip, span: fip) -> HermiteWeights {
        HermiteWeights {
            values: [
                Self::hermite_basis_00_derivative(t) / span,
                Self::hermite_basis_01_derivative(t) / span,
            ],
            slopes: [
                Self::hermite_basis_10_derivative(t),
                Self::hermite_basis_11_derivative(t),
            ],
        }
    }
}

impl SurfaceInterpolator2 for BicubicSplineSurface {
    fn domain(&self) -> CylindricalBounds {
        CylindricalBounds::from_axes(&self.nodes.z_coords, &self.nodes.r_coords)
    }

    fn eval_with_partials(&mut self, z: fip, r: fip) -> SurfaceSample {
        debug_assert!(
            self.domain().contains(z, r),
            "Interpolation point (z = {}, r = {}) outside domain {}",
            z,
            r,
            self.domain()
        );

        let Self {
            nodes,
            z_accelerator,
            r_accelerator,
        } = self;
        let iz = z_accelerator.find(&nodes.z_coords, z);
        let ir = r_accelerator.find(&nodes.r_coords, r);

        let z_span = nodes.z_coords[iz + 1] - nodes.z_coords[iz];
        let r_span = nodes.r_coords[ir + 1] - nodes.r_coords[ir];
        let t = (z - nodes.z_coords[iz]) / z_span;
        let u = (r - nodes.r_coords[ir]) / r_span;

        let z_weights = Self::weights(t, z_span);
        let r_weights = Self::weights(u, r_span);
        let z_derivative_weights = Self::derivative_weights(t, z_span);
        let r_derivative_weights = Self::derivative_weights(u, r_span);

        SurfaceSample {
            value: nodes.combine(iz, ir, &z_weights, &r_weights),
            partial_z: nodes.combine(iz, ir, &z_derivative_weights, &r_weights),
            partial_r: nodes.combine(iz, ir, &z_weights, &r_derivative_weights),
        }
    }

    fn accelerator_statistics(&self) -> AcceleratorStatistics {
        self.z_accelerator.statistics() + self.r_accelerator.statistics()
    }
}
