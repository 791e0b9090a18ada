//! Tabulated cylindrical magnetic field samples.

use crate::{
    error::{FieldResult, GridDefect},
    grid::{CylindricalBounds, GridAxis},
    interpolation::fip,
};
use ndarray::Array2;
use std::fmt;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// One of the three cylindrical magnetic field components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum FieldComponent {
    Radial,
    Toroidal,
    Axial,
}

impl FieldComponent {
    /// Returns all components in (r, φ, z) order.
    pub fn slice() -> [Self; 3] {
        [Self::Radial, Self::Toroidal, Self::Axial]
    }

    /// Returns the conventional name of the component.
    pub fn name(self) -> &'static str {
        match self {
            Self::Radial => "B_r",
            Self::Toroidal => "B_phi",
            Self::Axial => "B_z",
        }
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Samples of `B_r`, `B_phi` and `B_z` on a rectilinear (z, r) grid.
///
/// Component arrays have shape `(nz, nr)` and are indexed `[axial][radial]`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct FieldTable {
    r_grid: Vec<fip>,
    z_grid: Vec<fip>,
    b_r: Array2<fip>,
    b_phi: Array2<fip>,
    b_z: Array2<fip>,
}

/// Source of a field table, such as a loader for some external file format.
pub trait FieldTableProvider {
    /// Produces the field table to build an interpolation engine from.
    fn provide_field_table(&mut self) -> FieldResult<FieldTable>;
}

impl FieldTable {
    /// Creates a new field table from grid coordinates and component arrays.
    ///
    /// # Parameters
    ///
    /// - `r_grid`: Radial grid coordinates.
    /// - `z_grid`: Axial grid coordinates.
    /// - `b_r`: Radial component samples, shape `(nz, nr)`.
    /// - `b_phi`: Toroidal component samples, shape `(nz, nr)`.
    /// - `b_z`: Axial component samples, shape `(nz, nr)`.
    ///
    /// # Returns
    ///
    /// A `FieldResult` which is either:
    ///
    /// - `Ok`: Contains the new table.
    /// - `Err`: Contains an `InvalidGrid` error if an axis is empty or a
    ///   component has the wrong shape.
    ///
    /// Monotonicity and axis lengths are checked when the table is handed to
    /// an interpolation engine.
    pub fn new(
        r_grid: Vec<fip>,
        z_grid: Vec<fip>,
        b_r: Array2<fip>,
        b_phi: Array2<fip>,
        b_z: Array2<fip>,
    ) -> FieldResult<Self> {
        Self::check_axis_not_empty(GridAxis::Radial, &r_grid)?;
        Self::check_axis_not_empty(GridAxis::Axial, &z_grid)?;

        let expected = (z_grid.len(), r_grid.len());
        for (component, values) in FieldComponent::slice()
            .into_iter()
            .zip([&b_r, &b_phi, &b_z])
        {
            if values.dim() != expected {
                return Err(GridDefect::ComponentShapeMismatch {
                    component,
                    expected,
                    actual: values.dim(),
                }
                .into());
            }
        }
        Ok(Self {
            r_grid,
            z_grid,
            b_r,
            b_phi,
            b_z,
        })
    }

    /// Creates a new field table from component samples stored in flat
    /// row-major vectors, where `values[iz*nr + ir]` belongs to
    /// `(z_grid[iz], r_grid[ir])`.
    pub fn from_flat(
        r_grid: Vec<fip>,
        z_grid: Vec<fip>,
        b_r: Vec<fip>,
        b_phi: Vec<fip>,
        b_z: Vec<fip>,
    ) -> FieldResult<Self> {
        Self::check_axis_not_empty(GridAxis::Radial, &r_grid)?;
        Self::check_axis_not_empty(GridAxis::Axial, &z_grid)?;

        let shape = (z_grid.len(), r_grid.len());
        let to_array = |values: Vec<fip>| -> FieldResult<Array2<fip>> {
            let actual = values.len();
            Array2::from_shape_vec(shape, values).map_err(|_| {
                GridDefect::ValueCountMismatch {
                    expected: shape.0 * shape.1,
                    actual,
                }
                .into()
            })
        };
        Self::new(
            r_grid,
            z_grid,
            to_array(b_r)?,
            to_array(b_phi)?,
            to_array(b_z)?,
        )
    }

    /// Creates a new field table by sampling the given field at each grid node.
    ///
    /// The closure receives `(r, z)` and returns `(B_r, B_phi, B_z)`.
    pub fn sampled<S>(r_grid: Vec<fip>, z_grid: Vec<fip>, sample_field: S) -> FieldResult<Self>
    where
        S: Fn(fip, fip) -> (fip, fip, fip),
    {
        let shape = (z_grid.len(), r_grid.len());
        let mut b_r = Array2::zeros(shape);
        let mut b_phi = Array2::zeros(shape);
        let mut b_z = Array2::zeros(shape);
        for (iz, &z) in z_grid.iter().enumerate() {
            for (ir, &r) in r_grid.iter().enumerate() {
                let (radial, toroidal, axial) = sample_field(r, z);
                b_r[[iz, ir]] = radial;
                b_phi[[iz, ir]] = toroidal;
                b_z[[iz, ir]] = axial;
            }
        }
        Self::new(r_grid, z_grid, b_r, b_phi, b_z)
    }

    /// Returns the number of radial grid points.
    pub fn nr(&self) -> usize {
        self.r_grid.len()
    }

    /// Returns the number of axial grid points.
    pub fn nz(&self) -> usize {
        self.z_grid.len()
    }

    /// Returns the radial grid coordinates.
    pub fn r_grid(&self) -> &[fip] {
        &self.r_grid
    }

    /// Returns the axial grid coordinates.
    pub fn z_grid(&self) -> &[fip] {
        &self.z_grid
    }

    /// Returns the samples of the given component, indexed `[iz, ir]`.
    pub fn component(&self, component: FieldComponent) -> &Array2<fip> {
        match component {
            FieldComponent::Radial => &self.b_r,
            FieldComponent::Toroidal => &self.b_phi,
            FieldComponent::Axial => &self.b_z,
        }
    }

    pub fn rmin(&self) -> fip {
        self.r_grid[0]
    }

    pub fn rmax(&self) -> fip {
        self.r_grid[self.nr() - 1]
    }

    pub fn zmin(&self) -> fip {
        self.z_grid[0]
    }

    pub fn zmax(&self) -> fip {
        self.z_grid[self.nz() - 1]
    }

    /// Returns the bounds spanned by the grid.
    pub fn bounds(&self) -> CylindricalBounds {
        CylindricalBounds::from_axes(&self.z_grid, &self.r_grid)
    }

    fn check_axis_not_empty(axis: GridAxis, coords: &[fip]) -> FieldResult<()> {
        if coords.is_empty() {
            Err(GridDefect::TooFewPoints {
                axis,
                count: 0,
                required: 1,
            }
            .into())
        } else {
            Ok(())
        }
    }
}

impl FieldTableProvider for FieldTable {
    fn provide_field_table(&mut self) -> FieldResult<FieldTable> {
        Ok(self.clone())
    }
}
