//! Analytic tokamak-like magnetic field used as a stand-in field table source.

use crate::{
    error::FieldResult,
    geometry::{
        Dim3::{X, Y, Z},
        Point3, Vec3,
    },
    grid::regular_axis,
    interpolation::fip,
    table::{FieldTable, FieldTableProvider},
};

/// A toroidal field falling off as `1/r` superposed with a poloidal field
/// whose flux surfaces are circles around the magnetic axis at `(R0, 0)`:
///
/// - `B_phi = B0 R0 / r`
/// - `B_r = -Bp z / r`
/// - `B_z = Bp (r - R0) / r`
///
/// The field is divergence free, so tabulating it gives a realistic test
/// case for the interpolation engine.
#[derive(Clone, Debug)]
pub struct SyntheticTokamakField {
    /// Major radius `R0` of the magnetic axis.
    pub major_radius: fip,
    /// Toroidal field strength `B0` at the magnetic axis.
    pub toroidal_field: fip,
    /// Poloidal field scale `Bp`.
    pub poloidal_field: fip,
    /// Radial extent of the tabulated grid.
    pub r_bounds: (fip, fip),
    /// Axial extent of the tabulated grid.
    pub z_bounds: (fip, fip),
    /// Number of grid points along r and z.
    pub grid_shape: (usize, usize),
}

/// Cylindrical field components and their partial derivatives at a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CylindricalFieldSample {
    /// `(B_r, B_phi, B_z)`.
    pub components: (fip, fip, fip),
    /// `(∂B_r/∂r, ∂B_phi/∂r, ∂B_z/∂r)`.
    pub partials_r: (fip, fip, fip),
    /// `(∂B_r/∂z, ∂B_phi/∂z, ∂B_z/∂z)`.
    pub partials_z: (fip, fip, fip),
}

impl SyntheticTokamakField {
    pub const DEFAULT_MAJOR_RADIUS: fip = 6.2;
    pub const DEFAULT_TOROIDAL_FIELD: fip = 5.3;
    pub const DEFAULT_POLOIDAL_FIELD: fip = 0.8;
    pub const DEFAULT_R_BOUNDS: (fip, fip) = (3.5, 8.9);
    pub const DEFAULT_Z_BOUNDS: (fip, fip) = (-5.5, 5.5);
    pub const DEFAULT_GRID_SHAPE: (usize, usize) = (55, 111);

    /// Panics if any of the parameters are invalid.
    pub fn validate(&self) {
        assert!(self.major_radius > 0.0, "Major radius must be positive");
        assert!(
            self.r_bounds.0 > 0.0 && self.r_bounds.1 > self.r_bounds.0,
            "Radial bounds must be positive and increasing"
        );
        assert!(
            self.z_bounds.1 > self.z_bounds.0,
            "Axial bounds must be increasing"
        );
        assert!(
            self.grid_shape.0 >= 2 && self.grid_shape.1 >= 2,
            "Grid must have at least two points along each axis"
        );
    }

    /// Computes `(B_r, B_phi, B_z)` at the given cylindrical coordinates.
    pub fn cylindrical_field(&self, r: fip, z: fip) -> (fip, fip, fip) {
        (
            -self.poloidal_field * z / r,
            self.toroidal_field * self.major_radius / r,
            self.poloidal_field * (r - self.major_radius) / r,
        )
    }

    /// Computes the cylindrical field components with their partial
    /// derivatives at the given cylindrical coordinates.
    pub fn cylindrical_sample(&self, r: fip, z: fip) -> CylindricalFieldSample {
        let r2 = r * r;
        let (b0, bp, r0) = (self.toroidal_field, self.poloidal_field, self.major_radius);
        CylindricalFieldSample {
            components: self.cylindrical_field(r, z),
            partials_r: (bp * z / r2, -b0 * r0 / r2, bp * r0 / r2),
            partials_z: (-bp / r, 0.0, 0.0),
        }
    }

    /// Computes the Cartesian field at the given position.
    ///
    /// The position must not lie on the z-axis.
    pub fn cartesian_field(&self, position: &Point3<fip>) -> Vec3<fip> {
        let r = position[X].hypot(position[Y]);
        let (cos_phi, sin_phi) = (position[X] / r, position[Y] / r);
        let (b_r, b_phi, b_z) = self.cylindrical_field(r, position[Z]);
        Vec3::new(
            b_r * cos_phi - b_phi * sin_phi,
            b_r * sin_phi + b_phi * cos_phi,
            b_z,
        )
    }

    /// Tabulates the field on a regular grid covering the configured bounds.
    pub fn tabulate(&self) -> FieldResult<FieldTable> {
        self.validate();
        let r_grid = regular_axis(self.grid_shape.0, self.r_bounds.0, self.r_bounds.1);
        let z_grid = regular_axis(self.grid_shape.1, self.z_bounds.0, self.z_bounds.1);
        FieldTable::sampled(r_grid, z_grid, |r, z| self.cylindrical_field(r, z))
    }
}

impl Default for SyntheticTokamakField {
    fn default() -> Self {
        Self {
            major_radius: Self::DEFAULT_MAJOR_RADIUS,
            toroidal_field: Self::DEFAULT_TOROIDAL_FIELD,
            poloidal_field: Self::DEFAULT_POLOIDAL_FIELD,
            r_bounds: Self::DEFAULT_R_BOUNDS,
            z_bounds: Self::DEFAULT_Z_BOUNDS,
            grid_shape: Self::DEFAULT_GRID_SHAPE,
        }
    }
}

impl FieldTableProvider for SyntheticTokamakField {
    fn provide_field_table(&mut self) -> FieldResult<FieldTable> {
        self.tabulate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FieldComponent;

    #[test]
    fn field_is_divergence_free() {
        let field = SyntheticTokamakField::default();
        for &(r, z) in &[(4.0, -1.0), (6.2, 0.0), (8.1, 3.3)] {
            let sample = field.cylindrical_sample(r, z);
            // (1/r) ∂(r B_r)/∂r + ∂B_z/∂z
            let divergence =
                sample.components.0 / r + sample.partials_r.0 + sample.partials_z.2;
            assert!(divergence.abs() < 1e-14, "divergence = {}", divergence);
        }
    }

    #[test]
    fn analytic_partials_match_finite_differences() {
        let field = SyntheticTokamakField::default();
        let (r, z, h) = (5.1, 1.7, 1e-6);
        let sample = field.cylindrical_sample(r, z);
        let plus_r = field.cylindrical_field(r + h, z);
        let minus_r = field.cylindrical_field(r - h, z);
        let plus_z = field.cylindrical_field(r, z + h);
        let minus_z = field.cylindrical_field(r, z - h);
        let fd = |plus: fip, minus: fip| (plus - minus) / (2.0 * h);
        assert!((sample.partials_r.0 - fd(plus_r.0, minus_r.0)).abs() < 1e-7);
        assert!((sample.partials_r.1 - fd(plus_r.1, minus_r.1)).abs() < 1e-7);
        assert!((sample.partials_r.2 - fd(plus_r.2, minus_r.2)).abs() < 1e-7);
        assert!((sample.partials_z.0 - fd(plus_z.0, minus_z.0)).abs() < 1e-7);
    }

    #[test]
    fn tabulated_grid_spans_configured_bounds() {
        let field = SyntheticTokamakField {
            grid_shape: (10, 12),
            ..SyntheticTokamakField::default()
        };
        let table = field.tabulate().unwrap();
        assert_eq!(table.nr(), 10);
        assert_eq!(table.nz(), 12);
        assert_eq!(table.rmin(), 3.5);
        assert_eq!(table.zmax(), 5.5);
        let expected = field.cylindrical_field(table.r_grid()[3], table.z_grid()[7]).1;
        assert_eq!(table.component(FieldComponent::Toroidal)[[7, 3]], expected);
    }

    #[test]
    fn cartesian_field_on_x_axis_has_toroidal_y_component() {
        let field = SyntheticTokamakField::default();
        let b = field.cartesian_field(&Point3::new(6.2, 0.0, 0.0));
        assert!(b[X].abs() < 1e-15);
        assert!((b[Y] - 5.3).abs() < 1e-12);
        assert!(b[Z].abs() < 1e-15);
    }
}
