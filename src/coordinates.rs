//! Transformations between cylindrical and Cartesian field representations.
//!
//! The cylindrical system has its symmetry axis along z, with the azimuthal
//! angle φ measured from the x-axis towards the y-axis.

use crate::{
    geometry::{
        Dim3::{X, Y, Z},
        Matrix3, Point3, Vec3,
    },
    interpolation::{fip, SurfaceSample},
};

/// Computes the distance of the given point from the symmetry axis.
pub fn cylindrical_radius(point: &Point3<fip>) -> fip {
    point[X].hypot(point[Y])
}

/// Cosine and sine of the azimuthal angle of a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzimuthalDirection {
    pub cos_phi: fip,
    pub sin_phi: fip,
}

/// Derivatives of the azimuthal cosine and sine with respect to x and y.
///
/// The derivatives with respect to z vanish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzimuthalGradient {
    pub dcos_dx: fip,
    pub dcos_dy: fip,
    pub dsin_dx: fip,
    pub dsin_dy: fip,
}

impl AzimuthalDirection {
    /// Computes the direction of the point `(x, y)` with cylindrical radius `r`.
    ///
    /// `r` must be non-zero.
    pub fn from_cartesian(x: fip, y: fip, r: fip) -> Self {
        Self {
            cos_phi: x / r,
            sin_phi: y / r,
        }
    }

    /// Rotates a (radial, toroidal) vector pair into its (x, y) components.
    pub fn to_cartesian(&self, radial: fip, toroidal: fip) -> (fip, fip) {
        (
            radial * self.cos_phi - toroidal * self.sin_phi,
            radial * self.sin_phi + toroidal * self.cos_phi,
        )
    }

    /// Projects (x, y) vector components onto the radial and toroidal directions.
    pub fn to_cylindrical(&self, x_component: fip, y_component: fip) -> (fip, fip) {
        (
            x_component * self.cos_phi + y_component * self.sin_phi,
            -x_component * self.sin_phi + y_component * self.cos_phi,
        )
    }

    /// Returns `(∂r/∂x, ∂r/∂y)`.
    pub fn radius_gradient(&self) -> (fip, fip) {
        (self.cos_phi, self.sin_phi)
    }

    /// Computes the derivatives of `cos φ` and `sin φ` at cylindrical radius `r`.
    pub fn gradient(&self, r: fip) -> AzimuthalGradient {
        let (c, s) = (self.cos_phi, self.sin_phi);
        let mixed = -c * s / r;
        AzimuthalGradient {
            dcos_dx: s * s / r,
            dcos_dy: mixed,
            dsin_dx: mixed,
            dsin_dy: c * c / r,
        }
    }
}

/// Converts cylindrical field components to a Cartesian vector.
pub fn cylindrical_vector_to_cartesian(
    direction: &AzimuthalDirection,
    b_r: fip,
    b_phi: fip,
    b_z: fip,
) -> Vec3<fip> {
    let (b_x, b_y) = direction.to_cartesian(b_r, b_phi);
    Vec3::new(b_x, b_y, b_z)
}

/// Assembles the Cartesian Jacobian `∂(Bx, By, Bz)/∂(x, y, z)` from the
/// sampled cylindrical components and their partials.
///
/// # Parameters
///
/// - `direction`: Azimuthal direction of the query point.
/// - `r`: Cylindrical radius of the query point (non-zero).
/// - `radial`: Sample of `B_r` with its `z` and `r` partials.
/// - `toroidal`: Sample of `B_phi` with its `z` and `r` partials.
/// - `axial`: Sample of `B_z` with its `z` and `r` partials.
///
/// # Returns
///
/// A `Matrix3` where row `i` holds the derivatives of field component `i`.
pub fn cylindrical_jacobian_to_cartesian(
    direction: &AzimuthalDirection,
    r: fip,
    radial: &SurfaceSample,
    toroidal: &SurfaceSample,
    axial: &SurfaceSample,
) -> Matrix3<fip> {
    let (c, s) = (direction.cos_phi, direction.sin_phi);
    let (dr_dx, dr_dy) = direction.radius_gradient();
    let gradient = direction.gradient(r);

    let b_r = radial.value;
    let b_phi = toroidal.value;

    let row_x = |dr_dq: fip, dcos_dq: fip, dsin_dq: fip| {
        radial.partial_r * dr_dq * c + b_r * dcos_dq
            - toroidal.partial_r * dr_dq * s
            - b_phi * dsin_dq
    };
    let row_y = |dr_dq: fip, dcos_dq: fip, dsin_dq: fip| {
        radial.partial_r * dr_dq * s
            + b_r * dsin_dq
            + toroidal.partial_r * dr_dq * c
            + b_phi * dcos_dq
    };

    Matrix3::from_rows(
        Vec3::new(
            row_x(dr_dx, gradient.dcos_dx, gradient.dsin_dx),
            row_x(dr_dy, gradient.dcos_dy, gradient.dsin_dy),
            radial.partial_z * c - toroidal.partial_z * s,
        ),
        Vec3::new(
            row_y(dr_dx, gradient.dcos_dx, gradient.dsin_dx),
            row_y(dr_dy, gradient.dcos_dy, gradient.dsin_dy),
            radial.partial_z * s + toroidal.partial_z * c,
        ),
        Vec3::new(
            axial.partial_r * dr_dx,
            axial.partial_r * dr_dy,
            axial.partial_z,
        ),
    )
}

/// Jacobian for a point on the symmetry axis, where only `∂Bz/∂z` is kept.
pub fn axial_jacobian(axial: &SurfaceSample) -> Matrix3<fip> {
    let mut jacobian = Matrix3::zero();
    jacobian[(Z, Z)] = axial.partial_z;
    jacobian
}
