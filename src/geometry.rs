//! Geometric utility objects.

use crate::num::BFloat;
use std::{
    fmt,
    ops::{Add, Index, IndexMut, Sub},
};

/// Denotes the x-, y- or z-dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dim3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Dim3 {
    /// Creates an array for iterating over the x-, y- and z-dimensions.
    pub fn slice() -> [Self; 3] {
        [Self::X, Self::Y, Self::Z]
    }

    /// Returns the number of the dimension.
    pub fn num(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Dim3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ["x", "y", "z"][self.num()])
    }
}

use Dim3::{X, Y, Z};

/// Represents any quantity with three dimensional components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct In3D<T>([T; 3]);

impl<T> In3D<T> {
    /// Creates a new 3D quantity given the three components.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self([x, y, z])
    }

    /// Creates a new 3D quantity by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> T,
    {
        Self::new(
            create_component(X),
            create_component(Y),
            create_component(Z),
        )
    }
}

impl<T> Index<Dim3> for In3D<T> {
    type Output = T;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim.num()]
    }
}

impl<T> IndexMut<Dim3> for In3D<T> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim.num()]
    }
}

fn write_components<F: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    components: &In3D<F>,
) -> fmt::Result {
    write!(f, "({}, {}, {})", components[X], components[Y], components[Z])
}

/// A 3D vector, used for field values and displacements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3<F>(In3D<F>);

impl<F: BFloat> Vec3<F> {
    /// Creates a new 3D vector given the three components.
    pub fn new(x: F, y: F, z: F) -> Self {
        Self(In3D::new(x, y, z))
    }

    /// Creates a new 3D vector by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> F,
    {
        Self(In3D::with_each_component(create_component))
    }

    /// Creates a new zero vector.
    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero(), F::zero())
    }

    /// Computes the dot product of the vector with another vector.
    pub fn dot(&self, other: &Self) -> F {
        self[X] * other[X] + self[Y] * other[Y] + self[Z] * other[Z]
    }

    /// Computes the length of the vector.
    pub fn length(&self) -> F {
        self.dot(self).sqrt()
    }

    /// Whether all components are finite.
    pub fn is_finite(&self) -> bool {
        Dim3::slice().iter().all(|&dim| self[dim].is_finite())
    }
}

impl<F: BFloat> Index<Dim3> for Vec3<F> {
    type Output = F;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim]
    }
}

impl<F: BFloat> IndexMut<Dim3> for Vec3<F> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim]
    }
}

impl<F: BFloat> fmt::Display for Vec3<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.0)
    }
}

/// A 3D Cartesian position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point3<F>(In3D<F>);

impl<F: BFloat> Point3<F> {
    /// Creates a new 3D point given the three components.
    pub fn new(x: F, y: F, z: F) -> Self {
        Self(In3D::new(x, y, z))
    }

    /// Creates a new 3D point by evaluating the given component
    /// constructor for each dimension.
    pub fn with_each_component<C>(create_component: C) -> Self
    where
        C: Fn(Dim3) -> F,
    {
        Self(In3D::with_each_component(create_component))
    }

    /// Creates a new 3D point from cylindrical coordinates, with the
    /// azimuthal angle measured from the x-axis towards the y-axis.
    pub fn from_cylindrical(r: F, phi: F, z: F) -> Self {
        Self::new(r * phi.cos(), r * phi.sin(), z)
    }

    /// Whether all components are finite.
    pub fn is_finite(&self) -> bool {
        Dim3::slice().iter().all(|&dim| self[dim].is_finite())
    }
}

impl<F: BFloat> Index<Dim3> for Point3<F> {
    type Output = F;
    fn index(&self, dim: Dim3) -> &Self::Output {
        &self.0[dim]
    }
}

impl<F: BFloat> IndexMut<Dim3> for Point3<F> {
    fn index_mut(&mut self, dim: Dim3) -> &mut Self::Output {
        &mut self.0[dim]
    }
}

impl<F: BFloat> Add<Vec3<F>> for Point3<F> {
    type Output = Self;
    fn add(self, displacement: Vec3<F>) -> Self::Output {
        Self::with_each_component(|dim| self[dim] + displacement[dim])
    }
}

impl<F: BFloat> Sub<Vec3<F>> for Point3<F> {
    type Output = Self;
    fn sub(self, displacement: Vec3<F>) -> Self::Output {
        Self::with_each_component(|dim| self[dim] - displacement[dim])
    }
}

impl<F: BFloat> fmt::Display for Point3<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_components(f, &self.0)
    }
}

/// A 3x3 matrix stored by value in row-major order.
///
/// Used for Jacobians, where row `i` holds the derivatives of vector
/// component `i` with respect to each coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3<F>(In3D<In3D<F>>);

impl<F: BFloat> Matrix3<F> {
    /// Creates a new matrix from its three rows.
    pub fn from_rows(row_x: Vec3<F>, row_y: Vec3<F>, row_z: Vec3<F>) -> Self {
        Self(In3D::new(row_x.0, row_y.0, row_z.0))
    }

    /// Creates a new matrix by evaluating the given element constructor
    /// for each (row, column) pair.
    pub fn with_each_element<C>(create_element: C) -> Self
    where
        C: Fn(Dim3, Dim3) -> F,
    {
        Self(In3D::with_each_component(|row| {
            In3D::with_each_component(|col| create_element(row, col))
        }))
    }

    /// Creates a new matrix with all elements set to zero.
    pub fn zero() -> Self {
        Self::with_each_element(|_, _| F::zero())
    }

    /// Returns a copy of the given row.
    pub fn row(&self, row: Dim3) -> Vec3<F> {
        Vec3(self.0[row])
    }

    /// Computes the sum of the diagonal elements.
    pub fn trace(&self) -> F {
        self[(X, X)] + self[(Y, Y)] + self[(Z, Z)]
    }

    /// Whether all elements are finite.
    pub fn is_finite(&self) -> bool {
        Dim3::slice().iter().all(|&row| self.row(row).is_finite())
    }
}

impl<F: BFloat> Index<(Dim3, Dim3)> for Matrix3<F> {
    type Output = F;
    fn index(&self, (row, col): (Dim3, Dim3)) -> &Self::Output {
        &self.0[row][col]
    }
}

impl<F: BFloat> IndexMut<(Dim3, Dim3)> for Matrix3<F> {
    fn index_mut(&mut self, (row, col): (Dim3, Dim3)) -> &mut Self::Output {
        &mut self.0[row][col]
    }
}

impl<F: BFloat> fmt::Display for Matrix3<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.row(X))?;
        writeln!(f, "{}", self.row(Y))?;
        write!(f, "{}", self.row(Z))
    }
}
