//! Evaluation of a tabulated cylindrical magnetic field at Cartesian positions.

use crate::{
    coordinates::{self, AzimuthalDirection},
    error::{FieldError, FieldResult},
    geometry::{
        Dim3::{X, Y, Z},
        Matrix3, Point3, Vec3,
    },
    grid::{accelerator::AcceleratorStatistics, CylindricalBounds},
    interpolation::{bicubic_spline::BicubicSplineSurface, fip, SurfaceInterpolator2, SurfaceSample},
    table::{FieldComponent, FieldTable},
};

/// How to handle queries on the symmetry axis, where the azimuthal direction
/// is undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisPolicy {
    /// Return a `SingularAxis` error.
    Reject,
    /// Return only the axial field component, with vanishing transverse
    /// components and derivatives.
    AxialOnly,
}

/// Configuration parameters for interpolation engines.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// How to handle queries on the symmetry axis.
    pub axis_policy: AxisPolicy,
    /// Cylindrical radius at or below which a query counts as on the axis.
    pub axis_tolerance: fip,
}

impl EngineConfig {
    pub const DEFAULT_AXIS_POLICY: AxisPolicy = AxisPolicy::Reject;
    pub const DEFAULT_AXIS_TOLERANCE: fip = 1e-12;

    /// Panics if any of the configuration parameters are invalid.
    pub fn validate(&self) {
        assert!(
            self.axis_tolerance >= 0.0,
            "Axis tolerance must be non-negative"
        );
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            axis_policy: Self::DEFAULT_AXIS_POLICY,
            axis_tolerance: Self::DEFAULT_AXIS_TOLERANCE,
        }
    }
}

/// Spline surfaces of the three field components over a common grid.
#[derive(Clone, Debug)]
struct ComponentSurfaces {
    bounds: CylindricalBounds,
    radial: BicubicSplineSurface,
    toroidal: BicubicSplineSurface,
    axial: BicubicSplineSurface,
}

/// Cylindrical field components and their partials at a clamped grid point.
#[derive(Clone, Copy, Debug)]
struct CylindricalSample {
    radial: SurfaceSample,
    toroidal: SurfaceSample,
    axial: SurfaceSample,
}

/// Where a query lies relative to the symmetry axis.
enum QueryLocation {
    OffAxis {
        direction: AzimuthalDirection,
        r: fip,
    },
    OnAxis,
}

/// Interpolates a tabulated cylindrical field and evaluates it, with its
/// Jacobian, at Cartesian positions.
///
/// Queries outside the tabulated domain are clamped to its boundary in `r`
/// and `z` while keeping their azimuthal direction.
///
/// An engine caches cell lookups between queries, so evaluation takes
/// `&mut self`. Clones share the spline coefficients and can be used
/// independently, for instance one per thread.
#[derive(Clone, Debug)]
pub struct InterpolationEngine {
    config: EngineConfig,
    surfaces: Option<ComponentSurfaces>,
}

impl InterpolationEngine {
    /// Creates a new engine that must be initialized with `init` before use.
    pub fn new(config: EngineConfig) -> Self {
        config.validate();
        Self {
            config,
            surfaces: None,
        }
    }

    /// Creates a new engine initialized from the given field table.
    pub fn from_table(table: &FieldTable, config: EngineConfig) -> FieldResult<Self> {
        let mut engine = Self::new(config);
        engine.init(table)?;
        Ok(engine)
    }

    /// Builds the spline surfaces of all three field components.
    ///
    /// # Returns
    ///
    /// A `FieldResult` which is either:
    ///
    /// - `Ok`: The engine is ready for evaluation.
    /// - `Err`: Contains `InvalidGrid` if the table cannot be interpolated,
    ///   in which case the engine stays uninitialized, or
    ///   `AlreadyInitialized` if the engine was initialized before.
    pub fn init(&mut self, table: &FieldTable) -> FieldResult<()> {
        if self.surfaces.is_some() {
            return Err(FieldError::AlreadyInitialized);
        }
        let build = |component| {
            BicubicSplineSurface::build_from_view(
                table.z_grid(),
                table.r_grid(),
                table.component(component).view(),
            )
        };
        let radial = build(FieldComponent::Radial)?;
        let toroidal = build(FieldComponent::Toroidal)?;
        let axial = build(FieldComponent::Axial)?;

        self.surfaces = Some(ComponentSurfaces {
            bounds: table.bounds(),
            radial,
            toroidal,
            axial,
        });
        Ok(())
    }

    /// Whether the engine has been successfully initialized.
    pub fn is_initialized(&self) -> bool {
        self.surfaces.is_some()
    }

    /// Returns the bounds of the tabulated domain, if initialized.
    pub fn bounds(&self) -> Option<CylindricalBounds> {
        self.surfaces.as_ref().map(|surfaces| surfaces.bounds)
    }

    /// Returns the configuration of the engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the lookup cache statistics summed over the component surfaces.
    pub fn accelerator_statistics(&self) -> AcceleratorStatistics {
        self.surfaces
            .as_ref()
            .map(|surfaces| {
                surfaces.radial.accelerator_statistics()
                    + surfaces.toroidal.accelerator_statistics()
                    + surfaces.axial.accelerator_statistics()
            })
            .unwrap_or_default()
    }

    /// Evaluates the Cartesian magnetic field at the given position.
    ///
    /// # Returns
    ///
    /// A `FieldResult` which is either:
    ///
    /// - `Ok`: Contains the field vector `(Bx, By, Bz)`.
    /// - `Err`: Contains `UninitializedEngine`, `NonFinitePosition`, or
    ///   `SingularAxis` when the position is on the axis and the axis policy
    ///   is to reject.
    pub fn evaluate(&mut self, position: &Point3<fip>) -> FieldResult<Vec3<fip>> {
        let (location, sample) = self.sample(position)?;
        Ok(Self::field_from_sample(&location, &sample))
    }

    /// Evaluates the Jacobian `∂(Bx, By, Bz)/∂(x, y, z)` at the given position.
    ///
    /// Row `i` of the returned matrix holds the derivatives of field
    /// component `i`. Outside the tabulated domain the derivatives are those
    /// of the surfaces at the clamped point, so there the Jacobian is not the
    /// derivative of [`evaluate`](Self::evaluate), which is constant along
    /// each clamped direction. Only inside the domain do the two agree.
    pub fn evaluate_jacobian(&mut self, position: &Point3<fip>) -> FieldResult<Matrix3<fip>> {
        let (location, sample) = self.sample(position)?;
        Ok(Self::jacobian_from_sample(&location, &sample))
    }

    /// Evaluates both the field and its Jacobian with a single lookup.
    pub fn evaluate_with_jacobian(
        &mut self,
        position: &Point3<fip>,
    ) -> FieldResult<(Vec3<fip>, Matrix3<fip>)> {
        let (location, sample) = self.sample(position)?;
        Ok((
            Self::field_from_sample(&location, &sample),
            Self::jacobian_from_sample(&location, &sample),
        ))
    }

    fn sample(&mut self, position: &Point3<fip>) -> FieldResult<(QueryLocation, CylindricalSample)> {
        let axis_policy = self.config.axis_policy;
        let axis_tolerance = self.config.axis_tolerance;
        let surfaces = self
            .surfaces
            .as_mut()
            .ok_or(FieldError::UninitializedEngine)?;

        let (x, y, z) = (position[X], position[Y], position[Z]);
        if !position.is_finite() {
            return Err(FieldError::NonFinitePosition { x, y, z });
        }

        let r = coordinates::cylindrical_radius(position);
        let location = if r > axis_tolerance {
            QueryLocation::OffAxis {
                direction: AzimuthalDirection::from_cartesian(x, y, r),
                r,
            }
        } else {
            match axis_policy {
                AxisPolicy::Reject => return Err(FieldError::SingularAxis { x, y, r }),
                AxisPolicy::AxialOnly => QueryLocation::OnAxis,
            }
        };

        let clamped_r = surfaces.bounds.clamp_r(r);
        let clamped_z = surfaces.bounds.clamp_z(z);
        let sample = CylindricalSample {
            radial: surfaces.radial.eval_with_partials(clamped_z, clamped_r),
            toroidal: surfaces.toroidal.eval_with_partials(clamped_z, clamped_r),
            axial: surfaces.axial.eval_with_partials(clamped_z, clamped_r),
        };
        Ok((location, sample))
    }

    fn field_from_sample(location: &QueryLocation, sample: &CylindricalSample) -> Vec3<fip> {
        match location {
            QueryLocation::OffAxis { direction, .. } => coordinates::cylindrical_vector_to_cartesian(
                direction,
                sample.radial.value,
                sample.toroidal.value,
                sample.axial.value,
            ),
            QueryLocation::OnAxis => Vec3::new(0.0, 0.0, sample.axial.value),
        }
    }

    fn jacobian_from_sample(location: &QueryLocation, sample: &CylindricalSample) -> Matrix3<fip> {
        match location {
            QueryLocation::OffAxis { direction, r } => coordinates::cylindrical_jacobian_to_cartesian(
                direction,
                *r,
                &sample.radial,
                &sample.toroidal,
                &sample.axial,
            ),
            QueryLocation::OnAxis => coordinates::axial_jacobian(&sample.axial),
        }
    }
}

impl Default for InterpolationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::regular_axis;

    fn constant_table() -> FieldTable {
        FieldTable::sampled(
            vec![3.5, 5.3, 7.1, 8.9],
            vec![-5.5, -1.83, 1.83, 5.5],
            |_, _| (1.0, 0.0, 2.0),
        )
        .unwrap()
    }

    #[test]
    fn constant_field_is_rotated_into_cartesian_components() {
        let mut engine = InterpolationEngine::from_table(&constant_table(), EngineConfig::default())
            .unwrap();
        let field = engine.evaluate(&Point3::new(5.0, 0.0, 0.0)).unwrap();
        assert!((field[X] - 1.0).abs() < 1e-12);
        assert!(field[Y].abs() < 1e-12);
        assert!((field[Z] - 2.0).abs() < 1e-12);

        let field = engine.evaluate(&Point3::new(0.0, 6.0, 1.0)).unwrap();
        assert!(field[X].abs() < 1e-12);
        assert!((field[Y] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn points_beyond_the_domain_take_boundary_values() {
        let table = FieldTable::sampled(
            regular_axis(6, 3.5, 8.9),
            regular_axis(5, -5.5, 5.5),
            |r, z| (0.1 * z, 5.0 / r, r - 6.0),
        )
        .unwrap();
        let mut engine = InterpolationEngine::from_table(&table, EngineConfig::default()).unwrap();
        let outside = engine.evaluate(&Point3::new(20.0, 0.0, 0.0)).unwrap();
        let edge = engine.evaluate(&Point3::new(8.9, 0.0, 0.0)).unwrap();
        assert_eq!(outside, edge);

        let above = engine.evaluate(&Point3::new(4.0, 3.0, 9.0)).unwrap();
        let top = engine.evaluate(&Point3::new(4.0, 3.0, 5.5)).unwrap();
        assert_eq!(above, top);
    }

    #[test]
    fn uninitialized_engine_reports_error() {
        let mut engine = InterpolationEngine::default();
        assert!(!engine.is_initialized());
        assert!(engine.bounds().is_none());
        assert!(matches!(
            engine.evaluate(&Point3::new(5.0, 0.0, 0.0)),
            Err(FieldError::UninitializedEngine)
        ));
        assert!(matches!(
            engine.evaluate_jacobian(&Point3::new(5.0, 0.0, 0.0)),
            Err(FieldError::UninitializedEngine)
        ));
    }

    #[test]
    fn failed_init_leaves_engine_uninitialized() {
        let table = FieldTable::sampled(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0], |_, _| {
            (0.0, 0.0, 1.0)
        })
        .unwrap();
        let mut engine = InterpolationEngine::default();
        assert!(matches!(engine.init(&table), Err(FieldError::InvalidGrid(_))));
        assert!(!engine.is_initialized());
        assert!(matches!(
            engine.evaluate(&Point3::new(2.0, 0.0, 1.0)),
            Err(FieldError::UninitializedEngine)
        ));

        engine.init(&constant_table()).unwrap();
        assert!(engine.is_initialized());
        assert!(matches!(
            engine.init(&constant_table()),
            Err(FieldError::AlreadyInitialized)
        ));
    }

    #[test]
    fn axis_queries_follow_policy() {
        let table = constant_table();
        let mut rejecting = InterpolationEngine::from_table(&table, EngineConfig::default()).unwrap();
        assert!(matches!(
            rejecting.evaluate(&Point3::new(0.0, 0.0, 1.0)),
            Err(FieldError::SingularAxis { .. })
        ));
        assert!(matches!(
            rejecting.evaluate_jacobian(&Point3::new(0.0, 0.0, 1.0)),
            Err(FieldError::SingularAxis { .. })
        ));

        let mut axial_only = InterpolationEngine::from_table(
            &table,
            EngineConfig {
                axis_policy: AxisPolicy::AxialOnly,
                ..EngineConfig::default()
            },
        )
        .unwrap();
        let (field, jacobian) = axial_only
            .evaluate_with_jacobian(&Point3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(field[X], 0.0);
        assert_eq!(field[Y], 0.0);
        assert!((field[Z] - 2.0).abs() < 1e-12);
        assert!(jacobian.is_finite());
        assert_eq!(jacobian.row(X), Vec3::zero());
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let mut engine = InterpolationEngine::from_table(&constant_table(), EngineConfig::default())
            .unwrap();
        assert!(matches!(
            engine.evaluate(&Point3::new(fip::NAN, 1.0, 0.0)),
            Err(FieldError::NonFinitePosition { .. })
        ));
        assert!(matches!(
            engine.evaluate(&Point3::new(5.0, 0.0, fip::INFINITY)),
            Err(FieldError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn combined_evaluation_matches_separate_calls() {
        let table = FieldTable::sampled(
            regular_axis(7, 3.5, 8.9),
            regular_axis(9, -5.5, 5.5),
            |r, z| (-z / r, 5.0 / r, (r - 6.2) / r),
        )
        .unwrap();
        let mut engine = InterpolationEngine::from_table(&table, EngineConfig::default()).unwrap();
        let position = Point3::new(4.1, -2.3, 0.7);
        let (field, jacobian) = engine.evaluate_with_jacobian(&position).unwrap();
        assert_eq!(field, engine.evaluate(&position).unwrap());
        assert_eq!(jacobian, engine.evaluate_jacobian(&position).unwrap());
    }

    #[test]
    fn repeated_queries_reuse_cached_cells() {
        let mut engine = InterpolationEngine::from_table(&constant_table(), EngineConfig::default())
            .unwrap();
        engine.evaluate(&Point3::new(6.0, 0.0, 0.0)).unwrap();
        let first = engine.accelerator_statistics();
        engine.evaluate(&Point3::new(6.1, 0.0, 0.1)).unwrap();
        let second = engine.accelerator_statistics();
        assert_eq!(second.misses, first.misses);
        assert_eq!(second.hits, first.hits + 6);
    }
}
