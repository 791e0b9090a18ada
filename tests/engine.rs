mod common;

use approx::assert_abs_diff_eq;
use common::{
    assert_matrix3_close, assert_vec3_close, synthetic_engine, CONSTANT_TABLE, SYNTHETIC_FIELD,
    SYNTHETIC_TABLE,
};
use cylfield::{
    engine::{AxisPolicy, EngineConfig, InterpolationEngine},
    error::{FieldError, GridDefect},
    geometry::{
        Dim3::{X, Y, Z},
        Matrix3, Point3, Vec3,
    },
    grid::GridAxis,
    interpolation::fip,
    table::{FieldComponent, FieldTable},
};
use rayon::prelude::*;
use std::f64::consts::PI;

#[test]
fn constant_table_gives_constant_radial_field() {
    let mut engine =
        InterpolationEngine::from_table(&CONSTANT_TABLE, EngineConfig::default()).unwrap();
    let field = engine.evaluate(&Point3::new(5.0, 0.0, 0.0)).unwrap();
    assert_vec3_close(&field, &Vec3::new(1.0, 0.0, 2.0), 1e-12);

    let beyond = engine.evaluate(&Point3::new(20.0, 0.0, 0.0)).unwrap();
    let edge = engine.evaluate(&Point3::new(8.9, 0.0, 0.0)).unwrap();
    assert_vec3_close(&beyond, &edge, 1e-15);
}

#[test]
fn clamping_is_idempotent() {
    let mut engine = synthetic_engine();
    let bounds = engine.bounds().unwrap();
    let outside_points: [Point3<fip>; 4] = [
        Point3::new(12.0, 3.0, 0.5),
        Point3::new(-1.0, 2.0, -9.0),
        Point3::new(0.3, -0.2, 7.5),
        Point3::from_cylindrical(9.5, 2.1, 6.0),
    ];
    for point in &outside_points {
        let r = point[X].hypot(point[Y]);
        let clamped_r = bounds.clamp_r(r);
        let clamped = Point3::new(
            point[X] * clamped_r / r,
            point[Y] * clamped_r / r,
            bounds.clamp_z(point[Z]),
        );
        let field = engine.evaluate(point).unwrap();
        let clamped_field = engine.evaluate(&clamped).unwrap();
        assert_vec3_close(&field, &clamped_field, 1e-12);
    }
}

#[test]
fn field_is_continuous_across_cells() {
    let mut engine = synthetic_engine();
    let r_node = SYNTHETIC_TABLE.r_grid()[17];
    let z_node = SYNTHETIC_TABLE.z_grid()[40];
    let phi = 0.7;
    let delta = 1e-9;
    for &(dr, dz) in &[(delta, 0.0), (0.0, delta), (delta, delta)] {
        // Offsets are applied along the ray so that the radius itself straddles the node
        let below = Point3::from_cylindrical(r_node - dr, phi, z_node - dz);
        let above = Point3::from_cylindrical(r_node + dr, phi, z_node + dz);
        if dr > 0.0 {
            assert!(below[X].hypot(below[Y]) < r_node);
            assert!(above[X].hypot(above[Y]) > r_node);
        }
        let (below_field, below_jacobian) = engine.evaluate_with_jacobian(&below).unwrap();
        let (above_field, above_jacobian) = engine.evaluate_with_jacobian(&above).unwrap();
        assert_vec3_close(&below_field, &above_field, 1e-7);
        assert_matrix3_close(&below_jacobian, &above_jacobian, 1e-6);
    }
}

#[test]
fn field_is_continuous_across_radial_grid_lines_on_x_axis() {
    let mut engine = synthetic_engine();
    let z = 0.37;
    let delta = 1e-9;
    for &r_node in &SYNTHETIC_TABLE.r_grid()[1..SYNTHETIC_TABLE.nr() - 1] {
        let (below_field, below_jacobian) = engine
            .evaluate_with_jacobian(&Point3::new(r_node - delta, 0.0, z))
            .unwrap();
        let (above_field, above_jacobian) = engine
            .evaluate_with_jacobian(&Point3::new(r_node + delta, 0.0, z))
            .unwrap();
        assert_vec3_close(&below_field, &above_field, 1e-7);
        assert_matrix3_close(&below_jacobian, &above_jacobian, 1e-6);
    }
}

#[test]
fn field_is_rotationally_symmetric() {
    let mut engine = synthetic_engine();
    let (r, z) = (5.7, -1.2);
    let reference = engine.evaluate(&Point3::new(r, 0.0, z)).unwrap();
    for &phi in &[0.3, PI / 2.0, 2.5, PI, -2.0] {
        let field = engine
            .evaluate(&Point3::from_cylindrical(r, phi, z))
            .unwrap();
        let (cos_phi, sin_phi) = (phi.cos(), phi.sin());
        let rotated = Vec3::new(
            reference[X] * cos_phi - reference[Y] * sin_phi,
            reference[X] * sin_phi + reference[Y] * cos_phi,
            reference[Z],
        );
        assert_vec3_close(&field, &rotated, 1e-12);
    }
}

#[test]
fn grid_samples_are_reproduced() {
    let mut engine = synthetic_engine();
    let b_r = SYNTHETIC_TABLE.component(FieldComponent::Radial);
    let b_phi = SYNTHETIC_TABLE.component(FieldComponent::Toroidal);
    let b_z = SYNTHETIC_TABLE.component(FieldComponent::Axial);
    for (iz, &z) in SYNTHETIC_TABLE.z_grid().iter().enumerate().step_by(7) {
        for (ir, &r) in SYNTHETIC_TABLE.r_grid().iter().enumerate().step_by(5) {
            let field = engine.evaluate(&Point3::new(r, 0.0, z)).unwrap();
            let expected = Vec3::new(b_r[[iz, ir]], b_phi[[iz, ir]], b_z[[iz, ir]]);
            assert_vec3_close(&field, &expected, 1e-12);
        }
    }
}

#[test]
fn interpolated_field_approximates_analytic_field() {
    let mut engine = synthetic_engine();
    for point in &[
        Point3::new(5.13, 1.71, 0.37),
        Point3::new(-4.02, -3.3, -2.9),
        Point3::new(0.5, 7.7, 4.1),
    ] {
        let field = engine.evaluate(point).unwrap();
        assert_vec3_close(&field, &SYNTHETIC_FIELD.cartesian_field(point), 1e-4);
    }
}

fn finite_difference_jacobian(
    engine: &mut InterpolationEngine,
    point: &Point3<fip>,
    delta: fip,
) -> Matrix3<fip> {
    let mut jacobian = Matrix3::zero();
    for coord in [X, Y, Z] {
        let mut step = Vec3::zero();
        step[coord] = delta;
        let forward = engine.evaluate(&(*point + step)).unwrap();
        let backward = engine.evaluate(&(*point - step)).unwrap();
        for component in [X, Y, Z] {
            jacobian[(component, coord)] = (forward[component] - backward[component]) / (2.0 * delta);
        }
    }
    jacobian
}

#[test]
fn jacobian_matches_finite_differences() {
    let mut engine = synthetic_engine();
    for point in &[
        Point3::new(5.0, 2.0, 0.3),
        Point3::new(-3.1, 4.4, -2.2),
        Point3::new(0.2, -7.9, 3.9),
    ] {
        let jacobian = engine.evaluate_jacobian(point).unwrap();
        let coarse = finite_difference_jacobian(&mut engine, point, 1e-3);
        let fine = finite_difference_jacobian(&mut engine, point, 1e-5);
        assert_matrix3_close(&jacobian, &fine, 1e-6);

        // Error shrinks quadratically with the step size
        let coarse_error = (coarse[(X, Y)] - jacobian[(X, Y)]).abs();
        let fine_error = (fine[(X, Y)] - jacobian[(X, Y)]).abs();
        assert!(fine_error <= coarse_error.max(1e-9));
    }
}

#[test]
fn jacobian_approximates_analytic_divergence_free_field() {
    let mut engine = synthetic_engine();
    let point = Point3::new(4.4, -2.6, 1.1);
    let jacobian = engine.evaluate_jacobian(&point).unwrap();
    assert_abs_diff_eq!(jacobian.trace(), 0.0, epsilon = 1e-4);

    let analytic = finite_difference_jacobian_of_analytic_field(&point, 1e-5);
    assert_matrix3_close(&jacobian, &analytic, 1e-3);
}

fn finite_difference_jacobian_of_analytic_field(point: &Point3<fip>, delta: fip) -> Matrix3<fip> {
    Matrix3::with_each_element(|component, coord| {
        let mut step = Vec3::zero();
        step[coord] = delta;
        let forward = SYNTHETIC_FIELD.cartesian_field(&(*point + step));
        let backward = SYNTHETIC_FIELD.cartesian_field(&(*point - step));
        (forward[component] - backward[component]) / (2.0 * delta)
    })
}

#[test]
fn jacobian_outside_domain_is_taken_at_clamped_point() {
    let mut engine = synthetic_engine();
    let inside = engine.evaluate_jacobian(&Point3::new(6.0, 0.0, 5.5)).unwrap();
    let above = engine.evaluate_jacobian(&Point3::new(6.0, 0.0, 8.0)).unwrap();
    assert_matrix3_close(&inside, &above, 1e-15);
}

#[test]
fn axis_is_rejected_by_default() {
    let mut engine = synthetic_engine();
    match engine.evaluate(&Point3::new(0.0, 0.0, 1.0)) {
        Err(FieldError::SingularAxis { r, .. }) => assert_eq!(r, 0.0),
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn axial_only_policy_gives_finite_axial_field() {
    let mut engine = InterpolationEngine::from_table(
        &SYNTHETIC_TABLE,
        EngineConfig {
            axis_policy: AxisPolicy::AxialOnly,
            axis_tolerance: 1e-6,
        },
    )
    .unwrap();
    let (field, jacobian) = engine
        .evaluate_with_jacobian(&Point3::new(1e-7, 0.0, 2.0))
        .unwrap();
    assert_eq!(field[X], 0.0);
    assert_eq!(field[Y], 0.0);
    assert!(field.is_finite());
    assert!(jacobian.is_finite());
    let (_, clamped_jacobian) = engine
        .evaluate_with_jacobian(&Point3::new(3.5, 0.0, 2.0))
        .unwrap();
    assert_eq!(jacobian[(Z, Z)], clamped_jacobian[(Z, Z)]);
    assert_eq!(jacobian[(Z, X)], 0.0);
}

#[test]
fn invalid_grids_are_rejected() {
    let short_axis = FieldTable::sampled(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0, 3.0], |_, _| {
        (0.0, 1.0, 0.0)
    })
    .unwrap();
    assert!(matches!(
        InterpolationEngine::from_table(&short_axis, EngineConfig::default()),
        Err(FieldError::InvalidGrid(GridDefect::TooFewPoints {
            axis: GridAxis::Radial,
            count: 3,
            ..
        }))
    ));

    let non_increasing =
        FieldTable::sampled(vec![1.0, 2.0, 3.0, 4.0], vec![0.0, 2.0, 1.0, 3.0], |_, _| {
            (0.0, 1.0, 0.0)
        })
        .unwrap();
    assert!(matches!(
        InterpolationEngine::from_table(&non_increasing, EngineConfig::default()),
        Err(FieldError::InvalidGrid(GridDefect::NotIncreasing {
            axis: GridAxis::Axial,
            index: 2
        }))
    ));

    assert!(matches!(
        FieldTable::from_flat(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0; 16],
            vec![0.0; 16],
            vec![0.0; 15],
        ),
        Err(FieldError::InvalidGrid(GridDefect::ValueCountMismatch {
            expected: 16,
            actual: 15
        }))
    ));
}

#[test]
fn second_initialization_is_rejected() {
    let mut engine = InterpolationEngine::new(EngineConfig::default());
    assert!(matches!(
        engine.evaluate_jacobian(&Point3::new(5.0, 0.0, 0.0)),
        Err(FieldError::UninitializedEngine)
    ));
    engine.init(&CONSTANT_TABLE).unwrap();
    assert!(matches!(
        engine.init(&SYNTHETIC_TABLE),
        Err(FieldError::AlreadyInitialized)
    ));
    // The first table stays in effect
    let field = engine.evaluate(&Point3::new(5.0, 0.0, 0.0)).unwrap();
    assert_abs_diff_eq!(field[Z], 2.0, epsilon = 1e-12);
}

#[test]
fn nearby_queries_hit_the_accelerator() {
    let mut engine = synthetic_engine();
    let mut point = Point3::new(5.0, 0.0, 0.0);
    engine.evaluate(&point).unwrap();
    let initial = engine.accelerator_statistics();
    for _ in 0..10 {
        point[X] += 1e-4;
        engine.evaluate(&point).unwrap();
    }
    let after = engine.accelerator_statistics();
    assert_eq!(after.misses, initial.misses);
    assert_eq!(after.hits, initial.hits + 10 * 6);
}

#[test]
fn cloned_engines_evaluate_independently_in_parallel() {
    let engine = synthetic_engine();
    let points: Vec<_> = (0..64)
        .map(|idx| {
            let t = idx as fip / 64.0;
            Point3::from_cylindrical(3.6 + 5.2 * t, 2.0 * PI * t, -5.0 + 10.0 * t)
        })
        .collect();

    let serial: Vec<_> = {
        let mut engine = engine.clone();
        points
            .iter()
            .map(|point| engine.evaluate(point).unwrap())
            .collect()
    };
    let parallel: Vec<_> = points
        .par_iter()
        .map_init(|| engine.clone(), |engine, point| engine.evaluate(point).unwrap())
        .collect();
    assert_eq!(serial, parallel);
}
