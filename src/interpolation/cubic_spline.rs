//! Node slopes of one-dimensional natural cubic splines.

use super::fip;

/// Computes the first derivative at each node of the natural cubic spline
/// through the given points.
///
/// The second derivative of a natural spline vanishes at both ends, and the
/// interior second derivatives follow from continuity of the first
/// derivative across nodes.
///
/// # Panics
///
/// If fewer than three points are given or the lengths differ.
pub fn natural_spline_slopes(coords: &[fip], values: &[fip]) -> Vec<fip> {
    let size = coords.len();
    assert!(size >= 3, "Natural cubic spline needs at least three points");
    assert_eq!(values.len(), size, "Coordinates and values must have the same length");

    let spans: Vec<fip> = coords.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let secants: Vec<fip> = values
        .windows(2)
        .zip(&spans)
        .map(|(pair, &span)| (pair[1] - pair[0]) / span)
        .collect();

    // Second derivatives at the interior nodes 1..size-1
    let n_interior = size - 2;
    let mut sub_diagonal = vec![0.0; n_interior];
    let mut diagonal = vec![0.0; n_interior];
    let mut super_diagonal = vec![0.0; n_interior];
    let mut rhs = vec![0.0; n_interior];
    for row in 0..n_interior {
        let node = row + 1;
        sub_diagonal[row] = spans[node - 1];
        diagonal[row] = 2.0 * (spans[node - 1] + spans[node]);
        super_diagonal[row] = spans[node];
        rhs[row] = 6.0 * (secants[node] - secants[node - 1]);
    }
    let interior_curvatures = solve_tridiagonal(&sub_diagonal, &diagonal, &super_diagonal, &rhs);

    let mut curvatures = Vec::with_capacity(size);
    curvatures.push(0.0);
    curvatures.extend(interior_curvatures);
    curvatures.push(0.0);

    let mut slopes: Vec<fip> = (0..size - 1)
        .map(|idx| {
            secants[idx] - spans[idx] * (2.0 * curvatures[idx] + curvatures[idx + 1]) / 6.0
        })
        .collect();
    let last = size - 2;
    slopes.push(
        secants[last] + spans[last] * (curvatures[last] + 2.0 * curvatures[last + 1]) / 6.0,
    );
    slopes
}

/// Solves the tridiagonal system with the Thomas algorithm.
///
/// `sub_diagonal[0]` and `super_diagonal[n-1]` are not used. The systems
/// produced by spline fitting are diagonally dominant, so no pivoting is done.
fn solve_tridiagonal(
    sub_diagonal: &[fip],
    diagonal: &[fip],
    super_diagonal: &[fip],
    rhs: &[fip],
) -> Vec<fip> {
    let size = rhs.len();
    let mut modified_super = vec![0.0; size];
    let mut modified_rhs = vec![0.0; size];

    modified_super[0] = super_diagonal[0] / diagonal[0];
    modified_rhs[0] = rhs[0] / diagonal[0];
    for idx in 1..size {
        let denominator = diagonal[idx] - sub_diagonal[idx] * modified_super[idx - 1];
        if idx < size - 1 {
            modified_super[idx] = super_diagonal[idx] / denominator;
        }
        modified_rhs[idx] =
            (rhs[idx] - sub_diagonal[idx] * modified_rhs[idx - 1]) / denominator;
    }

    let mut solution = vec![0.0; size];
    solution[size - 1] = modified_rhs[size - 1];
    for idx in (0..size - 1).rev() {
        solution[idx] = modified_rhs[idx] - modified_super[idx] * solution[idx + 1];
    }
    solution
}
