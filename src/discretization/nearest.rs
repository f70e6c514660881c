//! discretization::nearest — nearest grid point under squared Euclidean distance.
//!
//! Purpose
//! -------
//! Map a continuous state vector onto the index of the closest row of the
//! grid `Z`. Every discrete distribution in this crate is indexed by these
//! grid rows, so this search is the projection used by both estimators.
//!
//! Key behaviors
//! -------------
//! - Compute `‖x − Zⱼ‖²` for every row `j` and return the minimizing index.
//! - Exact ties resolve to the lowest index. The scan runs in row order and
//!   only replaces the incumbent on a strictly smaller distance, so the first
//!   minimizer always wins regardless of how callers parallelize around it.
//!
//! Invariants & assumptions
//! ------------------------
//! - The public [`find_nearest`] validates its inputs. The crate-internal
//!   [`nearest_index`] assumes `z.nrows() ≥ 1` and `x.len() == z.ncols()`,
//!   which the estimators check once up front.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact membership, the tie-break rule, and the
//!   empty-grid / shape / finiteness errors.

use ndarray::{ArrayView1, ArrayView2};

use crate::discretization::{
    errors::DiscretizationResult,
    validation::{validate_finite, validate_grid, validate_length},
};

/// Index of the row of `z` closest to `x` in squared Euclidean distance.
///
/// Parameters
/// ----------
/// - `x`: query vector of length `n`.
/// - `z`: grid, `nZ × n`, `nZ ≥ 1`.
///
/// Returns
/// -------
/// An index in `[0, nZ)`. Among rows at exactly the same minimal distance,
/// the smallest index is returned.
///
/// Errors
/// ------
/// - `EmptyGrid` if `z` has no rows.
/// - `DimensionMismatch` if `x.len() != z.ncols()`.
/// - `NonFiniteInput` if `x` or `z` has a NaN / ±∞ entry.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use var_markov::discretization::find_nearest;
/// let z = array![[-1.0], [0.0], [1.0]];
/// assert_eq!(find_nearest(array![0.4].view(), z.view()).unwrap(), 1);
/// // 0.5 is equidistant from rows 1 and 2; the lower index wins.
/// assert_eq!(find_nearest(array![0.5].view(), z.view()).unwrap(), 1);
/// ```
pub fn find_nearest(x: ArrayView1<'_, f64>, z: ArrayView2<'_, f64>) -> DiscretizationResult<usize> {
    validate_grid(z)?;
    validate_length("x", x.len(), z.ncols())?;
    validate_finite("x", &x)?;
    validate_finite("z", &z)?;
    Ok(nearest_index(x, z))
}

pub(crate) fn nearest_index(x: ArrayView1<'_, f64>, z: ArrayView2<'_, f64>) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, row) in z.outer_iter().enumerate() {
        let dist: f64 = row.iter().zip(x.iter()).map(|(zj, xi)| (xi - zj) * (xi - zj)).sum();
        // strict: keep the first minimizer
        if dist < best_dist {
            best = j;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretization::errors::DiscretizationError;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Verify that a query equal to a grid row returns that row.
    //
    // Given
    // -----
    // - A 4-point 2-D grid and each of its rows as the query.
    //
    // Expect
    // ------
    // - `find_nearest(z[j], z) == j` for every j.
    fn find_nearest_query_on_grid_returns_its_row() {
        // Arrange
        let z = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

        for j in 0..z.nrows() {
            // Act
            let idx = find_nearest(z.row(j), z.view()).expect("valid inputs");

            // Assert
            assert_eq!(idx, j);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure duplicated and equidistant rows resolve to the lowest index.
    //
    // Given
    // -----
    // - A grid whose rows 1 and 3 are identical and closest to the query.
    // - A query at the midpoint between rows 0 and 2.
    //
    // Expect
    // ------
    // - Index 1 for the duplicate case, index 0 for the midpoint case.
    fn find_nearest_ties_return_lowest_index() {
        // Arrange
        let z = array![[5.0, 5.0], [1.0, 1.0], [-1.0, -1.0], [1.0, 1.0]];
        let dup_query = array![1.1, 0.9];
        let mid_z = array![[-1.0, 0.0], [3.0, 3.0], [1.0, 0.0]];
        let mid_query = array![0.0, 0.0];

        // Act
        let dup = find_nearest(dup_query.view(), z.view()).expect("valid inputs");
        let mid = find_nearest(mid_query.view(), mid_z.view()).expect("valid inputs");

        // Assert
        assert_eq!(dup, 1);
        assert_eq!(mid, 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a single-point grid always maps to index 0.
    //
    // Given
    // -----
    // - `z = [[2.0, -3.0]]` and a far-away query.
    //
    // Expect
    // ------
    // - Index 0.
    fn find_nearest_single_point_grid_returns_zero() {
        let z = array![[2.0, -3.0]];

        assert_eq!(find_nearest(array![1e6, 1e6].view(), z.view()), Ok(0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed inputs are reported instead of indexing blindly.
    //
    // Given
    // -----
    // - A 0 × 2 grid; a query of the wrong length; a NaN query.
    //
    // Expect
    // ------
    // - `EmptyGrid`, `DimensionMismatch`, `NonFiniteInput`.
    fn find_nearest_invalid_inputs_return_errors() {
        // Arrange
        let empty = Array2::<f64>::zeros((0, 2));
        let z = array![[0.0, 0.0]];

        // Act + Assert
        assert_eq!(
            find_nearest(array![0.0, 0.0].view(), empty.view()),
            Err(DiscretizationError::EmptyGrid)
        );
        assert_eq!(
            find_nearest(array![0.0].view(), z.view()),
            Err(DiscretizationError::DimensionMismatch { what: "x", expected: 2, actual: 1 })
        );
        assert!(matches!(
            find_nearest(array![0.0, f64::NAN].view(), z.view()),
            Err(DiscretizationError::NonFiniteInput { what: "x", .. })
        ));
    }
}
