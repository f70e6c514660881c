//! discretization::validation — shared input guards for the discretization kernels.
//!
//! Purpose
//! -------
//! Centralize the shape, emptiness, and finiteness checks that every public
//! routine performs before touching its inputs, so that a malformed call is
//! rejected up front with a structured [`DiscretizationError`] instead of an
//! `ndarray` panic or a silently wrong index.
//!
//! Key behaviors
//! -------------
//! - Check that the VAR coefficient matrix (and covariance) are square.
//! - Check that vectors and matrices agree on the state dimension `n`.
//! - Reject an empty grid and an empty shock set.
//! - Reject NaN / ±∞ entries.
//!
//! Conventions
//! -----------
//! - Guards return the validated dimension where that is useful to callers
//!   (e.g. [`validate_square`] returns `n`).
//! - Guards allocate nothing and never panic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each error branch and a success path per guard.

use ndarray::{ArrayBase, ArrayView2, Data, Dimension};

use crate::discretization::errors::{DiscretizationError, DiscretizationResult};

/// Require `m` to be square and return its dimension.
///
/// Errors
/// ------
/// - `DiscretizationError::NotSquare` when `m.nrows() != m.ncols()`.
pub fn validate_square(what: &'static str, m: ArrayView2<'_, f64>) -> DiscretizationResult<usize> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(DiscretizationError::NotSquare { what, rows, cols });
    }
    Ok(rows)
}

/// Require `m` to have exactly `n` columns.
///
/// Errors
/// ------
/// - `DiscretizationError::DimensionMismatch` with `expected = n` and
///   `actual = m.ncols()`.
pub fn validate_columns(
    what: &'static str, m: ArrayView2<'_, f64>, n: usize,
) -> DiscretizationResult<()> {
    if m.ncols() != n {
        return Err(DiscretizationError::DimensionMismatch { what, expected: n, actual: m.ncols() });
    }
    Ok(())
}

/// Require a vector of length `n`.
pub fn validate_length(what: &'static str, len: usize, n: usize) -> DiscretizationResult<()> {
    if len != n {
        return Err(DiscretizationError::DimensionMismatch { what, expected: n, actual: len });
    }
    Ok(())
}

/// Require at least one grid row.
///
/// Errors
/// ------
/// - `DiscretizationError::EmptyGrid` when `z.nrows() == 0`.
pub fn validate_grid(z: ArrayView2<'_, f64>) -> DiscretizationResult<()> {
    if z.nrows() == 0 {
        return Err(DiscretizationError::EmptyGrid);
    }
    Ok(())
}

/// Require at least one shock row.
///
/// Errors
/// ------
/// - `DiscretizationError::EmptyShockSet` when `eps.nrows() == 0`.
pub fn validate_shocks(eps: ArrayView2<'_, f64>) -> DiscretizationResult<()> {
    if eps.nrows() == 0 {
        return Err(DiscretizationError::EmptyShockSet);
    }
    Ok(())
}

/// Require every entry of `a` to be finite.
///
/// Errors
/// ------
/// - `DiscretizationError::NonFiniteInput` carrying the first offending
///   value in logical iteration order.
pub fn validate_finite<S, D>(what: &'static str, a: &ArrayBase<S, D>) -> DiscretizationResult<()>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    match a.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(DiscretizationError::NonFiniteInput { what, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover every error branch of the guards in this module plus
    // one success path each. Integration with the kernels is exercised in the
    // kernel modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a square matrix passes and reports its dimension.
    //
    // Given
    // -----
    // - A 2 × 2 matrix.
    //
    // Expect
    // ------
    // - `validate_square` returns `Ok(2)`.
    fn validate_square_square_matrix_returns_dimension() {
        // Arrange
        let m = array![[0.5, 0.1], [0.0, 0.3]];

        // Act
        let result = validate_square("phi", m.view());

        // Assert
        assert_eq!(result, Ok(2));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a non-square matrix is rejected with its shape.
    //
    // Given
    // -----
    // - A 2 × 3 matrix.
    //
    // Expect
    // ------
    // - `Err(NotSquare { rows: 2, cols: 3, .. })`.
    fn validate_square_rectangular_matrix_returns_not_square() {
        // Arrange
        let m = Array2::<f64>::zeros((2, 3));

        // Act
        let result = validate_square("phi", m.view());

        // Assert
        match result {
            Err(DiscretizationError::NotSquare { what, rows, cols }) => {
                assert_eq!((what, rows, cols), ("phi", 2, 3));
            }
            other => panic!("expected NotSquare error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure column and length mismatches report expected vs actual.
    //
    // Given
    // -----
    // - A 4 × 3 matrix checked against n = 2.
    // - A vector length 1 checked against n = 2.
    //
    // Expect
    // ------
    // - Both return `DimensionMismatch` with the right payloads.
    fn validate_columns_and_length_mismatch_return_dimension_mismatch() {
        // Arrange
        let m = Array2::<f64>::zeros((4, 3));

        // Act
        let cols = validate_columns("z", m.view(), 2);
        let len = validate_length("e_x", 1, 2);

        // Assert
        assert_eq!(
            cols,
            Err(DiscretizationError::DimensionMismatch { what: "z", expected: 2, actual: 3 })
        );
        assert_eq!(
            len,
            Err(DiscretizationError::DimensionMismatch { what: "e_x", expected: 2, actual: 1 })
        );
        assert!(validate_columns("z", m.view(), 3).is_ok());
        assert!(validate_length("e_x", 2, 2).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that zero-row grids and shock sets are rejected explicitly.
    //
    // Given
    // -----
    // - A 0 × 2 matrix used as grid and as shock set.
    //
    // Expect
    // ------
    // - `EmptyGrid` and `EmptyShockSet` respectively.
    fn validate_grid_and_shocks_empty_inputs_are_rejected() {
        // Arrange
        let empty = Array2::<f64>::zeros((0, 2));
        let one_row = Array2::<f64>::zeros((1, 2));

        // Assert
        assert_eq!(validate_grid(empty.view()), Err(DiscretizationError::EmptyGrid));
        assert_eq!(validate_shocks(empty.view()), Err(DiscretizationError::EmptyShockSet));
        assert!(validate_grid(one_row.view()).is_ok());
        assert!(validate_shocks(one_row.view()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that the first non-finite entry is reported.
    //
    // Given
    // -----
    // - A matrix containing +∞ at (0, 1).
    //
    // Expect
    // ------
    // - `NonFiniteInput` whose payload is infinite.
    fn validate_finite_infinite_entry_returns_non_finite_input() {
        // Arrange
        let m = array![[1.0, f64::INFINITY], [0.0, 2.0]];

        // Act
        let result = validate_finite("sigma", &m);

        // Assert
        match result {
            Err(DiscretizationError::NonFiniteInput { what, value }) => {
                assert_eq!(what, "sigma");
                assert!(value.is_infinite());
            }
            other => panic!("expected NonFiniteInput error, got {other:?}"),
        }
        assert!(validate_finite("sigma", &array![1.0, 2.0]).is_ok());
    }
}
