//! discretization::errors — error types and Python bridge for VAR discretization.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the Lyapunov solver,
//! nearest-grid search, and Monte Carlo transition estimators, together with
//! a conversion layer to Python exceptions for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`DiscretizationResult`] and [`DiscretizationError`] as the
//!   canonical result and error types for every routine under
//!   `discretization`.
//! - Attach human-readable `Display` messages that embed the offending
//!   dimension or value.
//! - Implement `From<DiscretizationError> for PyErr` to surface failures as
//!   `ValueError` when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shape and emptiness problems are detected before any arithmetic is
//!   performed; no routine returns partially computed output alongside an
//!   error.
//! - Non-convergence of the Lyapunov iteration is *not* an error and has no
//!   variant here; it is reported through `LyapunovOutcome::converged`.
//!
//! Conventions
//! -----------
//! - The `what` payloads name the offending argument using the symbols of
//!   the VAR model (`"phi"`, `"sigma"`, `"x"`, `"eps"`, `"z"`, `"e_x"`).
//!
//! Testing notes
//! -------------
//! - Unit tests check that each variant's `Display` message embeds its
//!   payload. The PyO3 conversion is left to Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DiscretizationResult<T> = Result<T, DiscretizationError>;

/// DiscretizationError — failure modes of the discretization kernels.
///
/// Variants
/// --------
/// - `DimensionMismatch { what, expected, actual }`
///   An input's column count (or length) does not agree with the state
///   dimension `n` implied by the other arguments.
/// - `NotSquare { what, rows, cols }`
///   A matrix that must be `n × n` (the VAR coefficient matrix) is not square.
/// - `EmptyGrid`
///   The grid `Z` has zero rows, so no nearest point exists.
/// - `EmptyShockSet`
///   The shock matrix `eps` has zero rows, so the `1 / nShocks` weight is
///   undefined.
/// - `NonFiniteInput { what, value }`
///   An input entry is NaN or ±∞.
/// - `InvalidTolerance(tol)`
///   The Lyapunov stopping tolerance is negative or non-finite.
/// - `InvalidMaxIter(max_iter)`
///   The Lyapunov iteration cap is zero.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscretizationError {
    // ---- Shape errors ----
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },
    NotSquare { what: &'static str, rows: usize, cols: usize },

    // ---- Empty inputs ----
    EmptyGrid,
    EmptyShockSet,

    // ---- Value errors ----
    NonFiniteInput { what: &'static str, value: f64 },

    // ---- Options ----
    InvalidTolerance(f64),
    InvalidMaxIter(usize),
}

impl std::error::Error for DiscretizationError {}

impl std::fmt::Display for DiscretizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape errors ----
            DiscretizationError::DimensionMismatch { what, expected, actual } => write!(
                f,
                "Dimension mismatch in {what}: expected {expected} columns, got {actual}."
            ),
            DiscretizationError::NotSquare { what, rows, cols } => {
                write!(f, "{what} must be square, got a {rows} x {cols} matrix.")
            }

            // ---- Empty inputs ----
            DiscretizationError::EmptyGrid => {
                write!(f, "The grid z has no rows; at least one grid point is required.")
            }
            DiscretizationError::EmptyShockSet => {
                write!(f, "The shock matrix eps has no rows; at least one shock is required.")
            }

            // ---- Value errors ----
            DiscretizationError::NonFiniteInput { what, value } => {
                write!(f, "Invalid value {value} in {what}. Must be a finite number.")
            }

            // ---- Options ----
            DiscretizationError::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance {tol}. Must be finite and non-negative.")
            }
            DiscretizationError::InvalidMaxIter(max_iter) => {
                write!(f, "Invalid max_iter {max_iter}. Must be greater than zero.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DiscretizationError> for PyErr {
    fn from(err: DiscretizationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover `Display` formatting for each variant that carries a
    // payload, plus non-empty messages for the unit variants.
    //
    // They intentionally DO NOT cover the `PyErr` conversion, which needs the
    // Python C API at link time.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `DimensionMismatch` reports the argument name and both
    // dimensions.
    //
    // Given
    // -----
    // - `DimensionMismatch { what: "eps", expected: 2, actual: 3 }`.
    //
    // Expect
    // ------
    // - The message contains "eps", "2", and "3".
    fn dimension_mismatch_includes_payload_in_display() {
        // Arrange
        let err = DiscretizationError::DimensionMismatch { what: "eps", expected: 2, actual: 3 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("eps"), "missing argument name.\nGot: {msg}");
        assert!(msg.contains('2') && msg.contains('3'), "missing dimensions.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `NotSquare` reports the offending shape.
    //
    // Given
    // -----
    // - `NotSquare { what: "phi", rows: 2, cols: 5 }`.
    //
    // Expect
    // ------
    // - The message contains "phi" and "2 x 5".
    fn not_square_includes_shape_in_display() {
        // Arrange
        let err = DiscretizationError::NotSquare { what: "phi", rows: 2, cols: 5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("phi") && msg.contains("2 x 5"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the unit variants format to non-empty messages.
    //
    // Given
    // -----
    // - `EmptyGrid` and `EmptyShockSet`.
    //
    // Expect
    // ------
    // - Both messages are non-empty and distinct.
    fn empty_input_variants_have_distinct_messages() {
        // Arrange
        let grid = DiscretizationError::EmptyGrid.to_string();
        let shocks = DiscretizationError::EmptyShockSet.to_string();

        // Assert
        assert!(!grid.trim().is_empty());
        assert!(!shocks.trim().is_empty());
        assert_ne!(grid, shocks);
    }

    #[test]
    // Purpose
    // -------
    // Verify that option errors embed the rejected value.
    //
    // Given
    // -----
    // - `InvalidTolerance(-0.5)` and `InvalidMaxIter(0)`.
    //
    // Expect
    // ------
    // - Messages contain "-0.5" and "0" respectively.
    fn option_errors_include_payload_in_display() {
        // Act
        let tol_msg = DiscretizationError::InvalidTolerance(-0.5).to_string();
        let iter_msg = DiscretizationError::InvalidMaxIter(0).to_string();

        // Assert
        assert!(tol_msg.contains("-0.5"), "Got: {tol_msg}");
        assert!(iter_msg.contains('0'), "Got: {iter_msg}");
    }
}
