//! discretization::options — configuration for the Lyapunov iteration.
//!
//! Purpose
//! -------
//! Hold the stopping rule and diagnostic switch of the power-series Lyapunov
//! solver in a small validated value, so that callers cannot hand the
//! iteration a negative tolerance or a zero iteration cap.
//!
//! Key behaviors
//! -------------
//! - [`LyapunovOptions::new`] validates `max_iter > 0` and a finite,
//!   non-negative `tol`.
//! - [`LyapunovOptions::validate`] re-checks the same rules on a value
//!   built by struct literal.
//! - [`LyapunovOptions::default`] gives `max_iter = 1000`, `tol = 1e-8`,
//!   `verbose = false`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the default values and each rejection branch.

use crate::discretization::errors::{DiscretizationError, DiscretizationResult};

/// Default cap on the number of power-series terms.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default stopping tolerance on the max-abs norm of the latest term.
pub const DEFAULT_TOL: f64 = 1e-8;

/// LyapunovOptions — stopping rule for `Λ = ΦΛΦᵗ + Σ`.
///
/// Fields
/// ------
/// - `max_iter`: `usize`
///   Hard cap on the number of terms added after `Σ`. Reaching it is not an
///   error.
/// - `tol`: `f64`
///   The iteration stops once the max absolute entry of the latest term
///   is `≤ tol`.
/// - `verbose`: `bool`
///   When `true`, the iteration count and final term norm are reported after
///   the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LyapunovOptions {
    pub max_iter: usize,
    pub tol: f64,
    pub verbose: bool,
}

impl LyapunovOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`DiscretizationError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`DiscretizationError::InvalidTolerance`] if `tol` is negative or
    ///   non-finite.
    pub fn new(max_iter: usize, tol: f64, verbose: bool) -> DiscretizationResult<Self> {
        let opts = Self { max_iter, tol, verbose };
        opts.validate()?;
        Ok(opts)
    }

    /// Re-check the invariants of [`LyapunovOptions::new`].
    ///
    /// The fields are public, so a struct literal can skip `new`; the solver
    /// calls this before iterating.
    ///
    /// # Errors
    /// Same as [`LyapunovOptions::new`].
    pub fn validate(&self) -> DiscretizationResult<()> {
        if self.max_iter == 0 {
            return Err(DiscretizationError::InvalidMaxIter(self.max_iter));
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(DiscretizationError::InvalidTolerance(self.tol));
        }
        Ok(())
    }
}

impl Default for LyapunovOptions {
    fn default() -> Self {
        Self { max_iter: DEFAULT_MAX_ITER, tol: DEFAULT_TOL, verbose: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults.
    //
    // Expect
    // ------
    // - `max_iter = 1000`, `tol = 1e-8`, `verbose = false`.
    fn lyapunov_options_default_matches_documented_values() {
        let opts = LyapunovOptions::default();

        assert_eq!(opts.max_iter, 1000);
        assert_eq!(opts.tol, 1e-8);
        assert!(!opts.verbose);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `new` preserves valid inputs, including `tol = 0`.
    //
    // Given
    // -----
    // - `max_iter = 25`, `tol = 0.0`, `verbose = true`.
    //
    // Expect
    // ------
    // - `Ok` with the same fields.
    fn lyapunov_options_new_valid_inputs_are_preserved() {
        let opts = LyapunovOptions::new(25, 0.0, true).expect("valid options");

        assert_eq!(opts, LyapunovOptions { max_iter: 25, tol: 0.0, verbose: true });
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid caps and tolerances are rejected.
    //
    // Given
    // -----
    // - `max_iter = 0`; `tol = -1e-3`; `tol = NaN`.
    //
    // Expect
    // ------
    // - `InvalidMaxIter(0)`, then `InvalidTolerance` for both tolerances.
    fn lyapunov_options_new_invalid_inputs_are_rejected() {
        assert_eq!(
            LyapunovOptions::new(0, 1e-8, false),
            Err(DiscretizationError::InvalidMaxIter(0))
        );
        assert_eq!(
            LyapunovOptions::new(10, -1e-3, false),
            Err(DiscretizationError::InvalidTolerance(-1e-3))
        );
        match LyapunovOptions::new(10, f64::NAN, false) {
            Err(DiscretizationError::InvalidTolerance(v)) => assert!(v.is_nan()),
            other => panic!("expected InvalidTolerance error, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `validate` catches values assembled without `new`.
    //
    // Given
    // -----
    // - Struct literals with `max_iter = 0` and with `tol = NaN`.
    // - The default options.
    //
    // Expect
    // ------
    // - `InvalidMaxIter(0)` and `InvalidTolerance`; the defaults pass.
    fn lyapunov_options_validate_rejects_struct_literal_bypass() {
        let zero_cap = LyapunovOptions { max_iter: 0, ..LyapunovOptions::default() };
        let nan_tol = LyapunovOptions { tol: f64::NAN, ..LyapunovOptions::default() };

        assert_eq!(zero_cap.validate(), Err(DiscretizationError::InvalidMaxIter(0)));
        assert!(matches!(
            nan_tol.validate(),
            Err(DiscretizationError::InvalidTolerance(v)) if v.is_nan()
        ));
        assert_eq!(LyapunovOptions::default().validate(), Ok(()));
    }
}
