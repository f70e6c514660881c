//! discretization::transition — Monte Carlo transition matrix of a discretized VAR.
//!
//! Purpose
//! -------
//! Estimate the `nZ × nZ` Markov transition matrix `P` of the VAR(1) process
//! `X' = Φ X + ε` restricted to the grid `Z`, using a sample path `X` to
//! weight the continuous states inside each grid cell and a shock sample
//! `eps` to integrate over the innovation.
//!
//! Key behaviors
//! -------------
//! - Compute conditional expectations `E = X Φᵗ` for every sample row.
//! - Assign each sample row to its nearest grid point (its *bucket*) and
//!   count the rows per bucket (`countZ`).
//! - For each sample row, build the grid PMF of `Eᵢ + ε` and average these
//!   PMFs within the row's bucket: `P[j, :] = (1 / countZ[j]) Σ_{i ∈ j} p̂(Eᵢ)`.
//! - Return a [`TransitionOutcome`] with `P`, the per-row bucket
//!   assignments, and the bucket counts.
//!
//! Invariants & assumptions
//! ------------------------
//! - Row `j` of `P` sums to one whenever `countZ[j] > 0`.
//! - A bucket that no sample row visits keeps an all-zero row. This is not
//!   an error; callers who need a proper stochastic matrix must make `X`
//!   cover the grid, or treat [`TransitionOutcome::unvisited`] states
//!   explicitly (e.g. as unreachable).
//! - An empty sample (`nX = 0`) is accepted and gives an all-zero `P`.
//!
//! Conventions
//! -----------
//! - PMFs are summed per bucket and each visited row is divided by its count
//!   once at the end.
//! - With the `parallel` feature, bucket assignment and the per-row PMFs are
//!   computed with rayon and collected in sample order; accumulation stays
//!   serial, so the result is bit-identical to the serial build.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the scalar end-to-end example, the single-point grid,
//!   unvisited buckets, agreement with a direct per-row average, and input
//!   validation.

use ndarray::{Array1, Array2, ArrayView2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::discretization::{
    conditional::conditional_pmf,
    errors::DiscretizationResult,
    nearest::nearest_index,
    validation::{validate_columns, validate_finite, validate_grid, validate_shocks, validate_square},
};

/// TransitionOutcome — estimated transition matrix plus bucket bookkeeping.
///
/// Fields
/// ------
/// - `p`: `Array2<f64>`
///   Transition matrix, `nZ × nZ`; row `j` is the distribution of next
///   grid state given current grid state `j`.
/// - `assignments`: `Vec<usize>`
///   Bucket (grid index) of every sample row of `X`, length `nX`.
/// - `counts`: `Vec<usize>`
///   Number of sample rows per bucket (`countZ`), length `nZ`.
///
/// Invariants
/// ----------
/// - `counts.iter().sum() == assignments.len()`.
/// - `counts[j] == 0` implies row `j` of `p` is exactly zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    p: Array2<f64>,
    assignments: Vec<usize>,
    counts: Vec<usize>,
}

impl TransitionOutcome {
    /// Estimate the grid transition matrix by Monte Carlo.
    ///
    /// Parameters
    /// ----------
    /// - `phi`: `n × n` VAR coefficient matrix.
    /// - `x`: sample of continuous states, `nX × n`.
    /// - `eps`: shock draws, `nShocks × n`, `nShocks ≥ 1`.
    /// - `z`: grid, `nZ × n`, `nZ ≥ 1`.
    ///
    /// Errors
    /// ------
    /// - `NotSquare` if `phi` is not square.
    /// - `DimensionMismatch` if `x`, `eps`, or `z` does not have `n` columns.
    /// - `EmptyGrid` / `EmptyShockSet` for zero-row `z` / `eps`.
    /// - `NonFiniteInput` for NaN / ±∞ entries in any input.
    pub fn estimate(
        phi: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, eps: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
    ) -> DiscretizationResult<Self> {
        let n = validate_square("phi", phi)?;
        validate_grid(z)?;
        validate_shocks(eps)?;
        validate_columns("x", x, n)?;
        validate_columns("eps", eps, n)?;
        validate_columns("z", z, n)?;
        validate_finite("phi", &phi)?;
        validate_finite("x", &x)?;
        validate_finite("eps", &eps)?;
        validate_finite("z", &z)?;

        let n_z = z.nrows();
        let expected = x.dot(&phi.t());

        let assignments = assign_buckets(x, z);
        let mut counts = vec![0_usize; n_z];
        for &j in &assignments {
            counts[j] += 1;
        }

        let pmfs = row_pmfs(&expected, eps, z);
        let mut p = Array2::<f64>::zeros((n_z, n_z));
        for (pmf, &j) in pmfs.iter().zip(&assignments) {
            let mut row = p.row_mut(j);
            row += pmf;
        }
        for (mut row, &count) in p.outer_iter_mut().zip(&counts) {
            if count > 0 {
                row /= count as f64;
            }
        }

        Ok(Self { p, assignments, counts })
    }

    pub fn p(&self) -> &Array2<f64> {
        &self.p
    }

    pub fn into_p(self) -> Array2<f64> {
        self.p
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Grid indices that no sample row was assigned to; their rows of `p`
    /// are all zero.
    pub fn unvisited(&self) -> Vec<usize> {
        self.counts.iter().enumerate().filter(|&(_, &c)| c == 0).map(|(j, _)| j).collect()
    }

    /// `true` if every visited row sums to one within `tol` and every
    /// unvisited row is exactly zero.
    pub fn is_row_stochastic(&self, tol: f64) -> bool {
        self.p.outer_iter().zip(&self.counts).all(|(row, &count)| {
            if count > 0 {
                (row.sum() - 1.0).abs() <= tol && row.iter().all(|&v| v >= 0.0)
            } else {
                row.iter().all(|&v| v == 0.0)
            }
        })
    }
}

/// Estimate the grid transition matrix and return only `P`.
///
/// See [`TransitionOutcome::estimate`] for parameters and errors.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use var_markov::discretization::trans_prob;
/// let phi = array![[0.5]];
/// let z = array![[-1.0], [0.0], [1.0]];
/// let x = array![[-1.0], [0.0], [1.0], [0.0]];
/// let eps = array![[-0.1], [0.1]];
/// let p = trans_prob(phi.view(), x.view(), eps.view(), z.view()).unwrap();
/// for row in p.outer_iter() {
///     assert!((row.sum() - 1.0).abs() < 1e-12);
/// }
/// ```
pub fn trans_prob(
    phi: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, eps: ArrayView2<'_, f64>,
    z: ArrayView2<'_, f64>,
) -> DiscretizationResult<Array2<f64>> {
    TransitionOutcome::estimate(phi, x, eps, z).map(TransitionOutcome::into_p)
}

// ---- Helper Methods ----

#[cfg(not(feature = "parallel"))]
fn assign_buckets(x: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>) -> Vec<usize> {
    x.outer_iter().map(|row| nearest_index(row, z)).collect()
}

#[cfg(feature = "parallel")]
fn assign_buckets(x: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>) -> Vec<usize> {
    (0..x.nrows()).into_par_iter().map(|i| nearest_index(x.row(i), z)).collect()
}

#[cfg(not(feature = "parallel"))]
fn row_pmfs(
    expected: &Array2<f64>, eps: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>,
) -> Vec<Array1<f64>> {
    expected.outer_iter().map(|e_x| conditional_pmf(e_x, eps, z)).collect()
}

#[cfg(feature = "parallel")]
fn row_pmfs(
    expected: &Array2<f64>, eps: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>,
) -> Vec<Array1<f64>> {
    (0..expected.nrows())
        .into_par_iter()
        .map(|i| conditional_pmf(expected.row(i), eps, z))
        .collect()
}
