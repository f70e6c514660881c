//! discretization::conditional — grid PMF of one step ahead given an expected state.
//!
//! Purpose
//! -------
//! Approximate the conditional distribution of `X' = E[X' | X] + ε` on the
//! grid `Z` by pushing each shock draw through the nearest-point projection.
//! Accuracy improves with more shock rows and better coverage of the shock
//! distribution; the draws themselves (Monte Carlo or quadrature nodes) are
//! supplied by the caller.
//!
//! Key behaviors
//! -------------
//! - For every shock row `εᵢ`, locate the grid row nearest to `eX + εᵢ` and
//!   give it mass `1 / nShocks`.
//! - Return a length-`nZ` probability vector whose entries are non-negative
//!   and sum to one.
//!
//! Invariants & assumptions
//! ------------------------
//! - Hits are tallied as integers and divided by `nShocks` once at the end,
//!   so a grid point hit by every shock gets mass exactly `1.0`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the hand-computed scalar case, the sum-to-one property
//!   on a 2-D grid, and the input errors.

use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

use crate::discretization::{
    errors::DiscretizationResult,
    nearest::nearest_index,
    validation::{validate_columns, validate_finite, validate_grid, validate_length, validate_shocks},
};

/// Probability that `eX + ε` is nearest to each grid row.
///
/// Parameters
/// ----------
/// - `e_x`: expected next state, length `n`.
/// - `eps`: shock draws, `nShocks × n`, `nShocks ≥ 1`.
/// - `z`: grid, `nZ × n`, `nZ ≥ 1`.
///
/// Returns
/// -------
/// `Array1<f64>` of length `nZ`: entry `j` is the share of shocks whose
/// shifted state is nearest to `z[j]` (ties to the lowest index).
///
/// Errors
/// ------
/// - `EmptyGrid` / `EmptyShockSet` for zero-row `z` / `eps`.
/// - `DimensionMismatch` if `e_x` or `eps` does not have `z.ncols()` columns.
/// - `NonFiniteInput` for NaN / ±∞ entries.
pub fn p_hat(
    e_x: ArrayView1<'_, f64>, eps: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>,
) -> DiscretizationResult<Array1<f64>> {
    validate_grid(z)?;
    validate_shocks(eps)?;
    let n = z.ncols();
    validate_length("e_x", e_x.len(), n)?;
    validate_columns("eps", eps, n)?;
    validate_finite("e_x", &e_x)?;
    validate_finite("eps", &eps)?;
    validate_finite("z", &z)?;
    Ok(conditional_pmf(e_x, eps, z))
}

pub(crate) fn conditional_pmf(
    e_x: ArrayView1<'_, f64>, eps: ArrayView2<'_, f64>, z: ArrayView2<'_, f64>,
) -> Array1<f64> {
    let mut hits = vec![0_usize; z.nrows()];
    let mut x_prime = Array1::<f64>::zeros(e_x.len());
    for shock in eps.outer_iter() {
        Zip::from(&mut x_prime).and(&e_x).and(&shock).for_each(|xp, &e, &s| *xp = e + s);
        hits[nearest_index(x_prime.view(), z)] += 1;
    }

    let n_shocks = eps.nrows() as f64;
    hits.into_iter().map(|h| h as f64 / n_shocks).collect()
}
