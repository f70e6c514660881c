//! discretization::lyapunov — power-series solver for the discrete Lyapunov equation.
//!
//! Purpose
//! -------
//! Compute the stationary covariance `Λ` of a VAR(1) process
//! `Xₜ₊₁ = Φ Xₜ + εₜ₊₁`, `Var(ε) = Σ`, as the fixed point of
//! `Λ = Φ Λ Φᵗ + Σ`. Grid builders use `Λ` to size the discrete state space.
//!
//! Key behaviors
//! -------------
//! - Sum the truncated Neumann series `Λ = Σₖ Φᵏ Σ (Φᵗ)ᵏ` term by term,
//!   starting from `Λ₀ = T₀ = Σ` and updating `Tₖ = Φ Tₖ₋₁ Φᵗ`,
//!   `Λₖ = Λₖ₋₁ + Tₖ`.
//! - Stop as soon as the max absolute entry of `Tₖ` is `≤ tol`, or after
//!   `max_iter` terms, whichever comes first.
//! - Return a [`LyapunovOutcome`] that records the iteration count, the
//!   final term norm, and whether the tolerance was met.
//!
//! Invariants & assumptions
//! ------------------------
//! - Convergence requires the spectral radius of `Φ` to be `< 1`. This is
//!   not checked: an explosive `Φ` runs to `max_iter` and the accumulated
//!   (divergent) sum is returned with `converged() == false`. Terms that
//!   overflow into NaN count as divergent; `converged()` also requires every
//!   entry of `Λ` to be finite.
//! - Non-convergence is an approximation-quality issue, never an error.
//! - At least one term is always added, so `Φ = 0` returns `Σ` exactly.
//! - `Λ` is symmetric whenever `Σ` is, since every term `Φᵏ Σ (Φᵗ)ᵏ` is.
//!
//! Conventions
//! -----------
//! - "Infinity norm" here means the max absolute entry of the matrix, and is
//!   NaN if any entry is NaN.
//! - With `verbose` set, two lines `iter = k` and `diff = d` go to stdout
//!   after the loop; the `obs_slog` feature also emits a structured record.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the scalar closed form `σ² / (1 − φ²)`, the `Φ = 0`
//!   shortcut, symmetry and the fixed-point residual on a 2 × 2 system, the
//!   non-convergent path, and shape validation.

use ndarray::{Array2, ArrayView2};

use crate::discretization::{
    errors::DiscretizationResult,
    options::LyapunovOptions,
    validation::{validate_columns, validate_finite, validate_square},
};

/// LyapunovOutcome — result of the power-series Lyapunov iteration.
///
/// Fields
/// ------
/// - `lambda`: `Array2<f64>`
///   Accumulated sum `Λ`, shape `n × n`.
/// - `iterations`: `usize`
///   Number of terms added after `Σ`; `1 ≤ iterations ≤ max_iter`.
/// - `diff`: `f64`
///   Max absolute entry of the last term added.
/// - `converged`: `bool`
///   `true` iff `diff ≤ tol` at exit and every entry of `lambda` is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct LyapunovOutcome {
    lambda: Array2<f64>,
    iterations: usize,
    diff: f64,
    converged: bool,
}

impl LyapunovOutcome {
    /// Solve `Λ = Φ Λ Φᵗ + Σ` by power-series summation.
    ///
    /// Parameters
    /// ----------
    /// - `phi`: `n × n` VAR coefficient matrix.
    /// - `sigma`: `n × n` innovation covariance.
    /// - `opts`: stopping rule and verbosity.
    ///
    /// Errors
    /// ------
    /// - `NotSquare` if `phi` or `sigma` is not square.
    /// - `DimensionMismatch` if `sigma` is not the same size as `phi`.
    /// - `NonFiniteInput` if either matrix has a NaN / ±∞ entry.
    /// - `InvalidMaxIter` / `InvalidTolerance` if `opts` breaks the rules of
    ///   [`LyapunovOptions::new`].
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use var_markov::discretization::{LyapunovOptions, LyapunovOutcome};
    /// let phi = array![[0.5]];
    /// let sigma = array![[1.0]];
    /// let out = LyapunovOutcome::solve(phi.view(), sigma.view(), &LyapunovOptions::default())
    ///     .unwrap();
    /// assert!((out.lambda()[[0, 0]] - 4.0 / 3.0).abs() < 1e-7);
    /// assert!(out.converged());
    /// ```
    pub fn solve(
        phi: ArrayView2<'_, f64>, sigma: ArrayView2<'_, f64>, opts: &LyapunovOptions,
    ) -> DiscretizationResult<Self> {
        opts.validate()?;
        let n = validate_square("phi", phi)?;
        validate_square("sigma", sigma)?;
        validate_columns("sigma", sigma, n)?;
        validate_finite("phi", &phi)?;
        validate_finite("sigma", &sigma)?;

        let phi_t = phi.t();
        let mut lambda = sigma.to_owned();
        let mut term = sigma.to_owned();
        let mut iterations = 0;
        let mut diff = f64::INFINITY;

        while iterations < opts.max_iter && (diff > opts.tol || diff.is_nan()) {
            term = phi.dot(&term).dot(&phi_t);
            lambda += &term;
            diff = max_abs(&term);
            iterations += 1;
        }

        let converged = diff <= opts.tol && lambda.iter().all(|v| v.is_finite());
        if opts.verbose {
            report(iterations, diff, converged);
        }

        Ok(Self { lambda, iterations, diff, converged })
    }

    pub fn lambda(&self) -> &Array2<f64> {
        &self.lambda
    }

    pub fn into_lambda(self) -> Array2<f64> {
        self.lambda
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn diff(&self) -> f64 {
        self.diff
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Solve `Λ = Φ Λ Φᵗ + Σ` and return only `Λ`.
///
/// Thin wrapper over [`LyapunovOutcome::solve`] for callers that do not need
/// the convergence diagnostics. Errors are those of `solve`.
pub fn lyapunov_eq(
    phi: ArrayView2<'_, f64>, sigma: ArrayView2<'_, f64>, opts: &LyapunovOptions,
) -> DiscretizationResult<Array2<f64>> {
    LyapunovOutcome::solve(phi, sigma, opts).map(LyapunovOutcome::into_lambda)
}

// ---- Helper Methods ----

// `f64::max` discards NaN, so it has to be carried through explicitly.
fn max_abs(m: &Array2<f64>) -> f64 {
    m.iter().fold(0.0_f64, |acc, &v| {
        if acc.is_nan() || v.is_nan() { f64::NAN } else { acc.max(v.abs()) }
    })
}

#[cfg_attr(not(feature = "obs_slog"), allow(unused_variables))]
fn report(iterations: usize, diff: f64, converged: bool) {
    println!("iter = {iterations}");
    println!("diff = {diff}");

    #[cfg(feature = "obs_slog")]
    log_outcome(iterations, diff, converged);
}

#[cfg(feature = "obs_slog")]
static LOGGER: std::sync::OnceLock<slog::Logger> = std::sync::OnceLock::new();

/// Process-wide solver logger; the async drain thread is started on first use.
#[cfg(feature = "obs_slog")]
fn logger() -> &'static slog::Logger {
    use slog::{Drain, o};

    LOGGER.get_or_init(|| {
        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        slog::Logger::root(drain, o!("solver" => "lyapunov"))
    })
}

#[cfg(feature = "obs_slog")]
fn log_outcome(iterations: usize, diff: f64, converged: bool) {
    slog::info!(logger(), "power series finished";
        "iter" => iterations, "diff" => diff, "converged" => converged);
}
