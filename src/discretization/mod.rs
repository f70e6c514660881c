//! discretization — Markov-chain approximation of vector autoregressions.
//!
//! Purpose
//! -------
//! Replace a continuous VAR(1) process `X' = Φ X + ε`, `Var(ε) = Σ`, by a
//! finite grid `Z` and a transition matrix `P`, so that dynamic-programming
//! and other discrete methods can be applied. The grid, sample path, and
//! shock draws are supplied by the caller; this module only approximates
//! the conditional distribution given those inputs.
//!
//! Key behaviors
//! -------------
//! - [`LyapunovOutcome::solve`] / [`lyapunov_eq`]: stationary covariance
//!   `Λ = ΦΛΦᵗ + Σ` by power-series summation, configured via
//!   [`LyapunovOptions`].
//! - [`find_nearest`]: index of the grid row closest to a state vector,
//!   lowest index on ties.
//! - [`p_hat`]: grid PMF of `eX + ε` over a set of shock draws.
//! - [`TransitionOutcome::estimate`] / [`trans_prob`]: full `nZ × nZ`
//!   transition matrix averaged over the sample rows in each grid cell.
//!
//! Invariants & assumptions
//! ------------------------
//! - Matrices are indexed rows-as-observations: `X`, `eps`, and `Z` are
//!   `(rows × n)` and `Φ`, `Σ` are `n × n`.
//! - All inputs are borrowed immutably and validated up front; nothing is
//!   cached between calls.
//! - The nearest-point tie-break (first minimizer wins) is part of the
//!   contract; estimates are reproducible bit-for-bit for fixed inputs,
//!   with or without the `parallel` feature.
//!
//! Conventions
//! -----------
//! - Errors are reported via [`DiscretizationError`] /
//!   [`DiscretizationResult`]; no routine panics on malformed input.
//! - Non-convergence of the Lyapunov iteration is reported through
//!   [`LyapunovOutcome::converged`], never as an error.
//!
//! Downstream usage
//! ----------------
//! - Compute `Λ` with [`lyapunov_eq`], build a grid spanning a few standard
//!   deviations of `Λ`, simulate a sample path and shock draws, then call
//!   [`trans_prob`] (or [`TransitionOutcome::estimate`] to also inspect
//!   bucket counts and unvisited states).
//! - `use var_markov::discretization::prelude::*;` imports the whole surface.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its kernel and error paths;
//!   `tests/integration_var_pipeline.rs` runs the pipeline end to end.

pub mod conditional;
pub mod errors;
pub mod lyapunov;
pub mod nearest;
pub mod options;
pub mod transition;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::conditional::p_hat;
pub use self::errors::{DiscretizationError, DiscretizationResult};
pub use self::lyapunov::{LyapunovOutcome, lyapunov_eq};
pub use self::nearest::find_nearest;
pub use self::options::LyapunovOptions;
pub use self::transition::{TransitionOutcome, trans_prob};

pub mod prelude {
    pub use super::conditional::p_hat;
    pub use super::errors::{DiscretizationError, DiscretizationResult};
    pub use super::lyapunov::{LyapunovOutcome, lyapunov_eq};
    pub use super::nearest::find_nearest;
    pub use super::options::LyapunovOptions;
    pub use super::transition::{TransitionOutcome, trans_prob};
}
