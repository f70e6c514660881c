//! var_markov — Markov-chain discretization of vector autoregressions.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the discretization kernels to Python via the `_var_markov` extension
//! module. When the `python-bindings` feature is enabled, this module defines
//! the Python-facing functions, classes, and the `discretization` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`discretization`) as the public crate
//!   surface.
//! - Define `#[pyfunction]`s and `#[pyclass]` wrappers for the Lyapunov
//!   solver, nearest-grid search, conditional PMF, and transition matrix.
//! - Register the `var_markov.discretization` submodule so that dot-notation
//!   imports work from Python.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in `discretization`; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Python inputs are converted to contiguous or strided `f64` views; shape
//!   checks are left to the Rust kernels so both surfaces report the same
//!   errors.
//!
//! Conventions
//! -----------
//! - Grid indices returned to Python are 0-based.
//! - Errors from the kernels surface as `ValueError` with the Rust
//!   `Display` message.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in `discretization`
//!   and by `tests/integration_var_pipeline.rs`. The PyO3 layer is left to
//!   Python-level smoke tests.

pub mod discretization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    discretization::{LyapunovOptions, LyapunovOutcome, TransitionOutcome},
    utils::{extract_f64_matrix, extract_f64_vector},
};

/// Lyapunov — Python-facing wrapper for the power-series Lyapunov solver.
///
/// Purpose
/// -------
/// Run [`LyapunovOutcome::solve`] from Python and expose the solution
/// together with its convergence diagnostics.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Lyapunov(phi, sigma, maxit=1000, tol=1e-8, printit=False)`:
/// - `phi`, `sigma`: square 2-D array-likes of equal size.
/// - `maxit`: positive iteration cap.
/// - `tol`: non-negative stopping tolerance.
/// - `printit`: print the iteration count and final term norm.
///
/// Notes
/// -----
/// - Native Rust code should call [`LyapunovOutcome::solve`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "var_markov.discretization")]
pub struct Lyapunov {
    inner: LyapunovOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Lyapunov {
    #[new]
    #[pyo3(
        text_signature = "(phi, sigma, /, maxit=1000, tol=1e-8, printit=False)",
        signature = (phi, sigma, maxit = 1000, tol = 1e-8, printit = false)
    )]
    pub fn new<'py>(
        py: Python<'py>, phi: &Bound<'py, PyAny>, sigma: &Bound<'py, PyAny>, maxit: usize,
        tol: f64, printit: bool,
    ) -> PyResult<Lyapunov> {
        let phi = extract_f64_matrix(py, "phi", phi)?;
        let sigma = extract_f64_matrix(py, "sigma", sigma)?;
        let opts = LyapunovOptions::new(maxit, tol, printit)?;
        let inner = LyapunovOutcome::solve(phi.as_array(), sigma.as_array(), &opts)?;
        Ok(Lyapunov { inner })
    }

    /// The accumulated solution Λ.
    #[getter]
    pub fn lam<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.lambda().clone().into_pyarray(py)
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations()
    }

    #[getter]
    pub fn diff(&self) -> f64 {
        self.inner.diff()
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged()
    }
}

/// TransitionEstimate — Python-facing wrapper for the Monte Carlo
/// transition matrix.
///
/// Purpose
/// -------
/// Run [`TransitionOutcome::estimate`] from Python and expose the matrix
/// together with the bucket bookkeeping, so callers can detect grid points
/// that the sample never visited.
///
/// Parameters
/// ----------
/// Constructed from Python via `TransitionEstimate(phi, x, eps, z)` with
/// 2-D array-likes of conformable shapes.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "var_markov.discretization")]
pub struct TransitionEstimate {
    inner: TransitionOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TransitionEstimate {
    #[new]
    #[pyo3(text_signature = "(phi, x, eps, z, /)")]
    pub fn new<'py>(
        py: Python<'py>, phi: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
        eps: &Bound<'py, PyAny>, z: &Bound<'py, PyAny>,
    ) -> PyResult<TransitionEstimate> {
        let phi = extract_f64_matrix(py, "phi", phi)?;
        let x = extract_f64_matrix(py, "x", x)?;
        let eps = extract_f64_matrix(py, "eps", eps)?;
        let z = extract_f64_matrix(py, "z", z)?;
        let inner =
            TransitionOutcome::estimate(phi.as_array(), x.as_array(), eps.as_array(), z.as_array())?;
        Ok(TransitionEstimate { inner })
    }

    /// The nZ × nZ transition matrix.
    #[getter]
    pub fn p<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.inner.p().clone().into_pyarray(py)
    }

    /// Number of sample rows assigned to each grid point.
    #[getter]
    pub fn counts(&self) -> Vec<usize> {
        self.inner.counts().to_vec()
    }

    /// Grid index of each sample row.
    #[getter]
    pub fn assignments(&self) -> Vec<usize> {
        self.inner.assignments().to_vec()
    }

    /// Grid indices with no sample rows; their rows of `p` are zero.
    #[getter]
    pub fn unvisited(&self) -> Vec<usize> {
        self.inner.unvisited()
    }
}

/// Solve Λ = ΦΛΦᵗ + Σ and return Λ.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "lyapunov_eq", signature = (phi, sigma, maxit = 1000, tol = 1e-8, printit = false))]
fn py_lyapunov_eq<'py>(
    py: Python<'py>, phi: &Bound<'py, PyAny>, sigma: &Bound<'py, PyAny>, maxit: usize, tol: f64,
    printit: bool,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let phi = extract_f64_matrix(py, "phi", phi)?;
    let sigma = extract_f64_matrix(py, "sigma", sigma)?;
    let opts = LyapunovOptions::new(maxit, tol, printit)?;
    let lambda = discretization::lyapunov_eq(phi.as_array(), sigma.as_array(), &opts)?;
    Ok(lambda.into_pyarray(py))
}

/// 0-based index of the row of `z` nearest to `x`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "find_nearest")]
fn py_find_nearest<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, z: &Bound<'py, PyAny>,
) -> PyResult<usize> {
    let x = extract_f64_vector(py, "x", x)?;
    let z = extract_f64_matrix(py, "z", z)?;
    Ok(discretization::find_nearest(x.as_array(), z.as_array())?)
}

/// Grid PMF of `e_x + eps[i]` over the shock rows.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "p_hat")]
fn py_p_hat<'py>(
    py: Python<'py>, e_x: &Bound<'py, PyAny>, eps: &Bound<'py, PyAny>, z: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let e_x = extract_f64_vector(py, "e_x", e_x)?;
    let eps = extract_f64_matrix(py, "eps", eps)?;
    let z = extract_f64_matrix(py, "z", z)?;
    let p = discretization::p_hat(e_x.as_array(), eps.as_array(), z.as_array())?;
    Ok(p.into_pyarray(py))
}

/// Monte Carlo transition matrix on the grid `z`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "trans_prob")]
fn py_trans_prob<'py>(
    py: Python<'py>, phi: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>, eps: &Bound<'py, PyAny>,
    z: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let phi = extract_f64_matrix(py, "phi", phi)?;
    let x = extract_f64_matrix(py, "x", x)?;
    let eps = extract_f64_matrix(py, "eps", eps)?;
    let z = extract_f64_matrix(py, "z", z)?;
    let p =
        discretization::trans_prob(phi.as_array(), x.as_array(), eps.as_array(), z.as_array())?;
    Ok(p.into_pyarray(py))
}

/// _var_markov — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_var_markov` Python module, attach the `discretization`
/// submodule, and register it in `sys.modules` so that
/// `import var_markov.discretization` works.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or updating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _var_markov<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let discretization_mod = PyModule::new(_py, "discretization")?;
    discretization_module(_py, m, &discretization_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("var_markov.discretization", discretization_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn discretization_module<'py>(
    _py: Python, var_markov: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Lyapunov>()?;
    m.add_class::<TransitionEstimate>()?;
    m.add_function(wrap_pyfunction!(py_lyapunov_eq, m)?)?;
    m.add_function(wrap_pyfunction!(py_find_nearest, m)?)?;
    m.add_function(wrap_pyfunction!(py_p_hat, m)?)?;
    m.add_function(wrap_pyfunction!(py_trans_prob, m)?)?;
    var_markov.add_submodule(m)?;
    Ok(())
}
