//! Command-line or API options for a comparison run.
//!
//! `RunOptions` names the system to load and the stopping criteria every selected method is run
//! with. `validate` performs the input checks that happen before any file is parsed: the files
//! must exist, and the tolerance must be finite and no smaller than [`MIN_TOL`].

use std::path::PathBuf;

use thiserror::Error;

use crate::context::SolverKind;
use crate::utils::convergence::DEFAULT_MAX_ITERS;

/// Smallest accepted relative-residual tolerance.
pub const MIN_TOL: f64 = 1.0e-14;
/// Tolerance used by a run unless overridden.
pub const DEFAULT_RUN_TOL: f64 = 1.0e-10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("tolerance must be finite, got {0}")]
    NonFiniteTolerance(f64),
    #[error("tolerance {0:e} is below the minimum of {min:e}", min = MIN_TOL)]
    ToleranceTooSmall(f64),
    #[error("no solver selected")]
    NoMethods,
}

/// Inputs and stopping criteria for a comparison run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Matrix Market file holding `A`
    pub matrix: PathBuf,
    /// Optional Matrix Market file holding the exact solution (defaults to all ones)
    pub solution: Option<PathBuf>,
    /// Relative-residual tolerance
    pub tol: f64,
    /// Iteration cap per method
    pub max_iter: usize,
    /// Methods to run, in order
    pub methods: Vec<SolverKind>,
}

impl RunOptions {
    pub fn new(matrix: impl Into<PathBuf>) -> Self {
        Self {
            matrix: matrix.into(),
            solution: None,
            tol: DEFAULT_RUN_TOL,
            max_iter: DEFAULT_MAX_ITERS,
            methods: SolverKind::ALL.to_vec(),
        }
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        for path in std::iter::once(&self.matrix).chain(self.solution.as_ref()) {
            if !path.is_file() {
                return Err(OptionsError::MissingFile(path.clone()));
            }
        }
        if !self.tol.is_finite() {
            return Err(OptionsError::NonFiniteTolerance(self.tol));
        }
        if self.tol < MIN_TOL {
            return Err(OptionsError::ToleranceTooSmall(self.tol));
        }
        if self.methods.is_empty() {
            return Err(OptionsError::NoMethods);
        }
        Ok(())
    }
}
