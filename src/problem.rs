//! A linear system with a known exact solution.

use std::path::Path;

use faer::Mat;
use thiserror::Error;

use crate::core::wrappers::mul_vec;
use crate::error::SolverError;
use crate::matrix::market::{load_matrix_market, load_vector, MarketError};

#[derive(Error, Debug)]
pub enum ProblemError {
    #[error(transparent)]
    Market(#[from] MarketError),
    #[error(transparent)]
    Dimension(#[from] SolverError),
}

/// `A`, the exact solution `x` and the right-hand side `b = A·x` built from it.
#[derive(Clone, Debug)]
pub struct LinearProblem {
    pub a: Mat<f64>,
    pub x_exact: Vec<f64>,
    pub b: Vec<f64>,
}

impl LinearProblem {
    /// Build `b = A·x_exact`; `x_exact` defaults to all ones.
    pub fn new(a: Mat<f64>, x_exact: Option<Vec<f64>>) -> Result<Self, SolverError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(SolverError::DimensionMismatch {
                operand: "A (columns)",
                expected: n,
                found: a.ncols(),
            });
        }
        let x_exact = x_exact.unwrap_or_else(|| vec![1.0; n]);
        if x_exact.len() != n {
            return Err(SolverError::DimensionMismatch {
                operand: "x_exact",
                expected: n,
                found: x_exact.len(),
            });
        }
        let b = mul_vec(&a, &x_exact);
        Ok(Self { a, x_exact, b })
    }

    /// Load `A` (and optionally the exact solution) from Matrix Market files.
    pub fn load<P: AsRef<Path>>(matrix: P, solution: Option<P>) -> Result<Self, ProblemError> {
        let a = load_matrix_market(matrix)?;
        let x_exact = solution.map(load_vector).transpose()?;
        Ok(Self::new(a, x_exact)?)
    }

    pub fn dim(&self) -> usize {
        self.b.len()
    }
}
