use std::fmt;

use thiserror::Error;

/// Result type alias using matiter's solver error.
pub type Result<T> = std::result::Result<T, SolverError>;

// Unified error type for the solver core

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("dimension mismatch: {operand} has length {found}, expected {expected}")]
    DimensionMismatch {
        operand: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("singular system: {0}")]
    SingularSystem(Singularity),
}

/// The divisor that vanished inside an update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Singularity {
    /// `A[row, row] == 0`, so the Jacobi/Gauss-Seidel component divide is undefined.
    ZeroDiagonal { row: usize },
    /// `dᵀ A d == 0` for the current search direction `d`, including `d = 0`.
    ZeroCurvature { iteration: usize },
}

impl fmt::Display for Singularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Singularity::ZeroDiagonal { row } => write!(f, "zero diagonal entry at row {row}"),
            Singularity::ZeroCurvature { iteration } => {
                write!(f, "search direction has zero A-energy at iteration {iteration}")
            }
        }
    }
}
