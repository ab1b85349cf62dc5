//! matiter: classical iterative solvers for dense SPD systems over Faer
//!
//! This crate provides Jacobi, Gauss-Seidel, steepest-descent and conjugate-gradient solvers for
//! dense symmetric positive-definite systems `Ax = b`. All four share a single iteration driver
//! that applies a relative-residual stopping test, enforces the iteration cap, times the loop and
//! reports an [`Info`] record per call.
//!
//! ```rust,ignore
//! use matiter::{CgSolver, LinearSolver, SolveOptions};
//! let solver = CgSolver::new(1e-10, 1000);
//! let (x, info) = solver.solve_with(&a, &b, &SolveOptions::new().with_max_iter(50))?;
//! assert!(info.converged);
//! ```

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod problem;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use matrix::*;
pub use problem::*;
pub use solver::*;
pub use utils::*;
