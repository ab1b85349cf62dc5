//! Convergence bookkeeping and reporting helpers.

pub mod convergence;
pub mod report;

pub use convergence::{relative_residual, Convergence, Info, SolveOptions};
pub use report::{relative_error, MethodReport};
