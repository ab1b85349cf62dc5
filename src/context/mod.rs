//! Context module for matiter.
//!
//! Provides the factory type that selects one of the iterative methods at run time and carries its
//! stopping criteria.
//!
//! Modules:
//! - [`solver_context`]: `SolverKind` and `SolverContext`.
//!
//! # Example
//! ```rust,ignore
//! use matiter::{LinearSolver, SolverContext, SolverKind};
//! let ctx = SolverContext::with_defaults(SolverKind::ConjugateGradient);
//! let (x, info) = ctx.solve(&a, &b)?;
//! ```

pub mod solver_context;
pub use solver_context::{ParseSolverKindError, SolverContext, SolverKind};
