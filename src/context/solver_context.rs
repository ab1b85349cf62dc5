//! Factory for the iterative methods.
//!
//! `SolverContext` pairs a [`SolverKind`] with its stopping criteria and dispatches `solve` to the
//! matching concrete solver, so callers can pick a method at run time (e.g. from the command line).
//!
//! # Supported Solvers
//! - Jacobi, Gauss-Seidel, Gradient Descent (steepest descent), Conjugate Gradient
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems. SIAM.

use std::fmt;
use std::str::FromStr;

use faer::Mat;
use thiserror::Error;

use crate::core::traits::Real;
use crate::error::Result;
use crate::solver::{CgSolver, GaussSeidelSolver, GradientDescentSolver, JacobiSolver, LinearSolver};
use crate::utils::convergence::{Convergence, Info, SolveOptions};

/// Enum representing the available iterative methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverKind {
    /// Jacobi (simultaneous displacements)
    Jacobi,
    /// Gauss-Seidel (successive displacements)
    GaussSeidel,
    /// Steepest descent with exact line search
    GradientDescent,
    /// Conjugate Gradient (CG) method (for SPD matrices)
    ConjugateGradient,
}

impl SolverKind {
    /// Every method, in reporting order.
    pub const ALL: [SolverKind; 4] = [
        SolverKind::Jacobi,
        SolverKind::GaussSeidel,
        SolverKind::GradientDescent,
        SolverKind::ConjugateGradient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Jacobi => "Jacobi",
            SolverKind::GaussSeidel => "Gauss Seidel",
            SolverKind::GradientDescent => "Gradient Descent",
            SolverKind::ConjugateGradient => "Conjugate Gradient",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown solver `{0}` (expected jacobi, gauss-seidel, gradient-descent or cg)")]
pub struct ParseSolverKindError(pub String);

impl FromStr for SolverKind {
    type Err = ParseSolverKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "jacobi" => Ok(SolverKind::Jacobi),
            "gauss-seidel" | "gs" => Ok(SolverKind::GaussSeidel),
            "gradient-descent" | "gd" => Ok(SolverKind::GradientDescent),
            "conjugate-gradient" | "cg" => Ok(SolverKind::ConjugateGradient),
            _ => Err(ParseSolverKindError(s.to_string())),
        }
    }
}

/// A method choice together with its stopping criteria.
#[derive(Debug, Clone, Copy)]
pub struct SolverContext<T> {
    /// The method to run
    pub kind: SolverKind,
    /// Instance defaults for tolerance and iteration cap
    pub conv: Convergence<T>,
}

impl<T: Real> SolverContext<T> {
    pub fn new(kind: SolverKind, tol: T, max_iters: usize) -> Self {
        Self { kind, conv: Convergence::new(tol, max_iters) }
    }
}

impl SolverContext<f64> {
    /// `kind` with the fallback tolerance and iteration cap.
    pub fn with_defaults(kind: SolverKind) -> Self {
        Self { kind, conv: Convergence::default() }
    }
}

impl<T: Real> LinearSolver<T> for SolverContext<T> {
    fn solve_with(
        &self,
        a: &Mat<T>,
        b: &[T],
        opts: &SolveOptions<'_, T>,
    ) -> Result<(Vec<T>, Info<T>)> {
        let Convergence { tol, max_iters } = self.conv;
        match self.kind {
            SolverKind::Jacobi => JacobiSolver::new(tol, max_iters).solve_with(a, b, opts),
            SolverKind::GaussSeidel => GaussSeidelSolver::new(tol, max_iters).solve_with(a, b, opts),
            SolverKind::GradientDescent => {
                GradientDescentSolver::new(tol, max_iters).solve_with(a, b, opts)
            }
            SolverKind::ConjugateGradient => CgSolver::new(tol, max_iters).solve_with(a, b, opts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("Jacobi".parse(), Ok(SolverKind::Jacobi));
        assert_eq!("gauss_seidel".parse(), Ok(SolverKind::GaussSeidel));
        assert_eq!("gd".parse(), Ok(SolverKind::GradientDescent));
        assert_eq!(" CG ".parse(), Ok(SolverKind::ConjugateGradient));
        assert_eq!(
            "lu".parse::<SolverKind>(),
            Err(ParseSolverKindError("lu".to_string()))
        );
    }

    #[test]
    fn display_matches_report_names() {
        let names: Vec<String> = SolverKind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Jacobi", "Gauss Seidel", "Gradient Descent", "Conjugate Gradient"]);
    }

    #[test]
    fn context_dispatches_to_each_method() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j { 4.0 } else { 1.0 });
        let b = vec![6.0, 6.0, 6.0];
        for kind in SolverKind::ALL {
            let (x, info) = SolverContext::with_defaults(kind).solve(&a, &b).unwrap();
            assert!(info.converged, "{kind} did not converge");
            for xi in x {
                assert!((xi - 1.0).abs() < 1e-7, "{kind}: xi = {xi}");
            }
        }
    }
}
