//! Gauss-Seidel iteration.
//!
//! Sweeps `i = 0..n` in order, overwriting `x[i]` in place so later rows read the components
//! already updated in the same sweep. The read-after-write chain is what distinguishes it from
//! Jacobi, so the sweep is kept sequential even when `rayon` is enabled. Converges for any SPD
//! matrix.

use faer::Mat;

use crate::core::traits::Real;
use crate::error::Result;
use crate::solver::{drive, nonzero_diagonal, LinearSolver, Start, UpdateRule};
use crate::utils::convergence::{Convergence, Info, SolveOptions};

pub struct GaussSeidelSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Real> GaussSeidelSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters) }
    }
}

impl Default for GaussSeidelSolver<f64> {
    fn default() -> Self {
        Self { conv: Convergence::default() }
    }
}

impl<T: Real> UpdateRule<T> for GaussSeidelSolver<T> {
    /// The checked diagonal.
    type State = Vec<T>;
    const NAME: &'static str = "Gauss-Seidel";

    fn init(&self, a: &Mat<T>, _b: &[T], _x: &[T], _tol: T) -> Result<Start<Vec<T>>> {
        Ok(Start::Iterate(nonzero_diagonal(a)?))
    }

    fn step(
        &self,
        a: &Mat<T>,
        b: &[T],
        x: &mut [T],
        diag: &mut Vec<T>,
        _iteration: usize,
    ) -> Result<()> {
        let n = x.len();
        for i in 0..n {
            let mut sigma = T::zero();
            // strict lower part sees this sweep's values
            for j in 0..i {
                sigma = sigma + a[(i, j)] * x[j];
            }
            for j in (i + 1)..n {
                sigma = sigma + a[(i, j)] * x[j];
            }
            x[i] = (b[i] - sigma) / diag[i];
        }
        Ok(())
    }
}

impl<T: Real> LinearSolver<T> for GaussSeidelSolver<T> {
    fn solve_with(
        &self,
        a: &Mat<T>,
        b: &[T],
        opts: &SolveOptions<'_, T>,
    ) -> Result<(Vec<T>, Info<T>)> {
        drive(self, &self.conv, a, b, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauss_seidel_reads_updated_components() {
        // A = [[4,1],[1,4]], b = [4,8], x0 = 0:
        // x0' = 4/4 = 1, x1' = (8 - 1*1)/4 = 1.75
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 4.0 } else { 1.0 });
        let solver = GaussSeidelSolver::new(1e-300, 1);
        let (x, info) = solver.solve(&a, &[4.0, 8.0]).unwrap();
        assert_eq!(x, vec![1.0, 1.75]);
        assert_eq!(info.iterations, 1);
    }

    #[test]
    fn gauss_seidel_converges_where_jacobi_diverges() {
        // SPD, eigenvalues 2.8, 0.1, 0.1; Jacobi's iteration matrix has spectral radius 1.8.
        let a = Mat::from_fn(3, 3, |i, j| if i == j { 1.0 } else { 0.9 });
        let b = vec![2.8, 2.8, 2.8];
        let (x, info) = GaussSeidelSolver::default().solve(&a, &b).unwrap();
        assert!(info.converged, "Gauss-Seidel did not converge");
        for xi in x {
            assert!((xi - 1.0).abs() < 1e-6, "xi = {}", xi);
        }

        let jacobi = crate::solver::JacobiSolver::new(1e-8, 200);
        let (_, info) = jacobi.solve(&a, &b).unwrap();
        assert!(!info.converged);
    }

    #[test]
    fn gauss_seidel_rejects_zero_diagonal() {
        let a = Mat::from_fn(3, 3, |i, j| if i == j && i == 2 { 0.0 } else if i == j { 2.0 } else { 0.5 });
        let err = GaussSeidelSolver::default().solve(&a, &[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            crate::error::SolverError::SingularSystem(crate::error::Singularity::ZeroDiagonal { row: 2 })
        );
    }
}
