//! Jacobi iteration: `x_new[i] = (b[i] − Σ_{j≠i} A[i,j]·x_old[j]) / A[i,i]`.
//!
//! Every component is computed from a frozen snapshot of the previous iterate, so the sweep is
//! order-independent and runs row-parallel under the `rayon` feature. Converges when the
//! spectral radius of `D⁻¹R` is below one, e.g. for strictly diagonally dominant systems.

use faer::{Mat, MatRef};

use crate::core::traits::Real;
use crate::error::Result;
use crate::solver::{drive, nonzero_diagonal, LinearSolver, Start, UpdateRule};
use crate::utils::convergence::{Convergence, Info, SolveOptions};

pub struct JacobiSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Real> JacobiSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters) }
    }
}

impl Default for JacobiSolver<f64> {
    fn default() -> Self {
        Self { conv: Convergence::default() }
    }
}

pub struct JacobiState<T> {
    diag: Vec<T>,
    prev: Vec<T>,
}

/// `(b[i] − Σ_{j≠i} A[i,j]·x[j]) / d`.
#[inline]
fn component<T: Real>(a: MatRef<'_, T>, b: T, d: T, i: usize, x: &[T]) -> T {
    let sigma = (0..a.ncols())
        .filter(|&j| j != i)
        .fold(T::zero(), |acc, j| acc + a[(i, j)] * x[j]);
    (b - sigma) / d
}

impl<T: Real> UpdateRule<T> for JacobiSolver<T> {
    type State = JacobiState<T>;
    const NAME: &'static str = "Jacobi";

    fn init(&self, a: &Mat<T>, _b: &[T], x: &[T], _tol: T) -> Result<Start<JacobiState<T>>> {
        Ok(Start::Iterate(JacobiState {
            diag: nonzero_diagonal(a)?,
            prev: x.to_vec(),
        }))
    }

    fn step(
        &self,
        a: &Mat<T>,
        b: &[T],
        x: &mut [T],
        state: &mut JacobiState<T>,
        _iteration: usize,
    ) -> Result<()> {
        state.prev.copy_from_slice(x);
        let a = a.as_ref();
        let (diag, prev) = (&state.diag, &state.prev);
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.par_iter_mut()
                .enumerate()
                .for_each(|(i, xi)| *xi = component(a, b[i], diag[i], i, prev));
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, xi) in x.iter_mut().enumerate() {
                *xi = component(a, b[i], diag[i], i, prev);
            }
        }
        Ok(())
    }
}

impl<T: Real> LinearSolver<T> for JacobiSolver<T> {
    fn solve_with(
        &self,
        a: &Mat<T>,
        b: &[T],
        opts: &SolveOptions<'_, T>,
    ) -> Result<(Vec<T>, Info<T>)> {
        drive(self, &self.conv, a, b, opts)
    }
}
