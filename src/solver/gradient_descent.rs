//! Steepest descent with exact line search on `½xᵀAx − bᵀx`.
//!
//! Each step moves along the residual `r = b − A·x` by `α = rᵀr / rᵀAr`. Converges for any SPD
//! matrix at a rate set by its condition number.

use faer::Mat;

use crate::core::traits::{InnerProduct, MatVec, Real};
use crate::core::wrappers::{mul_vec, scaled_dot};
use crate::error::{Result, Singularity, SolverError};
use crate::solver::{drive, LinearSolver, Start, UpdateRule};
use crate::utils::convergence::{residual_scale, Convergence, Info, SolveOptions};

pub struct GradientDescentSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Real> GradientDescentSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters) }
    }
}

impl Default for GradientDescentSolver<f64> {
    fn default() -> Self {
        Self { conv: Convergence::default() }
    }
}

pub struct GradientDescentState<T> {
    r: Vec<T>,
    ar: Vec<T>,
}

impl<T: Real> UpdateRule<T> for GradientDescentSolver<T> {
    type State = GradientDescentState<T>;
    const NAME: &'static str = "Gradient Descent";

    fn init(&self, a: &Mat<T>, b: &[T], x: &[T], tol: T) -> Result<Start<Self::State>> {
        let r: Vec<T> = mul_vec(a, x)
            .into_iter()
            .zip(b)
            .map(|(ax, &bi)| bi - ax)
            .collect();
        // r = 0 would make rᵀAr vanish; catch it before the first step
        if ().norm(r.as_slice()) <= tol * residual_scale(b) {
            return Ok(Start::Converged);
        }
        let ar = vec![T::zero(); r.len()];
        Ok(Start::Iterate(GradientDescentState { r, ar }))
    }

    fn step(
        &self,
        a: &Mat<T>,
        _b: &[T],
        x: &mut [T],
        state: &mut GradientDescentState<T>,
        iteration: usize,
    ) -> Result<()> {
        let ip = ();
        let (r, ar) = (state.r.as_mut_slice(), state.ar.as_mut_slice());
        a.matvec(&*r, &mut *ar);
        // both quadratic forms are taken on r/‖r‖, so α stays finite for any finite r
        let r_norm = ip.norm(&*r);
        let rar = if r_norm == T::zero() {
            T::zero()
        } else {
            scaled_dot(&*r, &*ar, r_norm)
        };
        if rar == T::zero() {
            return Err(SolverError::SingularSystem(Singularity::ZeroCurvature { iteration }));
        }
        let alpha = scaled_dot(&*r, &*r, r_norm) / rar;
        for (xj, &rj) in x.iter_mut().zip(r.iter()) {
            *xj = *xj + alpha * rj;
        }
        for (rj, &arj) in r.iter_mut().zip(ar.iter()) {
            *rj = *rj - alpha * arj;
        }
        Ok(())
    }
}

impl<T: Real> LinearSolver<T> for GradientDescentSolver<T> {
    fn solve_with(
        &self,
        a: &Mat<T>,
        b: &[T],
        opts: &SolveOptions<'_, T>,
    ) -> Result<(Vec<T>, Info<T>)> {
        drive(self, &self.conv, a, b, opts)
    }
}
