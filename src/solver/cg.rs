//! Conjugate Gradient (unpreconditioned) per Saad §6.1.
//!
//! The direction update `p ← r + β·p` for step k+1 is applied at the start of that step, after
//! the driver has tested step k's iterate. A system that converges is therefore never asked to
//! divide by a vanished `rᵀr`; an exactly zero residual under `tol = 0` surfaces as
//! `ZeroCurvature` because it leaves `p = 0`.

use faer::Mat;

use crate::core::traits::{InnerProduct, MatVec, Real};
use crate::core::wrappers::{mul_vec, scaled_dot};
use crate::error::{Result, Singularity, SolverError};
use crate::solver::{drive, LinearSolver, Start, UpdateRule};
use crate::utils::convergence::{residual_scale, Convergence, Info, SolveOptions};

pub struct CgSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Real> CgSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters) }
    }
}

impl Default for CgSolver<f64> {
    fn default() -> Self {
        Self { conv: Convergence::default() }
    }
}

pub struct CgState<T> {
    r: Vec<T>,
    p: Vec<T>,
    ap: Vec<T>,
    /// `‖r‖` of the residual that formed the current direction.
    r_norm: T,
}

impl<T: Real> UpdateRule<T> for CgSolver<T> {
    type State = CgState<T>;
    const NAME: &'static str = "Conjugate Gradient";

    fn init(&self, a: &Mat<T>, b: &[T], x: &[T], tol: T) -> Result<Start<CgState<T>>> {
        let r: Vec<T> = mul_vec(a, x)
            .into_iter()
            .zip(b)
            .map(|(ax, &bi)| bi - ax)
            .collect();
        let r_norm = ().norm(r.as_slice());
        if r_norm <= tol * residual_scale(b) {
            return Ok(Start::Converged);
        }
        Ok(Start::Iterate(CgState {
            p: r.clone(),
            ap: vec![T::zero(); r.len()],
            r,
            r_norm,
        }))
    }

    fn step(
        &self,
        a: &Mat<T>,
        _b: &[T],
        x: &mut [T],
        state: &mut CgState<T>,
        iteration: usize,
    ) -> Result<()> {
        let ip = ();
        let CgState { r, p, ap, r_norm } = state;
        // β and α come from norm ratios, never from raw squares
        if iteration > 1 {
            let r_norm_new = ip.norm(r.as_slice());
            let ratio = r_norm_new / *r_norm;
            let beta = ratio * ratio;
            for (pj, &rj) in p.iter_mut().zip(r.iter()) {
                *pj = rj + beta * *pj;
            }
            *r_norm = r_norm_new;
        }

        a.matvec(p.as_slice(), ap.as_mut_slice());
        let p_norm = ip.norm(p.as_slice());
        // a vanished residual leaves p = 0 and lands here as well
        let pap = if p_norm == T::zero() {
            T::zero()
        } else {
            scaled_dot(p.as_slice(), ap.as_slice(), p_norm)
        };
        if pap == T::zero() {
            return Err(SolverError::SingularSystem(Singularity::ZeroCurvature { iteration }));
        }
        let ratio = *r_norm / p_norm;
        let alpha = ratio * ratio / pap;
        for (xj, &pj) in x.iter_mut().zip(p.iter()) {
            *xj = *xj + alpha * pj;
        }
        for (rj, &apj) in r.iter_mut().zip(ap.iter()) {
            *rj = *rj - alpha * apj;
        }
        Ok(())
    }
}

impl<T: Real> LinearSolver<T> for CgSolver<T> {
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
    fn cg_solves_simple_spd() {
        // SPD system: [[4,1],[1,3]] x = [1,2]
        let a: Mat<f64> = Mat::from_fn(2, 2, |i, j| [[4.0, 1.0], [1.0, 3.0]][i][j]);
        let b = vec![1.0, 2.0];
        let solver = CgSolver::new(1e-10, 20);
        let (x, info) = solver.solve(&a, &b).unwrap();
        let expected = vec![0.09090909090909091, 0.6363636363636364];
        let tol = 1e-8;
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert!((xi - ei).abs() < tol, "xi = {}, expected = {}", xi, ei);
        }
        assert!(info.converged, "CG did not converge");
        assert!(info.iterations <= 2);
    }

    #[test]
    fn cg_solves_spd() {
        // Symmetric positive definite system
        // A = [[4,1,0],[1,3,1],[0,1,2]]
        // x_true = [1,2,3]
        let data = [[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let a = Mat::from_fn(3, 3, |i, j| data[i][j]);
        let x_true = vec![1.0, 2.0, 3.0];
        let mut b = vec![0.0; 3];
        a.matvec(x_true.as_slice(), b.as_mut_slice());
        let solver = CgSolver::new(1e-10, 100);
        let (x, info) = solver.solve(&a, &b).unwrap();
        let mut r_final = vec![0.0; 3];
        a.matvec(x.as_slice(), r_final.as_mut_slice());
        for i in 0..3 {
            r_final[i] = b[i] - r_final[i];
        }
        let res_norm = r_final.iter().map(|&ri| ri * ri).sum::<f64>().sqrt();
        assert!(res_norm <= 1e-8, "final residual = {:.6}, tol = {:.6}", res_norm, 1e-8);
        assert!(info.converged, "CG did not converge");
        assert!(info.iterations <= 3);
    }

    #[test]
    fn cg_zero_rhs_needs_no_iterations() {
        let a: Mat<f64> = Mat::from_fn(2, 2, |i, j| [[4.0, 1.0], [1.0, 3.0]][i][j]);
        let (x, info) = CgSolver::default().solve(&a, &[0.0, 0.0]).unwrap();
        assert_eq!(x, vec![0.0, 0.0]);
        assert!(info.converged);
        assert_eq!(info.iterations, 0);
        assert_eq!(info.residual, 0.0);
    }

    #[test]
    fn cg_reports_vanishing_curvature() {
        // Indefinite: pᵀAp = 0 for p = r0 = [1, 1].
        let a = Mat::from_fn(2, 2, |i, j| match (i, j) {
            (0, 0) => 1.0,
            (1, 1) => -1.0,
            _ => 0.0,
        });
        let err = CgSolver::default().solve(&a, &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, SolverError::SingularSystem(Singularity::ZeroCurvature { iteration: 1 }));
    }

    #[test]
    fn cg_exact_residual_with_zero_tolerance_is_zero_curvature() {
        // Identity: step 1 lands on b exactly, tol = 0 never accepts it, and step 2 sees p = 0.
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 0.0 });
        let err = CgSolver::new(0.0, 10).solve(&a, &[2.0, 0.0]).unwrap_err();
        assert_eq!(err, SolverError::SingularSystem(Singularity::ZeroCurvature { iteration: 2 }));
    }
}
