//! Convergence configuration, per-call overrides, the result record and the residual evaluator.

use std::time::Duration;

use faer::Mat;

use crate::core::traits::{InnerProduct, MatVec, Real};

/// Fallback relative-residual tolerance.
pub const DEFAULT_TOL: f64 = 1.0e-8;
/// Fallback iteration cap.
pub const DEFAULT_MAX_ITERS: usize = 20_000;

/// Stopping criteria owned by a solver instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

impl<T: Real> Convergence<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { tol, max_iters }
    }

    /// Effective `(tol, max_iters)` for one call; the instance itself is left untouched.
    pub fn resolve(&self, opts: &SolveOptions<'_, T>) -> (T, usize) {
        (
            opts.tol.unwrap_or(self.tol),
            opts.max_iter.unwrap_or(self.max_iters),
        )
    }
}

impl Default for Convergence<f64> {
    fn default() -> Self {
        Self::new(DEFAULT_TOL, DEFAULT_MAX_ITERS)
    }
}

/// Per-call inputs beyond `A` and `b`.
#[derive(Clone, Copy, Debug)]
pub struct SolveOptions<'a, T> {
    /// Iteration seed; the zero vector when absent. Never mutated.
    pub x0: Option<&'a [T]>,
    /// Overrides the instance tolerance for this call only.
    pub tol: Option<T>,
    /// Overrides the instance iteration cap for this call only.
    pub max_iter: Option<usize>,
}

impl<'a, T> SolveOptions<'a, T> {
    pub fn new() -> Self {
        Self {
            x0: None,
            tol: None,
            max_iter: None,
        }
    }
    pub fn with_x0(mut self, x0: &'a [T]) -> Self {
        self.x0 = Some(x0);
        self
    }
    pub fn with_tol(mut self, tol: T) -> Self {
        self.tol = Some(tol);
        self
    }
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }
}

impl<T> Default for SolveOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one `solve` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Info<T> {
    pub converged: bool,
    /// Update steps actually applied.
    pub iterations: usize,
    /// Relative residual of the returned iterate.
    pub residual: T,
    /// Wall-clock time of the iteration loop.
    pub time: Duration,
}

/// Denominator of the relative residual: `‖b‖₂`, or one when `b` is the zero vector.
pub fn residual_scale<T: Real>(b: &[T]) -> T {
    let b_norm = ().norm(b);
    if b_norm == T::zero() { T::one() } else { b_norm }
}

/// Relative residual `‖A·x − b‖₂ / ‖b‖₂`.
///
/// When `b` is the zero vector the absolute residual `‖A·x‖₂` is returned instead of NaN/Inf.
///
/// # Panics
/// Panics if `b` or `x` do not match the dimensions of `a`.
pub fn relative_residual<T: Real>(a: &Mat<T>, b: &[T], x: &[T]) -> T {
    let mut r = vec![T::zero(); b.len()];
    a.matvec(x, r.as_mut_slice());
    for (ri, &bi) in r.iter_mut().zip(b) {
        *ri = *ri - bi;
    }
    ().norm(r.as_slice()) / residual_scale(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn residual_is_relative_to_rhs() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 2.0 } else { 0.0 });
        let b = vec![2.0, 0.0];
        // A x - b = [0, 2] -> 2 / 2
        let r = relative_residual(&a, &b, &[1.0, 1.0]);
        assert_abs_diff_eq!(r, 1.0, epsilon = 1e-15);
        assert_eq!(relative_residual(&a, &b, &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn zero_rhs_falls_back_to_absolute_residual() {
        let a = Mat::from_fn(2, 2, |i, j| if i == j { 1.0 } else { 0.0 });
        let r = relative_residual(&a, &[0.0, 0.0], &[3.0, 4.0]);
        assert_abs_diff_eq!(r, 5.0, epsilon = 1e-15);
        assert_eq!(relative_residual(&a, &[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn overrides_do_not_touch_instance_defaults() {
        let conv = Convergence::default();
        let opts = SolveOptions::new().with_tol(1e-3).with_max_iter(7);
        assert_eq!(conv.resolve(&opts), (1e-3, 7));
        assert_eq!(conv.resolve(&SolveOptions::default()), (DEFAULT_TOL, DEFAULT_MAX_ITERS));
        assert_eq!(conv.tol, DEFAULT_TOL);
    }
}
