//! Human-readable per-method reports.

use std::fmt;

use crate::core::traits::{InnerProduct, Real};
use crate::utils::convergence::Info;

/// `‖x − x_exact‖₂ / ‖x_exact‖₂`, falling back to the absolute error when `x_exact` is zero.
pub fn relative_error<T: Real>(x: &[T], x_exact: &[T]) -> T {
    assert_eq!(x.len(), x_exact.len(), "Vectors must have the same length");
    let diff: Vec<T> = x.iter().zip(x_exact).map(|(&a, &e)| a - e).collect();
    let scale = ().norm(x_exact);
    let err = ().norm(diff.as_slice());
    if scale == T::zero() { err } else { err / scale }
}

/// One method's outcome against a known exact solution.
#[derive(Debug, Clone)]
pub struct MethodReport<'a, T> {
    pub name: &'a str,
    pub rel_error: T,
    pub info: Info<T>,
}

impl<'a, T: Real> MethodReport<'a, T> {
    pub fn new(name: &'a str, x: &[T], x_exact: &[T], info: Info<T>) -> Self {
        Self {
            name,
            rel_error: relative_error(x, x_exact),
            info,
        }
    }
}

impl<T: Real> fmt::Display for MethodReport<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Solver", self.name)?;
        writeln!(f, "  Rel. error:\t{:e}", self.rel_error)?;
        writeln!(f, "  Iterations:\t{}", self.info.iterations)?;
        writeln!(f, "  Converged:\t{}", self.info.converged)?;
        writeln!(f, "  Residual:\t{:e}", self.info.residual)?;
        writeln!(f, "  Time elapsed:\t{:.6}s", self.info.time.as_secs_f64())
    }
}
