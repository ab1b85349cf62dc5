//! Iterative solver interfaces and the shared iteration driver.
//!
//! Every method implements only [`UpdateRule`]: how to set up its working state and how to
//! advance the iterate by one step. [`drive`] owns the rest: dimension checks, the zero seed,
//! per-call overrides, the residual-based stopping test and the iteration cap, plus timing and
//! packaging of [`Info`].

use std::time::Instant;

use faer::Mat;
use log::{debug, trace, warn};

use crate::core::traits::Real;
use crate::error::{Result, Singularity, SolverError};
use crate::utils::convergence::{relative_residual, Convergence, Info, SolveOptions};

/// Common interface for the iterative solvers.
pub trait LinearSolver<T: Real> {
    /// Solve A·x = b from the zero seed with the instance's tolerance and iteration cap.
    fn solve(&self, a: &Mat<T>, b: &[T]) -> Result<(Vec<T>, Info<T>)> {
        self.solve_with(a, b, &SolveOptions::default())
    }

    /// Solve A·x = b with an optional seed and per-call `tol`/`max_iter` overrides.
    ///
    /// Non-convergence is not an error; it is reported through `Info::converged`.
    fn solve_with(
        &self,
        a: &Mat<T>,
        b: &[T],
        opts: &SolveOptions<'_, T>,
    ) -> Result<(Vec<T>, Info<T>)>;
}

/// What an update rule reports before the first step.
pub enum Start<S> {
    /// The seed already satisfies the tolerance; no step is taken.
    Converged,
    /// Iterate with this working state.
    Iterate(S),
}

/// Per-iteration update of one method.
pub trait UpdateRule<T: Real> {
    /// Working buffers owned by a single in-flight solve.
    type State;
    /// Display name used in logs.
    const NAME: &'static str;

    /// Build the working state for the seed `x`.
    fn init(&self, a: &Mat<T>, b: &[T], x: &[T], tol: T) -> Result<Start<Self::State>>;

    /// Apply update number `iteration` (1-based) to `x` in place.
    fn step(
        &self,
        a: &Mat<T>,
        b: &[T],
        x: &mut [T],
        state: &mut Self::State,
        iteration: usize,
    ) -> Result<()>;
}

/// Fails with `DimensionMismatch` unless `a` is square and `b`/`x0` match its dimension.
pub fn check_dimensions<T>(a: &Mat<T>, b: &[T], x0: Option<&[T]>) -> Result<()> {
    let n = a.nrows();
    let mismatch = |operand, found| SolverError::DimensionMismatch {
        operand,
        expected: n,
        found,
    };
    if a.ncols() != n {
        return Err(mismatch("A (columns)", a.ncols()));
    }
    if b.len() != n {
        return Err(mismatch("b", b.len()));
    }
    match x0 {
        Some(x0) if x0.len() != n => Err(mismatch("x0", x0.len())),
        _ => Ok(()),
    }
}

/// Diagonal of `a`, failing on the first zero entry.
pub(crate) fn nonzero_diagonal<T: Real>(a: &Mat<T>) -> Result<Vec<T>> {
    (0..a.nrows())
        .map(|i| {
            let d = a[(i, i)];
            if d == T::zero() {
                Err(SolverError::SingularSystem(Singularity::ZeroDiagonal { row: i }))
            } else {
                Ok(d)
            }
        })
        .collect()
}

/// Run `rule` under the uniform stopping, timing and reporting policy.
pub fn drive<R, T>(
    rule: &R,
    conv: &Convergence<T>,
    a: &Mat<T>,
    b: &[T],
    opts: &SolveOptions<'_, T>,
) -> Result<(Vec<T>, Info<T>)>
where
    R: UpdateRule<T>,
    T: Real,
{
    check_dimensions(a, b, opts.x0)?;
    let (tol, max_iter) = conv.resolve(opts);
    let mut x = match opts.x0 {
        Some(x0) => x0.to_vec(),
        None => vec![T::zero(); b.len()],
    };
    debug!(
        "{}: n = {}, tol = {:e}, max_iter = {}",
        R::NAME,
        b.len(),
        tol,
        max_iter
    );

    let start = Instant::now();
    let (iterations, converged) = iterate(rule, a, b, &mut x, tol, max_iter)?;
    let time = start.elapsed();

    let residual = relative_residual(a, b, &x);
    if converged {
        debug!(
            "{} converged after {} iterations (residual: {:.2e})",
            R::NAME,
            iterations,
            residual
        );
    } else {
        warn!(
            "{} did not converge after {} iterations (residual: {:.2e})",
            R::NAME,
            iterations,
            residual
        );
    }
    Ok((
        x,
        Info {
            converged,
            iterations,
            residual,
            time,
        },
    ))
}

/// The core loop; returns `(iterations, converged)`.
fn iterate<R, T>(
    rule: &R,
    a: &Mat<T>,
    b: &[T],
    x: &mut [T],
    tol: T,
    max_iter: usize,
) -> Result<(usize, bool)>
where
    R: UpdateRule<T>,
    T: Real,
{
    // no step will run, so the rule's setup (and its singularity checks) is skipped
    if max_iter == 0 {
        return Ok((0, relative_residual(a, b, x) < tol));
    }
    let mut state = match rule.init(a, b, x, tol)? {
        Start::Converged => return Ok((0, true)),
        Start::Iterate(state) => state,
    };
    for k in 1..=max_iter {
        rule.step(a, b, x, &mut state, k)?;
        let res = relative_residual(a, b, x);
        trace!("{} iter {:>6}: residual = {:e}", R::NAME, k, res);
        if res < tol {
            return Ok((k, true));
        }
        if !res.is_finite() {
            warn!("{}: residual is no longer finite at iteration {}", R::NAME, k);
            return Ok((k, false));
        }
    }
    Ok((max_iter, false))
}

pub mod jacobi;
pub use jacobi::JacobiSolver;

pub mod gauss_seidel;
pub use gauss_seidel::GaussSeidelSolver;

pub mod gradient_descent;
pub use gradient_descent::GradientDescentSolver;

pub mod cg;
pub use cg::CgSolver;
