//! Wrappers for faer dense matrix types and slice vector operations.
//!
//! Implements the core traits for `faer::Mat`, `faer::MatRef` and `[T]` so the solvers can stay
//! generic over the scalar. With the `rayon` feature enabled, mat-vec rows and dot-product
//! reductions are spread over rayon's global pool; the observable results are unchanged apart
//! from floating-point summation order.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{InnerProduct, MatVec, Real};
use faer::{ColRef, Mat, MatRef};

/// Dot product of row `i` of `a` with `x`.
#[inline]
pub(crate) fn row_dot<T: Real>(a: MatRef<'_, T>, i: usize, x: &[T]) -> T {
    (0..a.ncols()).fold(T::zero(), |acc, j| acc + a[(i, j)] * x[j])
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are slices.
impl<'a, T: Real> MatVec<[T]> for MatRef<'a, T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        let a = *self;
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            y.par_iter_mut()
                .enumerate()
                .for_each(|(i, yi)| *yi = row_dot(a, i, x));
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = row_dot(a, i, x);
            }
        }
    }
}

/// Implements matrix-vector multiplication for `faer::Mat`.
impl<T: Real> MatVec<[T]> for Mat<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        self.as_ref().matvec(x, y);
    }
}

/// Implements inner product and norm for slices, with optional Rayon parallelism.
impl<T: Real> InnerProduct<[T]> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &[T], y: &[T]) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.par_iter()
                .zip(y.par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    ///
    /// Uses faer's scaled accumulation, so finite vectors never overflow to `inf` or
    /// underflow to zero the way `dot(x, x).sqrt()` does.
    fn norm(&self, x: &[T]) -> T {
        ColRef::from_slice(x).norm_l2()
    }
}

/// `(x/s)ᵀ(y/s)`: a quadratic form divided by `s²` without forming `s²`.
///
/// Callers pass `s = ‖x‖` so the result stays in range whenever `x` and `y` are finite.
pub(crate) fn scaled_dot<T: Real>(x: &[T], y: &[T], s: T) -> T {
    x.iter()
        .zip(y)
        .fold(T::zero(), |acc, (&xi, &yi)| acc + (xi / s) * (yi / s))
}

/// Allocates `A * x` as a fresh vector.
pub(crate) fn mul_vec<T: Real>(a: &Mat<T>, x: &[T]) -> Vec<T> {
    let mut y = vec![T::zero(); a.nrows()];
    a.matvec(x, y.as_mut_slice());
    y
}
