//! Core linear-algebra traits for matiter.

use std::fmt::{Debug, LowerExp};

use faer::traits::RealField;
use num_traits::Float;

/// Scalar type the solvers run on.
///
/// `RealField` gives access to faer's reductions (the overflow-safe `norm_l2`).
pub trait Real: Float + RealField + Send + Sync + Debug + LowerExp + 'static {}

impl<T: Float + RealField + Send + Sync + Debug + LowerExp + 'static> Real for T {}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V: ?Sized> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V: ?Sized> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}
