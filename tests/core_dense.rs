//! Tests for core dense matrix operations: matrix-vector multiplication, dot product, norm and
//! the relative residual.
//!
//! These tests verify the MatVec and InnerProduct trait implementations for faer matrices and
//! slices, using random and fixed data.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use faer::Mat;
use matiter::core::traits::{InnerProduct, MatVec};
use matiter::utils::convergence::relative_residual;
use rand::Rng;

/// Test matrix-vector multiplication for a small random dense matrix.
///
/// Builds a random 5x5 matrix and vector, computes the product through `MatVec`, and checks it
/// against a manual row-by-row sum.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    // Use from_fn to build a column-major matrix
    let a = Mat::from_fn(n, n, |i, j| vals[j * n + i]);
    let x: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let mut y = vec![0.0; n];
    a.matvec(x.as_slice(), y.as_mut_slice());

    // check y[i] == sum_j A[i,j]*x[j]
    for i in 0..n {
        let expected = (0..n).map(|j| vals[j * n + i] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
    }

    // the borrowed view gives the same product
    let mut y_ref = vec![0.0; n];
    a.as_ref().matvec(x.as_slice(), y_ref.as_mut_slice());
    assert_relative_eq!(y.as_slice(), y_ref.as_slice(), epsilon = 1e-15);
}

/// Test dot product and Euclidean norm for small vectors.
#[test]
fn dot_and_norm() {
    let x = [1.0, 2.0, 3.0];
    let y = [4.0, -5.0, 6.0];
    let ip = ();
    let dot = ip.dot(&x[..], &y[..]);
    assert_abs_diff_eq!(dot, 1.0 * 4.0 + 2.0 * (-5.0) + 3.0 * 6.0, epsilon = 1e-12);
    let norm_x = ip.norm(&x[..]);
    let expected_norm = ((1.0f64).powi(2) + 2.0f64.powi(2) + 3.0f64.powi(2)).sqrt();
    assert_abs_diff_eq!(norm_x, expected_norm, epsilon = 1e-12);
}

/// The residual of the exact solution is zero and scales with `1/‖b‖` otherwise.
#[test]
fn relative_residual_of_random_system() {
    let n = 6;
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let a = Mat::from_fn(n, n, |i, j| if i == j { 10.0 } else { vals[j * n + i] });
    let x: Vec<f64> = (0..n).map(|i| i as f64 - 2.5).collect();
    let mut b = vec![0.0; n];
    a.matvec(x.as_slice(), b.as_mut_slice());
    assert_abs_diff_eq!(relative_residual(&a, &b, &x), 0.0, epsilon = 1e-14);

    let zero = vec![0.0; n];
    // x = 0 leaves the full right-hand side as residual
    assert_abs_diff_eq!(relative_residual(&a, &b, &zero), 1.0, epsilon = 1e-14);
}

/// The norm is accumulated with scaling, so neither huge nor tiny entries leave the f64 range.
#[test]
fn norm_survives_extreme_magnitudes() {
    let ip = ();
    let big = [3e200, 4e200];
    assert_relative_eq!(ip.norm(&big[..]), 5e200, max_relative = 1e-14);
    let tiny = [3e-200, 4e-200];
    assert_relative_eq!(ip.norm(&tiny[..]), 5e-200, max_relative = 1e-14);
    assert_eq!(ip.norm(&[0.0, 0.0][..]), 0.0);
}
