//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradient and Hessian approximations around a
//! parameter vector, together with validation and symmetry cleanup, so that
//! the rest of the optimizer can request derivatives without depending
//! directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Compute forward-difference gradients with error capture and
//!   post-hoc validation via [`run_fd_diff`].
//! - Construct central-difference Hessians, falling back to forward
//!   differences when validation fails, via [`compute_hessian`].
//! - Enforce symmetry of Hessian matrices in-place before they are handed
//!   to eigen-based factorizations downstream.
//!
//! Conventions
//! -----------
//! - Finite differences are taken with respect to whatever parameter space
//!   the caller works in; the GARCH layer uses this both on the
//!   unconstrained θ-space (gradients during optimization) and on the
//!   model-space parameter vector (observed information for standard errors).
//! - Central-difference Hessians are preferred; forward-difference is
//!   used only as a fallback when the central approximation fails
//!   validation.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Compute a forward-difference gradient of `func` at `theta`, with error capture.
///
/// The FD closure can’t return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(grad)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD routine
/// or by validation of the resulting gradient
/// ([`OptError::GradientDimMismatch`](crate::optimization::errors::OptError) /
/// [`OptError::InvalidGradient`](crate::optimization::errors::OptError)).
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Approximate the Hessian of a vector-valued gradient function at `theta`.
///
/// A central-difference scheme is attempted first; if the result fails shape
/// or finiteness validation, the helper falls back to a forward-difference
/// scheme and validates that instead. The returned matrix is symmetrized
/// in-place (off-diagonal pairs averaged) before being handed back.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`](crate::optimization::errors::OptError)
///   when the fallback Hessian dimensions do not match `theta.len()`.
/// - [`OptError::InvalidHessian`](crate::optimization::errors::OptError)
///   when the fallback Hessian contains NaN or infinite entries.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

// ---- Helper methods ----

/// Enforce symmetry of a Hessian matrix in-place.
///
/// Replaces each off-diagonal pair `(i, j)` / `(j, i)` with their average;
/// the diagonal is left untouched. Called only after the matrix has passed
/// [`validate_hessian`], so no finiteness or shape checks are repeated here.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradient computation with and without closure errors.
    // - Validation failures for non-finite gradients.
    // - Finite-difference Hessian construction, symmetry, and validation.
    // - In-place symmetrization behavior for Hessian matrices.
    //
    // They intentionally DO NOT cover:
    // - End-to-end optimizer behavior (handled in higher-level integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `run_fd_diff` returns a valid gradient for a simple quadratic
    // objective with no internal error path.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ².
    // - An objective `f(theta) = thetaᵀ theta` with no error side channel.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns `Ok(grad)` with `grad.len() == theta.len()`.
    // - All gradient entries are finite.
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        let grad = result.expect("Gradient for quadratic should be computed successfully");
        assert_eq!(grad.len(), theta.len());
        assert!(grad.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `run_fd_diff` propagates an error captured in `closure_err`
    // as an `OptError` via the `From<Error>` implementation.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ¹.
    // - An objective closure that writes an `ArgminError` into `closure_err`
    //   and returns `NaN`.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns `Err(e)` rather than a gradient.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);

        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        let err = result.expect_err("Error in closure should cause run_fd_diff to fail");
        match err {
            OptError::NotImplemented { .. } | OptError::BackendError { .. } => {}
            other => panic!("Unexpected OptError variant from closure error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `run_fd_diff` returns an error when the finite-difference
    // gradient contains non-finite entries.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ².
    // - An objective that always returns `NaN`, causing the FD gradient to be
    //   filled with `NaN`.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns `Err(OptError::InvalidGradient { .. })`.
    fn run_fd_diff_non_finite_gradient_yields_invalidgradient_error() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        // Act
        let result = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        let err = result.expect_err("Non-finite gradient should cause an error");
        match err {
            OptError::InvalidGradient { .. } => {}
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `compute_hessian` produces a finite, symmetric Hessian for a
    // simple quadratic model where the gradient is linear.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ².
    // - A gradient function `g(theta) = 2 * theta` corresponding to
    //   `f(theta) = ||theta||²`.
    //
    // Expect
    // ------
    // - `compute_hessian` returns `Ok(hess)` with shape (2, 2).
    // - `hess` is symmetric and has finite entries.
    fn compute_hessian_quadratic_returns_symmetric_matrix() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64, 2.0]);
        let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);

        // Act
        let hess = compute_hessian(&grad_fn, &theta)
            .expect("Hessian for quadratic gradient should be computed successfully");

        // Assert
        assert_eq!(hess.shape(), &[2, 2]);
        assert!((hess[[0, 1]] - hess[[1, 0]]).abs() < 1e-10);
        assert!(hess.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `compute_hessian` surfaces a validation error when both the
    // central- and forward-difference Hessians contain non-finite entries.
    //
    // Given
    // -----
    // - A parameter vector `theta` in ℝ¹.
    // - A gradient function that returns `NaN` in its single component.
    //
    // Expect
    // ------
    // - `compute_hessian` returns `Err(OptError::InvalidHessian { .. })`.
    fn compute_hessian_non_finite_entries_yield_invalidhessian_error() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_theta: &Theta| Array1::from(vec![f64::NAN]);

        // Act
        let result = compute_hessian(&grad_fn, &theta);

        // Assert
        let err = result.expect_err("Non-finite Hessian entries should cause an error");
        match err {
            OptError::InvalidHessian { .. } => {}
            other => panic!("Expected InvalidHessian, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `symmetrize_hess` makes a matrix numerically symmetric by
    // averaging each off-diagonal pair.
    //
    // Given
    // -----
    // - A 2x2 matrix with unequal off-diagonal entries.
    //
    // Expect
    // ------
    // - After calling `symmetrize_hess`, the off-diagonal entries are equal to
    //   their average and the diagonal remains unchanged.
    fn symmetrize_hess_makes_matrix_symmetric() {
        // Arrange
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![1.0_f64, 2.0, 0.0, 3.0]).unwrap();

        let before_diag = (h[[0, 0]], h[[1, 1]]);
        let expected_avg = 0.5 * (h[[0, 1]] + h[[1, 0]]);

        // Act
        super::symmetrize_hess(&mut h);

        // Assert
        assert_eq!(h[[0, 0]], before_diag.0);
        assert_eq!(h[[1, 1]], before_diag.1);
        assert!((h[[0, 1]] - expected_avg).abs() < 1e-12);
        assert!((h[[1, 0]] - expected_avg).abs() < 1e-12);
        assert_eq!(h[[0, 1]], h[[1, 0]]);
    }
}
