//! inference::hessian — Hessian-based standard error utilities.
//!
//! Purpose
//! -------
//! Convert finite-difference Hessians of the likelihood into numerically
//! stable standard error estimates. This module handles conversion between
//! `ndarray` and `nalgebra` types and computes classical SEs from the
//! Moore–Penrose pseudoinverse of the observed information matrix.
//!
//! Conventions
//! -----------
//! - The gradient map handed in is on the **average** negative
//!   log-likelihood scale, so the FD Hessian is the average observed
//!   information `J̄(θ̂)`. The total information is `n · J̄(θ̂)`; the returned
//!   SEs therefore carry a `1/√n` factor.
//! - Standard errors are the square roots of diagonal variances; no full
//!   covariance matrix is exposed.
//! - No explicit matrix inverse is formed; all computations use symmetric
//!   eigendecomposition with eigenvalue truncation at
//!   [`EIGEN_EPS`](crate::optimization::numerical_stability::EIGEN_EPS),
//!   which inflates SEs along weakly identified directions instead of
//!   producing garbage from near-singular solves.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Compute classical standard errors from the observed information at `θ̂`.
///
/// # Parameters
/// - `f`: gradient map of the **average** negative log-likelihood,
///   `θ ↦ ∇(-ℓ̄(θ))`. Must be C¹ in a neighborhood of `theta_hat` so the
///   finite-difference Hessian is well defined.
/// - `theta_hat`: parameter vector at which the information is evaluated.
/// - `n_obs`: number of observations behind the average; used to rescale
///   the average information to the total (`SE = SE_avg / √n`).
///
/// # Returns
/// A length-`theta_hat.len()` vector of standard errors aligned with the
/// entries of `theta_hat`.
///
/// # Errors
/// Propagates any error from [`compute_hessian`] (dimension mismatches,
/// non-finite entries on both FD paths).
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array1<f64>> {
    let n = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let mut se = solve_for_se(obs_info_nalg, n);
    let scale = (n_obs.max(1) as f64).sqrt();
    se.mapv_inplace(|v| v / scale);
    Ok(se)
}

// ---- Helper methods ----

/// Copy an `ndarray` Hessian into a preallocated `nalgebra::DMatrix`.
///
/// The copy proceeds column by column, matching the column-major storage of
/// `DMatrix`. No symmetrization is performed here; the input is expected to
/// have been symmetrized by `compute_hessian` already.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in j..n {
            if j == i {
                obs_info_nalg[(i, i)] = obs_info[[i, i]];
            } else {
                obs_info_nalg[(i, j)] = obs_info[[i, j]];
                obs_info_nalg[(j, i)] = obs_info[[j, i]];
            }
        }
    }
}

/// Classical standard errors from a symmetric observed information matrix.
///
/// Implements `Var(θ̂_i) = Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k` where
/// `J = Q Λ Qᵀ` is the symmetric eigendecomposition, and returns
/// `sqrt(Var(θ̂_i))` for each `i`. Eigenvalues at or below `EIGEN_EPS` are
/// excluded from the sum.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let mut se = Array1::<f64>::zeros(n);
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    for i in 0..n {
        se[i] = eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum();
        se[i] = se[i].sqrt();
    }
    se
}
