//! garch::model — conditional-variance recursion and the likelihood objective.
//!
//! Purpose
//! -------
//! Implement the GARCH(1,1) recursion
//!
//! ```text
//! σ²_t = ω + α·ε²_{t-1} + β·σ²_{t-1},    ε_t = r_t − μ
//! ```
//!
//! and expose it to the optimizer as a [`LogLikelihood`] over the
//! unconstrained θ encoding of [`GarchParams`].
//!
//! Conventions
//! -----------
//! - The objective is the **average** log-likelihood `ℓ̄(θ) = ℓ(θ)/n`. The
//!   average keeps finite-difference gradient noise independent of the
//!   sample size; the fit layer rescales to the total for reporting.
//! - `σ²_0` is seeded from the sample variance of the demeaned returns.
//! - Every σ²_t is clamped into `[SIGMA2_FLOOR, SIGMA2_CEIL]` so the density
//!   never sees a zero or exploding variance mid-line-search.
//! - Returns handed to this layer are already rescaled (percent units).
use crate::garch::{distribution::Distribution, params::GarchParams};
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Cost, LogLikelihood, Theta},
};
use ndarray::Array1;

/// Lower clamp for the conditional variance during evaluation.
pub const SIGMA2_FLOOR: f64 = 1e-12;

/// Upper clamp for the conditional variance during evaluation.
pub const SIGMA2_CEIL: f64 = 1e12;

/// Conditional-variance path for `returns` under `params`.
///
/// One entry per return observation; every entry lies inside the clamp
/// interval and is therefore strictly positive.
pub fn variance_path(params: &GarchParams, returns: &Array1<f64>) -> Array1<f64> {
    let n = returns.len();
    let mut sigma2 = Array1::<f64>::zeros(n);
    let seed = seed_variance(params.mean, returns);
    let mut prev_sigma2 = seed;
    let mut prev_eps2 = seed;
    for t in 0..n {
        let s2 = if t == 0 {
            seed
        } else {
            params.omega + params.alpha * prev_eps2 + params.beta * prev_sigma2
        };
        let s2 = s2.clamp(SIGMA2_FLOOR, SIGMA2_CEIL);
        sigma2[t] = s2;
        let eps = returns[t] - params.mean;
        prev_eps2 = eps * eps;
        prev_sigma2 = s2;
    }
    sigma2
}

/// Average log-likelihood `ℓ(params)/n` of `returns`.
pub fn avg_log_likelihood(params: &GarchParams, returns: &Array1<f64>) -> f64 {
    let sigma2 = variance_path(params, returns);
    let n = returns.len() as f64;
    let mut total = 0.0;
    for (r, s2) in returns.iter().zip(sigma2.iter()) {
        total += params.dist.log_density(r - params.mean, *s2);
    }
    total / n
}

/// Sample variance of the demeaned returns, floored at [`SIGMA2_FLOOR`].
fn seed_variance(mean: f64, returns: &Array1<f64>) -> f64 {
    let n = returns.len() as f64;
    let var = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
    var.max(SIGMA2_FLOOR)
}

/// GARCH(1,1) likelihood exposed to the optimizer.
///
/// `Data` is the rescaled return vector; the family template supplies the
/// shape-parameter layout of θ.
#[derive(Debug, Clone, Copy)]
pub struct GarchModel {
    pub dist: Distribution,
}

impl GarchModel {
    pub fn new(dist: Distribution) -> Self {
        Self { dist }
    }

    /// Heuristic starting point in unconstrained θ space.
    ///
    /// Uses the sample mean for μ, a mildly persistent `(α, β) = (0.10, 0.80)`
    /// and ω chosen so the implied unconditional variance matches the sample
    /// variance; shape values come from the family template.
    pub fn theta0(&self, returns: &Array1<f64>) -> OptResult<Theta> {
        let n = returns.len() as f64;
        let mean = returns.sum() / n;
        let var = seed_variance(mean, returns);
        let (alpha, beta) = (0.10, 0.80);
        let omega = var * (1.0 - alpha - beta);
        let params = GarchParams::new(mean, omega, alpha, beta, self.dist)?;
        Ok(params.to_theta())
    }
}

impl LogLikelihood for GarchModel {
    type Data = Array1<f64>;

    /// Average log-likelihood `ℓ̄(θ)` of the rescaled returns.
    ///
    /// # Errors
    /// - Decoding errors for an invalid θ (wrong length, non-finite decode).
    /// - `OptError::NonFiniteCost` if the likelihood evaluates non-finite.
    fn value(&self, theta: &Theta, returns: &Self::Data) -> OptResult<Cost> {
        let params = GarchParams::from_theta(theta, &self.dist)?;
        let ll = avg_log_likelihood(&params, returns);
        if !ll.is_finite() {
            return Err(OptError::NonFiniteCost { value: ll });
        }
        Ok(ll)
    }

    /// Reject wrong-length or non-finite starting points before the run.
    fn check(&self, theta: &Theta, returns: &Self::Data) -> OptResult<()> {
        let expected = GarchParams::theta_len(&self.dist);
        if theta.len() != expected {
            return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::InvalidThetaInput { index, value });
            }
        }
        if returns.is_empty() {
            return Err(OptError::InvalidParameter {
                text: "Return series must be non-empty".to_string(),
            });
        }
        Ok(())
    }
}
