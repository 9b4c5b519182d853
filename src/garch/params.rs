//! garch::params — constrained GARCH(1,1) parameters and the unconstrained
//! optimizer encoding.
//!
//! Purpose
//! -------
//! Hold the validated model parameters `(μ, ω, α, β)` plus distribution shape
//! values, and map them to and from the unconstrained θ vector the optimizer
//! works in:
//!
//! ```text
//! θ = [ μ, softplus⁻¹(ω), softplus⁻¹(α), softplus⁻¹(β), <shape tail> ]
//! ```
//!
//! The softplus map keeps `ω, α, β` strictly positive without box
//! constraints; the persistence `α + β` is deliberately left unconstrained so
//! near-unit-root optima are reported as found rather than clipped at the
//! stationarity boundary.
use crate::garch::{
    distribution::Distribution,
    errors::{GarchError, GarchResult},
};
use crate::optimization::{
    loglik_optimizer::Theta,
    numerical_stability::{safe_softplus, safe_softplus_inv},
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Validated GARCH(1,1) parameters with their innovation distribution.
///
/// Invariants (enforced by [`GarchParams::new`]):
/// - `mean` finite; `omega` finite and > 0; `alpha`, `beta` finite and ≥ 0.
/// - Shape parameters valid for `dist` (checked by its constructors).
///
/// Stationarity (`α + β < 1`) is **not** an invariant; callers query
/// [`GarchParams::persistence`] and decide how to react.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarchParams {
    pub mean: f64,
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
    pub dist: Distribution,
}

impl GarchParams {
    /// Build validated parameters.
    ///
    /// # Errors
    /// - `GarchError::InvalidMean` / `InvalidOmega` / `InvalidAlpha` /
    ///   `InvalidBeta` for out-of-domain values.
    pub fn new(mean: f64, omega: f64, alpha: f64, beta: f64, dist: Distribution) -> GarchResult<Self> {
        if !mean.is_finite() {
            return Err(GarchError::InvalidMean { value: mean });
        }
        if !omega.is_finite() || omega <= 0.0 {
            return Err(GarchError::InvalidOmega { value: omega });
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(GarchError::InvalidAlpha { value: alpha });
        }
        if !beta.is_finite() || beta < 0.0 {
            return Err(GarchError::InvalidBeta { value: beta });
        }
        Ok(Self { mean, omega, alpha, beta, dist })
    }

    /// Length of the unconstrained θ vector for this model.
    pub fn theta_len(dist: &Distribution) -> usize {
        4 + dist.shape_len()
    }

    /// Parameter names in θ order (`mu`, `omega`, `alpha`, `beta`, shapes).
    pub fn param_names(dist: &Distribution) -> Vec<&'static str> {
        let mut names = vec!["mu", "omega", "alpha", "beta"];
        names.extend_from_slice(dist.shape_names());
        names
    }

    /// Decode constrained parameters from an unconstrained θ vector.
    ///
    /// `dist` supplies the family; its stored shape values are replaced by
    /// the decoded tail.
    ///
    /// # Errors
    /// - `GarchError::ThetaLengthMismatch` for a wrong-length θ.
    /// - Parameter validation errors if any decoded value is non-finite
    ///   (e.g. from a non-finite θ entry).
    pub fn from_theta(theta: &Theta, dist: &Distribution) -> GarchResult<Self> {
        let expected = Self::theta_len(dist);
        if theta.len() != expected {
            return Err(GarchError::ThetaLengthMismatch { expected, actual: theta.len() });
        }
        let tail: Vec<f64> = theta.iter().skip(4).copied().collect();
        let decoded_dist = dist.with_shape_from_theta(&tail)?;
        Self::new(
            theta[0],
            safe_softplus(theta[1]),
            safe_softplus(theta[2]),
            safe_softplus(theta[3]),
            decoded_dist,
        )
    }

    /// Encode these parameters as an unconstrained θ vector.
    pub fn to_theta(&self) -> Theta {
        let mut theta = vec![
            self.mean,
            safe_softplus_inv(self.omega),
            safe_softplus_inv(self.alpha),
            safe_softplus_inv(self.beta),
        ];
        theta.extend(self.dist.shape_theta());
        Array1::from(theta)
    }

    /// Volatility persistence `α + β`.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Unconditional variance `ω / (1 − α − β)`, or `None` when the fitted
    /// process is not covariance-stationary (`α + β ≥ 1`).
    pub fn uncond_variance(&self) -> Option<f64> {
        let p = self.persistence();
        if p < 1.0 { Some(self.omega / (1.0 - p)) } else { None }
    }
}
