//! garch::forecast — multi-step conditional-variance projection.
//!
//! The one-step forecast applies the fitted recursion to the last in-sample
//! residual and variance; further steps use `E[ε²] = σ²` under the model, so
//! the α-term collapses and the projection becomes
//! `σ²_{t+h} = ω + (α + β)·σ²_{t+h-1}`. For a stationary fit this converges
//! monotonically to the unconditional variance `ω / (1 − α − β)`.
use crate::garch::{
    errors::{GarchError, GarchResult},
    fit::FitResult,
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Projected volatility path, one entry per step `1..=horizon`.
///
/// Values are in the same scaled units as the fit that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub horizon: usize,
    pub variance: Array1<f64>,
    pub vol: Array1<f64>,
}

/// Project conditional volatility `horizon` steps ahead from a fitted model.
///
/// Deterministic: no new observations, no re-estimation, and `fit` is left
/// untouched.
///
/// # Errors
/// - `GarchError::InvalidHorizon` for `horizon == 0`.
pub fn forecast(fit: &FitResult, horizon: usize) -> GarchResult<ForecastResult> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    let p = &fit.params;
    let last_idx = fit.cond_vol.len() - 1;
    let last_sigma2 = fit.cond_vol[last_idx] * fit.cond_vol[last_idx];
    let last_eps = fit.std_resid[last_idx] * fit.cond_vol[last_idx];

    let mut variance = Array1::<f64>::zeros(horizon);
    variance[0] = p.omega + p.alpha * last_eps * last_eps + p.beta * last_sigma2;
    for h in 1..horizon {
        variance[h] = p.omega + (p.alpha + p.beta) * variance[h - 1];
    }
    let vol = variance.mapv(f64::sqrt);
    Ok(ForecastResult { horizon, variance, vol })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::garch::{distribution::Distribution, params::GarchParams};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The one-step forecast against the hand-applied recursion.
    // - Monotone convergence toward the unconditional variance.
    // - The zero-horizon guard.
    //
    // They intentionally DO NOT cover:
    // - Forecasts from real estimated fits; see the integration suite.
    // -------------------------------------------------------------------------

    /// Hand-built FitResult with a two-observation history.
    fn toy_fit(omega: f64, alpha: f64, beta: f64) -> FitResult {
        let params =
            GarchParams::new(0.0, omega, alpha, beta, Distribution::Normal).expect("valid params");
        let cond_vol = array![1.0, 2.0];
        let std_resid = array![0.5, -1.5]; // last eps = -3.0
        FitResult {
            params,
            std_errors: vec![0.0; 4],
            loglik: -10.0,
            iterations: 5,
            cond_vol,
            std_resid,
            scale: 100.0,
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the one-step forecast equals the recursion applied to the last
    // fitted observation.
    //
    // Given
    // -----
    // - ω = 0.5, α = 0.2, β = 0.3; last σ² = 4, last ε = -3.
    //
    // Expect
    // ------
    // - σ²_{t+1} = 0.5 + 0.2·9 + 0.3·4 = 3.5 and vol = sqrt(3.5).
    fn one_step_forecast_matches_recursion() {
        let fit = toy_fit(0.5, 0.2, 0.3);

        let fc = forecast(&fit, 1).expect("forecast should compute");

        assert_eq!(fc.horizon, 1);
        assert_relative_eq!(fc.variance[0], 3.5, max_relative = 1e-12);
        assert_relative_eq!(fc.vol[0], 3.5f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify multi-step forecasts converge monotonically toward the
    // unconditional variance for a stationary fit.
    //
    // Given
    // -----
    // - ω = 0.5, α = 0.2, β = 0.3 (persistence 0.5, uncond variance 1.0),
    //   with a one-step forecast above the unconditional level.
    //
    // Expect
    // ------
    // - Each step moves strictly closer to ω/(1−α−β); the last step is
    //   within 1% of it.
    fn multi_step_forecast_converges_to_unconditional_variance() {
        let fit = toy_fit(0.5, 0.2, 0.3);
        let uncond = fit.params.uncond_variance().expect("stationary fit");

        let fc = forecast(&fit, 20).expect("forecast should compute");

        let mut prev_gap = f64::INFINITY;
        for &v in fc.variance.iter() {
            let gap = (v - uncond).abs();
            assert!(gap < prev_gap, "gap should shrink monotonically");
            prev_gap = gap;
        }
        assert!(prev_gap < 0.01 * uncond);
    }

    #[test]
    // Purpose
    // -------
    // Verify the horizon guard.
    //
    // Given
    // -----
    // - horizon = 0.
    //
    // Expect
    // ------
    // - `Err(GarchError::InvalidHorizon { horizon: 0 })`.
    fn zero_horizon_is_rejected() {
        let fit = toy_fit(0.5, 0.2, 0.3);

        assert!(matches!(forecast(&fit, 0), Err(GarchError::InvalidHorizon { horizon: 0 })));
    }
}
