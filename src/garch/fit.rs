//! garch::fit — maximum-likelihood estimation of GARCH(1,1) models.
//!
//! Purpose
//! -------
//! Drive the full estimation pipeline for one return series: rescale, build a
//! starting point, maximize the likelihood over the unconstrained θ space,
//! decode the optimum, and derive the fitted conditional-volatility path,
//! standardized residuals, and classical standard errors.
//!
//! Conventions
//! -----------
//! - Returns are multiplied by `FitOptions::scale` (percent units by
//!   default) before optimization; all reported quantities (ω, conditional
//!   volatility, forecasts) are in the scaled units.
//! - The optimizer works on the **average** log-likelihood; the reported
//!   `loglik` is rescaled to the total `ℓ(θ̂) = n · ℓ̄(θ̂)`.
//! - A fit that stops on the iteration cap is an error, not a result.
//! - A converged fit with `α + β ≥ 1` is reported as-is with a warning;
//!   near-unit-root optima are common on real market data.
use crate::garch::{
    distribution::Distribution,
    errors::{GarchError, GarchResult},
    model::{GarchModel, SIGMA2_FLOOR, avg_log_likelihood, variance_path},
    params::GarchParams,
};
use crate::inference::calc_standard_errors;
use crate::optimization::loglik_optimizer::{MLEOptions, maximize};
use crate::series::ReturnSeries;
use finitediff::FiniteDiff;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default rescaling factor applied to returns before optimization.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Minimum number of return observations accepted for estimation.
pub const MIN_OBSERVATIONS: usize = 30;

/// Estimation options.
///
/// - `scale`: multiplier applied to returns before optimization (percent
///   units at the default of 100).
/// - `min_obs`: reject series shorter than this.
/// - `mle`: optimizer configuration (tolerances, line search, memory).
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub scale: f64,
    pub min_obs: usize,
    pub mle: MLEOptions,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, min_obs: MIN_OBSERVATIONS, mle: MLEOptions::default() }
    }
}

/// Immutable result of one estimation call.
///
/// - `params`: decoded point estimates with the fitted distribution shapes.
/// - `std_errors`: classical standard errors, aligned with
///   [`GarchParams::param_names`].
/// - `loglik`: total log-likelihood `ℓ(θ̂)` at the optimum.
/// - `iterations`: optimizer iterations used.
/// - `cond_vol`: fitted conditional volatility `σ_t`, one entry per return
///   observation, strictly positive, in scaled units.
/// - `std_resid`: standardized residuals `(r_t − μ̂)/σ_t`.
/// - `scale`: the rescaling factor the fit was run under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub params: GarchParams,
    pub std_errors: Vec<f64>,
    pub loglik: f64,
    pub iterations: usize,
    pub cond_vol: Array1<f64>,
    pub std_resid: Array1<f64>,
    pub scale: f64,
}

impl FitResult {
    /// Parameter names aligned with `std_errors` and the θ ordering.
    pub fn param_names(&self) -> Vec<&'static str> {
        GarchParams::param_names(&self.params.dist)
    }

    /// Point estimates in θ order (`μ, ω, α, β`, shapes).
    pub fn param_values(&self) -> Vec<f64> {
        let mut values = vec![self.params.mean, self.params.omega, self.params.alpha, self.params.beta];
        match self.params.dist {
            Distribution::Normal => {}
            Distribution::StudentT { df } => values.push(df),
            Distribution::SkewStudentT { df, skew } => {
                values.push(df);
                values.push(skew);
            }
        }
        values
    }
}

/// Fit a GARCH(1,1) model to `returns` under the given innovation family.
///
/// # Errors
/// - `GarchError::InvalidScale` for a non-finite or non-positive scale.
/// - `GarchError::DegenerateInput` when the series is shorter than
///   `opts.min_obs`.
/// - `GarchError::ZeroVariance` when the rescaled series carries no
///   variance.
/// - `GarchError::NotConverged` when the optimizer stops on its iteration
///   cap instead of a tolerance.
/// - Wrapped optimizer errors (`GarchError::Opt`) for solver failures.
pub fn estimate(
    returns: &ReturnSeries, dist: Distribution, opts: &FitOptions,
) -> GarchResult<FitResult> {
    if !opts.scale.is_finite() || opts.scale <= 0.0 {
        return Err(GarchError::InvalidScale { value: opts.scale });
    }
    let n = returns.len();
    if n < opts.min_obs {
        return Err(GarchError::DegenerateInput { len: n, min: opts.min_obs });
    }

    let scaled: Array1<f64> = returns.values() * opts.scale;
    let mean = scaled.sum() / n as f64;
    let variance = scaled.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n as f64;
    if variance <= SIGMA2_FLOOR {
        return Err(GarchError::ZeroVariance);
    }

    let model = GarchModel::new(dist);
    let theta0 = model.theta0(&scaled)?;
    let outcome = maximize(&model, theta0, &scaled, &opts.mle)?;
    if !outcome.converged {
        return Err(GarchError::NotConverged {
            status: outcome.status,
            iterations: outcome.iterations,
        });
    }
    debug!(
        ticker = returns.ticker(),
        iterations = outcome.iterations,
        avg_loglik = outcome.value,
        "estimation converged"
    );

    let params = GarchParams::from_theta(&outcome.theta_hat, &dist)?;
    if params.persistence() >= 1.0 {
        warn!(
            ticker = returns.ticker(),
            persistence = params.persistence(),
            "fitted process is not covariance-stationary"
        );
    }

    let sigma2 = variance_path(&params, &scaled);
    let cond_vol = sigma2.mapv(f64::sqrt);
    let std_resid = ndarray::Zip::from(&scaled)
        .and(&cond_vol)
        .map_collect(|r, vol| (r - params.mean) / vol);

    let std_errors = model_space_std_errors(&params, &scaled)?;

    Ok(FitResult {
        params,
        std_errors,
        loglik: outcome.value * n as f64,
        iterations: outcome.iterations,
        cond_vol,
        std_resid,
        scale: opts.scale,
    })
}

/// Classical standard errors from the observed information in model space.
///
/// The information matrix is finite-differenced on the constrained
/// `(μ, ω, α, β, shapes)` vector rather than the unconstrained θ, so the
/// reported SEs apply directly to the reported estimates. FD probe points are
/// clamped back into the parameter domain before evaluation.
fn model_space_std_errors(
    params: &GarchParams, scaled: &Array1<f64>,
) -> GarchResult<Vec<f64>> {
    let n = scaled.len();
    let dist = params.dist;
    let point = Array1::from(clamp_into_domain(&model_space_vector(params), &dist));

    let neg_avg = move |p: &Array1<f64>, returns: &Array1<f64>| -> f64 {
        let clamped = clamp_into_domain(&p.to_vec(), &dist);
        match params_from_model_space(&clamped, &dist) {
            Ok(probe) => -avg_log_likelihood(&probe, returns),
            Err(_) => f64::NAN,
        }
    };
    let grad = |p: &Array1<f64>| -> Array1<f64> { p.forward_diff(&|q| neg_avg(q, scaled)) };

    let se = calc_standard_errors(&grad, &point, n)?;
    Ok(se.to_vec())
}

fn model_space_vector(params: &GarchParams) -> Vec<f64> {
    let mut p = vec![params.mean, params.omega, params.alpha, params.beta];
    match params.dist {
        Distribution::Normal => {}
        Distribution::StudentT { df } => p.push(df),
        Distribution::SkewStudentT { df, skew } => {
            p.push(df);
            p.push(skew);
        }
    }
    p
}

// FD steps can push a boundary-adjacent estimate slightly outside the
// parameter domain; pull each coordinate back just inside.
fn clamp_into_domain(p: &[f64], dist: &Distribution) -> Vec<f64> {
    let mut clamped = p.to_vec();
    if clamped.len() >= 4 {
        clamped[1] = clamped[1].max(1e-10);
        clamped[2] = clamped[2].max(0.0);
        clamped[3] = clamped[3].max(0.0);
    }
    match dist {
        Distribution::Normal => {}
        Distribution::StudentT { .. } => {
            if clamped.len() >= 5 {
                clamped[4] = clamped[4].max(2.0 + 1e-6);
            }
        }
        Distribution::SkewStudentT { .. } => {
            if clamped.len() >= 6 {
                clamped[4] = clamped[4].max(2.0 + 1e-6);
                clamped[5] = clamped[5].clamp(-1.0 + 1e-6, 1.0 - 1e-6);
            }
        }
    }
    clamped
}

fn params_from_model_space(p: &[f64], dist: &Distribution) -> GarchResult<GarchParams> {
    let decoded_dist = match dist {
        Distribution::Normal => Distribution::Normal,
        Distribution::StudentT { .. } => Distribution::student_t(p[4])?,
        Distribution::SkewStudentT { .. } => Distribution::skew_student_t(p[4], p[5])?,
    };
    GarchParams::new(p[0], p[1], p[2], p[3], decoded_dist)
}
