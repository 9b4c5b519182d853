//! statistical_tests::ljung_box — portmanteau test for residual
//! autocorrelation.
//!
//! Tests the joint null that the first `m` autocorrelations of a series are
//! all zero:
//!
//! ```text
//! Q = n(n+2) Σ_{k=1..m} ρ̂²_k / (n − k)  ~  χ²(m)
//! ```
//!
//! Under a correctly specified GARCH model the standardized residuals should
//! show no remaining autocorrelation, so a small p-value flags model
//! misspecification.
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    validation::{centered_variance, validate_series},
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Ljung-Box statistic with its p-value and the lag count it was run at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LjungBoxOutcome {
    pub stat: f64,
    pub p_value: f64,
    pub lags: usize,
}

/// Run the Ljung-Box test on `values` with autocorrelations up to `lags`.
///
/// # Errors
/// - Validation errors for empty or non-finite input.
/// - `TestError::InvalidLags` unless `1 <= lags < values.len()`.
/// - `TestError::ZeroVariance` for a constant series.
pub fn ljung_box(values: &Array1<f64>, lags: usize) -> TestResult<LjungBoxOutcome> {
    validate_series(values)?;
    let n = values.len();
    if lags == 0 || lags >= n {
        return Err(TestError::InvalidLags { lags, len: n });
    }
    let (mean, m2) = centered_variance(values)?;
    let denom = m2 * n as f64;

    let mut stat = 0.0;
    for k in 1..=lags {
        let num: f64 =
            (k..n).map(|t| (values[t] - mean) * (values[t - k] - mean)).sum();
        let rho = num / denom;
        stat += rho * rho / (n - k) as f64;
    }
    stat *= n as f64 * (n as f64 + 2.0);

    // lags was validated >= 1, so the chi-squared parameter is valid.
    let chi2 = ChiSquared::new(lags as f64).expect("positive degrees of freedom");
    let p_value = 1.0 - chi2.cdf(stat);
    Ok(LjungBoxOutcome { stat, p_value, lags })
}
