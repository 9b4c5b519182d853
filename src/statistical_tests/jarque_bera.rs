//! statistical_tests::jarque_bera — moment-based normality test.
//!
//! ```text
//! JB = n/6 · (S² + K²/4)  ~  χ²(2)
//! ```
//!
//! where `S` is the sample skewness and `K` the sample excess kurtosis. Both
//! moments are reported alongside the statistic so callers can see *how* the
//! residual distribution departs from normality, not just that it does.
use crate::statistical_tests::{
    errors::TestResult,
    validation::{centered_variance, validate_series},
};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Jarque-Bera statistic with p-value and the moments it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JarqueBeraOutcome {
    pub stat: f64,
    pub p_value: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
}

/// Run the Jarque-Bera normality test on `values`.
///
/// # Errors
/// - Validation errors for empty or non-finite input.
/// - `TestError::ZeroVariance` for a constant series.
pub fn jarque_bera(values: &Array1<f64>) -> TestResult<JarqueBeraOutcome> {
    validate_series(values)?;
    let (mean, m2) = centered_variance(values)?;
    let n = values.len() as f64;

    let m3 = values.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
    let m4 = values.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;
    let skewness = m3 / m2.powf(1.5);
    let excess_kurtosis = m4 / (m2 * m2) - 3.0;

    let stat = n / 6.0 * (skewness * skewness + excess_kurtosis * excess_kurtosis / 4.0);
    let chi2 = ChiSquared::new(2.0).expect("positive degrees of freedom");
    let p_value = 1.0 - chi2.cdf(stat);
    Ok(JarqueBeraOutcome { stat, p_value, skewness, excess_kurtosis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution as RandDistribution, Exp, StandardNormal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Moment values on a small hand-computable series.
    // - Acceptance of normality on Gaussian samples (majority over seeds).
    // - Rejection on heavily skewed (exponential) samples.
    //
    // They intentionally DO NOT cover:
    // - Residuals from fitted models; see the integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the reported moments on a symmetric two-point series.
    //
    // Given
    // -----
    // - Series (-1, 1, -1, 1): skewness 0, kurtosis 1, excess kurtosis -2.
    //
    // Expect
    // ------
    // - skewness ≈ 0, excess_kurtosis ≈ -2, stat = n/6 · (0 + 4/4) = 2/3.
    fn moments_on_two_point_series() {
        let values: Array1<f64> = vec![-1.0, 1.0, -1.0, 1.0].into();

        let outcome = jarque_bera(&values).expect("test should run");

        assert!(outcome.skewness.abs() < 1e-12);
        assert!((outcome.excess_kurtosis + 2.0).abs() < 1e-12);
        assert!((outcome.stat - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check that Gaussian samples pass the normality test in the large
    // majority of trials.
    //
    // Given
    // -----
    // - Ten seeded n = 2000 standard-normal samples.
    //
    // Expect
    // ------
    // - p-value > 0.05 in at least 7 of the 10 trials.
    fn gaussian_samples_are_mostly_accepted() {
        let mut accepted = 0;
        for seed in 0..10u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let values: Array1<f64> =
                (0..2000).map(|_| StandardNormal.sample(&mut rng)).collect::<Vec<f64>>().into();
            let outcome = jarque_bera(&values).expect("test should run");
            if outcome.p_value > 0.05 {
                accepted += 1;
            }
        }

        assert!(accepted >= 7, "accepted only {accepted} of 10 Gaussian samples");
    }

    #[test]
    // Purpose
    // -------
    // Check that a heavily skewed sample is rejected with positive measured
    // skewness.
    //
    // Given
    // -----
    // - An n = 2000 exponential sample (skewness 2 in population).
    //
    // Expect
    // ------
    // - p-value < 0.05 and skewness > 1.
    fn skewed_samples_are_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let exp = Exp::new(1.0).expect("valid rate");
        let values: Array1<f64> =
            (0..2000).map(|_| exp.sample(&mut rng)).collect::<Vec<f64>>().into();

        let outcome = jarque_bera(&values).expect("test should run");

        assert!(outcome.p_value < 0.05);
        assert!(outcome.skewness > 1.0);
    }
}
