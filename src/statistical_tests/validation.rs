//! statistical_tests::validation — shared input checks for the diagnostics.
use crate::statistical_tests::errors::{TestError, TestResult};
use ndarray::Array1;

/// Reject empty or non-finite input series.
///
/// # Errors
/// - `TestError::EmptyInput` for a zero-length series.
/// - `TestError::NonFiniteValue` at the first NaN or infinite entry.
pub fn validate_series(values: &Array1<f64>) -> TestResult<()> {
    if values.is_empty() {
        return Err(TestError::EmptyInput);
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(TestError::NonFiniteValue { index, value });
        }
    }
    Ok(())
}

/// Centered second moment `m₂ = Σ(x − x̄)²/n`, with the mean it was taken
/// around. Errors when the series carries (numerically) no variance.
pub fn centered_variance(values: &Array1<f64>) -> TestResult<(f64, f64)> {
    let n = values.len() as f64;
    let mean = values.sum() / n;
    let m2 = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    if m2 <= f64::EPSILON {
        return Err(TestError::ZeroVariance);
    }
    Ok((mean, m2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Rejection of empty, non-finite, and constant inputs.
    // - The centered variance value on a small known series.
    //
    // They intentionally DO NOT cover:
    // - The test statistics themselves; see the sibling modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the emptiness and finiteness guards.
    //
    // Given
    // -----
    // - An empty series and one containing NaN at index 1.
    //
    // Expect
    // ------
    // - `EmptyInput` and `NonFiniteValue { index: 1, .. }` respectively.
    fn validate_series_rejects_empty_and_non_finite() {
        let empty = Array1::<f64>::zeros(0);
        let with_nan = array![1.0, f64::NAN, 2.0];

        assert!(matches!(validate_series(&empty), Err(TestError::EmptyInput)));
        assert!(matches!(
            validate_series(&with_nan),
            Err(TestError::NonFiniteValue { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the centered variance on a known series and the zero-variance
    // guard on a constant one.
    //
    // Given
    // -----
    // - Series (1, 3) with mean 2 and m2 = 1; constant series (5, 5, 5).
    //
    // Expect
    // ------
    // - (mean, m2) = (2, 1); the constant series errors with ZeroVariance.
    fn centered_variance_known_value_and_constant_guard() {
        let values = array![1.0, 3.0];
        let constant = array![5.0, 5.0, 5.0];

        let (mean, m2) = centered_variance(&values).expect("variance should compute");

        assert!((mean - 2.0).abs() < 1e-12);
        assert!((m2 - 1.0).abs() < 1e-12);
        assert!(matches!(centered_variance(&constant), Err(TestError::ZeroVariance)));
    }
}
