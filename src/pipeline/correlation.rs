//! pipeline::correlation — cross-ticker correlation of aligned series.
//!
//! Different tickers trade on different calendars, so series are first
//! aligned on their common dates; Pearson correlation is then computed on
//! the overlap. Pairs with fewer than two common observations, or with a
//! constant overlap, get `NaN` in the matrix rather than an error, since a
//! partial matrix is still worth reporting.
use chrono::NaiveDate;
use ndarray::{Array1, Array2};

/// Labelled correlation matrix over a set of tickers.
///
/// `values[(i, j)]` is the Pearson correlation of ticker `i` against ticker
/// `j` on their common dates; the diagonal is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub tickers: Vec<String>,
    pub values: Array2<f64>,
}

/// One ticker's dated series, as handed to the correlation builder.
#[derive(Debug, Clone)]
pub struct DatedSeries {
    pub ticker: String,
    pub dates: Vec<NaiveDate>,
    pub values: Array1<f64>,
}

/// Pearson correlation of two equally long samples.
///
/// Returns `NaN` for fewer than two points or a zero-variance side.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 || n != y.len() {
        return f64::NAN;
    }
    let nf = n as f64;
    let mx = x.iter().sum::<f64>() / nf;
    let my = y.iter().sum::<f64>() / nf;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    sxy / (sxx * syy).sqrt()
}

/// Pearson correlation of two dated series on their common dates.
///
/// Both inputs must be date-sorted (the series layer guarantees this); the
/// intersection is computed with a linear merge.
pub fn aligned_pearson(a: &DatedSeries, b: &DatedSeries) -> f64 {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.dates.len() && j < b.dates.len() {
        match a.dates[i].cmp(&b.dates[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                xs.push(a.values[i]);
                ys.push(b.values[j]);
                i += 1;
                j += 1;
            }
        }
    }
    pearson(&xs, &ys)
}

/// Build the full pairwise correlation matrix for a set of dated series.
pub fn correlation_matrix(series: &[DatedSeries]) -> CorrelationMatrix {
    let n = series.len();
    let mut values = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        values[(i, i)] = 1.0;
        for j in i + 1..n {
            let rho = aligned_pearson(&series[i], &series[j]);
            values[(i, j)] = rho;
            values[(j, i)] = rho;
        }
    }
    CorrelationMatrix { tickers: series.iter().map(|s| s.ticker.clone()).collect(), values }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pearson correlation on perfectly correlated and anti-correlated data.
    // - Date alignment dropping non-overlapping observations.
    // - Matrix symmetry and unit diagonal.
    //
    // They intentionally DO NOT cover:
    // - Correlations of fitted volatility paths; see the integration suite.
    // -------------------------------------------------------------------------

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify the closed-form endpoints of the Pearson coefficient.
    //
    // Given
    // -----
    // - y = 2x (perfect) and y = -x (perfect negative).
    //
    // Expect
    // ------
    // - Correlations 1 and -1 to within 1e-12.
    fn pearson_perfect_correlation_endpoints() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let double: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let negated: Vec<f64> = x.iter().map(|v| -v).collect();

        assert!((pearson(&x, &double) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &negated) + 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that alignment keeps only the common dates before correlating.
    //
    // Given
    // -----
    // - Series A on days 1-4 and series B on days 2-5 where the overlap
    //   (days 2-4) is exactly proportional.
    //
    // Expect
    // ------
    // - Correlation 1 despite the non-overlapping endpoints disagreeing.
    fn aligned_pearson_uses_common_dates_only() {
        let a = DatedSeries {
            ticker: "A".to_string(),
            dates: vec![d(1), d(2), d(3), d(4)],
            values: vec![100.0, 1.0, 2.0, 3.0].into(),
        };
        let b = DatedSeries {
            ticker: "B".to_string(),
            dates: vec![d(2), d(3), d(4), d(5)],
            values: vec![2.0, 4.0, 6.0, -50.0].into(),
        };

        assert!((aligned_pearson(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify matrix structure: unit diagonal, symmetry, and NaN for a
    // disjoint pair.
    //
    // Given
    // -----
    // - Three series where the third shares no dates with the others.
    //
    // Expect
    // ------
    // - diag = 1, values[(0,1)] == values[(1,0)], and values[(0,2)] is NaN.
    fn correlation_matrix_structure() {
        let a = DatedSeries {
            ticker: "A".to_string(),
            dates: vec![d(1), d(2), d(3)],
            values: vec![1.0, 2.0, 4.0].into(),
        };
        let b = DatedSeries {
            ticker: "B".to_string(),
            dates: vec![d(1), d(2), d(3)],
            values: vec![3.0, 1.0, 2.0].into(),
        };
        let c = DatedSeries {
            ticker: "C".to_string(),
            dates: vec![d(10), d(11)],
            values: vec![1.0, 2.0].into(),
        };

        let matrix = correlation_matrix(&[a, b, c]);

        assert_eq!(matrix.tickers, vec!["A", "B", "C"]);
        for i in 0..3 {
            assert_eq!(matrix.values[(i, i)], 1.0);
        }
        assert_eq!(matrix.values[(0, 1)], matrix.values[(1, 0)]);
        assert!(matrix.values[(0, 2)].is_nan());
    }
}
