//! series::core — price series and log-return construction.
//!
//! Purpose
//! -------
//! Model a single ticker's adjusted-close history as an immutable, validated
//! [`PriceSeries`] and derive the [`ReturnSeries`] of log returns used by the
//! estimation layer.
//!
//! Conventions
//! -----------
//! - Prices are either finite and strictly positive, or `NaN` to mark a
//!   missing observation. Missing prices are forward-filled before
//!   differencing; observations before the first available price are dropped.
//! - Log returns are in **decimal** units here. Percent scaling for the
//!   optimizer happens in the model layer.
//! - Timestamps are calendar dates and must be strictly increasing.
use crate::series::errors::{DataError, DataResult};
use chrono::NaiveDate;
use ndarray::Array1;

/// Ordered (date, price) history for one ticker.
///
/// Invariants (enforced by [`PriceSeries::new`]):
/// - Non-empty, with `dates.len() == prices.len()`.
/// - Dates strictly increasing.
/// - Each price is either finite and `> 0`, or `NaN` (missing).
/// - At least one price is non-missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
}

impl PriceSeries {
    /// Build a validated price series.
    ///
    /// # Errors
    /// - `DataError::Empty` if `dates` is empty.
    /// - `DataError::LengthMismatch` if dates and prices differ in length.
    /// - `DataError::NonMonotonicTimestamps` at the first out-of-order date.
    /// - `DataError::NonPositivePrice` for a non-NaN price that is not finite
    ///   and strictly positive.
    /// - `DataError::AllMissing` if every price is NaN.
    pub fn new(ticker: impl Into<String>, dates: Vec<NaiveDate>, prices: Vec<f64>) -> DataResult<Self> {
        let ticker = ticker.into();
        if dates.is_empty() {
            return Err(DataError::Empty { ticker });
        }
        if dates.len() != prices.len() {
            return Err(DataError::LengthMismatch { dates: dates.len(), prices: prices.len() });
        }
        for (i, window) in dates.windows(2).enumerate() {
            if window[1] <= window[0] {
                return Err(DataError::NonMonotonicTimestamps { index: i + 1 });
            }
        }
        for (i, &p) in prices.iter().enumerate() {
            if !p.is_nan() && (!p.is_finite() || p <= 0.0) {
                return Err(DataError::NonPositivePrice { index: i, value: p });
            }
        }
        if prices.iter().all(|p| p.is_nan()) {
            return Err(DataError::AllMissing { ticker });
        }
        Ok(Self { ticker, dates, prices })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Derive the log-return series.
    ///
    /// Missing prices are forward-filled from the last observed price;
    /// observations before the first non-missing price are dropped. Returns
    /// are `ln(p_t) - ln(p_{t-1})` and each return is stamped with the date
    /// of its later observation, so the result has one fewer entry than the
    /// filled price history.
    ///
    /// # Errors
    /// - `DataError::Empty` if fewer than two usable prices remain after
    ///   dropping the leading missing stretch.
    pub fn log_returns(&self) -> DataResult<ReturnSeries> {
        let first = self
            .prices
            .iter()
            .position(|p| !p.is_nan())
            .ok_or_else(|| DataError::AllMissing { ticker: self.ticker.clone() })?;

        let mut filled = Vec::with_capacity(self.prices.len() - first);
        let mut last = self.prices[first];
        for &p in &self.prices[first..] {
            if !p.is_nan() {
                last = p;
            }
            filled.push(last);
        }

        if filled.len() < 2 {
            return Err(DataError::Empty { ticker: self.ticker.clone() });
        }

        let values: Array1<f64> =
            filled.windows(2).map(|w| (w[1] / w[0]).ln()).collect::<Vec<f64>>().into();
        let dates = self.dates[first + 1..].to_vec();
        Ok(ReturnSeries { ticker: self.ticker.clone(), dates, values })
    }
}

/// Ordered (date, log-return) sequence derived from a [`PriceSeries`].
///
/// Contains no NaNs or gaps; one date per return value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    ticker: String,
    dates: Vec<NaiveDate>,
    values: Array1<f64>,
}

impl ReturnSeries {
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
