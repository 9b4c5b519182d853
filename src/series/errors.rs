/// Result alias for price/return series construction.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while building or transforming price series.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// The series contains no observations.
    Empty { ticker: String },

    /// Dates and prices must have the same length.
    LengthMismatch { dates: usize, prices: usize },

    /// Timestamps must be strictly increasing.
    NonMonotonicTimestamps { index: usize },

    /// A non-missing price must be finite and strictly positive.
    NonPositivePrice { index: usize, value: f64 },

    /// Every price in the series is missing (NaN).
    AllMissing { ticker: String },

    /// A price source returned no observations for the requested range.
    Unavailable { ticker: String, start: chrono::NaiveDate, end: chrono::NaiveDate },
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Empty { ticker } => {
                write!(f, "Price series for '{ticker}' is empty")
            }
            DataError::LengthMismatch { dates, prices } => {
                write!(f, "Date/price length mismatch: {dates} dates vs {prices} prices")
            }
            DataError::NonMonotonicTimestamps { index } => {
                write!(f, "Timestamps must be strictly increasing, violation at index {index}")
            }
            DataError::NonPositivePrice { index, value } => {
                write!(f, "Price at index {index} is {value}, must be finite and > 0 (or NaN)")
            }
            DataError::AllMissing { ticker } => {
                write!(f, "Every price for '{ticker}' is missing")
            }
            DataError::Unavailable { ticker, start, end } => {
                write!(f, "No price data available for '{ticker}' between {start} and {end}")
            }
        }
    }
}
