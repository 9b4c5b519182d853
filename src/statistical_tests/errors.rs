/// Result alias for residual diagnostics.
pub type TestResult<T> = Result<T, TestError>;

/// Errors raised by the diagnostic tests.
#[derive(Debug, Clone, PartialEq)]
pub enum TestError {
    /// The input series is empty.
    EmptyInput,

    /// Every input value must be finite.
    NonFiniteValue { index: usize, value: f64 },

    /// Lag count must satisfy `1 <= lags < len`.
    InvalidLags { lags: usize, len: usize },

    /// The series has no variance, so autocorrelations and moment ratios
    /// are undefined.
    ZeroVariance,
}

impl std::error::Error for TestError {}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::EmptyInput => {
                write!(f, "Input series is empty")
            }
            TestError::NonFiniteValue { index, value } => {
                write!(f, "Input value at index {index} is {value}, must be finite")
            }
            TestError::InvalidLags { lags, len } => {
                write!(f, "Invalid lag count {lags} for series of length {len}")
            }
            TestError::ZeroVariance => {
                write!(f, "Input series has zero variance")
            }
        }
    }
}
