use crate::optimization::errors::OptError;

/// Result alias for GARCH model operations.
pub type GarchResult<T> = Result<T, GarchError>;

/// Coarse classification of a [`GarchError`], used by the pipeline layer to
/// decide how a per-ticker failure should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable data for the requested ticker/range.
    DataUnavailable,
    /// The return series is too short or carries no variance.
    DegenerateInput,
    /// The optimizer failed to converge or the likelihood broke down.
    EstimationFailure,
    /// A caller-supplied argument is out of range.
    InvalidInput,
}

/// Errors raised by GARCH parameter handling, estimation, and forecasting.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Parameters ----
    /// Unconstrained parameter vector has the wrong length for the model.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Variance intercept must be finite and > 0.
    InvalidOmega { value: f64 },

    /// ARCH coefficient must be finite and >= 0.
    InvalidAlpha { value: f64 },

    /// GARCH coefficient must be finite and >= 0.
    InvalidBeta { value: f64 },

    /// Mean must be finite.
    InvalidMean { value: f64 },

    /// Degrees of freedom must be finite and > 2.
    InvalidDf { value: f64 },

    /// Skew parameter must lie strictly inside (-1, 1).
    InvalidSkew { value: f64 },

    /// Distribution family name not recognized.
    UnknownDistribution { name: String },

    // ---- Estimation input ----
    /// Return series is shorter than the estimation minimum.
    DegenerateInput { len: usize, min: usize },

    /// Return series has (numerically) zero variance.
    ZeroVariance,

    /// Rescaling factor must be finite and > 0.
    InvalidScale { value: f64 },

    // ---- Estimation outcome ----
    /// Log-likelihood evaluated to a non-finite value.
    NonFiniteLikelihood { value: f64 },

    /// Optimizer stopped without meeting a convergence tolerance.
    NotConverged { status: String, iterations: usize },

    /// Wrapped optimizer-layer error.
    Opt(OptError),

    // ---- Forecasting ----
    /// Forecast horizon must be >= 1.
    InvalidHorizon { horizon: usize },
}

impl GarchError {
    /// Classify this error for reporting purposes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GarchError::DegenerateInput { .. } | GarchError::ZeroVariance => {
                ErrorKind::DegenerateInput
            }
            GarchError::NonFiniteLikelihood { .. }
            | GarchError::NotConverged { .. }
            | GarchError::Opt(_) => ErrorKind::EstimationFailure,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GarchError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector length mismatch: expected {expected}, actual {actual}")
            }
            GarchError::InvalidOmega { value } => {
                write!(f, "Invalid omega parameter: {value}, must be finite and > 0")
            }
            GarchError::InvalidAlpha { value } => {
                write!(f, "Invalid alpha parameter: {value}, must be finite and >= 0")
            }
            GarchError::InvalidBeta { value } => {
                write!(f, "Invalid beta parameter: {value}, must be finite and >= 0")
            }
            GarchError::InvalidMean { value } => {
                write!(f, "Invalid mean parameter: {value}, must be finite")
            }
            GarchError::InvalidDf { value } => {
                write!(f, "Invalid degrees of freedom: {value}, must be finite and > 2")
            }
            GarchError::InvalidSkew { value } => {
                write!(f, "Invalid skew parameter: {value}, must lie strictly in (-1, 1)")
            }
            GarchError::UnknownDistribution { name } => {
                write!(f, "Unknown distribution family '{name}', expected normal, t, or skewt")
            }
            GarchError::DegenerateInput { len, min } => {
                write!(f, "Return series too short for estimation: {len} observations, need {min}")
            }
            GarchError::ZeroVariance => {
                write!(f, "Return series has zero variance")
            }
            GarchError::InvalidScale { value } => {
                write!(f, "Invalid rescaling factor: {value}, must be finite and > 0")
            }
            GarchError::NonFiniteLikelihood { value } => {
                write!(f, "Log-likelihood is non-finite: {value}")
            }
            GarchError::NotConverged { status, iterations } => {
                write!(f, "Optimizer did not converge after {iterations} iterations: {status}")
            }
            GarchError::Opt(err) => {
                write!(f, "Optimizer error: {err}")
            }
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Invalid forecast horizon: {horizon}, must be >= 1")
            }
        }
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        GarchError::Opt(err)
    }
}
