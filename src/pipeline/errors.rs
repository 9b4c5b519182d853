use crate::garch::errors::{ErrorKind, GarchError};
use crate::series::errors::DataError;
use crate::statistical_tests::errors::TestError;

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by the multi-ticker pipeline.
///
/// I/O-flavored variants carry the formatted message of the underlying
/// error; domain errors are wrapped whole so callers can still classify
/// them via [`GarchError::kind`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Filesystem failure while preparing or writing outputs.
    Io { text: String },

    /// CSV serialization failure.
    Csv { text: String },

    /// JSON model persistence failure.
    Json { text: String },

    /// Price data could not be loaded or converted to returns.
    Data(DataError),

    /// Estimation or forecasting failure.
    Garch(GarchError),

    /// Residual diagnostics failure.
    Test(TestError),
}

impl PipelineError {
    /// Classify domain failures into the estimation error taxonomy.
    ///
    /// Filesystem and serialization failures have no domain classification
    /// and return `None`.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            PipelineError::Data(_) => Some(ErrorKind::DataUnavailable),
            PipelineError::Garch(err) => Some(err.kind()),
            PipelineError::Test(_) => Some(ErrorKind::InvalidInput),
            PipelineError::Io { .. } | PipelineError::Csv { .. } | PipelineError::Json { .. } => {
                None
            }
        }
    }
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Io { text } => write!(f, "I/O error: {text}"),
            PipelineError::Csv { text } => write!(f, "CSV error: {text}"),
            PipelineError::Json { text } => write!(f, "JSON error: {text}"),
            PipelineError::Data(err) => write!(f, "Data error: {err}"),
            PipelineError::Garch(err) => write!(f, "Estimation error: {err}"),
            PipelineError::Test(err) => write!(f, "Diagnostics error: {err}"),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io { text: err.to_string() }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv { text: err.to_string() }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Json { text: err.to_string() }
    }
}

impl From<DataError> for PipelineError {
    fn from(err: DataError) -> Self {
        PipelineError::Data(err)
    }
}

impl From<GarchError> for PipelineError {
    fn from(err: GarchError) -> Self {
        PipelineError::Garch(err)
    }
}

impl From<TestError> for PipelineError {
    fn from(err: TestError) -> Self {
        PipelineError::Test(err)
    }
}
