//! statistical_tests — residual diagnostics for fitted volatility models.
//!
//! Both tests are pure functions over an input series; [`DiagnosticReport`]
//! bundles them for the standardized residuals of one fit.

pub mod errors;
pub mod jarque_bera;
pub mod ljung_box;
pub mod validation;

pub use self::errors::{TestError, TestResult};
pub use self::jarque_bera::{JarqueBeraOutcome, jarque_bera};
pub use self::ljung_box::{LjungBoxOutcome, ljung_box};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Combined diagnostics for one fit's standardized residuals.
///
/// Ljung-Box probes leftover autocorrelation; Jarque-Bera probes departure
/// from normality. A derived, read-only view: recomputable at any time from
/// the residuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub ljung_box: LjungBoxOutcome,
    pub jarque_bera: JarqueBeraOutcome,
}

impl DiagnosticReport {
    /// Run both tests on `residuals`, with Ljung-Box at `lags` lags.
    ///
    /// # Errors
    /// Propagates validation and lag errors from either test.
    pub fn from_residuals(residuals: &Array1<f64>, lags: usize) -> TestResult<Self> {
        Ok(Self {
            ljung_box: ljung_box(residuals, lags)?,
            jarque_bera: jarque_bera(residuals)?,
        })
    }
}

pub mod prelude {
    pub use super::DiagnosticReport;
    pub use super::errors::{TestError, TestResult};
    pub use super::jarque_bera::{JarqueBeraOutcome, jarque_bera};
    pub use super::ljung_box::{LjungBoxOutcome, ljung_box};
}
