//! garchvol — GARCH(1,1) conditional-volatility estimation and reporting.
//!
//! The crate estimates GARCH(1,1) models for financial price series by
//! maximum likelihood under Gaussian, Student-t, or Hansen skew-Student-t
//! innovations, runs residual diagnostics, projects volatility forward, and
//! drives a multi-ticker reporting pipeline.
//!
//! Layering (leaves first):
//! - [`series`]: validated price histories and log returns.
//! - [`optimization`]: Argmin-backed L-BFGS maximization of log-likelihoods,
//!   numerically stable parameter transforms, finite-difference helpers.
//! - [`inference`]: Hessian-based standard errors.
//! - [`garch`]: the model itself — distributions, parameters, likelihood,
//!   the `estimate` entry point, and forecasting.
//! - [`statistical_tests`]: Ljung-Box and Jarque-Bera residual diagnostics.
//! - [`pipeline`]: configuration, the multi-ticker batch driver, and CSV/
//!   JSON reporting.
//!
//! # Example
//! ```no_run
//! use garchvol::garch::{Distribution, FitOptions, estimate, forecast};
//! use garchvol::series::PriceSeries;
//! use garchvol::statistical_tests::DiagnosticReport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (dates, prices) = (vec![], vec![]);
//! let series = PriceSeries::new("BTC-USD", dates, prices)?;
//! let returns = series.log_returns()?;
//! let fit = estimate(&returns, Distribution::student_t(8.0)?, &FitOptions::default())?;
//! let diagnostics = DiagnosticReport::from_residuals(&fit.std_resid, 20)?;
//! let projection = forecast(&fit, 10)?;
//! # let _ = (diagnostics, projection);
//! # Ok(())
//! # }
//! ```

pub mod garch;
pub mod inference;
pub mod optimization;
pub mod pipeline;
pub mod series;
pub mod statistical_tests;

pub mod prelude {
    pub use crate::garch::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::pipeline::prelude::*;
    pub use crate::series::prelude::*;
    pub use crate::statistical_tests::prelude::*;
}
