//! garch — GARCH(1,1) estimation, forecasting, and supporting types.
//!
//! The layer is organized leaves-first:
//! - [`distribution`]: innovation families and their log-densities.
//! - [`params`]: constrained parameters and the unconstrained θ encoding.
//! - [`model`]: variance recursion and the optimizer-facing likelihood.
//! - [`fit`]: the `estimate` entry point producing a [`FitResult`].
//! - [`forecast`]: multi-step volatility projection from a fitted model.

pub mod distribution;
pub mod errors;
pub mod fit;
pub mod forecast;
pub mod model;
pub mod params;

pub use self::distribution::Distribution;
pub use self::errors::{ErrorKind, GarchError, GarchResult};
pub use self::fit::{FitOptions, FitResult, estimate};
pub use self::forecast::{ForecastResult, forecast};
pub use self::params::GarchParams;

pub mod prelude {
    pub use super::distribution::Distribution;
    pub use super::errors::{ErrorKind, GarchError, GarchResult};
    pub use super::fit::{FitOptions, FitResult, estimate};
    pub use super::forecast::{ForecastResult, forecast};
    pub use super::params::GarchParams;
}
