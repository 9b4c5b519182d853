//! inference — post-estimation uncertainty quantification.
//!
//! Currently exposes Hessian-based classical standard errors; the model layer
//! hands in a gradient map of the average negative log-likelihood together
//! with the fitted parameters and the observation count.

pub mod hessian;

pub use self::hessian::calc_standard_errors;

pub mod prelude {
    pub use super::hessian::calc_standard_errors;
}
