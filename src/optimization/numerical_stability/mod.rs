//! numerical_stability — numerically robust scalar transforms.
//!
//! Purpose
//! -------
//! Collect the guarded nonlinear transforms and small numeric tolerances
//! shared by the optimization and inference layers, so downstream code can
//! assume well-conditioned `f64` arithmetic inside tight likelihood loops.
//!
//! Conventions
//! -----------
//! - All routines here are pure: no I/O, no logging, no global state.
//! - Domain validation (positivity, finiteness) belongs to the model layer;
//!   these helpers assume finite inputs.

pub mod transformations;

pub use self::transformations::{EIGEN_EPS, safe_softplus, safe_softplus_inv};

pub mod prelude {
    pub use super::transformations::{EIGEN_EPS, safe_softplus, safe_softplus_inv};
}
