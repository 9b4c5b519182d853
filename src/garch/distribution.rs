//! garch::distribution — innovation distribution families.
//!
//! Purpose
//! -------
//! Represent the conditional error distribution of a GARCH(1,1) model as a
//! tagged variant carrying its shape parameters, and evaluate the per-
//! observation log-density `ln f(ε_t | σ²_t)` used by the likelihood.
//!
//! Conventions
//! -----------
//! - All families are standardized to unit conditional variance, so σ²_t is
//!   the variance of ε_t under each family (the Student-t density uses the
//!   `ν − 2` scaling, the skew-t uses Hansen's `a`/`b` recentring).
//! - Shape parameters live in constrained space here (`ν > 2`, `|λ| < 1`);
//!   the mapping to the optimizer's unconstrained θ tail also lives here so
//!   the parameter layer stays family-agnostic.
use crate::garch::errors::{GarchError, GarchResult};
use crate::optimization::numerical_stability::{safe_softplus, safe_softplus_inv};
use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;
use std::str::FromStr;

/// Default degrees of freedom used when a family is named without shape
/// parameters (e.g. parsed from configuration).
pub const DEFAULT_STUDENT_DF: f64 = 8.0;

/// Conditional error distribution of the GARCH innovations.
///
/// Variants:
/// - `Normal`: standard Gaussian innovations, no shape parameters.
/// - `StudentT`: standardized Student-t with `df > 2`.
/// - `SkewStudentT`: Hansen (1994) skew-Student-t with `df > 2` and skew
///   `λ ∈ (-1, 1)`.
///
/// Shape parameter values stored here double as the optimizer's starting
/// values when the family is estimated jointly with `(μ, ω, α, β)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    Normal,
    StudentT { df: f64 },
    SkewStudentT { df: f64, skew: f64 },
}

impl Distribution {
    /// Standardized Student-t with validated degrees of freedom.
    ///
    /// # Errors
    /// - `GarchError::InvalidDf` unless `df` is finite and > 2.
    pub fn student_t(df: f64) -> GarchResult<Self> {
        validate_df(df)?;
        Ok(Distribution::StudentT { df })
    }

    /// Hansen skew-Student-t with validated shape parameters.
    ///
    /// # Errors
    /// - `GarchError::InvalidDf` unless `df` is finite and > 2.
    /// - `GarchError::InvalidSkew` unless `skew` is finite and strictly
    ///   inside (-1, 1).
    pub fn skew_student_t(df: f64, skew: f64) -> GarchResult<Self> {
        validate_df(df)?;
        if !skew.is_finite() || skew.abs() >= 1.0 {
            return Err(GarchError::InvalidSkew { value: skew });
        }
        Ok(Distribution::SkewStudentT { df, skew })
    }

    /// Number of shape parameters estimated for this family.
    pub fn shape_len(&self) -> usize {
        match self {
            Distribution::Normal => 0,
            Distribution::StudentT { .. } => 1,
            Distribution::SkewStudentT { .. } => 2,
        }
    }

    /// Names of the shape parameters, in θ order.
    pub fn shape_names(&self) -> &'static [&'static str] {
        match self {
            Distribution::Normal => &[],
            Distribution::StudentT { .. } => &["df"],
            Distribution::SkewStudentT { .. } => &["df", "skew"],
        }
    }

    /// Unconstrained θ-tail encoding of the current shape values.
    ///
    /// `df` maps through `softplus⁻¹(ν − 2)` and `skew` through `atanh(λ)`,
    /// mirroring [`Distribution::with_shape_from_theta`].
    pub fn shape_theta(&self) -> Vec<f64> {
        match self {
            Distribution::Normal => vec![],
            Distribution::StudentT { df } => vec![safe_softplus_inv(df - 2.0)],
            Distribution::SkewStudentT { df, skew } => {
                vec![safe_softplus_inv(df - 2.0), skew.atanh()]
            }
        }
    }

    /// Rebuild this family with shape values decoded from an unconstrained
    /// θ tail (`df = 2 + softplus(t₀)`, `λ = tanh(t₁)`).
    ///
    /// # Errors
    /// - `GarchError::ThetaLengthMismatch` if `tail` does not match
    ///   [`Distribution::shape_len`].
    /// - Shape validation errors if the decoded values are non-finite.
    pub fn with_shape_from_theta(&self, tail: &[f64]) -> GarchResult<Self> {
        if tail.len() != self.shape_len() {
            return Err(GarchError::ThetaLengthMismatch {
                expected: self.shape_len(),
                actual: tail.len(),
            });
        }
        match self {
            Distribution::Normal => Ok(Distribution::Normal),
            Distribution::StudentT { .. } => Distribution::student_t(2.0 + safe_softplus(tail[0])),
            Distribution::SkewStudentT { .. } => {
                Distribution::skew_student_t(2.0 + safe_softplus(tail[0]), tail[1].tanh())
            }
        }
    }

    /// Log-density of one innovation `ε` given its conditional variance `σ²`.
    ///
    /// `sigma2` must be strictly positive; the variance recursion guarantees
    /// this via clamping before the density is evaluated.
    pub fn log_density(&self, eps: f64, sigma2: f64) -> f64 {
        match *self {
            Distribution::Normal => {
                -0.5 * ((2.0 * PI).ln() + sigma2.ln() + eps * eps / sigma2)
            }
            Distribution::StudentT { df } => {
                let ln_c = ln_gamma((df + 1.0) / 2.0)
                    - ln_gamma(df / 2.0)
                    - 0.5 * (PI * (df - 2.0)).ln();
                ln_c - 0.5 * sigma2.ln()
                    - 0.5 * (df + 1.0) * (1.0 + eps * eps / ((df - 2.0) * sigma2)).ln()
            }
            Distribution::SkewStudentT { df, skew } => {
                let ln_c = ln_gamma((df + 1.0) / 2.0)
                    - ln_gamma(df / 2.0)
                    - 0.5 * (PI * (df - 2.0)).ln();
                let c = ln_c.exp();
                let a = 4.0 * skew * c * (df - 2.0) / (df - 1.0);
                let b = (1.0 + 3.0 * skew * skew - a * a).sqrt();
                let z = eps / sigma2.sqrt();
                let lambda_sign = if z < -a / b { 1.0 - skew } else { 1.0 + skew };
                let u = (b * z + a) / lambda_sign;
                b.ln() + ln_c
                    - 0.5 * (df + 1.0) * (1.0 + u * u / (df - 2.0)).ln()
                    - 0.5 * sigma2.ln()
            }
        }
    }
}

fn validate_df(df: f64) -> GarchResult<()> {
    if !df.is_finite() || df <= 2.0 {
        return Err(GarchError::InvalidDf { value: df });
    }
    Ok(())
}

impl FromStr for Distribution {
    type Err = GarchError;

    /// Parse a family name (case-insensitive) into a distribution with
    /// default shape values (`df = 8`, `skew = 0`).
    ///
    /// Accepts `"normal"`, `"t"` / `"studentt"` / `"student-t"`, and
    /// `"skewt"` / `"skewstudentt"` / `"skew-t"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "gaussian" => Ok(Distribution::Normal),
            "t" | "studentt" | "student-t" => Distribution::student_t(DEFAULT_STUDENT_DF),
            "skewt" | "skew-t" | "skewstudentt" => {
                Distribution::skew_student_t(DEFAULT_STUDENT_DF, 0.0)
            }
            _ => Err(GarchError::UnknownDistribution { name: s.to_string() }),
        }
    }
}
