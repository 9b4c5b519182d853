//! pipeline::config — explicit run configuration.
//!
//! All knobs of a batch run live in one serializable value handed to the
//! pipeline entry point; there is no process-wide mutable state. Every field
//! has a serde default, so a partial JSON document (or `RunConfig::default()`)
//! yields a usable configuration.
use crate::garch::distribution::Distribution;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).expect("valid calendar date")
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid calendar date")
}

fn default_tickers() -> Vec<String> {
    vec!["BTC-USD".to_string(), "ETH-USD".to_string()]
}

fn default_dist() -> Distribution {
    Distribution::StudentT { df: 8.0 }
}

fn default_horizon() -> usize {
    10
}

fn default_lb_lags() -> usize {
    20
}

fn default_outdir() -> PathBuf {
    PathBuf::from("results")
}

/// Configuration for one batch run.
///
/// - `start` / `end`: requested price date range.
/// - `tickers`: identifiers passed to the price source.
/// - `dist`: innovation family (shape values are starting points for the
///   joint estimation).
/// - `horizon`: forecast steps per ticker.
/// - `lb_lags`: Ljung-Box lag count for residual diagnostics.
/// - `outdir`: root output directory; tables and models land in
///   subdirectories (see [`RunConfig::tables_dir`] / [`RunConfig::models_dir`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    #[serde(default = "default_end")]
    pub end: NaiveDate,
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
    #[serde(default = "default_dist")]
    pub dist: Distribution,
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_lb_lags")]
    pub lb_lags: usize,
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            tickers: default_tickers(),
            dist: default_dist(),
            horizon: default_horizon(),
            lb_lags: default_lb_lags(),
            outdir: default_outdir(),
        }
    }
}

impl RunConfig {
    /// Directory for CSV tables (parameters, diagnostics, series).
    pub fn tables_dir(&self) -> PathBuf {
        self.outdir.join("tables")
    }

    /// Directory for persisted fitted models (JSON).
    pub fn models_dir(&self) -> PathBuf {
        self.outdir.join("models")
    }

    /// Root output directory.
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Default values and derived directory paths.
    // - Partial-JSON deserialization falling back to defaults.
    //
    // They intentionally DO NOT cover:
    // - Pipeline execution under a configuration; see the runner tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the documented defaults and directory layout.
    //
    // Given
    // -----
    // - `RunConfig::default()`.
    //
    // Expect
    // ------
    // - 2018-01-01..2024-12-31, BTC/ETH, Student-t(8), horizon 10, 20 lags,
    //   results/tables and results/models.
    fn default_config_matches_documented_values() {
        let cfg = RunConfig::default();

        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(cfg.end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(cfg.tickers, vec!["BTC-USD".to_string(), "ETH-USD".to_string()]);
        assert_eq!(cfg.dist, Distribution::StudentT { df: 8.0 });
        assert_eq!(cfg.horizon, 10);
        assert_eq!(cfg.lb_lags, 20);
        assert_eq!(cfg.tables_dir(), PathBuf::from("results/tables"));
        assert_eq!(cfg.models_dir(), PathBuf::from("results/models"));
    }

    #[test]
    // Purpose
    // -------
    // Verify that a partial JSON document fills missing fields from the
    // defaults.
    //
    // Given
    // -----
    // - JSON setting only `tickers` and `horizon`.
    //
    // Expect
    // ------
    // - Overridden fields take the given values; the rest match defaults.
    fn partial_json_uses_defaults() {
        let json = r#"{ "tickers": ["SOL-USD"], "horizon": 5 }"#;

        let cfg: RunConfig = serde_json::from_str(json).expect("config should parse");

        assert_eq!(cfg.tickers, vec!["SOL-USD".to_string()]);
        assert_eq!(cfg.horizon, 5);
        assert_eq!(cfg.lb_lags, 20);
        assert_eq!(cfg.outdir, PathBuf::from("results"));
    }
}
