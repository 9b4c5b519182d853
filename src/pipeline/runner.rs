//! pipeline::runner — multi-ticker estimation driver.
//!
//! Purpose
//! -------
//! Run the full price → returns → fit → diagnostics → forecast chain for
//! every configured ticker, write the per-ticker tables and persisted model,
//! and (for two or more successful tickers) the cross-ticker correlation
//! matrices of returns and of fitted volatilities.
//!
//! Failure model
//! -------------
//! A failed ticker is logged, recorded in the [`BatchSummary`], and leaves
//! no output files; the remaining tickers still run. Only environment-level
//! failures (e.g. the output directory cannot be created) abort the batch.
use crate::garch::{FitOptions, estimate, forecast};
use crate::pipeline::{
    config::RunConfig,
    correlation::{DatedSeries, correlation_matrix},
    errors::PipelineResult,
    report,
};
use crate::series::{DataResult, PriceSeries};
use crate::statistical_tests::DiagnosticReport;
use chrono::NaiveDate;
use std::fs;
use tracing::{info, warn};

/// Provider of historical prices, the pipeline's only inbound dependency.
///
/// Implementations return a validated [`PriceSeries`] for the requested
/// range or `DataError::Unavailable` when nothing is found.
pub trait PriceSource {
    fn fetch(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> DataResult<PriceSeries>;
}

/// Per-ticker series retained for cross-ticker correlation.
struct TickerArtifacts {
    returns: DatedSeries,
    vols: DatedSeries,
}

/// Outcome of a batch run.
///
/// `failed` pairs each failing ticker with the display form of its error.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    /// True when every configured ticker produced output.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run the pipeline for every configured ticker.
///
/// Creates the output directory layout, runs each ticker independently, and
/// writes correlation matrices when at least two tickers succeed.
///
/// # Errors
/// Only filesystem errors while preparing the output directories abort the
/// batch; per-ticker failures are captured in the returned summary.
pub fn run_batch<S: PriceSource>(source: &S, cfg: &RunConfig) -> PipelineResult<BatchSummary> {
    fs::create_dir_all(cfg.tables_dir())?;
    fs::create_dir_all(cfg.models_dir())?;

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    let mut artifacts = Vec::new();
    for ticker in &cfg.tickers {
        match run_ticker(source, cfg, ticker) {
            Ok(art) => {
                succeeded.push(ticker.clone());
                artifacts.push(art);
            }
            Err(err) => {
                warn!(ticker, kind = ?err.kind(), error = %err, "ticker failed, continuing with the rest");
                failed.push((ticker.clone(), err.to_string()));
            }
        }
    }

    if artifacts.len() >= 2 {
        let returns: Vec<DatedSeries> = artifacts.iter().map(|a| a.returns.clone()).collect();
        let vols: Vec<DatedSeries> = artifacts.iter().map(|a| a.vols.clone()).collect();
        report::write_correlation(
            &cfg.tables_dir().join("returns_correlation.csv"),
            &correlation_matrix(&returns),
        )?;
        report::write_correlation(
            &cfg.tables_dir().join("volatility_correlation.csv"),
            &correlation_matrix(&vols),
        )?;
    }

    info!(
        succeeded = succeeded.len(),
        failed = failed.len(),
        outdir = %cfg.outdir().display(),
        "batch finished"
    );
    Ok(BatchSummary { succeeded, failed })
}

/// Run the full chain for one ticker and write its outputs.
fn run_ticker<S: PriceSource>(
    source: &S, cfg: &RunConfig, ticker: &str,
) -> PipelineResult<TickerArtifacts> {
    let prices = source.fetch(ticker, cfg.start, cfg.end)?;
    let returns = prices.log_returns()?;
    let fit = estimate(&returns, cfg.dist, &FitOptions::default())?;
    let diagnostics = DiagnosticReport::from_residuals(&fit.std_resid, cfg.lb_lags)?;
    let projection = forecast(&fit, cfg.horizon)?;

    let tables = cfg.tables_dir();
    report::write_param_table(&tables.join(format!("{ticker}_params.csv")), &fit)?;
    report::write_diagnostics(&tables.join(format!("{ticker}_diagnostics.csv")), &diagnostics)?;
    report::write_vol_series(
        &tables.join(format!("{ticker}_volatility.csv")),
        returns.dates(),
        &fit.cond_vol,
    )?;
    report::write_forecast(&tables.join(format!("{ticker}_forecast.csv")), &projection)?;
    report::save_model(&cfg.models_dir().join(format!("{ticker}.json")), &fit)?;

    info!(
        ticker,
        observations = returns.len(),
        persistence = fit.params.persistence(),
        loglik = fit.loglik,
        "ticker estimated and reported"
    );

    Ok(TickerArtifacts {
        returns: DatedSeries {
            ticker: ticker.to_string(),
            dates: returns.dates().to_vec(),
            values: returns.values().clone(),
        },
        vols: DatedSeries {
            ticker: ticker.to_string(),
            dates: returns.dates().to_vec(),
            values: fit.cond_vol.clone(),
        },
    })
}
