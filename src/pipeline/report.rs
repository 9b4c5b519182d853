//! pipeline::report — CSV tables and JSON model persistence.
//!
//! Thin serialization glue: every value written comes verbatim from a
//! `FitResult`, `DiagnosticReport`, `ForecastResult`, or
//! `CorrelationMatrix`; nothing is recomputed here. Fitted models are
//! persisted as plain JSON records so they stay readable outside this crate.
use crate::garch::{fit::FitResult, forecast::ForecastResult};
use crate::pipeline::{correlation::CorrelationMatrix, errors::PipelineResult};
use crate::statistical_tests::DiagnosticReport;
use chrono::NaiveDate;
use ndarray::Array1;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
struct ParamRow<'a> {
    param: &'a str,
    estimate: f64,
    std_err: f64,
}

#[derive(Serialize)]
struct DiagnosticRow<'a> {
    test: &'a str,
    statistic: f64,
    p_value: f64,
    skewness: Option<f64>,
    excess_kurtosis: Option<f64>,
}

#[derive(Serialize)]
struct VolRow {
    date: NaiveDate,
    volatility: f64,
}

#[derive(Serialize)]
struct ForecastRow {
    step: usize,
    volatility: f64,
}

/// Write the parameter table (`param, estimate, std_err`) for one fit.
pub fn write_param_table(path: &Path, fit: &FitResult) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let names = fit.param_names();
    let values = fit.param_values();
    for ((name, estimate), std_err) in names.into_iter().zip(values).zip(fit.std_errors.iter()) {
        writer.serialize(ParamRow { param: name, estimate, std_err: *std_err })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the diagnostic table for one fit's residuals.
pub fn write_diagnostics(path: &Path, report: &DiagnosticReport) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(DiagnosticRow {
        test: "ljung_box",
        statistic: report.ljung_box.stat,
        p_value: report.ljung_box.p_value,
        skewness: None,
        excess_kurtosis: None,
    })?;
    writer.serialize(DiagnosticRow {
        test: "jarque_bera",
        statistic: report.jarque_bera.stat,
        p_value: report.jarque_bera.p_value,
        skewness: Some(report.jarque_bera.skewness),
        excess_kurtosis: Some(report.jarque_bera.excess_kurtosis),
    })?;
    writer.flush()?;
    Ok(())
}

/// Write the fitted conditional-volatility series as `(date, value)` rows.
pub fn write_vol_series(
    path: &Path, dates: &[NaiveDate], vol: &Array1<f64>,
) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (date, volatility) in dates.iter().zip(vol.iter()) {
        writer.serialize(VolRow { date: *date, volatility: *volatility })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a volatility forecast as `(step, value)` rows, steps 1-based.
pub fn write_forecast(path: &Path, forecast: &ForecastResult) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (i, volatility) in forecast.vol.iter().enumerate() {
        writer.serialize(ForecastRow { step: i + 1, volatility: *volatility })?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a labelled correlation matrix with tickers on both axes.
pub fn write_correlation(path: &Path, matrix: &CorrelationMatrix) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["ticker".to_string()];
    header.extend(matrix.tickers.iter().cloned());
    writer.write_record(&header)?;
    for (i, ticker) in matrix.tickers.iter().enumerate() {
        let mut row = vec![ticker.clone()];
        row.extend(matrix.values.row(i).iter().map(|v| v.to_string()));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Persist a fitted model as pretty-printed JSON.
pub fn save_model(path: &Path, fit: &FitResult) -> PipelineResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), fit)?;
    Ok(())
}

/// Load a previously persisted fitted model.
pub fn load_model(path: &Path) -> PipelineResult<FitResult> {
    let file = File::open(path)?;
    let fit = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(fit)
}
