//! File-backed sinks: workbook JSON, chart artifacts, flat result tables.

use anyhow::{bail, Context, Result};
use montecarlo::api::{ChartSink, ConvergenceChart, ExperimentRun, ScatterChart, Workbook};
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::provenance::{write_sidecar, Payload};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing workbook {}", path.display()))
}

/// Save via a temp file + rename so a failed write keeps the previous workbook.
pub fn save_workbook(path: &Path, workbook: &Workbook) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    write_json(&tmp, workbook)?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))
}

/// Writes chart artifacts as pretty JSON with a provenance sidecar each.
pub struct JsonChartSink {
    pub convergence_out: Option<PathBuf>,
    pub scatter_out: Option<PathBuf>,
    pub params: Value,
}

impl ChartSink for JsonChartSink {
    type Error = anyhow::Error;

    fn render_convergence(&mut self, chart: &ConvergenceChart) -> Result<()> {
        let Some(out) = &self.convergence_out else {
            return Ok(());
        };
        write_json(out, chart)?;
        write_sidecar(out, Payload::new(self.params.clone()))?;
        tracing::info!(out = %out.display(), "convergence chart written");
        Ok(())
    }

    fn render_scatter(&mut self, chart: &ScatterChart) -> Result<()> {
        let Some(out) = &self.scatter_out else {
            return Ok(());
        };
        write_json(out, chart)?;
        write_sidecar(out, Payload::new(self.params.clone()))?;
        tracing::info!(
            out = %out.display(),
            points = chart.total_points(),
            "marble-drop scatter written"
        );
        Ok(())
    }
}

/// One row per experiment, in run order.
pub fn results_frame(run: &ExperimentRun) -> PolarsResult<DataFrame> {
    let mut sizes = Vec::new();
    let mut rounds = Vec::new();
    let mut estimates = Vec::new();
    let mut circle = Vec::new();
    let mut rectangle = Vec::new();
    let mut union = Vec::new();
    for (size, results) in run.series() {
        for r in results {
            sizes.push(size.get());
            rounds.push(r.experiment);
            estimates.push(r.estimate);
            circle.push(r.prob_circle);
            rectangle.push(r.prob_rectangle);
            union.push(r.prob_union);
        }
    }
    df!(
        "sample_size" => sizes,
        "round" => rounds,
        "estimate" => estimates,
        "prob_circle" => circle,
        "prob_rectangle" => rectangle,
        "prob_union" => union
    )
}

/// Export the flat results table; the extension picks CSV or Parquet.
pub fn export_results(path: &Path, run: &ExperimentRun) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str());
    if !matches!(ext, Some("csv") | Some("parquet")) {
        bail!("unsupported export extension {ext:?} (use .csv or .parquet)");
    }
    let mut df = results_frame(run)?;
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if ext == Some("csv") {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
    } else {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    }
    tracing::info!(rows = df.height(), out = %path.display(), "results exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use montecarlo::api::{report_template, RunConfig, SheetLayout, DEFAULT_SHEET_NAME};
    use tempfile::tempdir;

    fn small_run() -> ExperimentRun {
        RunConfig {
            sample_sizes: vec![100, 400],
            experiments: 3,
            seed: 1,
        }
        .run()
        .unwrap()
    }

    #[test]
    fn workbook_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("book").join("Coursework.json");
        let mut wb = Workbook::new();
        wb.insert_sheet(
            DEFAULT_SHEET_NAME,
            report_template(&SheetLayout::default(), DEFAULT_SHEET_NAME, &[100, 400]),
        );
        save_workbook(&path, &wb).unwrap();
        assert_eq!(load_workbook(&path).unwrap(), wb);
        assert!(load_workbook(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn results_frame_has_one_row_per_experiment() {
        let df = results_frame(&small_run()).unwrap();
        assert_eq!(df.shape(), (6, 6));
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            ["sample_size", "round", "estimate", "prob_circle", "prob_rectangle", "prob_union"]
        );
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.csv");
        export_results(&path, &small_run()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sample_size,round,estimate,prob_circle,prob_rectangle,prob_union")
        );
        assert_eq!(lines.count(), 6);
        assert!(export_results(&dir.path().join("results.txt"), &small_run()).is_err());
    }

    #[test]
    fn chart_sink_skips_unset_outputs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("charts").join("means.json");
        let mut sink = JsonChartSink {
            convergence_out: Some(out.clone()),
            scatter_out: None,
            params: serde_json::json!({"seed": 1}),
        };
        let chart = ConvergenceChart::from_stats(&[]);
        sink.render_convergence(&chart).unwrap();
        assert!(out.exists());
        assert!(dir.path().join("charts").join("means.provenance.json").exists());
    }
}
