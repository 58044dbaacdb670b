//! Report writer: clear the previous report, then write the new one.
//!
//! Two phases
//! - `clear_region`: empties an extent. Cells inside merged ranges are skipped;
//!   merged ranges fully inside the extent that the new report will not reuse
//!   are unmerged and emptied, so shrinking the round count leaves no residue.
//! - `write_report`: validates, clears every region down to the sheet's last
//!   row, then writes labels, estimates, summary formulas and probabilities.
//!
//! Everything that can fail is checked before the first mutation.

use super::cell::{CellRange, CellValue};
use super::error::ReportError;
use super::formula::Formula;
use super::layout::{ProbabilityKind, SheetLayout};
use super::sheet::{ReportSheet, Workbook};
use crate::cfg::ESTIMATE_DECIMALS;
use crate::experiment::{ExperimentRun, SampleSize};

/// What a report write covered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrittenReport {
    pub sizes: usize,
    pub experiments: u32,
    pub rounds: u32,
}

/// Empty `extent`, keeping merged ranges listed in `retained`.
///
/// Idempotent. A merged range the sheet refuses to unmerge is left as is and
/// its cells are skipped.
pub fn clear_region<S: ReportSheet + ?Sized>(
    sheet: &mut S,
    extent: CellRange,
    retained: &[CellRange],
) {
    for m in sheet.merged_ranges() {
        if !extent.covers(&m) || retained.contains(&m) {
            continue;
        }
        match sheet.unmerge(m) {
            Ok(()) => m.cells().for_each(|c| sheet.clear(c)),
            Err(err) => tracing::warn!(range = %m, %err, "keeping merged range"),
        }
    }
    let merged: Vec<CellRange> = sheet
        .merged_ranges()
        .into_iter()
        .filter(|m| m.intersects(&extent))
        .collect();
    for c in extent.cells() {
        if merged.iter().any(|m| m.contains(c)) {
            continue;
        }
        sheet.clear(c);
    }
}

#[inline]
fn round_estimate(v: f64) -> f64 {
    let scale = 10f64.powi(ESTIMATE_DECIMALS);
    (v * scale).round() / scale
}

fn slot_of(sizes: &[SampleSize], size: SampleSize) -> Result<usize, ReportError> {
    sizes
        .iter()
        .position(|s| *s == size)
        .ok_or(ReportError::UnknownSampleSize { size: size.get() })
}

/// A merged range reaching into the probability block from outside survives
/// the clear, so a round label overlapping it could never be merged.
fn check_round_merges<S: ReportSheet + ?Sized>(
    sheet: &S,
    extent: CellRange,
    round_ranges: &[CellRange],
) -> Result<(), ReportError> {
    for m in sheet.merged_ranges() {
        if extent.covers(&m) {
            continue;
        }
        if let Some(r) = round_ranges.iter().find(|r| r.intersects(&m)) {
            return Err(ReportError::MergeConflict { range: *r });
        }
    }
    Ok(())
}

/// Write `run` onto `sheet` at the positions given by `layout`.
pub fn write_report<S: ReportSheet + ?Sized>(
    sheet: &mut S,
    layout: &SheetLayout,
    run: &ExperimentRun,
) -> Result<WrittenReport, ReportError> {
    let sizes = run.sample_sizes();
    layout.check_fits(sizes.len())?;
    let mut experiments = 0u32;
    for (size, results) in run.series() {
        if results.is_empty() {
            return Err(ReportError::MissingResults { size: size.get() });
        }
        experiments = experiments.max(results.len() as u32);
    }
    let mut placed = Vec::with_capacity(run.probabilities().len());
    for rec in run.probabilities() {
        placed.push((slot_of(sizes, rec.sample_size)?, rec));
    }
    let rounds = run.rounds();
    let round_ranges: Vec<CellRange> = (1..=rounds).map(|r| layout.round_label_range(r)).collect();
    let max_row = sheet.max_row();
    let prob_extent = layout.probability_extent(max_row);
    check_round_merges(sheet, prob_extent, &round_ranges)?;

    // 1–2. Clear down to the current last row.
    clear_region(sheet, layout.data_extent(max_row), &[]);
    clear_region(sheet, layout.summary_extent(), &[]);
    clear_region(sheet, prob_extent, &round_ranges);

    // 3. Experiment numbers.
    for e in 1..=experiments {
        sheet.set(layout.index_cell(e), e.into());
    }

    // 4–5. Estimates and live summary formulas per size column.
    for (slot, (_, results)) in run.series().enumerate() {
        for r in results {
            sheet.set(
                layout.estimate_cell(r.experiment, slot),
                round_estimate(r.estimate).into(),
            );
        }
        let column = layout.estimate_column(slot, results.len() as u32);
        sheet.set(layout.mean_cell(slot), Formula::Average(column).into());
        sheet.set(layout.mode_cell(slot), Formula::Mode(column).into());
    }

    // 6. Round labels (merged over the round's rows) and kind labels.
    for (round, range) in (1..=rounds).zip(&round_ranges) {
        sheet.merge(*range)?;
        sheet.set(range.start, round.into());
        for kind in ProbabilityKind::ALL {
            sheet.set(layout.kind_label_cell(round, kind), kind.label().into());
        }
    }

    // 7. Probabilities, column by size, rows by round.
    for (slot, rec) in placed {
        let values = [
            (ProbabilityKind::Circle, rec.circle),
            (ProbabilityKind::Rectangle, rec.rectangle),
            (ProbabilityKind::Union, rec.union),
        ];
        for (kind, v) in values {
            sheet.set(
                layout.probability_cell(rec.round, kind, slot),
                CellValue::Number(v),
            );
        }
    }

    let written = WrittenReport {
        sizes: sizes.len(),
        experiments,
        rounds,
    };
    tracing::info!(
        sizes = written.sizes,
        experiments = written.experiments,
        rounds = written.rounds,
        "report written"
    );
    Ok(written)
}

/// Write into the sheet called `sheet_name`; a missing sheet writes nothing.
pub fn write_report_to(
    workbook: &mut Workbook,
    sheet_name: &str,
    layout: &SheetLayout,
    run: &ExperimentRun,
) -> Result<WrittenReport, ReportError> {
    let sheet = workbook.require_sheet_mut(sheet_name)?;
    write_report(sheet, layout, run)
}
