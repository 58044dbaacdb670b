//! Blank report sheet with the fixed header layout.
//!
//! The writer assumes the sheet already exists; this builds one for callers
//! starting without a workbook. Nothing here lands inside a region the writer
//! clears.

use super::cell::{CellRef, CellValue};
use super::layout::{ProbabilityKind, SheetLayout};
use super::sheet::{ReportSheet, Sheet};

pub const DEFAULT_SHEET_NAME: &str = "Monte Carlo Simulation";

fn size_heading(n: u64) -> CellValue {
    CellValue::Text(format!("N = {n}"))
}

/// Header cells for `sizes` (one heading per slot, in order).
pub fn report_template(layout: &SheetLayout, title: &str, sizes: &[u64]) -> Sheet {
    let mut s = Sheet::new();
    let heading_row = layout.header_rows;
    s.set(CellRef::new(1, layout.index_col), title.into());
    s.set(
        CellRef::new(2, layout.index_col),
        "Estimated ratio of circle to rectangle hits (converges to pi)".into(),
    );
    s.set(CellRef::new(heading_row, layout.index_col), "Experiment".into());
    for (slot, &n) in sizes.iter().enumerate().take(layout.size_slots) {
        let slot_u = slot as u32;
        s.set(
            CellRef::new(heading_row, layout.estimate_first_col + slot_u),
            size_heading(n),
        );
        s.set(
            CellRef::new(heading_row, layout.summary_first_col + slot_u),
            size_heading(n),
        );
        s.set(
            CellRef::new(layout.prob_first_row - 1, layout.prob_first_col + slot_u),
            size_heading(n),
        );
    }
    s.set(CellRef::new(layout.mean_row, layout.summary_first_col - 1), "Mean".into());
    s.set(CellRef::new(layout.mode_row, layout.summary_first_col - 1), "Mode".into());
    s.set(CellRef::new(layout.prob_first_row - 1, layout.round_col), "Round".into());
    s.set(CellRef::new(layout.prob_first_row - 1, layout.kind_col), "Kind".into());

    // Legend to the right of the probability block.
    let legend_col = layout.prob_first_col + layout.size_slots as u32 + 1;
    for kind in ProbabilityKind::ALL {
        s.set(
            CellRef::new(layout.prob_first_row + kind.row_offset(), legend_col),
            CellValue::Text(format!("{} = {}", kind.label(), kind.description())),
        );
    }
    s
}
