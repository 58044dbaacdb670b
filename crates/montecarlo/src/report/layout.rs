//! Indexed layout table: where every report value lives on the sheet.
//!
//! Default layout (1-based rows, letters for columns)
//! - Rows 1–6: headers (not touched by the writer).
//! - Data block: experiment index in B, one estimate column per size from C, rows from 7.
//! - Summary: mean in row 7, mode in row 8, one column per size from I.
//! - Probability block from row 18: round label in H (merged over 3 rows),
//!   kind label in I, one probability column per size from J.
//!
//! All addressing goes through `SheetLayout`, so the mapping is testable
//! without a sheet.

use super::cell::{CellRange, CellRef};
use super::error::ReportError;

/// Rows per round in the probability block.
pub const ROWS_PER_ROUND: u32 = 3;

/// One of the three probabilities reported per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbabilityKind {
    Circle,
    Rectangle,
    Union,
}

impl ProbabilityKind {
    pub const ALL: [ProbabilityKind; 3] = [Self::Circle, Self::Rectangle, Self::Union];

    #[inline]
    pub fn row_offset(self) -> u32 {
        match self {
            Self::Circle => 0,
            Self::Rectangle => 1,
            Self::Union => 2,
        }
    }

    /// Row label written into the kind column.
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Self::Circle => "A",
            Self::Rectangle => "B",
            Self::Union => "C",
        }
    }

    /// Legend text for the label.
    pub fn description(self) -> &'static str {
        match self {
            Self::Circle => "P(circle)",
            Self::Rectangle => "P(rectangle)",
            Self::Union => "P(circle or rectangle)",
        }
    }
}

/// Fixed coordinates of the report regions. Sizes map to columns by slot
/// (their position in the configured size list).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_rows: u32,
    pub data_first_row: u32,
    pub index_col: u32,
    pub estimate_first_col: u32,
    pub mean_row: u32,
    pub mode_row: u32,
    pub summary_first_col: u32,
    pub prob_first_row: u32,
    pub round_col: u32,
    pub kind_col: u32,
    pub prob_first_col: u32,
    pub size_slots: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_rows: 6,
            data_first_row: 7,
            index_col: 2,
            estimate_first_col: 3,
            mean_row: 7,
            mode_row: 8,
            summary_first_col: 9,
            prob_first_row: 18,
            round_col: 8,
            kind_col: 9,
            prob_first_col: 10,
            size_slots: 4,
        }
    }
}

impl SheetLayout {
    pub fn check_fits(&self, sizes: usize) -> Result<(), ReportError> {
        if sizes > self.size_slots {
            return Err(ReportError::LayoutOverflow {
                sizes,
                slots: self.size_slots,
            });
        }
        Ok(())
    }

    #[inline]
    fn slot_col(first: u32, slot: usize) -> u32 {
        first + slot as u32
    }

    #[inline]
    fn data_row(&self, experiment: u32) -> u32 {
        self.data_first_row + experiment - 1
    }

    /// Experiment-number label cell (experiment is 1-based).
    pub fn index_cell(&self, experiment: u32) -> CellRef {
        CellRef::new(self.data_row(experiment), self.index_col)
    }

    pub fn estimate_cell(&self, experiment: u32, slot: usize) -> CellRef {
        CellRef::new(
            self.data_row(experiment),
            Self::slot_col(self.estimate_first_col, slot),
        )
    }

    /// Written estimates of one size column, for the summary formulas.
    pub fn estimate_column(&self, slot: usize, experiments: u32) -> CellRange {
        CellRange::new(
            self.estimate_cell(1, slot),
            self.estimate_cell(experiments.max(1), slot),
        )
    }

    pub fn mean_cell(&self, slot: usize) -> CellRef {
        CellRef::new(self.mean_row, Self::slot_col(self.summary_first_col, slot))
    }

    pub fn mode_cell(&self, slot: usize) -> CellRef {
        CellRef::new(self.mode_row, Self::slot_col(self.summary_first_col, slot))
    }

    /// First row of a round's block: `(round - 1) * 3 + base`.
    #[inline]
    pub fn round_row(&self, round: u32) -> u32 {
        (round - 1) * ROWS_PER_ROUND + self.prob_first_row
    }

    /// Merged round-label range spanning the round's three rows.
    pub fn round_label_range(&self, round: u32) -> CellRange {
        let r = self.round_row(round);
        CellRange::new(
            CellRef::new(r, self.round_col),
            CellRef::new(r + ROWS_PER_ROUND - 1, self.round_col),
        )
    }

    pub fn kind_label_cell(&self, round: u32, kind: ProbabilityKind) -> CellRef {
        CellRef::new(self.round_row(round) + kind.row_offset(), self.kind_col)
    }

    pub fn probability_cell(&self, round: u32, kind: ProbabilityKind, slot: usize) -> CellRef {
        CellRef::new(
            self.round_row(round) + kind.row_offset(),
            Self::slot_col(self.prob_first_col, slot),
        )
    }

    #[inline]
    fn last_slot_col(first: u32, slots: usize) -> u32 {
        first + slots.max(1) as u32 - 1
    }

    /// Index + estimate columns, from the first data row down to `max_row`.
    pub fn data_extent(&self, max_row: u32) -> CellRange {
        CellRange::new(
            CellRef::new(self.data_first_row, self.index_col),
            CellRef::new(
                max_row.max(self.data_first_row),
                Self::last_slot_col(self.estimate_first_col, self.size_slots),
            ),
        )
    }

    /// Mean and mode rows across every size slot.
    pub fn summary_extent(&self) -> CellRange {
        CellRange::new(
            CellRef::new(self.mean_row.min(self.mode_row), self.summary_first_col),
            CellRef::new(
                self.mean_row.max(self.mode_row),
                Self::last_slot_col(self.summary_first_col, self.size_slots),
            ),
        )
    }

    /// Round, kind and probability columns, from the block's first row down to `max_row`.
    pub fn probability_extent(&self, max_row: u32) -> CellRange {
        CellRange::new(
            CellRef::new(self.prob_first_row, self.round_col),
            CellRef::new(
                max_row.max(self.prob_first_row),
                Self::last_slot_col(self.prob_first_col, self.size_slots),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a1(c: CellRef) -> String {
        c.to_string()
    }

    #[test]
    fn default_layout_matches_fixed_workbook() {
        let l = SheetLayout::default();
        assert_eq!(a1(l.index_cell(1)), "B7");
        assert_eq!(a1(l.estimate_cell(1, 0)), "C7");
        assert_eq!(a1(l.estimate_cell(3, 3)), "F9");
        assert_eq!(l.estimate_column(1, 5).to_string(), "D7:D11");
        assert_eq!(a1(l.mean_cell(0)), "I7");
        assert_eq!(a1(l.mode_cell(3)), "L8");
        assert_eq!(l.summary_extent().to_string(), "I7:L8");
        assert_eq!(l.data_extent(3).to_string(), "B7:F7");
        assert_eq!(l.data_extent(40).to_string(), "B7:F40");
        assert_eq!(l.probability_extent(25).to_string(), "H18:M25");
    }

    #[test]
    fn round_blocks_step_by_three_rows() {
        let l = SheetLayout::default();
        assert_eq!(l.round_row(1), 18);
        assert_eq!(l.round_row(4), 27);
        assert_eq!(l.round_label_range(2).to_string(), "H21:H23");
        assert_eq!(a1(l.kind_label_cell(2, ProbabilityKind::Union)), "I23");
        assert_eq!(a1(l.probability_cell(1, ProbabilityKind::Circle, 0)), "J18");
        assert_eq!(
            a1(l.probability_cell(3, ProbabilityKind::Rectangle, 3)),
            "M25"
        );
    }

    #[test]
    fn overflow_is_reported() {
        let l = SheetLayout::default();
        assert!(l.check_fits(4).is_ok());
        assert_eq!(
            l.check_fits(5),
            Err(ReportError::LayoutOverflow { sizes: 5, slots: 4 })
        );
    }
}
