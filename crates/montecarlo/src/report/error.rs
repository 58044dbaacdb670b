use std::fmt;

use super::cell::{CellRange, CellRef};

/// Errors surfaced while laying out or evaluating a report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// The named sheet does not exist in the workbook; nothing was written.
    SheetNotFound { name: String },
    /// More sample sizes than the layout has columns for.
    LayoutOverflow { sizes: usize, slots: usize },
    /// A probability record names a size outside the configured list.
    UnknownSampleSize { size: u64 },
    /// A configured size has no experiment results.
    MissingResults { size: u64 },
    /// A new merged range overlaps an existing, different one.
    MergeConflict { range: CellRange },
    /// The sink refused to unmerge a range.
    Unmerge { range: CellRange },
    /// A formula could not be evaluated.
    Formula { cell: CellRef, reason: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SheetNotFound { name } => write!(f, "sheet '{name}' not found"),
            Self::LayoutOverflow { sizes, slots } => write!(
                f,
                "{sizes} sample sizes do not fit the layout ({slots} columns)"
            ),
            Self::UnknownSampleSize { size } => {
                write!(f, "sample size {size} is not part of the configured list")
            }
            Self::MissingResults { size } => write!(f, "no results for sample size {size}"),
            Self::MergeConflict { range } => {
                write!(f, "merged range {range} overlaps an existing merge")
            }
            Self::Unmerge { range } => write!(f, "cannot unmerge {range}"),
            Self::Formula { cell, reason } => write!(f, "formula in {cell}: {reason}"),
        }
    }
}

impl std::error::Error for ReportError {}
