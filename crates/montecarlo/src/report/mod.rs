//! Report layout engine.
//!
//! Maps a run (sizes × experiments × 3 probabilities) onto a fixed-column
//! sheet. Derived cells are formulas over the written ranges, not values, so
//! the workbook recomputes if an estimate is edited by hand. Re-running on a
//! sheet that holds an older report replaces it without leftover rows.
//!
//! Layers
//! - `cell`: A1 addressing and values.
//! - `sheet`: `ReportSheet` contract, in-memory `Sheet`/`Workbook`.
//! - `layout`: the indexed layout table.
//! - `formula`: AVERAGE/MODE rendering and evaluation.
//! - `writer`: clear + write.
//! - `template`: blank sheet with headers.

pub mod cell;
mod error;
pub mod formula;
pub mod layout;
pub mod sheet;
pub mod template;
mod writer;

pub use cell::{CellRange, CellRef, CellValue};
pub use error::ReportError;
pub use formula::{evaluate, Formula};
pub use layout::{ProbabilityKind, SheetLayout};
pub use sheet::{ReportSheet, Sheet, Workbook};
pub use template::{report_template, DEFAULT_SHEET_NAME};
pub use writer::{clear_region, write_report, write_report_to, WrittenReport};
