//! The two summary formulas the report writes, and a small evaluator for them.
//!
//! Range semantics follow spreadsheets: only numeric cells count, empty and
//! text cells are skipped. `MODE` picks the first value (in range order) with
//! the highest repeat count and fails with "#N/A" when nothing repeats.

use std::fmt;

use super::cell::{CellRange, CellRef, CellValue};
use super::error::ReportError;
use super::sheet::ReportSheet;

/// Summary formula over a range of estimates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Formula {
    Average(CellRange),
    Mode(CellRange),
}

impl Formula {
    /// Parse `=AVERAGE(C7:C9)` / `=MODE(C7:C9)` (case-insensitive).
    pub fn parse(src: &str) -> Option<Self> {
        let body = src.trim().strip_prefix('=')?;
        let (name, rest) = body.split_once('(')?;
        let args = rest.strip_suffix(')')?;
        let range = CellRange::parse(args)?;
        match name.trim().to_ascii_uppercase().as_str() {
            "AVERAGE" => Some(Self::Average(range)),
            "MODE" => Some(Self::Mode(range)),
            _ => None,
        }
    }

    pub fn range(&self) -> CellRange {
        match self {
            Self::Average(r) | Self::Mode(r) => *r,
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average(r) => write!(f, "=AVERAGE({r})"),
            Self::Mode(r) => write!(f, "=MODE({r})"),
        }
    }
}

impl From<Formula> for CellValue {
    fn from(f: Formula) -> Self {
        CellValue::Formula(f.to_string())
    }
}

/// Most frequent value; ties go to the value seen first. `None` if nothing repeats.
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    for (i, v) in values.iter().enumerate() {
        // Earlier occurrences were already counted.
        if values[..i].iter().any(|u| u.to_bits() == v.to_bits()) {
            continue;
        }
        let count = values[i..]
            .iter()
            .filter(|u| u.to_bits() == v.to_bits())
            .count();
        if count > 1 && best.map_or(true, |(_, c)| count > c) {
            best = Some((*v, count));
        }
    }
    best.map(|(v, _)| v)
}

fn numbers_in<S: ReportSheet + ?Sized>(sheet: &S, range: CellRange) -> Vec<f64> {
    range
        .cells()
        .filter_map(|c| match sheet.get(c) {
            Some(CellValue::Number(v)) => Some(*v),
            _ => None,
        })
        .collect()
}

/// Numeric value of a cell, evaluating summary formulas.
pub fn evaluate<S: ReportSheet + ?Sized>(sheet: &S, at: CellRef) -> Result<f64, ReportError> {
    let fail = |reason: &str| ReportError::Formula {
        cell: at,
        reason: reason.to_string(),
    };
    match sheet.get(at) {
        Some(CellValue::Number(v)) => Ok(*v),
        Some(CellValue::Text(_)) | None => Err(fail("no numeric value")),
        Some(CellValue::Formula(src)) => {
            let formula = Formula::parse(src).ok_or_else(|| fail("unsupported formula"))?;
            let values = numbers_in(sheet, formula.range());
            match formula {
                Formula::Average(_) => {
                    if values.is_empty() {
                        return Err(fail("#DIV/0!"));
                    }
                    Ok(values.iter().sum::<f64>() / values.len() as f64)
                }
                Formula::Mode(_) => mode(&values).ok_or_else(|| fail("#N/A")),
            }
        }
    }
}
