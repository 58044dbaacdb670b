//! The sheet contract the report engine writes against, plus an in-memory
//! workbook that implements it and persists through serde.

use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use super::cell::{CellRange, CellRef, CellValue};
use super::error::ReportError;

/// Write-side view of one worksheet.
pub trait ReportSheet {
    fn get(&self, at: CellRef) -> Option<&CellValue>;
    fn set(&mut self, at: CellRef, value: CellValue);
    fn clear(&mut self, at: CellRef);
    /// Last row holding a value or a merged range, 0 for an empty sheet.
    fn max_row(&self) -> u32;
    fn merged_ranges(&self) -> Vec<CellRange>;
    /// Merging a range identical to an existing one is a no-op.
    fn merge(&mut self, range: CellRange) -> Result<(), ReportError>;
    fn unmerge(&mut self, range: CellRange) -> Result<(), ReportError>;
}

/// In-memory worksheet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "SheetRepr", try_from = "SheetRepr")]
pub struct Sheet {
    cells: BTreeMap<CellRef, CellValue>,
    merged: BTreeSet<CellRange>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty cells in row-major order.
    #[cfg(test)]
    pub(crate) fn cells(&self) -> impl Iterator<Item = (CellRef, &CellValue)> {
        self.cells.iter().map(|(k, v)| (*k, v))
    }

    /// Non-empty cells inside `range`.
    #[cfg(test)]
    pub(crate) fn cells_in(&self, range: CellRange) -> impl Iterator<Item = (CellRef, &CellValue)> {
        self.cells
            .range(range.start..=range.end)
            .filter(move |(k, _)| range.contains(**k))
            .map(|(k, v)| (*k, v))
    }

    #[cfg(test)]
    pub(crate) fn number(&self, at: CellRef) -> Option<f64> {
        match self.cells.get(&at) {
            Some(CellValue::Number(v)) => Some(*v),
            _ => None,
        }
    }
}

impl ReportSheet for Sheet {
    fn get(&self, at: CellRef) -> Option<&CellValue> {
        self.cells.get(&at)
    }

    fn set(&mut self, at: CellRef, value: CellValue) {
        self.cells.insert(at, value);
    }

    fn clear(&mut self, at: CellRef) {
        self.cells.remove(&at);
    }

    fn max_row(&self) -> u32 {
        let cell_max = self.cells.keys().map(|c| c.row).max().unwrap_or(0);
        let merge_max = self.merged.iter().map(|r| r.end.row).max().unwrap_or(0);
        cell_max.max(merge_max)
    }

    fn merged_ranges(&self) -> Vec<CellRange> {
        self.merged.iter().copied().collect()
    }

    fn merge(&mut self, range: CellRange) -> Result<(), ReportError> {
        if self.merged.contains(&range) {
            return Ok(());
        }
        if self.merged.iter().any(|m| m.intersects(&range)) {
            return Err(ReportError::MergeConflict { range });
        }
        // Only the anchor keeps its value.
        for c in range.cells().skip(1) {
            self.cells.remove(&c);
        }
        self.merged.insert(range);
        Ok(())
    }

    fn unmerge(&mut self, range: CellRange) -> Result<(), ReportError> {
        if self.merged.remove(&range) {
            Ok(())
        } else {
            Err(ReportError::Unmerge { range })
        }
    }
}

/// Named sheets, in creation order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<NamedSheet>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct NamedSheet {
    name: String,
    sheet: Sheet,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name).map(|s| &s.sheet)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .map(|s| &mut s.sheet)
    }

    /// Like [`Workbook::sheet_mut`], but a missing sheet is an error.
    pub fn require_sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, ReportError> {
        self.sheet_mut(name).ok_or_else(|| ReportError::SheetNotFound {
            name: name.to_string(),
        })
    }

    /// Insert or replace the sheet called `name`.
    pub fn insert_sheet(&mut self, name: impl Into<String>, sheet: Sheet) -> &mut Sheet {
        let name = name.into();
        let idx = match self.sheets.iter().position(|s| s.name == name) {
            Some(i) => {
                self.sheets[i].sheet = sheet;
                i
            }
            None => {
                self.sheets.push(NamedSheet { name, sheet });
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[idx].sheet
    }
}

// Serialized shape: A1 keys so the JSON stays readable and map keys stay strings.
#[derive(Serialize, Deserialize)]
struct SheetRepr {
    cells: BTreeMap<String, CellValue>,
    #[serde(default)]
    merged: Vec<String>,
}

impl From<Sheet> for SheetRepr {
    fn from(s: Sheet) -> Self {
        Self {
            cells: s
                .cells
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            merged: s.merged.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl TryFrom<SheetRepr> for Sheet {
    type Error = String;

    fn try_from(repr: SheetRepr) -> Result<Self, Self::Error> {
        let mut sheet = Sheet::default();
        for (k, v) in repr.cells {
            let at = CellRef::parse(&k).ok_or_else(|| format!("bad cell address '{k}'"))?;
            sheet.cells.insert(at, v);
        }
        for m in repr.merged {
            let range = CellRange::parse(&m).ok_or_else(|| format!("bad merged range '{m}'"))?;
            sheet.merged.insert(range);
        }
        Ok(sheet)
    }
}
