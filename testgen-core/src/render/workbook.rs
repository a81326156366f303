//! Workbook Model and Header Detection
//!
//! In-memory model of the external spreadsheet template: named sheets of
//! string-cell rows, serde round-trippable so the serialization
//! collaborator can load and store it in whatever on-disk form it owns.
//! Header detection is a pure search over row index with a bounded
//! window and an explicit failure value - no hidden heuristics.

use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounded number of leading rows scanned for the header.
pub const DEFAULT_SCAN_WINDOW: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Index of the last row containing any non-empty cell, if any.
    pub fn last_populated_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.trim().is_empty()))
    }
}

/// The binding produced by header detection: the header row index and,
/// per matched field name, the column index it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBinding {
    pub row: usize,
    columns: BTreeMap<String, usize>,
}

impl HeaderBinding {
    /// Column bound to a field name, if the header named it.
    pub fn column(&self, field: &str) -> Option<usize> {
        self.columns.get(&canon(field)).copied()
    }

    /// Header-row columns whose cell value matched none of the known
    /// field names. Left untouched by the fill, reported as unmapped.
    pub fn unmapped_columns(&self, header_row: &[String]) -> Vec<String> {
        let bound: Vec<usize> = self.columns.values().copied().collect();
        header_row
            .iter()
            .enumerate()
            .filter(|(idx, cell)| !cell.trim().is_empty() && !bound.contains(idx))
            .map(|(_, cell)| cell.trim().to_string())
            .collect()
    }
}

/// Scan a sheet top-to-bottom for the first row whose non-empty cell
/// values form a superset of `required` (case-insensitive, trimmed).
///
/// Fields in `optional` are bound when present but do not influence the
/// match. Failure past the scan window is an explicit error; the caller
/// must never fall back to positional column writing.
pub fn find_header(
    sheet: &Sheet,
    required: &[&str],
    optional: &[&str],
    window: usize,
) -> Result<HeaderBinding, RenderError> {
    for (row_idx, row) in sheet.rows.iter().enumerate().take(window) {
        let mut columns: BTreeMap<String, usize> = BTreeMap::new();
        for (col_idx, cell) in row.iter().enumerate() {
            let key = canon(cell);
            if !key.is_empty() {
                columns.entry(key).or_insert(col_idx);
            }
        }

        if required.iter().all(|field| columns.contains_key(&canon(field))) {
            let wanted: Vec<String> = required
                .iter()
                .chain(optional.iter())
                .map(|f| canon(f))
                .collect();
            columns.retain(|key, _| wanted.contains(key));
            return Ok(HeaderBinding {
                row: row_idx,
                columns,
            });
        }
    }

    Err(RenderError::HeaderNotFound {
        sheet: sheet.name.clone(),
        window,
        required: required.iter().map(|f| f.to_string()).collect(),
    })
}

fn canon(cell: &str) -> String {
    cell.trim().to_lowercase()
}
