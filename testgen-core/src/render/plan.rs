//! Spreadsheet Sub-Renderer
//!
//! "Header-aware strict fill" of the external test-plan template. Field
//! values land in the columns the detected header binds them to; columns
//! the header does not name are left untouched so pre-existing formulas
//! and formatting survive. Writes are all-or-nothing per sheet: the only
//! fallible step (header detection) happens before any mutation.

use crate::models::{TestCase, TraceabilityEntry};
use crate::render::workbook::{find_header, HeaderBinding, Sheet, Workbook, DEFAULT_SCAN_WINDOW};
use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Required field vocabulary of the test-plan sheet.
pub const PLAN_FIELDS: [&str; 5] = [
    "Test ID",
    "Title",
    "Preconditions",
    "Action",
    "Expected Result",
];

/// Bound when the template carries it, but not required.
const PLAN_OPTIONAL_FIELDS: [&str; 1] = ["Requirement IDs"];

/// Field vocabulary of the traceability sheet.
pub const TRACE_FIELDS: [&str; 3] = ["Requirement ID", "Test Cases", "Coverage"];

const TEST_CASE_ID_DELIMITER: &str = ", ";

/// Outcome of filling one sheet, for the run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetFill {
    pub sheet: String,
    pub header_row: usize,
    pub rows_written: usize,
    pub unmapped_columns: Vec<String>,
}

/// Fill the first sheet of the template with one row per test case,
/// appended below the last populated data row.
pub fn fill_test_plan(
    workbook: &mut Workbook,
    tests: &[TestCase],
) -> Result<SheetFill, RenderError> {
    let sheet = workbook.sheets.first_mut().ok_or(RenderError::EmptyWorkbook)?;
    let binding = find_header(sheet, &PLAN_FIELDS, &PLAN_OPTIONAL_FIELDS, DEFAULT_SCAN_WINDOW)?;

    let rows: Vec<Vec<(&str, String)>> = tests
        .iter()
        .map(|tc| {
            vec![
                ("Test ID", tc.id.clone()),
                ("Title", tc.title.clone()),
                ("Preconditions", tc.preconditions.clone()),
                ("Action", tc.action.clone()),
                ("Expected Result", tc.expected_result.clone()),
                ("Requirement IDs", tc.source_requirement_id.clone()),
            ]
        })
        .collect();

    let fill = append_rows(sheet, &binding, rows);
    info!(
        sheet = %fill.sheet,
        rows = fill.rows_written,
        "filled test plan sheet"
    );
    Ok(fill)
}

/// Fill the traceability sheet analogously: one row per entry, test case
/// ids joined by a fixed delimiter, coverage as Yes/No.
///
/// A template without the named sheet gets a fresh one carrying the
/// traceability header; an existing sheet must already name the
/// vocabulary or the fill fails like any other header mismatch.
pub fn fill_trace_sheet(
    workbook: &mut Workbook,
    sheet_name: &str,
    entries: &[TraceabilityEntry],
) -> Result<SheetFill, RenderError> {
    if workbook.sheet(sheet_name).is_none() {
        let mut sheet = Sheet::new(sheet_name);
        sheet
            .rows
            .push(TRACE_FIELDS.iter().map(|f| f.to_string()).collect());
        workbook.sheets.push(sheet);
    }

    // Present by construction above.
    let sheet = workbook
        .sheet_mut(sheet_name)
        .ok_or(RenderError::EmptyWorkbook)?;
    let binding = find_header(sheet, &TRACE_FIELDS, &[], DEFAULT_SCAN_WINDOW)?;

    let rows: Vec<Vec<(&str, String)>> = entries
        .iter()
        .map(|entry| {
            vec![
                ("Requirement ID", entry.requirement_id.clone()),
                (
                    "Test Cases",
                    entry.test_case_ids.join(TEST_CASE_ID_DELIMITER),
                ),
                (
                    "Coverage",
                    if entry.coverage { "Yes" } else { "No" }.to_string(),
                ),
            ]
        })
        .collect();

    let fill = append_rows(sheet, &binding, rows);
    info!(
        sheet = %fill.sheet,
        rows = fill.rows_written,
        "filled traceability sheet"
    );
    Ok(fill)
}

/// Append rows below the last populated data row, writing only the
/// columns the binding maps.
fn append_rows(
    sheet: &mut Sheet,
    binding: &HeaderBinding,
    rows: Vec<Vec<(&str, String)>>,
) -> SheetFill {
    let unmapped_columns = binding.unmapped_columns(&sheet.rows[binding.row]);
    let start = sheet
        .last_populated_row()
        .map(|r| r + 1)
        .unwrap_or(binding.row + 1);
    let rows_written = rows.len();

    for (offset, fields) in rows.into_iter().enumerate() {
        let row_idx = start + offset;
        while sheet.rows.len() <= row_idx {
            sheet.rows.push(Vec::new());
        }
        let row = &mut sheet.rows[row_idx];
        for (field, value) in fields {
            if let Some(col) = binding.column(field) {
                if row.len() <= col {
                    row.resize(col + 1, String::new());
                }
                row[col] = value;
            }
        }
    }

    SheetFill {
        sheet: sheet.name.clone(),
        header_row: binding.row,
        rows_written,
        unmapped_columns,
    }
}
