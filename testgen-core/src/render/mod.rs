//! Template Renderer Module
//!
//! Renders test cases and the traceability matrix into the two external
//! formats: a pre-existing spreadsheet template (header-aware strict
//! fill) and a hierarchical sequence document for the test-execution
//! platform. On-disk serialization of either is the caller's concern.

pub mod plan;
pub mod sequence;
pub mod workbook;

pub use plan::{fill_test_plan, fill_trace_sheet, SheetFill, PLAN_FIELDS, TRACE_FIELDS};
pub use sequence::{build_sequence_document, SequenceDocument, SequenceStep, StepGroup, StepKind};
pub use workbook::{find_header, HeaderBinding, Sheet, Workbook, DEFAULT_SCAN_WINDOW};

use thiserror::Error;

/// Rendering failures. Header mismatches are structural: silently
/// misaligned writes into a certified template are worse than an
/// explicit failure, so there is no positional fallback.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template workbook contains no sheets")]
    EmptyWorkbook,

    #[error(
        "no header row naming {required:?} found in sheet '{sheet}' within the first {window} rows"
    )]
    HeaderNotFound {
        sheet: String,
        window: usize,
        required: Vec<String>,
    },
}
