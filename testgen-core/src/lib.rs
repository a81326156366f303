pub mod generate;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod trace;

// Re-export commonly used types
pub use generate::{
    assign_ids, strategy_for, BackendAssistedStrategy, CommandCompletionClient, CompletionClient,
    CompletionError, FallbackReason, Generated, GenerationStrategy, RuleBasedStrategy,
    StrategyKind,
};
pub use models::{
    RawFragment, Requirement, SourceRef, TestCase, TestCaseDraft, TraceabilityEntry,
};
pub use normalize::{NormalizeOutcome, Normalizer};
pub use pipeline::{
    FallbackRecord, Pipeline, RunOutcome, RunReport, TargetReport, TargetStatus,
};
pub use render::{
    build_sequence_document, fill_test_plan, fill_trace_sheet, find_header, HeaderBinding,
    RenderError, SequenceDocument, Sheet, SheetFill, Workbook, DEFAULT_SCAN_WINDOW,
};
pub use trace::{build_trace_matrix, uncovered, TraceError};
