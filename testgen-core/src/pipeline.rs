//! Pipeline Coordinator Module
//!
//! Orders the four stages (normalize, generate, trace, render) and
//! aggregates partial failures into a run report. Data flows strictly
//! forward; each stage produces a new immutable record set. Render
//! targets fail independently, so a partial success (plan generated,
//! trace failed) stays distinguishable from total failure.

use crate::generate::{assign_ids, FallbackReason, GenerationStrategy};
use crate::models::{RawFragment, Requirement, TestCase, TraceabilityEntry};
use crate::normalize::Normalizer;
use crate::render::sequence::{build_sequence_document, SequenceDocument};
use crate::render::workbook::Workbook;
use crate::render::{fill_test_plan, fill_trace_sheet};
use crate::trace::{build_trace_matrix, uncovered};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

/// One requirement whose assisted generation degraded to the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRecord {
    pub requirement_id: String,
    pub reason: FallbackReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Rendered,
    Failed,
    Skipped,
}

/// Per-output-target outcome in the run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    pub target: String,
    pub status: TargetStatus,
    pub detail: String,
}

impl TargetReport {
    fn rendered(target: &str, detail: String) -> Self {
        Self {
            target: target.to_string(),
            status: TargetStatus::Rendered,
            detail,
        }
    }

    fn failed(target: &str, detail: String) -> Self {
        Self {
            target: target.to_string(),
            status: TargetStatus::Failed,
            detail,
        }
    }

    fn skipped(target: &str, detail: &str) -> Self {
        Self {
            target: target.to_string(),
            status: TargetStatus::Skipped,
            detail: detail.to_string(),
        }
    }
}

/// Run report: per-stage counts and degradations, serializable for the
/// run-level surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub strategy: String,
    pub fragments_seen: usize,
    pub fragments_discarded: usize,
    pub requirement_count: usize,
    pub test_case_count: usize,
    pub fallbacks: Vec<FallbackRecord>,
    /// Every requirement in the run fell back: the backend degradation is
    /// systemic, not a pile of independent small failures.
    pub backend_degraded: bool,
    pub uncovered_requirements: Vec<String>,
    pub targets: Vec<TargetReport>,
}

/// Everything one run produces.
#[derive(Debug)]
pub struct RunOutcome {
    pub requirements: Vec<Requirement>,
    pub test_cases: Vec<TestCase>,
    pub trace: Vec<TraceabilityEntry>,
    /// The filled template, present when at least one sheet rendered.
    pub workbook: Option<Workbook>,
    pub sequence: SequenceDocument,
    pub report: RunReport,
}

pub struct Pipeline {
    strategy: Box<dyn GenerationStrategy>,
    trace_sheet_name: String,
    sequence_name: String,
}

impl Pipeline {
    pub fn new(strategy: Box<dyn GenerationStrategy>) -> Self {
        Self {
            strategy,
            trace_sheet_name: "Traceability".to_string(),
            sequence_name: "MainSequence".to_string(),
        }
    }

    pub fn with_trace_sheet(mut self, name: impl Into<String>) -> Self {
        self.trace_sheet_name = name.into();
        self
    }

    pub fn with_sequence_name(mut self, name: impl Into<String>) -> Self {
        self.sequence_name = name.into();
        self
    }

    /// Run the full pipeline over the given fragments against the given
    /// template workbook. The template itself is never mutated.
    pub fn run(&self, fragments: Vec<RawFragment>, template: &Workbook) -> RunOutcome {
        let fragments_seen = fragments.len();

        // Stage 1: normalize.
        let mut normalizer = Normalizer::new();
        let normalized = normalizer.normalize(fragments);
        let requirements = normalized.requirements;
        info!(
            requirements = requirements.len(),
            discarded = normalized.discarded,
            "normalization complete"
        );

        // Stage 2: generate, requirement by requirement. One requirement's
        // degradation never affects its siblings, and ids come from a
        // deterministic post-pass in requirement order.
        let mut test_cases: Vec<TestCase> = Vec::new();
        let mut fallbacks: Vec<FallbackRecord> = Vec::new();
        for requirement in &requirements {
            let generated = self.strategy.generate(requirement);
            if let Some(reason) = generated.fallback {
                fallbacks.push(FallbackRecord {
                    requirement_id: requirement.id.clone(),
                    reason,
                });
            }
            test_cases.extend(assign_ids(requirement, generated.drafts));
        }
        info!(test_cases = test_cases.len(), "generation complete");

        let backend_degraded = !requirements.is_empty() && fallbacks.len() == requirements.len();
        if backend_degraded {
            warn!("completion backend degraded for every requirement in this run");
        }

        // Stage 3: trace.
        let trace_result = build_trace_matrix(&requirements, &test_cases);

        // Stage 4: render. The spreadsheet output is attempted whenever
        // requirements exist; each target reports independently.
        let mut targets = Vec::new();
        let mut workbook = None;

        if requirements.is_empty() {
            targets.push(TargetReport::skipped("plan-sheet", "no requirements"));
            targets.push(TargetReport::skipped("traceability-sheet", "no requirements"));
        } else {
            let mut filled = template.clone();
            let mut any_rendered = false;

            match fill_test_plan(&mut filled, &test_cases) {
                Ok(fill) => {
                    any_rendered = true;
                    targets.push(TargetReport::rendered(
                        "plan-sheet",
                        format!(
                            "{} row(s) written to '{}', unmapped columns: {:?}",
                            fill.rows_written, fill.sheet, fill.unmapped_columns
                        ),
                    ));
                }
                Err(e) => {
                    error!(error = %e, "test plan rendering failed");
                    targets.push(TargetReport::failed("plan-sheet", e.to_string()));
                }
            }

            match &trace_result {
                Ok(entries) => match fill_trace_sheet(&mut filled, &self.trace_sheet_name, entries)
                {
                    Ok(fill) => {
                        any_rendered = true;
                        targets.push(TargetReport::rendered(
                            "traceability-sheet",
                            format!("{} row(s) written to '{}'", fill.rows_written, fill.sheet),
                        ));
                    }
                    Err(e) => {
                        error!(error = %e, "traceability rendering failed");
                        targets.push(TargetReport::failed("traceability-sheet", e.to_string()));
                    }
                },
                Err(e) => {
                    error!(error = %e, "traceability matrix construction failed");
                    targets.push(TargetReport::failed("traceability-sheet", e.to_string()));
                }
            }

            if any_rendered {
                workbook = Some(filled);
            }
        }

        let sequence = build_sequence_document(&self.sequence_name, &test_cases);
        targets.push(TargetReport::rendered(
            "sequence-document",
            format!("{} step group(s)", sequence.groups.len()),
        ));

        let trace = trace_result.unwrap_or_default();
        let report = RunReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            strategy: self.strategy.name().to_string(),
            fragments_seen,
            fragments_discarded: normalized.discarded,
            requirement_count: requirements.len(),
            test_case_count: test_cases.len(),
            fallbacks,
            backend_degraded,
            uncovered_requirements: uncovered(&trace).iter().map(|s| s.to_string()).collect(),
            targets,
        };

        RunOutcome {
            requirements,
            test_cases,
            trace,
            workbook,
            sequence,
            report,
        }
    }
}
