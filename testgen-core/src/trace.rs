//! Traceability Builder Module
//!
//! Builds the bidirectional traceability matrix between requirements and
//! test cases and verifies its completeness. Pure functions: no I/O, no
//! mutation of inputs.

use crate::models::{Requirement, TestCase, TraceabilityEntry};
use std::collections::BTreeSet;
use thiserror::Error;

/// Structural contract violations. A completeness mismatch means a stage
/// upstream broke the one-entry-per-requirement guarantee; it is fatal
/// for the affected output target, never silently patched over.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error(
        "traceability completeness mismatch: {expected} requirement(s) in, {built} entry id(s) out"
    )]
    CompletenessMismatch { expected: usize, built: usize },
}

/// Build one [`TraceabilityEntry`] per requirement, in requirement order.
///
/// A requirement with zero matching test cases still gets an entry with
/// `coverage = false`; informational-only requirements are tolerated
/// rather than flagged as defects.
pub fn build_trace_matrix(
    requirements: &[Requirement],
    test_cases: &[TestCase],
) -> Result<Vec<TraceabilityEntry>, TraceError> {
    let entries: Vec<TraceabilityEntry> = requirements
        .iter()
        .map(|req| {
            let test_case_ids: Vec<String> = test_cases
                .iter()
                .filter(|tc| tc.source_requirement_id == req.id)
                .map(|tc| tc.id.clone())
                .collect();
            TraceabilityEntry {
                requirement_id: req.id.clone(),
                coverage: !test_case_ids.is_empty(),
                test_case_ids,
            }
        })
        .collect();

    verify_completeness(requirements, &entries)?;
    Ok(entries)
}

/// Assert that the entry id set equals the requirement id set exactly.
fn verify_completeness(
    requirements: &[Requirement],
    entries: &[TraceabilityEntry],
) -> Result<(), TraceError> {
    let expected: BTreeSet<&str> = requirements.iter().map(|r| r.id.as_str()).collect();
    let built: BTreeSet<&str> = entries.iter().map(|e| e.requirement_id.as_str()).collect();

    // Set equality alone would miss duplicated ids, so the counts are
    // checked against the sets as well.
    if expected != built
        || expected.len() != requirements.len()
        || built.len() != entries.len()
    {
        return Err(TraceError::CompletenessMismatch {
            expected: requirements.len(),
            built: entries.len(),
        });
    }
    Ok(())
}

/// Requirement ids with no associated test case (coverage gaps).
pub fn uncovered(entries: &[TraceabilityEntry]) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| !e.coverage)
        .map(|e| e.requirement_id.as_str())
        .collect()
}
