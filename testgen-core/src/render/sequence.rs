//! Sequence-Document Sub-Renderer
//!
//! Pure structural transform from test cases to the hierarchical
//! execution document consumed by the test-execution platform: one named
//! step group per test case with ordered precondition-check, action and
//! result-verification steps. Step identifiers derive from the test-case
//! id so the document stays traceable on its own.

use crate::models::TestCase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDocument {
    pub name: String,
    pub groups: Vec<StepGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepGroup {
    pub id: String,
    pub title: String,
    pub requirement_id: String,
    pub steps: Vec<SequenceStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub id: String,
    pub kind: StepKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    PreconditionCheck,
    Action,
    ResultVerification,
}

impl StepKind {
    fn suffix(self) -> &'static str {
        match self {
            StepKind::PreconditionCheck => "PRE",
            StepKind::Action => "ACT",
            StepKind::ResultVerification => "VER",
        }
    }
}

/// Build the sequence document for a run. Carries the literal field text
/// of every test case; serialization is the caller's concern.
pub fn build_sequence_document(name: &str, tests: &[TestCase]) -> SequenceDocument {
    let groups = tests
        .iter()
        .map(|tc| StepGroup {
            id: tc.id.clone(),
            title: tc.title.clone(),
            requirement_id: tc.source_requirement_id.clone(),
            steps: vec![
                step(tc, StepKind::PreconditionCheck, &tc.preconditions),
                step(tc, StepKind::Action, &tc.action),
                step(tc, StepKind::ResultVerification, &tc.expected_result),
            ],
        })
        .collect();

    SequenceDocument {
        name: name.to_string(),
        groups,
    }
}

fn step(tc: &TestCase, kind: StepKind, text: &str) -> SequenceStep {
    SequenceStep {
        id: format!("{}-{}", tc.id, kind.suffix()),
        kind,
        text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_case() -> TestCase {
        TestCase {
            id: "TC-REQ-0001".to_string(),
            title: "Validate REQ-0001: The system shall respond".to_string(),
            preconditions: "System initialized".to_string(),
            action: "Verify The system shall respond".to_string(),
            expected_result: "The system shall respond is satisfied".to_string(),
            source_requirement_id: "REQ-0001".to_string(),
        }
    }

    #[test]
    fn test_group_per_test_case_with_ordered_steps() {
        let doc = build_sequence_document("MainSequence", &[test_case()]);

        assert_eq!(doc.name, "MainSequence");
        assert_eq!(doc.groups.len(), 1);

        let group = &doc.groups[0];
        assert_eq!(group.id, "TC-REQ-0001");
        assert_eq!(group.requirement_id, "REQ-0001");

        let kinds: Vec<StepKind> = group.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepKind::PreconditionCheck,
                StepKind::Action,
                StepKind::ResultVerification
            ]
        );
        assert_eq!(group.steps[0].id, "TC-REQ-0001-PRE");
        assert_eq!(group.steps[0].text, "System initialized");
        assert_eq!(group.steps[1].id, "TC-REQ-0001-ACT");
        assert_eq!(group.steps[2].id, "TC-REQ-0001-VER");
        assert_eq!(
            group.steps[2].text,
            "The system shall respond is satisfied"
        );
    }

    #[test]
    fn test_empty_input_yields_empty_document() {
        let doc = build_sequence_document("MainSequence", &[]);
        assert!(doc.groups.is_empty());
    }

    #[test]
    fn test_document_serializes_to_json() {
        let doc = build_sequence_document("MainSequence", &[test_case()]);
        let json = serde_json::to_string_pretty(&doc).unwrap();
        assert!(json.contains("\"precondition_check\""));

        let back: SequenceDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
