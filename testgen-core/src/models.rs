//! Data Model Module
//!
//! Canonical records produced by the pipeline stages. Each stage consumes
//! the records of the previous stage and produces a new immutable set;
//! nothing downstream mutates a record created upstream.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance of a raw fragment: the originating file plus an optional
/// location hint (page, line, cell reference - whatever the parser knows).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub file: String,
    pub location: Option<String>,
}

impl SourceRef {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            location: None,
        }
    }

    pub fn with_location(file: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            location: Some(location.into()),
        }
    }

    /// Placeholder used when a parser hands over a fragment without
    /// provenance. Tolerated rather than rejected.
    pub fn unknown() -> Self {
        Self {
            file: "unknown".to_string(),
            location: None,
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{}:{}", self.file, loc),
            None => write!(f, "{}", self.file),
        }
    }
}

/// A raw span of extracted text as delivered by one of the external
/// document parsers, prior to normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFragment {
    pub raw_text: String,
    pub source: Option<SourceRef>,
}

impl RawFragment {
    pub fn new(raw_text: impl Into<String>, source: Option<SourceRef>) -> Self {
        Self {
            raw_text: raw_text.into(),
            source,
        }
    }
}

/// Canonical unit of verification intent.
///
/// Created once by the normalizer, immutable thereafter. The `id` is unique
/// within a run; `source` is informational only and never used for identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub text: String,
    pub source: SourceRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A test case before identifier assignment, as produced by a generation
/// strategy for a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseDraft {
    pub title: String,
    pub preconditions: String,
    pub action: String,
    pub expected_result: String,
}

/// A verification procedure derived from exactly one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub preconditions: String,
    pub action: String,
    pub expected_result: String,
    pub source_requirement_id: String,
}

/// One row of the bidirectional traceability matrix: a requirement and
/// every test case derived from it. A requirement with zero test cases
/// still gets an entry, with `coverage = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceabilityEntry {
    pub requirement_id: String,
    pub test_case_ids: Vec<String>,
    pub coverage: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_ref_display() {
        let plain = SourceRef::new("srs.txt");
        assert_eq!(plain.to_string(), "srs.txt");

        let located = SourceRef::with_location("srs.txt", "line 12");
        assert_eq!(located.to_string(), "srs.txt:line 12");
    }

    #[test]
    fn test_source_ref_unknown() {
        let unknown = SourceRef::unknown();
        assert_eq!(unknown.file, "unknown");
        assert!(unknown.location.is_none());
    }

    #[test]
    fn test_requirement_serde_roundtrip() {
        let req = Requirement {
            id: "REQ-0001".to_string(),
            text: "The system shall monitor vehicle speed".to_string(),
            source: SourceRef::new("srs.txt"),
            tags: vec!["ASIL-B".to_string()],
        };

        let yaml = serde_yaml::to_string(&req).unwrap();
        let back: Requirement = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, req);
    }
}
