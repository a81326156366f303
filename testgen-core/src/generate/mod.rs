//! Generation Strategy Module
//!
//! Turns one [`Requirement`] into one or more test-case drafts. Two
//! strategies exist: the deterministic rule-based default and the
//! backend-assisted variant that consults an external text-completion
//! service and falls back to the rule-based output on any failure.

pub mod assisted;
pub mod client;
pub mod prompts;
pub mod responses;
pub mod rules;

pub use assisted::BackendAssistedStrategy;
pub use client::{CommandCompletionClient, CompletionClient, CompletionError};
pub use rules::RuleBasedStrategy;

use crate::models::{Requirement, TestCase, TestCaseDraft};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Which generation strategy a run should use; selected at configuration
/// time via [`strategy_for`], never by inheritance chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    RuleBased,
    BackendAssisted,
}

/// Why a requirement's assisted generation degraded to rule-based output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FallbackReason {
    /// The completion call itself failed (timeout, unavailable, ...).
    CompletionFailed(String),
    /// The backend answered, but the response was not decomposable into
    /// the four required draft fields.
    UnparseableResponse,
}

/// Drafts produced for a single requirement, plus whether the strategy
/// had to degrade to its fallback for this requirement.
#[derive(Debug, Clone)]
pub struct Generated {
    pub drafts: Vec<TestCaseDraft>,
    pub fallback: Option<FallbackReason>,
}

impl Generated {
    pub fn clean(drafts: Vec<TestCaseDraft>) -> Self {
        Self {
            drafts,
            fallback: None,
        }
    }

    pub fn degraded(drafts: Vec<TestCaseDraft>, reason: FallbackReason) -> Self {
        Self {
            drafts,
            fallback: Some(reason),
        }
    }
}

/// A generation strategy consumes one requirement at a time, with no
/// cross-requirement state, so one requirement's failure never affects
/// its siblings.
pub trait GenerationStrategy: Send + Sync {
    fn generate(&self, requirement: &Requirement) -> Generated;

    /// Human-readable strategy name for the run report.
    fn name(&self) -> &'static str;
}

/// Build the strategy selected by the run configuration.
///
/// Requesting the backend-assisted strategy without a completion client
/// degrades to the rule-based default rather than failing the run.
pub fn strategy_for(
    kind: StrategyKind,
    backend: Option<Box<dyn CompletionClient>>,
    timeout: Duration,
) -> Box<dyn GenerationStrategy> {
    match (kind, backend) {
        (StrategyKind::BackendAssisted, Some(client)) => {
            Box::new(BackendAssistedStrategy::new(client, timeout))
        }
        (StrategyKind::BackendAssisted, None) => {
            warn!("backend-assisted strategy requested without a completion client; using rule-based");
            Box::new(RuleBasedStrategy)
        }
        (StrategyKind::RuleBased, _) => Box::new(RuleBasedStrategy),
    }
}

/// Assign final identifiers to the drafts of one requirement.
///
/// A single draft becomes `TC-<requirement_id>`; multiple drafts become
/// `TC-<requirement_id>-<n>` with n 1-based in draft order. Runs as a
/// deterministic post-pass keyed by requirement order, so the ids do not
/// depend on generation completion order.
pub fn assign_ids(requirement: &Requirement, drafts: Vec<TestCaseDraft>) -> Vec<TestCase> {
    let multiple = drafts.len() > 1;
    drafts
        .into_iter()
        .enumerate()
        .map(|(idx, draft)| TestCase {
            id: if multiple {
                format!("TC-{}-{}", requirement.id, idx + 1)
            } else {
                format!("TC-{}", requirement.id)
            },
            title: draft.title,
            preconditions: draft.preconditions,
            action: draft.action,
            expected_result: draft.expected_result,
            source_requirement_id: requirement.id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRef;

    fn requirement() -> Requirement {
        Requirement {
            id: "REQ-0001".to_string(),
            text: "The system shall respond".to_string(),
            source: SourceRef::new("srs.txt"),
            tags: Vec::new(),
        }
    }

    fn draft(title: &str) -> TestCaseDraft {
        TestCaseDraft {
            title: title.to_string(),
            preconditions: "System initialized".to_string(),
            action: "do".to_string(),
            expected_result: "done".to_string(),
        }
    }

    #[test]
    fn test_assign_ids_single_draft() {
        let cases = assign_ids(&requirement(), vec![draft("only")]);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].id, "TC-REQ-0001");
        assert_eq!(cases[0].source_requirement_id, "REQ-0001");
    }

    #[test]
    fn test_assign_ids_multiple_drafts() {
        let cases = assign_ids(&requirement(), vec![draft("a"), draft("b"), draft("c")]);
        let ids: Vec<_> = cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["TC-REQ-0001-1", "TC-REQ-0001-2", "TC-REQ-0001-3"]);
    }

    #[test]
    fn test_assign_ids_no_drafts() {
        let cases = assign_ids(&requirement(), Vec::new());
        assert!(cases.is_empty());
    }

    #[test]
    fn test_strategy_kind_serde() {
        let kind: StrategyKind = serde_yaml::from_str("backend-assisted").unwrap();
        assert_eq!(kind, StrategyKind::BackendAssisted);
        assert_eq!(StrategyKind::default(), StrategyKind::RuleBased);
    }

    #[test]
    fn test_factory_without_backend_degrades_to_rule_based() {
        let strategy = strategy_for(
            StrategyKind::BackendAssisted,
            None,
            Duration::from_secs(10),
        );
        assert_eq!(strategy.name(), "rule-based");
    }
}
