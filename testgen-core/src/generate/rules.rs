//! Rule-Based Strategy
//!
//! The deterministic default: pure string composition over the
//! requirement, one draft per requirement, no external dependency. This
//! strategy is total - it never fails - which also makes it the fallback
//! output for the backend-assisted strategy.

use crate::generate::{Generated, GenerationStrategy};
use crate::models::{Requirement, TestCaseDraft};

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedStrategy;

impl RuleBasedStrategy {
    /// Compose the single baseline draft for a requirement.
    pub fn baseline_draft(requirement: &Requirement) -> TestCaseDraft {
        TestCaseDraft {
            title: format!("Validate {}: {}", requirement.id, requirement.text),
            preconditions: "System initialized".to_string(),
            action: format!("Verify {}", requirement.text),
            expected_result: format!("{} is satisfied", requirement.text),
        }
    }
}

impl GenerationStrategy for RuleBasedStrategy {
    fn generate(&self, requirement: &Requirement) -> Generated {
        Generated::clean(vec![Self::baseline_draft(requirement)])
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRef;

    fn requirement(text: &str) -> Requirement {
        Requirement {
            id: "REQ-0001".to_string(),
            text: text.to_string(),
            source: SourceRef::new("srs.txt"),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_baseline_draft_fields() {
        let req = requirement("The system shall monitor vehicle speed continuously");
        let generated = RuleBasedStrategy.generate(&req);

        assert!(generated.fallback.is_none());
        assert_eq!(generated.drafts.len(), 1);

        let draft = &generated.drafts[0];
        assert_eq!(
            draft.title,
            "Validate REQ-0001: The system shall monitor vehicle speed continuously"
        );
        assert_eq!(draft.preconditions, "System initialized");
        assert_eq!(
            draft.action,
            "Verify The system shall monitor vehicle speed continuously"
        );
        assert_eq!(
            draft.expected_result,
            "The system shall monitor vehicle speed continuously is satisfied"
        );
    }

    #[test]
    fn test_deterministic_across_invocations() {
        let req = requirement("The ECU shall report fault codes");
        let first = RuleBasedStrategy.generate(&req);
        let second = RuleBasedStrategy.generate(&req);
        assert_eq!(first.drafts, second.drafts);
    }
}
