//! Backend-Assisted Strategy
//!
//! Consults the external completion backend for richer drafts. The
//! fallback to rule-based output is a mandatory resilience property: any
//! completion failure or unparseable response degrades that single
//! requirement to the deterministic baseline, and the degradation is
//! recorded so the run report can surface it. No retries happen here.

use crate::generate::client::CompletionClient;
use crate::generate::rules::RuleBasedStrategy;
use crate::generate::{prompts, responses, FallbackReason, Generated, GenerationStrategy};
use crate::models::Requirement;
use std::time::Duration;
use tracing::warn;

pub struct BackendAssistedStrategy {
    client: Box<dyn CompletionClient>,
    timeout: Duration,
}

impl BackendAssistedStrategy {
    pub fn new(client: Box<dyn CompletionClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn fall_back(requirement: &Requirement, reason: FallbackReason) -> Generated {
        Generated::degraded(
            vec![RuleBasedStrategy::baseline_draft(requirement)],
            reason,
        )
    }
}

impl GenerationStrategy for BackendAssistedStrategy {
    fn generate(&self, requirement: &Requirement) -> Generated {
        let prompt = prompts::build_generation_prompt(requirement);

        match self.client.complete(&prompt, self.timeout) {
            Ok(response) => {
                let drafts = responses::parse_draft_response(&response);
                if drafts.is_empty() {
                    warn!(
                        requirement = %requirement.id,
                        "backend response not decomposable into draft fields; using rule-based fallback"
                    );
                    Self::fall_back(requirement, FallbackReason::UnparseableResponse)
                } else {
                    Generated::clean(drafts)
                }
            }
            Err(e) => {
                warn!(
                    requirement = %requirement.id,
                    error = %e,
                    "completion call failed; using rule-based fallback"
                );
                Self::fall_back(requirement, FallbackReason::CompletionFailed(e.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "backend-assisted"
    }
}
