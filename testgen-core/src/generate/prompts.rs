//! Prompt Templates for Assisted Generation
//!
//! Builds the structured prompt the backend-assisted strategy sends to
//! the completion backend: a fixed persona, the requirement under test,
//! and strict formatting instructions so the response stays parseable.

use crate::models::Requirement;

const PERSONA: &str = "You are a senior automotive test engineer with 20 years of experience \
in ISO 26262 functional safety. Your job is to write detailed, high-coverage test cases \
for the requirement below.";

const TABLE_HEADER: &str = "| Title | Preconditions | Action | Expected Result |\n\
|-------|---------------|--------|-----------------|";

/// Build the completion prompt for a single requirement.
pub fn build_generation_prompt(requirement: &Requirement) -> String {
    format!(
        r#"{persona}

---
## REQUIREMENT:
- **{id}**: {text}

---
## INSTRUCTIONS:
Create one or more test cases for this requirement. Cover the nominal path first;
add boundary or robustness cases only when the requirement calls for them.
Format the output EXACTLY as this Markdown table (no other text):
{table}

## RULES:
- 'Preconditions' should be specific (e.g. 'Ignition ON', 'Speed > 100km/h').
- 'Action' must be a concrete, executable instruction.
- 'Expected Result' must be observable and verifiable.
- Do not include chatter or explanations. Just the table."#,
        persona = PERSONA,
        id = requirement.id,
        text = requirement.text,
        table = TABLE_HEADER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceRef;

    #[test]
    fn test_prompt_contains_requirement_and_framing() {
        let req = Requirement {
            id: "REQ-0007".to_string(),
            text: "The system shall debounce sensor faults".to_string(),
            source: SourceRef::new("srs.txt"),
            tags: Vec::new(),
        };

        let prompt = build_generation_prompt(&req);
        assert!(prompt.contains("REQ-0007"));
        assert!(prompt.contains("The system shall debounce sensor faults"));
        assert!(prompt.contains("| Title | Preconditions | Action | Expected Result |"));
        assert!(prompt.contains("Just the table."));
    }
}
