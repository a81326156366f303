//! Response Parsing Module
//!
//! Parses completion-backend responses into test-case drafts. Backends
//! are instructed to answer with a strict Markdown table, but the parsing
//! here is defensive: anything that does not decompose into the four
//! required fields is simply skipped, and an overall empty result is the
//! caller's signal to fall back to rule-based output.

use crate::models::TestCaseDraft;

/// Parse a backend response into zero or more drafts.
///
/// Accepts any line shaped like a Markdown table row with at least four
/// non-empty cells (title, preconditions, action, expected result).
/// Header and divider rows are ignored. Never errors - an unusable
/// response yields an empty vector.
pub fn parse_draft_response(response: &str) -> Vec<TestCaseDraft> {
    let mut drafts = Vec::new();

    for line in response.lines() {
        if !line.contains('|') {
            continue;
        }

        let cells = split_row(line);
        if cells.len() < 4 || is_header_row(&cells) || is_divider_row(&cells) {
            continue;
        }
        if cells[..4].iter().any(|c| c.is_empty()) {
            continue;
        }

        drafts.push(TestCaseDraft {
            title: cells[0].to_string(),
            preconditions: cells[1].to_string(),
            action: cells[2].to_string(),
            expected_result: cells[3].to_string(),
        });
    }

    drafts
}

/// Split a Markdown table row into trimmed cells, dropping the empty
/// fields produced by leading/trailing pipes.
fn split_row(line: &str) -> Vec<&str> {
    line.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(str::trim)
        .collect()
}

fn is_header_row(cells: &[&str]) -> bool {
    cells
        .first()
        .map(|c| c.eq_ignore_ascii_case("title"))
        .unwrap_or(false)
}

fn is_divider_row(cells: &[&str]) -> bool {
    cells
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| matches!(ch, '-' | ':' | '=')))
}
