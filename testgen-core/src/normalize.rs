//! Requirement Normalizer Module
//!
//! Maps arbitrary extracted fragments into canonical [`Requirement`]
//! records with stable, run-scoped identifiers. The normalizer preserves
//! the order fragments arrive in (document-then-fragment order), so id
//! assignment is deterministic for a given input sequence.

use crate::models::{RawFragment, Requirement, SourceRef};
use tracing::debug;

/// Result of one normalization pass: the surviving requirements plus the
/// number of fragments that reduced to empty text and were dropped.
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub requirements: Vec<Requirement>,
    pub discarded: usize,
}

/// Run-scoped requirement normalizer.
///
/// Holds an explicit counter instead of any process-wide state, so
/// parallel runs in the same process each get their own id sequence.
#[derive(Debug)]
pub struct Normalizer {
    next_id: u32,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Normalize a sequence of fragments into requirements.
    ///
    /// Whitespace runs collapse to a single space and ends are trimmed.
    /// Fragments reducing to empty text are discarded silently and never
    /// consume an identifier, so the id sequence stays gap-free. Missing
    /// provenance is tolerated by substituting an "unknown" placeholder.
    pub fn normalize(&mut self, fragments: Vec<RawFragment>) -> NormalizeOutcome {
        let mut requirements = Vec::with_capacity(fragments.len());
        let mut discarded = 0;

        for fragment in fragments {
            let text = collapse_whitespace(&fragment.raw_text);
            if text.is_empty() {
                discarded += 1;
                continue;
            }

            let source = fragment.source.unwrap_or_else(SourceRef::unknown);
            requirements.push(Requirement {
                id: self.next_requirement_id(),
                text,
                source,
                tags: Vec::new(),
            });
        }

        debug!(
            kept = requirements.len(),
            discarded, "normalized requirement fragments"
        );

        NormalizeOutcome {
            requirements,
            discarded,
        }
    }

    fn next_requirement_id(&mut self) -> String {
        let id = format!("REQ-{:04}", self.next_id);
        self.next_id += 1;
        id
    }
}

/// Collapse runs of whitespace to a single space and trim both ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
