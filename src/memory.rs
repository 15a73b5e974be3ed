//! Per-document memory threaded through the detectors.

use std::collections::{BTreeSet, HashMap};

/// Running cross-sentence state of one document.
///
/// A fresh value is created for every document and dropped when the document
/// is done; nothing here ever outlives a document boundary. Each detector owns
/// a disjoint part, so running detectors in any order gives the same result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMemory {
    /// Formality classes already used in the document
    pub seen_formality_classes: BTreeSet<String>,
    /// Ambiguous tense tags already used in the document
    pub seen_verb_tenses: BTreeSet<String>,
    cohesion_counts: HashMap<(String, String), usize>,
}

impl DocumentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of an aligned `(source, target)` lemma pair over the sentences
    /// merged so far; zero if never seen.
    pub fn cohesion_count(&self, source: &str, target: &str) -> usize {
        self.cohesion_counts
            .get(&(source.to_string(), target.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Fold one sentence's pair counts into the document totals.
    pub fn merge_cohesion(&mut self, sentence_counts: HashMap<(String, String), usize>) {
        for (pair, count) in sentence_counts {
            *self.cohesion_counts.entry(pair).or_insert(0) += count;
        }
    }
}
