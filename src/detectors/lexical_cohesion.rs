//! Lexical cohesion detector.
//!
//! Tracks how often each aligned `(source lemma, target lemma)` content pair
//! occurred in earlier sentences of the document. Counts from the current
//! sentence are merged only after the whole sentence was judged, so repetition
//! inside one sentence never triggers a tag on its own.

use std::collections::HashMap;

use crate::{Phenomenon, SentencePair};

use super::{link_in_range, DetectorContext, PhenomenonDetector, SentenceRef};

/// Default for [`LexicalCohesionDetector::with_threshold`].
pub const DEFAULT_COHESION_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct LexicalCohesionDetector {
    threshold: usize,
}

impl Default for LexicalCohesionDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COHESION_THRESHOLD,
        }
    }
}

impl LexicalCohesionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pair is tagged once its prior count strictly exceeds `threshold`.
    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

impl PhenomenonDetector for LexicalCohesionDetector {
    fn phenomenon(&self) -> Phenomenon {
        Phenomenon::LexicalCohesion
    }

    fn tag_sentence(
        &self,
        _at: SentenceRef,
        pair: &SentencePair,
        ctx: &mut DetectorContext<'_>,
    ) -> Vec<bool> {
        let mut tags = vec![false; pair.target.len()];
        let mut sentence_counts: HashMap<(String, String), usize> = HashMap::new();

        for (src, tgt) in pair.alignment.iter() {
            if !link_in_range(pair, src, tgt) {
                continue;
            }
            let (Some(src_key), Some(tgt_key)) =
                (pair.source.cohesion_key(src), pair.target.cohesion_key(tgt))
            else {
                continue;
            };

            if ctx.memory.cohesion_count(src_key, tgt_key) > self.threshold {
                tags[tgt] = true;
            }
            *sentence_counts
                .entry((src_key.to_string(), tgt_key.to_string()))
                .or_insert(0) += 1;
        }

        ctx.memory.merge_cohesion(sentence_counts);
        tags
    }
}
