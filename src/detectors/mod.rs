//! The four phenomenon detectors.
//!
//! Every detector walks a document's sentences strictly in order, reading and
//! updating its own part of the [`DocumentMemory`], and returns one boolean per
//! expanded target position for every sentence.

mod formality;
mod lexical_cohesion;
mod pronoun;
mod verb_form;

pub use formality::FormalityDetector;
pub use lexical_cohesion::{LexicalCohesionDetector, DEFAULT_COHESION_THRESHOLD};
pub use pronoun::PronounDetector;
pub use verb_form::VerbFormDetector;

use crate::{Anomaly, Diagnostics, Document, DocumentMemory, Phenomenon, SentencePair};

/// Where a sentence sits, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceRef {
    pub document: i64,
    pub sentence: usize,
}

/// Mutable state handed to a detector while it walks one document.
#[derive(Debug)]
pub struct DetectorContext<'a> {
    pub memory: &'a mut DocumentMemory,
    pub diagnostics: &'a mut Diagnostics,
}

/// A stateful, document-scoped phenomenon detector.
///
/// Detectors are not re-entrant mid-document: memory threading requires
/// exactly one [`tag_document`](PhenomenonDetector::tag_document) pass per
/// document, in sentence order.
pub trait PhenomenonDetector {
    fn phenomenon(&self) -> Phenomenon;

    /// Tag one sentence, updating memory. Must return `pair.target.len()` verdicts.
    fn tag_sentence(
        &self,
        at: SentenceRef,
        pair: &SentencePair,
        ctx: &mut DetectorContext<'_>,
    ) -> Vec<bool>;

    fn tag_document(&self, doc: &Document, ctx: &mut DetectorContext<'_>) -> Vec<Vec<bool>> {
        doc.sentences
            .iter()
            .enumerate()
            .map(|(sentence, pair)| {
                let at = SentenceRef {
                    document: doc.id,
                    sentence,
                };
                let tags = self.tag_sentence(at, pair, ctx);
                debug_assert_eq!(tags.len(), pair.target.len());
                tags
            })
            .collect()
    }
}

/// Whether an alignment link points inside both sentences.
pub(crate) fn link_in_range(pair: &SentencePair, source: usize, target: usize) -> bool {
    source < pair.source.len() && target < pair.target.len()
}

/// Record every alignment link of `doc` that points outside its sentences.
///
/// Detectors skip such links silently; this runs once per document so one
/// bad link is one anomaly regardless of how many detectors saw it.
pub(crate) fn record_out_of_range_links(doc: &Document, diagnostics: &mut Diagnostics) {
    for (sentence, pair) in doc.sentences.iter().enumerate() {
        for (source, target) in pair.alignment.iter() {
            if !link_in_range(pair, source, target) {
                diagnostics.record(Anomaly::AlignmentIndexOutOfRange {
                    document: doc.id,
                    sentence,
                    source,
                    target,
                });
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{pair, tokens};
    use super::*;

    #[test]
    fn each_bad_link_is_recorded_once() {
        let doc = Document::new(
            3,
            vec![
                pair(tokens("house"), tokens("maison"), "0-0"),
                pair(tokens("a b"), tokens("c"), "0-0 1-4 7-0"),
            ],
        );
        let mut diagnostics = Diagnostics::new();
        record_out_of_range_links(&doc, &mut diagnostics);
        assert_eq!(
            diagnostics.anomalies(),
            &[
                Anomaly::AlignmentIndexOutOfRange {
                    document: 3,
                    sentence: 1,
                    source: 1,
                    target: 4,
                },
                Anomaly::AlignmentIndexOutOfRange {
                    document: 3,
                    sentence: 1,
                    source: 7,
                    target: 0,
                },
            ]
        );
    }
}
