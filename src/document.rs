//! Document grouping.
//!
//! The tagger's input is a flat, ordered stream of sentence pairs, each tagged
//! with a document id. A change of id starts a new document; memory is scoped
//! to exactly one such run.

use serde::{Deserialize, Serialize};

use crate::{Alignment, ExpandedSentence, TaggerError, TaggerResult};

/// One aligned sentence pair with its source-side antecedent markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SentencePair {
    pub source: ExpandedSentence,
    pub target: ExpandedSentence,
    pub alignment: Alignment,
    /// One marker per source position; `true` if the mention already has an antecedent
    pub antecedents: Vec<bool>,
}

impl SentencePair {
    pub fn new(
        source: ExpandedSentence,
        target: ExpandedSentence,
        alignment: Alignment,
        antecedents: Vec<bool>,
    ) -> Self {
        Self {
            source,
            target,
            alignment,
            antecedents,
        }
    }

    /// Antecedent marker at a source position, `None` if out of range.
    pub fn has_antecedent(&self, source_pos: usize) -> Option<bool> {
        self.antecedents.get(source_pos).copied()
    }
}

/// A contiguous run of sentence pairs sharing one document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub sentences: Vec<SentencePair>,
}

impl Document {
    pub fn new(id: i64, sentences: Vec<SentencePair>) -> Self {
        Self { id, sentences }
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Expanded target lengths, one per sentence.
    pub fn target_lengths(&self) -> Vec<usize> {
        self.sentences.iter().map(|s| s.target.len()).collect()
    }
}

/// How antecedent markers are set for the first sentence of each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSentencePolicy {
    /// Every position counts as resolved: there is no earlier context to
    /// disambiguate against, so nothing in the first sentence is flagged.
    AllResolved,
    /// Every position counts as unresolved.
    NoneResolved,
    /// Keep whatever the coreference adapter produced.
    FromCoreference,
}

impl Default for FirstSentencePolicy {
    fn default() -> Self {
        FirstSentencePolicy::AllResolved
    }
}

/// Groups per-sentence artifacts into [`Document`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentBuilder {
    first_sentence: FirstSentencePolicy,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first_sentence_policy(mut self, policy: FirstSentencePolicy) -> Self {
        self.first_sentence = policy;
        self
    }

    /// Partition parallel streams into documents, preserving order.
    ///
    /// Fails with [`TaggerError::LengthMismatch`] if any stream differs in
    /// length from `doc_ids`.
    pub fn build(
        &self,
        doc_ids: &[i64],
        sources: Vec<ExpandedSentence>,
        targets: Vec<ExpandedSentence>,
        antecedents: Vec<Vec<bool>>,
        alignments: Vec<Alignment>,
    ) -> TaggerResult<Vec<Document>> {
        TaggerError::check_lengths("document ids", doc_ids.len(), "source sentences", sources.len())?;
        TaggerError::check_lengths("document ids", doc_ids.len(), "target sentences", targets.len())?;
        TaggerError::check_lengths(
            "document ids",
            doc_ids.len(),
            "antecedent markers",
            antecedents.len(),
        )?;
        TaggerError::check_lengths("document ids", doc_ids.len(), "alignments", alignments.len())?;

        let mut documents: Vec<Document> = Vec::new();
        let pairs = sources
            .into_iter()
            .zip(targets)
            .zip(antecedents)
            .zip(alignments)
            .map(|(((source, target), antecedents), alignment)| {
                SentencePair::new(source, target, alignment, antecedents)
            });

        for (&doc_id, mut pair) in doc_ids.iter().zip(pairs) {
            let starts_document = documents.last().map_or(true, |doc| doc.id != doc_id);
            if starts_document {
                if let Some(prev) = documents.last() {
                    if doc_id < prev.id {
                        log::debug!("document id decreased from {} to {}", prev.id, doc_id);
                    }
                }
                self.apply_first_sentence_policy(&mut pair);
                documents.push(Document::new(doc_id, Vec::new()));
            }
            if let Some(doc) = documents.last_mut() {
                doc.sentences.push(pair);
            }
        }

        log::debug!("built {} documents from {} sentences", documents.len(), doc_ids.len());
        Ok(documents)
    }

    fn apply_first_sentence_policy(&self, pair: &mut SentencePair) {
        let len = pair.source.len();
        match self.first_sentence {
            FirstSentencePolicy::AllResolved => pair.antecedents = vec![true; len],
            FirstSentencePolicy::NoneResolved => pair.antecedents = vec![false; len],
            FirstSentencePolicy::FromCoreference => {}
        }
    }
}

/// Group with the default [`FirstSentencePolicy`].
pub fn build_documents(
    doc_ids: &[i64],
    sources: Vec<ExpandedSentence>,
    targets: Vec<ExpandedSentence>,
    antecedents: Vec<Vec<bool>>,
    alignments: Vec<Alignment>,
) -> TaggerResult<Vec<Document>> {
    DocumentBuilder::new().build(doc_ids, sources, targets, antecedents, alignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn sentence(text: &str) -> ExpandedSentence {
        ExpandedSentence::new(text.split(' ').map(Token::new).collect())
    }

    fn streams(
        n: usize,
    ) -> (
        Vec<ExpandedSentence>,
        Vec<ExpandedSentence>,
        Vec<Vec<bool>>,
        Vec<Alignment>,
    ) {
        let sources = (0..n).map(|i| sentence(&format!("src{} it", i))).collect();
        let targets = (0..n).map(|i| sentence(&format!("tgt{} il", i))).collect();
        let antecedents = (0..n).map(|_| vec![false, false]).collect();
        let alignments = (0..n).map(|_| Alignment::parse("0-0 1-1").unwrap()).collect();
        (sources, targets, antecedents, alignments)
    }

    #[test]
    fn groups_contiguous_runs_in_order() {
        let (s, t, a, al) = streams(5);
        let docs = build_documents(&[0, 0, 1, 1, 1], s, t, a, al).unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[0].len(), 2);
        assert_eq!(docs[1].len(), 3);
        assert_eq!(docs[1].sentences[0].source.text(0), Some("src2"));
        assert_eq!(docs[1].sentences[2].target.text(0), Some("tgt4"));
    }

    #[test]
    fn id_change_back_starts_new_document() {
        let (s, t, a, al) = streams(3);
        let docs = build_documents(&[4, 7, 4], s, t, a, al).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![4, 7, 4]);
    }

    #[test]
    fn first_sentence_policy_applies_per_document() {
        let (s, t, a, al) = streams(3);
        let docs = build_documents(&[0, 0, 1], s, t, a, al).unwrap();
        assert_eq!(docs[0].sentences[0].antecedents, vec![true, true]);
        assert_eq!(docs[0].sentences[1].antecedents, vec![false, false]);
        assert_eq!(docs[1].sentences[0].antecedents, vec![true, true]);

        let (s, t, mut a, al) = streams(2);
        a[0] = vec![false, true];
        let docs = DocumentBuilder::new()
            .with_first_sentence_policy(FirstSentencePolicy::FromCoreference)
            .build(&[0, 0], s, t, a, al)
            .unwrap();
        assert_eq!(docs[0].sentences[0].antecedents, vec![false, true]);

        let (s, t, a, al) = streams(1);
        let docs = DocumentBuilder::new()
            .with_first_sentence_policy(FirstSentencePolicy::NoneResolved)
            .build(&[0], s, t, a, al)
            .unwrap();
        assert_eq!(docs[0].sentences[0].antecedents, vec![false, false]);
    }

    #[test]
    fn stream_length_mismatch_is_fatal() {
        let (s, t, a, mut al) = streams(3);
        al.pop();
        let err = build_documents(&[0, 0, 0], s, t, a, al).unwrap_err();
        match err {
            TaggerError::LengthMismatch {
                found_name, found, ..
            } => {
                assert_eq!(found_name, "alignments");
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn empty_input_yields_no_documents() {
        let docs = build_documents(&[], Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(docs.is_empty());
    }
}
