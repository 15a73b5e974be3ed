//! Tag output and its JSON persistence.
//!
//! The persisted form is a nested array, document-major, sentence-major and
//! position-major, of label lists:
//!
//! ```json
//! [[[["formality"], []], [[]]]]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Diagnostics, Document, Phenomenon, TaggedDocument, TaggerError, TaggerResult};

/// Tags for a batch of documents plus every anomaly recovered on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOutput {
    pub documents: Vec<TaggedDocument>,
    pub diagnostics: Diagnostics,
}

impl TagOutput {
    pub fn to_json(&self) -> TaggerResult<String> {
        Ok(serde_json::to_string_pretty(&self.documents)?)
    }

    pub fn write_json(&self, path: &Path) -> TaggerResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read tags previously written by [`write_json`](TagOutput::write_json).
    pub fn read_json(path: &Path) -> TaggerResult<Vec<TaggedDocument>> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Total number of tagged sentences.
    pub fn sentence_count(&self) -> usize {
        self.documents.iter().map(Vec::len).sum()
    }
}

/// One target position with its surface text and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    pub token: String,
    pub tags: BTreeSet<Phenomenon>,
}

impl Tagging {
    pub fn new(token: impl Into<String>, tags: impl IntoIterator<Item = Phenomenon>) -> Self {
        Self {
            token: token.into(),
            tags: tags.into_iter().collect(),
        }
    }
}

/// Pair every tagged position with its target text.
///
/// `tagged` must have come from tagging `documents`; any shape difference is a
/// [`LengthMismatch`](crate::TaggerError::LengthMismatch).
pub fn taggings(
    documents: &[Document],
    tagged: &[TaggedDocument],
) -> TaggerResult<Vec<Vec<Vec<Tagging>>>> {
    TaggerError::check_lengths("documents", documents.len(), "tagged documents", tagged.len())?;
    documents
        .iter()
        .zip(tagged)
        .map(|(doc, doc_tags)| {
            TaggerError::check_lengths("sentences", doc.len(), "tagged sentences", doc_tags.len())?;
            doc.sentences
                .iter()
                .zip(doc_tags)
                .map(|(pair, sentence_tags)| {
                    TaggerError::check_lengths(
                        "target positions",
                        pair.target.len(),
                        "tag sets",
                        sentence_tags.len(),
                    )?;
                    Ok(pair
                        .target
                        .texts()
                        .zip(sentence_tags)
                        .map(|((_, text), tags)| Tagging {
                            token: text.to_string(),
                            tags: tags.clone(),
                        })
                        .collect())
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Alignment, ExpandedSentence, SentencePair, TagSet, Token};

    fn sample() -> TagOutput {
        let formality: TagSet = [Phenomenon::Formality].into_iter().collect();
        let both: TagSet = [Phenomenon::Pronouns, Phenomenon::LexicalCohesion]
            .into_iter()
            .collect();
        TagOutput {
            documents: vec![vec![vec![formality, TagSet::new()], vec![both]]],
            diagnostics: Diagnostics::new(),
        }
    }

    #[test]
    fn json_is_nested_label_lists() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([[[["formality"], []], [["lexical_cohesion", "pronouns"]]]])
        );
    }

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.json");
        let output = sample();
        output.write_json(&path).unwrap();
        assert_eq!(TagOutput::read_json(&path).unwrap(), output.documents);
        assert_eq!(output.sentence_count(), 2);
    }

    #[test]
    fn taggings_use_piece_text() {
        let doc = Document::new(
            0,
            vec![SentencePair::new(
                ExpandedSentence::new(vec![Token::new("x")]),
                ExpandedSentence::new(vec![Token::new("New York"), Token::new("!")]),
                Alignment::new(),
                vec![false],
            )],
        );
        let tagged = vec![vec![vec![
            TagSet::new(),
            [Phenomenon::LexicalCohesion].into_iter().collect(),
            TagSet::new(),
        ]]];

        let out = taggings(&[doc.clone()], &tagged).unwrap();
        assert_eq!(
            out[0][0],
            vec![
                Tagging::new("New", []),
                Tagging::new("York", [Phenomenon::LexicalCohesion]),
                Tagging::new("!", []),
            ]
        );

        let short = vec![vec![vec![TagSet::new()]]];
        assert!(matches!(
            taggings(&[doc], &short),
            Err(TaggerError::LengthMismatch { .. })
        ));
    }
}
