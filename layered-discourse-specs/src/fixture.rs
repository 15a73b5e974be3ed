//! Fixture data structures.
//!
//! A fixture is a TOML file describing a small corpus of pre-annotated
//! sentence pairs and the tags expected on every target position:
//!
//! ```toml
//! title = "Register carries across sentences"
//! language = "fr"
//! phenomena = ["formality"]
//!
//! [[sentences]]
//! document = 1
//! source = "you/PRON///stop came/VERB"
//! target = "tu/PRON///stop es/AUX venu/VERB"
//! alignment = "0-0 1-1 1-2"
//! expect = "- - -"
//! ```
//!
//! See [`parser`](crate::parser) for the token, marker and tag syntax.

use layered_discourse::{
    Alignment, Document, DocumentBuilder, ExpandedSentence, FirstSentencePolicy, TagSet,
    TaggerConfig, TaggedDocument, Token,
};
use serde::Deserialize;

use crate::errors::SpecResult;

/// Fixture file contents as written, before token and tag parsing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFixture {
    #[serde(default)]
    pub title: Option<String>,
    pub language: String,
    /// Phenomenon names, resolved when the fixture is parsed
    #[serde(default)]
    pub phenomena: Option<Vec<String>>,
    #[serde(default)]
    pub cohesion_threshold: Option<usize>,
    #[serde(default)]
    pub first_sentence_antecedents: Option<FirstSentencePolicy>,
    #[serde(default)]
    pub sentences: Vec<RawSentence>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSentence {
    #[serde(default)]
    pub document: i64,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub antecedents: Option<String>,
    pub expect: String,
}

/// One parsed sentence pair with its expected tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSentence {
    pub document: i64,
    pub source: Vec<Token>,
    pub target: Vec<Token>,
    pub alignment: Alignment,
    /// Explicit per-source-position markers; all unresolved when absent
    pub antecedents: Option<Vec<bool>>,
    /// One tag set per expanded target position
    pub expect: Vec<TagSet>,
}

/// A parsed fixture ready to run.
#[derive(Debug, Clone)]
pub struct DiscourseFixture {
    pub title: Option<String>,
    pub language: String,
    pub config: TaggerConfig,
    pub sentences: Vec<FixtureSentence>,
}

impl DiscourseFixture {
    /// Total number of expanded target positions.
    pub fn position_count(&self) -> usize {
        self.sentences
            .iter()
            .map(|s| ExpandedSentence::new(s.target.clone()).len())
            .sum()
    }

    pub fn doc_ids(&self) -> Vec<i64> {
        self.sentences.iter().map(|s| s.document).collect()
    }

    /// Group the sentences into documents the way the tagging surface does.
    pub fn documents(&self) -> SpecResult<Vec<Document>> {
        let mut sources = Vec::with_capacity(self.sentences.len());
        let mut targets = Vec::with_capacity(self.sentences.len());
        let mut antecedents = Vec::with_capacity(self.sentences.len());
        let mut alignments = Vec::with_capacity(self.sentences.len());
        for sentence in &self.sentences {
            let source = ExpandedSentence::new(sentence.source.clone());
            antecedents.push(
                sentence
                    .antecedents
                    .clone()
                    .unwrap_or_else(|| vec![false; source.len()]),
            );
            sources.push(source);
            targets.push(ExpandedSentence::new(sentence.target.clone()));
            alignments.push(sentence.alignment.clone());
        }

        Ok(DocumentBuilder::new()
            .with_first_sentence_policy(self.config.first_sentence_antecedents)
            .build(&self.doc_ids(), sources, targets, antecedents, alignments)?)
    }

    /// Expected tags in the same document-major shape the tagger produces.
    pub fn expected(&self) -> Vec<TaggedDocument> {
        let mut documents: Vec<TaggedDocument> = Vec::new();
        let mut current: Option<i64> = None;
        for sentence in &self.sentences {
            if current != Some(sentence.document) {
                documents.push(Vec::new());
                current = Some(sentence.document);
            }
            if let Some(doc) = documents.last_mut() {
                doc.push(sentence.expect.clone());
            }
        }
        documents
    }
}
