//! Tag aggregation over documents.
//!
//! The [`Tagger`] runs each requested detector once over a whole document,
//! with memory freshly created for that document, and unions the per-position
//! verdicts into a set of phenomenon labels per target token.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::detectors::{
    record_out_of_range_links, DetectorContext, FormalityDetector, LexicalCohesionDetector, PhenomenonDetector,
    PronounDetector, VerbFormDetector,
};
use crate::{
    Diagnostics, Document, DocumentMemory, LanguageProfile, LanguageRegistry, Phenomenon,
    TagOutput, TaggerConfig, TaggerResult,
};

/// Labels of one target position.
pub type TagSet = BTreeSet<Phenomenon>;

/// Per sentence, per expanded target position.
pub type TaggedDocument = Vec<Vec<TagSet>>;

/// Document-scoped multi-phenomenon tagger for one target language.
#[derive(Debug, Clone)]
pub struct Tagger {
    profile: LanguageProfile,
    config: TaggerConfig,
}

impl Tagger {
    pub fn new(profile: LanguageProfile, config: TaggerConfig) -> TaggerResult<Self> {
        config.validate()?;
        Ok(Self { profile, config })
    }

    /// Build a tagger for `language` from an explicit registry.
    pub fn from_registry(
        registry: &LanguageRegistry,
        language: &str,
        config: TaggerConfig,
    ) -> TaggerResult<Self> {
        Self::new(registry.get(language)?.clone(), config)
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    fn detector(&self, phenomenon: Phenomenon) -> Box<dyn PhenomenonDetector + '_> {
        match phenomenon {
            Phenomenon::LexicalCohesion => Box::new(LexicalCohesionDetector::with_threshold(
                self.config.cohesion_threshold,
            )),
            Phenomenon::Formality => Box::new(FormalityDetector::new(&self.profile)),
            Phenomenon::VerbForm => Box::new(VerbFormDetector::new(&self.profile)),
            Phenomenon::Pronouns => Box::new(PronounDetector::new(&self.profile)),
        }
    }

    /// Tag one document with the configured phenomena.
    pub fn tag_document(&self, doc: &Document) -> (TaggedDocument, Diagnostics) {
        self.tag_document_with(doc, &self.config.phenomena)
    }

    /// Tag one document with an explicit phenomenon subset.
    ///
    /// Duplicate requests are ignored: each detector makes exactly one pass.
    /// Alignment links outside their sentences are reported once here and
    /// skipped by every detector.
    pub fn tag_document_with(
        &self,
        doc: &Document,
        phenomena: &[Phenomenon],
    ) -> (TaggedDocument, Diagnostics) {
        let mut tagged: TaggedDocument = doc
            .sentences
            .iter()
            .map(|pair| vec![TagSet::new(); pair.target.len()])
            .collect();
        let mut memory = DocumentMemory::new();
        let mut diagnostics = Diagnostics::new();
        record_out_of_range_links(doc, &mut diagnostics);

        let requested: BTreeSet<Phenomenon> = phenomena.iter().copied().collect();
        for phenomenon in requested {
            let detector = self.detector(phenomenon);
            let verdicts = detector.tag_document(
                doc,
                &mut DetectorContext {
                    memory: &mut memory,
                    diagnostics: &mut diagnostics,
                },
            );
            for (sentence_tags, sentence_verdicts) in tagged.iter_mut().zip(verdicts) {
                for (tags, verdict) in sentence_tags.iter_mut().zip(sentence_verdicts) {
                    if verdict {
                        tags.insert(phenomenon);
                    }
                }
            }
        }

        log::debug!(
            "tagged document {} ({} sentences, {} anomalies)",
            doc.id,
            doc.len(),
            diagnostics.anomalies().len()
        );
        (tagged, diagnostics)
    }

    /// Tag a batch of documents with the configured phenomena.
    pub fn tag_documents(&self, docs: &[Document]) -> TagOutput {
        self.tag_documents_with(docs, &self.config.phenomena)
    }

    /// Tag a batch of documents. Documents share no state, so with the
    /// `parallel` feature they are processed concurrently; output order and
    /// content are the same either way.
    pub fn tag_documents_with(&self, docs: &[Document], phenomena: &[Phenomenon]) -> TagOutput {
        #[cfg(feature = "parallel")]
        let results: Vec<_> = docs
            .par_iter()
            .map(|doc| self.tag_document_with(doc, phenomena))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = docs
            .iter()
            .map(|doc| self.tag_document_with(doc, phenomena))
            .collect();

        let mut output = TagOutput::default();
        for (tagged, diagnostics) in results {
            output.documents.push(tagged);
            output.diagnostics.merge(diagnostics);
        }
        output
    }

    /// Tag a batch with phenomena requested by name.
    ///
    /// Fails with [`TaggerError::UnknownPhenomenon`](crate::TaggerError::UnknownPhenomenon)
    /// before any document is touched.
    pub fn tag_requested<S: AsRef<str>>(
        &self,
        docs: &[Document],
        names: &[S],
    ) -> TaggerResult<TagOutput> {
        let phenomena = Phenomenon::parse_list(names)?;
        Ok(self.tag_documents_with(docs, &phenomena))
    }
}
