//! Corpus-level tagging surface.
//!
//! Raw parallel lines go through the external adapters exactly once per batch:
//! both NLP pipelines, then the aligner, then the source-side coreference
//! resolver. Only then are documents built and tagged.

use crate::aligner::{align_corpus, Aligner};
use crate::{
    antecedent_markers, CoreferenceResolver, Diagnostics, Document, DocumentBuilder,
    ExpandedSentence, Phenomenon, TagOutput, Tagger, TaggerError, TaggerResult, Token,
};

/// An external tokenizer/tagger/parser for one language.
pub trait NlpPipeline {
    /// Annotate every line, returning one token sequence per line.
    fn process(&self, lines: &[String]) -> TaggerResult<Vec<Vec<Token>>>;
}

/// The adapters a tagging batch needs, bundled for reuse across batches.
pub struct CorpusPipeline {
    source_nlp: Box<dyn NlpPipeline>,
    target_nlp: Box<dyn NlpPipeline>,
    aligner: Box<dyn Aligner>,
    coreference: Box<dyn CoreferenceResolver>,
}

impl std::fmt::Debug for CorpusPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusPipeline").finish_non_exhaustive()
    }
}

impl CorpusPipeline {
    pub fn new(
        source_nlp: impl NlpPipeline + 'static,
        target_nlp: impl NlpPipeline + 'static,
        aligner: impl Aligner + 'static,
        coreference: impl CoreferenceResolver + 'static,
    ) -> Self {
        Self {
            source_nlp: Box::new(source_nlp),
            target_nlp: Box::new(target_nlp),
            aligner: Box::new(aligner),
            coreference: Box::new(coreference),
        }
    }

    fn annotate(
        &self,
        nlp: &dyn NlpPipeline,
        lines: &[String],
        side: &'static str,
    ) -> TaggerResult<Vec<ExpandedSentence>> {
        let tokens = nlp.process(lines)?;
        if tokens.len() != lines.len() {
            return Err(TaggerError::Pipeline(format!(
                "{} pipeline returned {} sentences for {} lines",
                side,
                tokens.len(),
                lines.len()
            )));
        }
        Ok(tokens.into_iter().map(ExpandedSentence::new).collect())
    }

    /// Run every adapter over the batch and group the result into documents.
    ///
    /// Fails before any adapter runs if the three input streams differ in
    /// length.
    pub fn prepare(
        &self,
        tagger: &Tagger,
        sources: &[String],
        targets: &[String],
        doc_ids: &[i64],
    ) -> TaggerResult<(Vec<Document>, Diagnostics)> {
        TaggerError::check_lengths("document ids", doc_ids.len(), "source lines", sources.len())?;
        TaggerError::check_lengths("document ids", doc_ids.len(), "target lines", targets.len())?;

        let mut diagnostics = Diagnostics::new();
        let source_sents = self.annotate(self.source_nlp.as_ref(), sources, "source")?;
        let target_sents = self.annotate(self.target_nlp.as_ref(), targets, "target")?;
        let alignments = align_corpus(
            self.aligner.as_ref(),
            &source_sents,
            &target_sents,
            &mut diagnostics,
        )?;
        let antecedents =
            antecedent_markers(self.coreference.as_ref(), &source_sents, &mut diagnostics);

        let documents = DocumentBuilder::new()
            .with_first_sentence_policy(tagger.config().first_sentence_antecedents)
            .build(doc_ids, source_sents, target_sents, antecedents, alignments)?;
        Ok((documents, diagnostics))
    }

    /// Tag raw parallel lines grouped by document id.
    ///
    /// Unknown phenomenon names fail the request before any adapter runs.
    pub fn tag_corpus<S: AsRef<str>>(
        &self,
        tagger: &Tagger,
        sources: &[String],
        targets: &[String],
        doc_ids: &[i64],
        phenomena: &[S],
    ) -> TaggerResult<TagOutput> {
        let phenomena = Phenomenon::parse_list(phenomena)?;
        let (documents, mut diagnostics) = self.prepare(tagger, sources, targets, doc_ids)?;
        let output = tagger.tag_documents_with(&documents, &phenomena);
        diagnostics.merge(output.diagnostics);
        Ok(TagOutput {
            documents: output.documents,
            diagnostics,
        })
    }
}
