#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Document-level discourse phenomenon tagging for machine translation.
//!
//! Given parallel source/target sentences grouped into documents, this crate
//! marks each target token that a correct translation could only get right by
//! looking at earlier sentences of the same document.
//!
//! ## Phenomena
//!
//! - **Formality**: a T/V (or honorific) register that was already established
//!   earlier in the document
//! - **Verb form**: an ambiguous tense that already appeared earlier
//! - **Lexical cohesion**: a content word translated the same way more than a
//!   threshold number of times before
//! - **Pronouns**: a target pronoun whose form depends on an antecedent the
//!   sentence itself does not contain
//!
//! ## Usage
//!
//! ```ignore
//! use layered_discourse::{CorpusPipeline, Tagger, TaggerConfig};
//! use layered_discourse_langs::builtin_registry;
//!
//! let tagger = Tagger::from_registry(&builtin_registry(), "fr", TaggerConfig::default())?;
//! let pipeline = CorpusPipeline::new(spacy_en, spacy_fr, AwesomeAlign::new(tagger.config().aligner.clone()), coref);
//! let output = pipeline.tag_corpus(&tagger, &sources, &targets, &doc_ids, &["formality"])?;
//! output.write_json(Path::new("tags.json"))?;
//! ```
//!
//! ## Architecture
//!
//! - External adapters ([`NlpPipeline`], [`Aligner`], [`CoreferenceResolver`])
//!   run once per batch and produce [`ExpandedSentence`]s, [`Alignment`]s and
//!   antecedent markers.
//! - [`DocumentBuilder`] groups sentence pairs into [`Document`]s by id.
//! - Each [`PhenomenonDetector`](detectors::PhenomenonDetector) walks a
//!   document in order, threading a per-document [`DocumentMemory`].
//! - [`Tagger`] unions the detector verdicts into per-position label sets.
//!
//! Per-language data lives in [`LanguageProfile`]s, looked up through an
//! explicit [`LanguageRegistry`].

mod aligner;
mod alignment;
mod config;
mod coref;
pub mod detectors;
mod diagnostics;
mod display;
mod document;
mod error;
mod memory;
mod metrics;
mod output;
mod phenomenon;
mod pipeline;
mod position;
mod profile;
mod tagger;
mod token;

pub use aligner::{align_corpus, Aligner, AwesomeAlign, AwesomeAlignConfig};
pub use alignment::{
    aligner_record, parse_alignment_output, reconcile_alignments, Alignment, AlignmentParseError,
    BLANK_SIDE,
};
pub use config::TaggerConfig;
pub use coref::{antecedent_markers, CorefError, CorefOutput, CoreferenceResolver, Mention};
pub use diagnostics::{Anomaly, Diagnostics};
pub use display::TaggedSentenceDisplay;
pub use document::{build_documents, Document, DocumentBuilder, FirstSentencePolicy, SentencePair};
pub use error::{TaggerError, TaggerResult};
pub use memory::DocumentMemory;
pub use metrics::{compute_metrics, TagMetrics};
pub use output::{taggings, TagOutput, Tagging};
pub use phenomenon::Phenomenon;
pub use pipeline::{CorpusPipeline, NlpPipeline};
pub use position::ExpandedSentence;
pub use profile::{FormalVerbRule, LanguageProfile, LanguageRegistry};
pub use tagger::{TagSet, TaggedDocument, Tagger};
pub use token::{normalize, Morph, Pos, Token};

#[cfg(test)]
mod tests {
    mod document_isolation;
    mod end_to_end;
    mod tag_aggregation;
}
