//! Recovered anomalies and their aggregate counters.
//!
//! Per-sentence problems never fail a document. Each one is logged, recorded
//! here, and tagging continues with a conservative fallback.

use std::fmt;

/// A recovered, non-fatal anomaly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Coreference output could not be mapped onto the sentence; the sentence
    /// falls back to "no antecedent anywhere".
    CoreferenceResolutionFailure { sentence: usize, reason: String },
    /// An alignment link points outside the tokenized sentence; the link is
    /// skipped.
    AlignmentIndexOutOfRange {
        document: i64,
        sentence: usize,
        source: usize,
        target: usize,
    },
    /// The aligner emitted one extra trailing record, which was dropped.
    TrailingAlignmentDropped { expected: usize },
    /// A language's formal-verb rule returned the wrong number of verdicts and
    /// was ignored for that sentence.
    RuleLengthMismatch {
        document: i64,
        sentence: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::CoreferenceResolutionFailure { sentence, reason } => {
                write!(f, "coreference failed for sentence {}: {}", sentence, reason)
            }
            Anomaly::AlignmentIndexOutOfRange {
                document,
                sentence,
                source,
                target,
            } => write!(
                f,
                "alignment link {}-{} out of range in document {} sentence {}",
                source, target, document, sentence
            ),
            Anomaly::TrailingAlignmentDropped { expected } => write!(
                f,
                "dropped trailing alignment record (expected {} records)",
                expected
            ),
            Anomaly::RuleLengthMismatch {
                document,
                sentence,
                expected,
                found,
            } => write!(
                f,
                "formal verb rule returned {} tags for {} positions in document {} sentence {}",
                found, expected, document, sentence
            ),
        }
    }
}

/// Collected anomalies for a batch, a document, or a single stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    anomalies: Vec<Anomaly>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an anomaly and log it.
    pub fn record(&mut self, anomaly: Anomaly) {
        log::warn!("{}", anomaly);
        self.anomalies.push(anomaly);
    }

    /// Append another set of diagnostics, preserving order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.anomalies.extend(other.anomalies);
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn coref_failures(&self) -> usize {
        self.count(|a| matches!(a, Anomaly::CoreferenceResolutionFailure { .. }))
    }

    pub fn alignment_out_of_range(&self) -> usize {
        self.count(|a| matches!(a, Anomaly::AlignmentIndexOutOfRange { .. }))
    }

    pub fn trailing_alignments_dropped(&self) -> usize {
        self.count(|a| matches!(a, Anomaly::TrailingAlignmentDropped { .. }))
    }

    pub fn rule_length_mismatches(&self) -> usize {
        self.count(|a| matches!(a, Anomaly::RuleLengthMismatch { .. }))
    }

    fn count(&self, pred: impl Fn(&Anomaly) -> bool) -> usize {
        self.anomalies.iter().filter(|a| pred(a)).count()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coref failures: {}, out-of-range alignment links: {}, dropped alignment records: {}, rule length mismatches: {}",
            self.coref_failures(),
            self.alignment_out_of_range(),
            self.trailing_alignments_dropped(),
            self.rule_length_mismatches()
        )
    }
}
