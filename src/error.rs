//! Error types for the discourse tagger.
//!
//! Only unrecoverable conditions live here. Per-sentence anomalies that the
//! tagger absorbs (coreference fallbacks, out-of-range alignment links) are
//! recorded as [`Anomaly`](crate::Anomaly) values in
//! [`Diagnostics`](crate::Diagnostics) instead.

use thiserror::Error;

use crate::AlignmentParseError;

/// Errors that abort a tagging request or a batch.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// Two parallel input streams disagree in count.
    #[error("length mismatch: {expected_name} has {expected} entries but {found_name} has {found}")]
    LengthMismatch {
        expected_name: &'static str,
        expected: usize,
        found_name: &'static str,
        found: usize,
    },

    /// The aligner returned a different number of records than sentence pairs
    /// were submitted (and the difference is not the single trailing duplicate).
    #[error("aligner returned {found} alignment records for {expected} sentence pairs")]
    AlignmentLengthMismatch { expected: usize, found: usize },

    /// A requested phenomenon name has no registered detector.
    #[error("unknown phenomenon: {0:?}")]
    UnknownPhenomenon(String),

    /// No language profile is registered under the requested code.
    #[error("no language profile registered for {0:?}")]
    UnknownLanguage(String),

    /// An alignment record could not be parsed.
    #[error("invalid alignment record at line {line}: {source}")]
    InvalidAlignment {
        line: usize,
        source: AlignmentParseError,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external aligner could not be run or exited unsuccessfully.
    #[error("aligner failed: {0}")]
    Aligner(String),

    /// The external NLP pipeline failed.
    #[error("NLP pipeline failed: {0}")]
    Pipeline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TaggerError {
    /// Build a [`TaggerError::LengthMismatch`] for two named streams.
    pub fn length_mismatch(
        expected_name: &'static str,
        expected: usize,
        found_name: &'static str,
        found: usize,
    ) -> Self {
        TaggerError::LengthMismatch {
            expected_name,
            expected,
            found_name,
            found,
        }
    }

    /// Fail with [`TaggerError::LengthMismatch`] unless both counts agree.
    pub(crate) fn check_lengths(
        expected_name: &'static str,
        expected: usize,
        found_name: &'static str,
        found: usize,
    ) -> TaggerResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::length_mismatch(expected_name, expected, found_name, found))
        }
    }
}

/// Result type for tagger operations.
pub type TaggerResult<T> = Result<T, TaggerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_lengths_reports_both_streams() {
        assert!(TaggerError::check_lengths("sources", 3, "targets", 3).is_ok());

        let err = TaggerError::check_lengths("sources", 3, "targets", 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "length mismatch: sources has 3 entries but targets has 2"
        );
    }

    #[test]
    fn unknown_phenomenon_message() {
        let err = TaggerError::UnknownPhenomenon("ellipsis".into());
        assert_eq!(err.to_string(), "unknown phenomenon: \"ellipsis\"");
    }
}
