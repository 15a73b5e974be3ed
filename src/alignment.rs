//! Sparse word alignment between a source and a target sentence.
//!
//! Alignments are exchanged with the external aligner in the Pharaoh/Moses
//! `i-j` format, one sentence pair per line. Indices refer to expanded
//! positions (see [`ExpandedSentence`](crate::ExpandedSentence)).

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::{Anomaly, Diagnostics, ExpandedSentence, TaggerError, TaggerResult};

/// Placeholder written for an empty side of an aligner record.
pub const BLANK_SIDE: &str = "<blank>";

/// Why one `i-j` alignment line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentParseError {
    #[error("expected `i-j`, found {0:?}")]
    MalformedLink(String),
    #[error("bad source index in {0:?}")]
    SourceIndex(String),
    #[error("bad target index in {0:?}")]
    TargetIndex(String),
}

/// Mapping from a source position to one target position.
///
/// Neither total nor injective: unaligned positions have no entry and several
/// source positions may share a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    links: BTreeMap<usize, usize>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(source, target)` pairs. A repeated source keeps its last target.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            links: pairs.into_iter().collect(),
        }
    }

    /// Parse one aligner output line such as `0-0 1-2 3-1`.
    pub fn parse(line: &str) -> Result<Self, AlignmentParseError> {
        let mut links = BTreeMap::new();
        for pair in line.split_whitespace() {
            let (src, tgt) = pair
                .split_once('-')
                .ok_or_else(|| AlignmentParseError::MalformedLink(pair.to_string()))?;
            let src: usize = src
                .parse()
                .map_err(|_| AlignmentParseError::SourceIndex(pair.to_string()))?;
            let tgt: usize = tgt
                .parse()
                .map_err(|_| AlignmentParseError::TargetIndex(pair.to_string()))?;
            links.insert(src, tgt);
        }
        Ok(Self { links })
    }

    pub fn insert(&mut self, source: usize, target: usize) {
        self.links.insert(source, target);
    }

    /// Target aligned to `source`, if any.
    pub fn target_of(&self, source: usize) -> Option<usize> {
        self.links.get(&source).copied()
    }

    /// Links in ascending source order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.links.iter().map(|(&s, &t)| (s, t))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (s, t)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}-{}", s, t)?;
        }
        Ok(())
    }
}

/// Format one `src ||| tgt` aligner input record.
pub fn aligner_record(source: &ExpandedSentence, target: &ExpandedSentence) -> String {
    let side = |sent: &ExpandedSentence| {
        let text = sent.aligner_text();
        if text.trim().is_empty() {
            BLANK_SIDE.to_string()
        } else {
            text
        }
    };
    format!("{} ||| {}", side(source), side(target))
}

/// Parse the aligner's whole output file, one [`Alignment`] per line.
pub fn parse_alignment_output(output: &str) -> TaggerResult<Vec<Alignment>> {
    output
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            Alignment::parse(line).map_err(|source| TaggerError::InvalidAlignment {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Check the aligner's record count against the number of submitted pairs.
///
/// The aligner is known to sometimes repeat its final record; exactly one
/// surplus record is dropped and reported. Any other difference is fatal.
pub fn reconcile_alignments(
    mut alignments: Vec<Alignment>,
    expected: usize,
    diagnostics: &mut Diagnostics,
) -> TaggerResult<Vec<Alignment>> {
    if alignments.len() == expected {
        return Ok(alignments);
    }
    if alignments.len() == expected + 1 {
        alignments.pop();
        diagnostics.record(Anomaly::TrailingAlignmentDropped { expected });
        return Ok(alignments);
    }
    Err(TaggerError::AlignmentLengthMismatch {
        expected,
        found: alignments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    fn sentence(words: &[&str]) -> ExpandedSentence {
        ExpandedSentence::new(words.iter().map(|w| Token::new(*w)).collect())
    }

    #[test]
    fn parse_keeps_last_target_for_repeated_source() {
        let align = Alignment::parse("0-0 1-2 1-3 4-1").unwrap();
        assert_eq!(align.len(), 3);
        assert_eq!(align.target_of(1), Some(3));
        assert_eq!(align.target_of(2), None);
        assert_eq!(align.to_string(), "0-0 1-3 4-1");
    }

    #[test]
    fn parse_empty_line_is_empty_alignment() {
        assert!(Alignment::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_malformed_pairs() {
        assert_eq!(
            Alignment::parse("0-0 1:2"),
            Err(AlignmentParseError::MalformedLink("1:2".into()))
        );
        assert_eq!(
            Alignment::parse("a-1"),
            Err(AlignmentParseError::SourceIndex("a-1".into()))
        );

        let err = parse_alignment_output("0-0\n1-x\n").unwrap_err();
        assert!(matches!(
            err,
            TaggerError::InvalidAlignment {
                line: 2,
                source: AlignmentParseError::TargetIndex(ref link),
            } if link == "1-x"
        ));
        assert_eq!(
            err.to_string(),
            "invalid alignment record at line 2: bad target index in \"1-x\""
        );
    }

    #[test]
    fn record_uses_blank_for_empty_sides() {
        let src = sentence(&["I", "see", "it"]);
        let tgt = sentence(&["Je", "le", "vois"]);
        assert_eq!(aligner_record(&src, &tgt), "I see it ||| Je le vois");
        assert_eq!(
            aligner_record(&sentence(&[]), &tgt),
            "<blank> ||| Je le vois"
        );
        assert_eq!(
            aligner_record(&sentence(&[]), &sentence(&[])),
            "<blank> ||| <blank>"
        );
    }

    #[test]
    fn reconcile_drops_single_trailing_duplicate() {
        let mut diag = Diagnostics::new();
        let records = vec![Alignment::new(), Alignment::new(), Alignment::new()];
        let reconciled = reconcile_alignments(records, 2, &mut diag).unwrap();
        assert_eq!(reconciled.len(), 2);
        assert_eq!(diag.trailing_alignments_dropped(), 1);
    }

    #[test]
    fn reconcile_rejects_other_mismatches() {
        let mut diag = Diagnostics::new();
        let err = reconcile_alignments(vec![Alignment::new()], 3, &mut diag).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::AlignmentLengthMismatch {
                expected: 3,
                found: 1
            }
        ));

        let four = vec![Alignment::new(); 4];
        assert!(reconcile_alignments(four, 2, &mut diag).is_err());
        assert!(diag.is_clean());
    }
}
