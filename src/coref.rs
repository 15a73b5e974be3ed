//! Coreference adapter and antecedent markers.
//!
//! The external coreference model sees one source sentence at a time and
//! returns clusters of mention spans. A position "has an antecedent" when it
//! lies inside any mention of a cluster other than the cluster's first one.

use thiserror::Error;

use crate::{Anomaly, Diagnostics, ExpandedSentence};

/// An inclusive token span `[start, end]` in the resolver's token view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mention {
    pub start: usize,
    pub end: usize,
}

impl Mention {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What the coreference model returned for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorefOutput {
    /// The model's own tokenization of the sentence
    pub tokens: Vec<String>,
    /// Mention clusters, each ordered by first appearance
    pub clusters: Vec<Vec<Mention>>,
}

/// Why a sentence's coreference output could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorefError {
    /// The model itself failed on the sentence.
    #[error("coreference model failed: {0}")]
    Model(String),
    #[error("resolver saw {resolver} tokens, sentence has {sentence}")]
    TokenCountMismatch { resolver: usize, sentence: usize },
    #[error("mention {start}..={end} outside sentence of {len} tokens")]
    MentionOutOfRange { start: usize, end: usize, len: usize },
}

/// A source-language coreference model.
pub trait CoreferenceResolver {
    fn resolve(&self, sentence: &ExpandedSentence) -> Result<CorefOutput, CorefError>;
}

/// Antecedent markers for every source sentence of a batch.
///
/// A failing sentence (model error, token-count disagreement, mention outside
/// the sentence) degrades to all-`false` and is recorded; it never aborts the
/// batch.
pub fn antecedent_markers(
    resolver: &dyn CoreferenceResolver,
    sentences: &[ExpandedSentence],
    diagnostics: &mut Diagnostics,
) -> Vec<Vec<bool>> {
    sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            match resolver
                .resolve(sentence)
                .and_then(|output| markers_from_clusters(&output, sentence.len()))
            {
                Ok(markers) => markers,
                Err(err) => {
                    diagnostics.record(Anomaly::CoreferenceResolutionFailure {
                        sentence: idx,
                        reason: err.to_string(),
                    });
                    vec![false; sentence.len()]
                }
            }
        })
        .collect()
}

fn markers_from_clusters(output: &CorefOutput, len: usize) -> Result<Vec<bool>, CorefError> {
    if output.tokens.len() != len {
        return Err(CorefError::TokenCountMismatch {
            resolver: output.tokens.len(),
            sentence: len,
        });
    }

    let mut markers = vec![false; len];
    for cluster in &output.clusters {
        for mention in cluster.iter().skip(1) {
            if mention.start > mention.end || mention.end >= len {
                return Err(CorefError::MentionOutOfRange {
                    start: mention.start,
                    end: mention.end,
                    len,
                });
            }
            for marker in &mut markers[mention.start..=mention.end] {
                *marker = true;
            }
        }
    }
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    struct Scripted(Vec<Result<CorefOutput, CorefError>>);

    impl CoreferenceResolver for Scripted {
        fn resolve(&self, sentence: &ExpandedSentence) -> Result<CorefOutput, CorefError> {
            // index by the first token's text, which the tests set to a number
            let idx: usize = sentence
                .text(0)
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
            self.0[idx].clone()
        }
    }

    fn sentence(words: &[&str]) -> ExpandedSentence {
        ExpandedSentence::new(words.iter().map(|w| Token::new(*w)).collect())
    }

    fn tokens(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    #[test]
    fn later_mentions_are_marked() {
        // "0 Mary said she saw her" : [Mary, she, her]
        let resolver = Scripted(vec![Ok(CorefOutput {
            tokens: tokens(6),
            clusters: vec![vec![
                Mention::new(1, 1),
                Mention::new(3, 3),
                Mention::new(5, 5),
            ]],
        })]);
        let mut diag = Diagnostics::new();
        let markers = antecedent_markers(
            &resolver,
            &[sentence(&["0", "Mary", "said", "she", "saw", "her"])],
            &mut diag,
        );
        assert_eq!(markers, vec![vec![false, false, false, true, false, true]]);
        assert!(diag.is_clean());
    }

    #[test]
    fn multi_token_mentions_mark_whole_span() {
        let resolver = Scripted(vec![Ok(CorefOutput {
            tokens: tokens(5),
            clusters: vec![vec![Mention::new(0, 0), Mention::new(2, 4)]],
        })]);
        let mut diag = Diagnostics::new();
        let markers = antecedent_markers(&resolver, &[sentence(&["0", "a", "b", "c", "d"])], &mut diag);
        assert_eq!(markers[0], vec![false, false, true, true, true]);
    }

    #[test]
    fn failures_degrade_to_no_antecedent() {
        let resolver = Scripted(vec![
            Ok(CorefOutput {
                tokens: tokens(3),
                clusters: vec![vec![Mention::new(0, 0), Mention::new(1, 1)]],
            }),
            Err(CorefError::Model("model crashed".into())),
            Ok(CorefOutput {
                tokens: tokens(2),
                clusters: vec![vec![Mention::new(0, 0), Mention::new(1, 4)]],
            }),
        ]);
        let mut diag = Diagnostics::new();
        let markers = antecedent_markers(
            &resolver,
            &[
                sentence(&["0", "it", "x"]),
                sentence(&["1", "y"]),
                sentence(&["2", "z"]),
            ],
            &mut diag,
        );
        assert_eq!(markers[0], vec![false, true, false]);
        assert_eq!(markers[1], vec![false, false]);
        assert_eq!(markers[2], vec![false, false]);
        assert_eq!(diag.coref_failures(), 2);
    }

    #[test]
    fn token_count_mismatch_is_recovered() {
        let resolver = Scripted(vec![Ok(CorefOutput {
            tokens: tokens(4),
            clusters: Vec::new(),
        })]);
        let mut diag = Diagnostics::new();
        let markers = antecedent_markers(&resolver, &[sentence(&["0", "a"])], &mut diag);
        assert_eq!(markers, vec![vec![false, false]]);
        assert_eq!(diag.coref_failures(), 1);
        assert_eq!(
            diag.anomalies(),
            &[Anomaly::CoreferenceResolutionFailure {
                sentence: 0,
                reason: "resolver saw 4 tokens, sentence has 2".into(),
            }]
        );
    }

    #[test]
    fn malformed_clusters_name_the_offending_mention() {
        let output = CorefOutput {
            tokens: tokens(3),
            clusters: vec![vec![Mention::new(0, 0), Mention::new(2, 1)]],
        };
        assert_eq!(
            markers_from_clusters(&output, 3),
            Err(CorefError::MentionOutOfRange {
                start: 2,
                end: 1,
                len: 3
            })
        );
        assert_eq!(
            CorefError::Model("model crashed".into()).to_string(),
            "coreference model failed: model crashed"
        );
    }
}
