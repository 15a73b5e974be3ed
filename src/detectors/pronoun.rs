//! Ambiguous pronoun detector.

use crate::{Anomaly, LanguageProfile, Phenomenon, SentencePair};

use super::{link_in_range, DetectorContext, PhenomenonDetector, SentenceRef};

/// Flags target pronouns whose form depends on an antecedent outside the
/// sentence.
///
/// A target position is tagged when it is aligned to a source pronoun that
/// has no antecedent in view, the target token is itself a pronoun, and the
/// target form is one of the language's ambiguous translations of the source
/// pronoun.
#[derive(Debug, Clone, Copy)]
pub struct PronounDetector<'p> {
    profile: &'p LanguageProfile,
}

impl<'p> PronounDetector<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }
}

impl PhenomenonDetector for PronounDetector<'_> {
    fn phenomenon(&self) -> Phenomenon {
        Phenomenon::Pronouns
    }

    fn tag_sentence(
        &self,
        at: SentenceRef,
        pair: &SentencePair,
        ctx: &mut DetectorContext<'_>,
    ) -> Vec<bool> {
        let mut tags = vec![false; pair.target.len()];
        if self.profile.ambiguous_pronouns().is_none() {
            return tags;
        }

        for (src, tgt) in pair.alignment.iter() {
            if !link_in_range(pair, src, tgt) {
                continue;
            }
            let has_antecedent = match pair.has_antecedent(src) {
                Some(marker) => marker,
                None => {
                    ctx.diagnostics.record(Anomaly::AlignmentIndexOutOfRange {
                        document: at.document,
                        sentence: at.sentence,
                        source: src,
                        target: tgt,
                    });
                    continue;
                }
            };
            if has_antecedent {
                continue;
            }

            let (Some(src_token), Some(tgt_token)) =
                (pair.source.token_at(src), pair.target.token_at(tgt))
            else {
                continue;
            };
            if !src_token.is_pronoun() || !tgt_token.is_pronoun() {
                continue;
            }

            let (Some(src_norm), Some(tgt_norm)) = (pair.source.norm(src), pair.target.norm(tgt))
            else {
                continue;
            };
            if self.profile.is_ambiguous_pronoun(src_norm, tgt_norm) {
                tags[tgt] = true;
            }
        }

        tags
    }
}
