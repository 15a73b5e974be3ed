//! Ambiguous verb tense detector.

use std::collections::BTreeSet;

use crate::{LanguageProfile, Phenomenon, SentencePair};

use super::{DetectorContext, PhenomenonDetector, SentenceRef};

/// Flags verbs whose ambiguous tense already appeared earlier in the document.
///
/// Features belong to upstream tokens, so each verb is judged once and the
/// verdict covers every position the token expands to.
#[derive(Debug, Clone, Copy)]
pub struct VerbFormDetector<'p> {
    profile: &'p LanguageProfile,
}

impl<'p> VerbFormDetector<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }
}

impl PhenomenonDetector for VerbFormDetector<'_> {
    fn phenomenon(&self) -> Phenomenon {
        Phenomenon::VerbForm
    }

    fn tag_sentence(
        &self,
        _at: SentenceRef,
        pair: &SentencePair,
        ctx: &mut DetectorContext<'_>,
    ) -> Vec<bool> {
        let mut tags = vec![false; pair.target.len()];
        let ambiguous = self.profile.ambiguous_verbform();
        if ambiguous.is_empty() {
            return tags;
        }
        let seen = &mut ctx.memory.seen_verb_tenses;

        for (idx, token) in pair.target.tokens().iter().enumerate() {
            if !token.is_verb() {
                continue;
            }
            let tenses: BTreeSet<&str> = token
                .morph
                .get("Tense")
                .iter()
                .map(String::as_str)
                .filter(|t| ambiguous.contains(*t))
                .collect();

            let mut repeated = false;
            for tense in tenses {
                if seen.contains(tense) {
                    repeated = true;
                } else {
                    seen.insert(tense.to_string());
                }
            }
            if repeated {
                for pos in pair.target.positions_of(idx) {
                    tags[pos] = true;
                }
            }
        }

        tags
    }
}
