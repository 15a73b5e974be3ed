//! Formality (T/V register) detector.
//!
//! The first use of a register in a document is not flagged; only later uses
//! of an already-seen register are, since those are the ones a translation must
//! keep consistent with earlier context.

use crate::{Anomaly, LanguageProfile, Phenomenon, SentencePair};

use super::{DetectorContext, PhenomenonDetector, SentenceRef};

#[derive(Debug, Clone, Copy)]
pub struct FormalityDetector<'p> {
    profile: &'p LanguageProfile,
}

impl<'p> FormalityDetector<'p> {
    pub fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }
}

impl PhenomenonDetector for FormalityDetector<'_> {
    fn phenomenon(&self) -> Phenomenon {
        Phenomenon::Formality
    }

    fn tag_sentence(
        &self,
        at: SentenceRef,
        pair: &SentencePair,
        ctx: &mut DetectorContext<'_>,
    ) -> Vec<bool> {
        let len = pair.target.len();
        let mut tags = vec![false; len];
        let mut in_word_table = vec![false; len];
        let seen = &mut ctx.memory.seen_formality_classes;

        for pos in 0..len {
            let class = pair
                .target
                .norm(pos)
                .and_then(|norm| self.profile.formality_class(norm));
            if let Some(class) = class {
                in_word_table[pos] = true;
                if seen.contains(class) {
                    tags[pos] = true;
                } else {
                    seen.insert(class.to_string());
                }
            }
        }

        if let Some(rule) = self.profile.formal_verb_rule() {
            let verdicts = rule.tag(pair, seen);
            if verdicts.len() == len {
                for (pos, verdict) in verdicts.into_iter().enumerate() {
                    if verdict && !in_word_table[pos] {
                        tags[pos] = true;
                    }
                }
            } else {
                ctx.diagnostics.record(Anomaly::RuleLengthMismatch {
                    document: at.document,
                    sentence: at.sentence,
                    expected: len,
                    found: verdicts.len(),
                });
            }
        }

        tags
    }
}
