//! Italian register marked on verbs.
//!
//! Italian often drops the subject pronoun, so "tu" vs "Lei" only shows in the
//! verb's person: 2nd person singular is informal, 3rd person singular is the
//! formal address. A target verb is considered when it is aligned to the head
//! of an English `you` subject.

use std::collections::{BTreeSet, HashMap, HashSet};

use layered_discourse::{FormalVerbRule, SentencePair};

/// Class recorded for a 2nd person singular verb.
pub const VERB_PERSON_2: &str = "verb_person_2";
/// Class recorded for a 3rd person singular verb.
pub const VERB_PERSON_3: &str = "verb_person_3";

#[derive(Debug, Clone, Copy, Default)]
pub struct ItalianVerbFormality;

impl ItalianVerbFormality {
    pub fn new() -> Self {
        Self
    }
}

impl FormalVerbRule for ItalianVerbFormality {
    fn tag(&self, pair: &SentencePair, seen_classes: &mut BTreeSet<String>) -> Vec<bool> {
        let mut tags = vec![false; pair.target.len()];

        // normalized source word -> normalized target word, last link wins
        let mut aligned: HashMap<&str, &str> = HashMap::new();
        for (src, tgt) in pair.alignment.iter() {
            if let (Some(src_norm), Some(tgt_norm)) = (pair.source.norm(src), pair.target.norm(tgt))
            {
                aligned.insert(src_norm, tgt_norm);
            }
        }

        let source_tokens = pair.source.tokens();
        let you_verbs: HashSet<&str> = source_tokens
            .iter()
            .filter(|tok| tok.norm == "you" && tok.dep.as_deref() == Some("nsubj"))
            .filter_map(|tok| tok.head)
            .filter_map(|head| source_tokens.get(head))
            .filter_map(|head| aligned.get(head.norm.as_str()).copied())
            .collect();
        if you_verbs.is_empty() {
            return tags;
        }

        for (idx, tok) in pair.target.tokens().iter().enumerate() {
            if !you_verbs.contains(tok.norm.as_str()) || !tok.morph.has("Number", "Sing") {
                continue;
            }
            let class = if tok.morph.has("Person", "2") {
                VERB_PERSON_2
            } else if tok.morph.has("Person", "3") {
                VERB_PERSON_3
            } else {
                continue;
            };

            if seen_classes.contains(class) {
                for pos in pair.target.positions_of(idx) {
                    tags[pos] = true;
                }
            } else {
                log::debug!("first {} verb: {:?}", class, tok.text);
                seen_classes.insert(class.to_string());
            }
        }

        tags
    }
}
