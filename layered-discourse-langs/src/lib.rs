#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Built-in language profiles for `layered-discourse`.
//!
//! ## Languages
//!
//! ar, de, en, es, fr, he, it, ja, ko, nl, pt, ro, ru, tr, zh, zh_tw
//!
//! Languages without a T/V distinction, pronoun table or ambiguous tense simply
//! never produce that phenomenon. Italian additionally carries
//! [`ItalianVerbFormality`], which detects register on pro-drop verbs.
//!
//! ## Usage
//!
//! ```
//! use layered_discourse::{Tagger, TaggerConfig};
//! use layered_discourse_langs::builtin_registry;
//!
//! let registry = builtin_registry();
//! let tagger = Tagger::from_registry(&registry, "fr", TaggerConfig::default()).unwrap();
//! assert_eq!(tagger.profile().formality_class("vous"), Some("v_class"));
//! ```

mod italian;
mod tables;

pub use italian::{ItalianVerbFormality, VERB_PERSON_2, VERB_PERSON_3};

use layered_discourse::{LanguageProfile, LanguageRegistry, TaggerError, TaggerResult};

/// Language codes with a built-in profile, sorted.
pub fn builtin_languages() -> impl Iterator<Item = &'static str> {
    tables::ALL.iter().map(|table| table.code)
}

/// The built-in profile for `code`.
pub fn profile_for(code: &str) -> TaggerResult<LanguageProfile> {
    let table = tables::ALL
        .iter()
        .find(|table| table.code == code)
        .ok_or_else(|| TaggerError::UnknownLanguage(code.to_string()))?;
    let profile = table.to_profile();
    Ok(if code == tables::ITALIAN.code {
        profile.with_formal_verb_rule(ItalianVerbFormality::new())
    } else {
        profile
    })
}

/// A registry holding every built-in profile.
pub fn builtin_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    for table in tables::ALL {
        match profile_for(table.code) {
            Ok(profile) => registry.register(profile),
            Err(err) => log::warn!("skipping built-in language {}: {}", table.code, err),
        }
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_language() {
        let registry = builtin_registry();
        let codes: Vec<&str> = registry.languages().collect();
        assert_eq!(codes, builtin_languages().collect::<Vec<_>>());
        assert!(registry.get("zh_tw").is_ok());
    }

    #[test]
    fn language_codes() {
        insta::assert_snapshot!(builtin_languages().collect::<Vec<_>>().join(" "), @"ar de en es fr he it ja ko nl pt ro ru tr zh zh_tw");
    }

    #[test]
    fn unknown_language_is_an_error() {
        assert!(matches!(
            profile_for("xx"),
            Err(TaggerError::UnknownLanguage(code)) if code == "xx"
        ));
        assert!(matches!(
            builtin_registry().get("xx"),
            Err(TaggerError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn italian_verbs_carry_formality() {
        use layered_discourse::{
            Alignment, Document, ExpandedSentence, Morph, Phenomenon, Pos, SentencePair, Tagger,
            TaggerConfig, Token,
        };

        let sentence = || {
            SentencePair::new(
                ExpandedSentence::new(vec![
                    Token::new("you").with_pos(Pos::Pron).with_dependency("nsubj", 1),
                    Token::new("know").with_pos(Pos::Verb),
                ]),
                ExpandedSentence::new(vec![Token::new("sai")
                    .with_pos(Pos::Verb)
                    .with_morph(Morph::parse("Mood=Ind|Number=Sing|Person=2|Tense=Pres"))]),
                Alignment::parse("1-0").unwrap(),
                vec![false, false],
            )
        };
        let doc = Document::new(0, vec![sentence(), sentence()]);
        let tagger =
            Tagger::from_registry(&builtin_registry(), "it", TaggerConfig::default()).unwrap();

        let (tagged, diagnostics) = tagger.tag_document_with(&doc, &[Phenomenon::Formality]);
        assert!(tagged[0][0].is_empty());
        assert!(tagged[1][0].contains(&Phenomenon::Formality));
        assert!(diagnostics.is_clean());
    }

    #[test]
    fn only_italian_has_a_verb_rule() {
        for code in builtin_languages() {
            let profile = profile_for(code).unwrap();
            assert_eq!(profile.formal_verb_rule().is_some(), code == "it", "{}", code);
        }
    }
}
