//! Per-language rule tables and the explicit language registry.
//!
//! A [`LanguageProfile`] is data: formality vocabularies, the ambiguous
//! pronoun translation table and the ambiguous tense tags of one target
//! language, plus an optional [`FormalVerbRule`] capability for languages
//! whose register is also marked on verbs.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::{normalize, SentencePair, TaggerError, TaggerResult};

/// Optional language-specific formality check on verbs.
///
/// Called once per sentence after the word-table lookup, with the same
/// document-wide set of seen formality classes. Must return one verdict per
/// expanded target position; a differently sized result is ignored.
pub trait FormalVerbRule: fmt::Debug + Send + Sync {
    fn tag(&self, pair: &SentencePair, seen_classes: &mut BTreeSet<String>) -> Vec<bool>;
}

/// Static configuration of one target language.
#[derive(Debug, Clone, Default)]
pub struct LanguageProfile {
    code: String,
    formality_classes: BTreeMap<String, BTreeSet<String>>,
    /// Flattened word -> class lookup, maintained alongside `formality_classes`
    formality_lookup: HashMap<String, String>,
    ambiguous_pronouns: Option<BTreeMap<String, Vec<String>>>,
    ambiguous_verbform: BTreeSet<String>,
    formal_verb_rule: Option<Arc<dyn FormalVerbRule>>,
}

impl LanguageProfile {
    /// An empty profile: no phenomenon will ever fire for it.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Add words to a formality class. Words are normalized; a word already
    /// registered under another class moves to this one.
    pub fn with_formality_class(mut self, class: &str, words: &[&str]) -> Self {
        for word in words {
            let word = normalize(word);
            if let Some(previous) = self.formality_lookup.insert(word.clone(), class.to_string()) {
                if previous != class {
                    self.remove_from_class(&previous, &word);
                }
            }
            self.formality_classes
                .entry(class.to_string())
                .or_default()
                .insert(word);
        }
        self
    }

    fn remove_from_class(&mut self, class: &str, word: &str) {
        if let Some(words) = self.formality_classes.get_mut(class) {
            words.remove(word);
            if words.is_empty() {
                self.formality_classes.remove(class);
            }
        }
    }

    /// Declare the target forms a source pronoun may ambiguously translate to.
    pub fn with_ambiguous_pronoun(mut self, source: &str, targets: &[&str]) -> Self {
        self.ambiguous_pronouns
            .get_or_insert_with(BTreeMap::new)
            .insert(normalize(source), targets.iter().map(|t| normalize(t)).collect());
        self
    }

    pub fn with_ambiguous_verbform(mut self, tenses: &[&str]) -> Self {
        self.ambiguous_verbform
            .extend(tenses.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_formal_verb_rule(mut self, rule: impl FormalVerbRule + 'static) -> Self {
        self.formal_verb_rule = Some(Arc::new(rule));
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn formality_classes(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.formality_classes
    }

    /// Formality class of a normalized word.
    pub fn formality_class(&self, norm: &str) -> Option<&str> {
        self.formality_lookup.get(norm).map(String::as_str)
    }

    /// `None` when the language declares no ambiguous-pronoun table at all.
    pub fn ambiguous_pronouns(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.ambiguous_pronouns.as_ref()
    }

    /// True if `target` is a listed ambiguous translation of `source`
    /// (both normalized).
    pub fn is_ambiguous_pronoun(&self, source: &str, target: &str) -> bool {
        self.ambiguous_pronouns
            .as_ref()
            .and_then(|table| table.get(source))
            .map_or(false, |forms| forms.iter().any(|f| f == target))
    }

    pub fn ambiguous_verbform(&self) -> &BTreeSet<String> {
        &self.ambiguous_verbform
    }

    pub fn formal_verb_rule(&self) -> Option<&dyn FormalVerbRule> {
        self.formal_verb_rule.as_deref()
    }
}

/// Explicit mapping from language code to profile, built by the caller and
/// handed to the tagger.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    profiles: BTreeMap<String, LanguageProfile>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile under its own code, replacing any previous one.
    pub fn register(&mut self, profile: LanguageProfile) {
        self.profiles.insert(profile.code().to_string(), profile);
    }

    pub fn with(mut self, profile: LanguageProfile) -> Self {
        self.register(profile);
        self
    }

    pub fn get(&self, code: &str) -> TaggerResult<&LanguageProfile> {
        self.profiles
            .get(code)
            .ok_or_else(|| TaggerError::UnknownLanguage(code.to_string()))
    }

    /// Registered language codes in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formality_lookup_is_flattened_and_normalized() {
        let profile = LanguageProfile::new("fr")
            .with_formality_class("t_class", &["tu", "Toi"])
            .with_formality_class("v_class", &["vous"]);

        assert_eq!(profile.formality_class("toi"), Some("t_class"));
        assert_eq!(profile.formality_class("vous"), Some("v_class"));
        assert_eq!(profile.formality_class("il"), None);
        assert_eq!(profile.formality_classes().len(), 2);
    }

    #[test]
    fn later_class_wins_on_conflict() {
        let profile = LanguageProfile::new("xx")
            .with_formality_class("t_class", &["ta"])
            .with_formality_class("v_class", &["ta"]);
        assert_eq!(profile.formality_class("ta"), Some("v_class"));
    }

    #[test]
    fn reregistered_word_leaves_its_old_class() {
        let profile = LanguageProfile::new("xx")
            .with_formality_class("t_class", &["ta", "te"])
            .with_formality_class("v_class", &["Ta"])
            .with_formality_class("v_class", &["ta"]);

        let classes = profile.formality_classes();
        assert_eq!(classes["t_class"], BTreeSet::from(["te".to_string()]));
        assert_eq!(classes["v_class"], BTreeSet::from(["ta".to_string()]));
        assert_eq!(profile.formality_class("ta"), Some("v_class"));

        let moved = profile.with_formality_class("v_class", &["te"]);
        assert!(!moved.formality_classes().contains_key("t_class"));
        assert_eq!(moved.formality_class("te"), Some("v_class"));
    }

    #[test]
    fn pronoun_table_absent_vs_present() {
        let empty = LanguageProfile::new("zh");
        assert!(empty.ambiguous_pronouns().is_none());
        assert!(!empty.is_ambiguous_pronoun("it", "它"));

        let de = LanguageProfile::new("de").with_ambiguous_pronoun("it", &["er", "sie", "es"]);
        assert!(de.is_ambiguous_pronoun("it", "sie"));
        assert!(!de.is_ambiguous_pronoun("it", "ihm"));
        assert!(!de.is_ambiguous_pronoun("they", "sie"));
    }

    #[test]
    fn registry_lookup() {
        let registry = LanguageRegistry::new()
            .with(LanguageProfile::new("fr"))
            .with(LanguageProfile::new("de"));

        assert_eq!(registry.languages().collect::<Vec<_>>(), vec!["de", "fr"]);
        assert_eq!(registry.get("fr").unwrap().code(), "fr");
        assert!(matches!(
            registry.get("xx"),
            Err(TaggerError::UnknownLanguage(code)) if code == "xx"
        ));
    }
}
