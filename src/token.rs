//! Linguistic tokens as produced by the upstream NLP pipeline.
//!
//! The tagger never tokenizes or tags text itself. A [`Token`] is the
//! materialized output of an external pipeline: surface text, lemma, Universal
//! POS tag, morphological features and a couple of lexical flags.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BOUNDARY_NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\W+|\W+$").expect("Invalid boundary regex"));

/// Case-fold a word and strip leading/trailing non-word characters.
///
/// ```
/// use layered_discourse::normalize;
///
/// assert_eq!(normalize("«Vous»,"), "vous");
/// assert_eq!(normalize("l'homme"), "l'homme");
/// ```
pub fn normalize(word: &str) -> String {
    BOUNDARY_NON_WORD
        .replace_all(&word.to_lowercase(), "")
        .into_owned()
}

/// Universal Dependencies part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Pos {
    /// Parse a UPOS tag, falling back to [`Pos::X`] for anything unknown.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            _ => Pos::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
        }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Pos::X
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Morphological feature bag: feature name to its (small, finite) set of values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Morph(BTreeMap<String, Vec<String>>);

impl Morph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a UD `FEATS` column, e.g. `Number=Sing|Person=2|Tense=Past,Imp`.
    ///
    /// `_` and the empty string yield an empty bag. Malformed entries without
    /// `=` are ignored.
    pub fn parse(feats: &str) -> Self {
        let mut morph = Morph::new();
        let feats = feats.trim();
        if feats.is_empty() || feats == "_" {
            return morph;
        }
        for entry in feats.split('|') {
            if let Some((name, values)) = entry.split_once('=') {
                for value in values.split(',').filter(|v| !v.is_empty()) {
                    morph.insert(name.trim(), value.trim());
                }
            }
        }
        morph
    }

    /// Add a value to a feature, keeping values unique.
    pub fn insert(&mut self, feature: impl Into<String>, value: impl Into<String>) {
        let values = self.0.entry(feature.into()).or_default();
        let value = value.into();
        if !values.contains(&value) {
            values.push(value);
        }
    }

    pub fn with(mut self, feature: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(feature, value);
        self
    }

    /// Values of a feature, empty if absent.
    pub fn get(&self, feature: &str) -> &[String] {
        self.0.get(feature).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `feature` carries `value` among its values.
    pub fn has(&self, feature: &str, value: &str) -> bool {
        self.get(feature).iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One upstream token.
///
/// `text` may contain embedded spaces (e.g. multi-word expressions merged by
/// the pipeline); such tokens are expanded into several positions by
/// [`ExpandedSentence`](crate::ExpandedSentence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Normalized surface form, see [`normalize`]
    pub norm: String,
    pub lemma: String,
    pub pos: Pos,
    #[serde(default)]
    pub morph: Morph,
    #[serde(default)]
    pub is_stop: bool,
    #[serde(default)]
    pub is_punct: bool,
    /// Dependency relation to the head token (e.g. `nsubj`)
    #[serde(default)]
    pub dep: Option<String>,
    /// Index of the head token within the same sentence's upstream tokens
    #[serde(default)]
    pub head: Option<usize>,
}

impl Token {
    /// Create a token whose lemma defaults to its normalized text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let norm = normalize(&text);
        Self {
            lemma: norm.clone(),
            norm,
            text,
            pos: Pos::X,
            morph: Morph::new(),
            is_stop: false,
            is_punct: false,
            dep: None,
            head: None,
        }
    }

    pub fn with_pos(mut self, pos: Pos) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn with_morph(mut self, morph: Morph) -> Self {
        self.morph = morph;
        self
    }

    pub fn with_stop(mut self, is_stop: bool) -> Self {
        self.is_stop = is_stop;
        self
    }

    pub fn with_punct(mut self, is_punct: bool) -> Self {
        self.is_punct = is_punct;
        self
    }

    /// Attach a dependency arc to the upstream token at `head`.
    pub fn with_dependency(mut self, dep: impl Into<String>, head: usize) -> Self {
        self.dep = Some(dep.into());
        self.head = Some(head);
        self
    }

    pub fn is_verb(&self) -> bool {
        self.pos == Pos::Verb
    }

    pub fn is_pronoun(&self) -> bool {
        self.pos == Pos::Pron
    }

    /// Stopwords and punctuation never take part in lexical cohesion.
    pub fn is_content_word(&self) -> bool {
        !self.is_stop && !self.is_punct
    }
}
