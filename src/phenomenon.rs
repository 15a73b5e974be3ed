//! Phenomenon labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TaggerError;

/// A category of context-dependent translation ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phenomenon {
    /// Repeated aligned content-word pairs across sentences
    LexicalCohesion,
    /// Repeated T/V register markers
    Formality,
    /// Repeated ambiguous verb tenses
    VerbForm,
    /// Context-dependent pronoun gender/number
    Pronouns,
}

impl Phenomenon {
    /// Every phenomenon, in the default request order.
    pub const ALL: [Phenomenon; 4] = [
        Phenomenon::LexicalCohesion,
        Phenomenon::Formality,
        Phenomenon::VerbForm,
        Phenomenon::Pronouns,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phenomenon::LexicalCohesion => "lexical_cohesion",
            Phenomenon::Formality => "formality",
            Phenomenon::VerbForm => "verb_form",
            Phenomenon::Pronouns => "pronouns",
        }
    }

    /// Parse a list of requested names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Phenomenon>, TaggerError> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl FromStr for Phenomenon {
    type Err = TaggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phenomenon::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| TaggerError::UnknownPhenomenon(s.to_string()))
    }
}

impl fmt::Display for Phenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
