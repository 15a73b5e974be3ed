//! Tagger configuration.
//!
//! ```toml
//! phenomena = ["formality", "pronouns"]
//! cohesion_threshold = 2
//! first_sentence_antecedents = "all_resolved"
//!
//! [aligner]
//! model = "bert-base-multilingual-cased"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aligner::AwesomeAlignConfig;
use crate::detectors::DEFAULT_COHESION_THRESHOLD;
use crate::{FirstSentencePolicy, Phenomenon, TaggerError, TaggerResult};

/// Configuration for a [`Tagger`](crate::Tagger) and its corpus pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    /// Phenomena to tag
    pub phenomena: Vec<Phenomenon>,
    /// Prior-sentence count a cohesion pair must exceed to be tagged
    pub cohesion_threshold: usize,
    /// Accepted for compatibility; the whole document is always used as context.
    pub max_context_size: Option<usize>,
    pub first_sentence_antecedents: FirstSentencePolicy,
    pub aligner: AwesomeAlignConfig,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            phenomena: Phenomenon::ALL.to_vec(),
            cohesion_threshold: DEFAULT_COHESION_THRESHOLD,
            max_context_size: None,
            first_sentence_antecedents: FirstSentencePolicy::default(),
            aligner: AwesomeAlignConfig::default(),
        }
    }
}

impl TaggerConfig {
    /// Restrict tagging to the named phenomena.
    pub fn with_phenomena<S: AsRef<str>>(mut self, names: &[S]) -> TaggerResult<Self> {
        self.phenomena = Phenomenon::parse_list(names)?;
        Ok(self)
    }

    pub fn with_cohesion_threshold(mut self, threshold: usize) -> Self {
        self.cohesion_threshold = threshold;
        self
    }

    pub fn with_first_sentence_antecedents(mut self, policy: FirstSentencePolicy) -> Self {
        self.first_sentence_antecedents = policy;
        self
    }

    /// Parse and validate a TOML config.
    ///
    /// Phenomenon names are resolved separately so a misspelled one surfaces
    /// as [`TaggerError::UnknownPhenomenon`] rather than a TOML error.
    pub fn from_toml_str(text: &str) -> TaggerResult<Self> {
        let mut table: toml::Table = text.parse()?;
        let names = table.remove("phenomena").map(phenomenon_names).transpose()?;
        let mut config: TaggerConfig = toml::Value::Table(table).try_into()?;
        if let Some(names) = names {
            config.phenomena = Phenomenon::parse_list(&names)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> TaggerResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> TaggerResult<()> {
        if self.cohesion_threshold == 0 {
            return Err(TaggerError::InvalidConfig(
                "cohesion_threshold must be a positive integer".into(),
            ));
        }
        if let Some(size) = self.max_context_size {
            log::warn!(
                "max_context_size = {} is not applied; full documents are used as context",
                size
            );
        }
        Ok(())
    }
}

fn phenomenon_names(value: toml::Value) -> TaggerResult<Vec<String>> {
    let invalid = |found: &str| {
        TaggerError::InvalidConfig(format!(
            "phenomena must be an array of strings, found {}",
            found
        ))
    };
    match value {
        toml::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                toml::Value::String(name) => Ok(name),
                other => Err(invalid(other.type_str())),
            })
            .collect(),
        other => Err(invalid(other.type_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_request_every_phenomenon() {
        let config = TaggerConfig::default();
        assert_eq!(config.phenomena, Phenomenon::ALL.to_vec());
        assert_eq!(config.cohesion_threshold, 2);
        assert_eq!(config.first_sentence_antecedents, FirstSentencePolicy::AllResolved);
    }

    #[test]
    fn parses_partial_toml() {
        let config = TaggerConfig::from_toml_str(
            r#"
            phenomena = ["formality", "verb_form"]
            cohesion_threshold = 3
            first_sentence_antecedents = "from_coreference"

            [aligner]
            model = "xlm-roberta-base"
            "#,
        )
        .unwrap();

        assert_eq!(config.phenomena, vec![Phenomenon::Formality, Phenomenon::VerbForm]);
        assert_eq!(config.cohesion_threshold, 3);
        assert_eq!(
            config.first_sentence_antecedents,
            FirstSentencePolicy::FromCoreference
        );
        assert_eq!(config.aligner.model, "xlm-roberta-base");
        assert_eq!(config.aligner.batch_size, 32);
    }

    #[test]
    fn rejects_zero_threshold_and_unknown_phenomena() {
        assert!(matches!(
            TaggerConfig::from_toml_str("cohesion_threshold = 0"),
            Err(TaggerError::InvalidConfig(_))
        ));
        assert!(matches!(
            TaggerConfig::from_toml_str(r#"phenomena = ["ellipsis"]"#),
            Err(TaggerError::UnknownPhenomenon(name)) if name == "ellipsis"
        ));
        assert!(matches!(
            TaggerConfig::from_toml_str(r#"phenomena = "formality""#),
            Err(TaggerError::InvalidConfig(_))
        ));
        assert!(matches!(
            TaggerConfig::from_toml_str("colour = 1"),
            Err(TaggerError::Toml(_))
        ));
        assert!(matches!(
            TaggerConfig::default().with_phenomena(&["ellipsis"]),
            Err(TaggerError::UnknownPhenomenon(_))
        ));
    }

    #[test]
    fn empty_phenomena_list_is_kept() {
        let config = TaggerConfig::from_toml_str("phenomena = []").unwrap();
        assert!(config.phenomena.is_empty());
    }

    #[test]
    fn max_context_size_is_accepted() {
        let config = TaggerConfig::from_toml_str("max_context_size = 3").unwrap();
        assert_eq!(config.max_context_size, Some(3));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cohesion_threshold = 5").unwrap();
        let config = TaggerConfig::load(file.path()).unwrap();
        assert_eq!(config.cohesion_threshold, 5);
    }
}
