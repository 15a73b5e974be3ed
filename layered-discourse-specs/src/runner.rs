//! Runs fixtures through the tagger and compares against expected tags.

use layered_discourse::{Diagnostics, LanguageRegistry, TagSet, TaggedDocument, Tagger};

use crate::errors::SpecResult;
use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::DiscourseFixture;
use crate::formatter::{format_failure, format_summary};
use crate::loader::load_all_fixtures;
use std::path::Path;

/// One target position whose tags differ from the fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMismatch {
    /// Index of the document within the fixture
    pub document: usize,
    /// Index of the sentence within the fixture file
    pub sentence: usize,
    pub position: usize,
    pub token: String,
    pub expected: TagSet,
    pub actual: TagSet,
}

/// Result of running a fixture through the tagger.
#[derive(Debug, Clone, Default)]
pub struct FixtureRun {
    /// Tags as produced, document-major
    pub tagged: Vec<TaggedDocument>,
    pub mismatches: Vec<TagMismatch>,
    pub diagnostics: Diagnostics,
    /// Number of target positions compared
    pub positions: usize,
}

impl FixtureRun {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Produced tags for the fixture sentence at `sentence`, counting across
    /// documents.
    pub fn sentence_tags(&self, sentence: usize) -> Option<&[TagSet]> {
        self.tagged.iter().flatten().nth(sentence).map(Vec::as_slice)
    }
}

/// Tag the fixture's documents with the profile registered for its language.
pub fn run_fixture(fixture: &DiscourseFixture, registry: &LanguageRegistry) -> SpecResult<FixtureRun> {
    let tagger = Tagger::from_registry(registry, &fixture.language, fixture.config.clone())?;
    let documents = fixture.documents()?;
    let output = tagger.tag_documents(&documents);

    let mut run = FixtureRun {
        tagged: output.documents,
        diagnostics: output.diagnostics,
        ..FixtureRun::default()
    };

    let mut sentence = 0;
    for (doc_idx, expected_doc) in fixture.expected().iter().enumerate() {
        for (sent_idx, expected_tags) in expected_doc.iter().enumerate() {
            let target = documents
                .get(doc_idx)
                .and_then(|doc| doc.sentences.get(sent_idx))
                .map(|pair| &pair.target);
            for (position, expected) in expected_tags.iter().enumerate() {
                let actual = run
                    .tagged
                    .get(doc_idx)
                    .and_then(|doc| doc.get(sent_idx))
                    .and_then(|tags| tags.get(position))
                    .cloned()
                    .unwrap_or_default();
                run.positions += 1;
                if &actual != expected {
                    run.mismatches.push(TagMismatch {
                        document: doc_idx,
                        sentence,
                        position,
                        token: target
                            .and_then(|t| t.text(position))
                            .unwrap_or_default()
                            .to_string(),
                        expected: expected.clone(),
                        actual,
                    });
                }
            }
            sentence += 1;
        }
    }

    Ok(run)
}

/// Run a fixture and classify every mismatch against the expected failures.
///
/// Returns the tallies together with a printable report of every mismatch
/// that is a regression.
pub fn check_fixture(
    name: &str,
    fixture: &DiscourseFixture,
    registry: &LanguageRegistry,
    failures: &ExpectedFailures,
) -> SpecResult<(HarnessResult, String)> {
    let run = run_fixture(fixture, registry)?;
    let mut result = HarnessResult::new();
    let mut report = String::new();

    for _ in 0..run.positions - run.mismatches.len() {
        result.record_pass();
    }
    for mismatch in &run.mismatches {
        let reference = ExpectedFailures::format_ref(mismatch.sentence, mismatch.position);
        let state = failures.is_expected(name, &reference);
        result.record_failure(state);
        if state == FailureState::Regression {
            if let (Some(sentence), Some(actual)) = (
                fixture.sentences.get(mismatch.sentence),
                run.sentence_tags(mismatch.sentence),
            ) {
                report.push_str(&format_failure(name, sentence, actual, mismatch));
            }
        }
    }

    Ok((result, report))
}

/// Check every fixture under `dir`, appending a summary per fixture to the
/// report.
pub fn check_directory(
    dir: &Path,
    registry: &LanguageRegistry,
    failures: &ExpectedFailures,
) -> SpecResult<(HarnessResult, String)> {
    let mut total = HarnessResult::new();
    let mut report = String::new();
    for (name, fixture) in load_all_fixtures(dir)? {
        let (result, failures_report) = check_fixture(&name, &fixture, registry, failures)?;
        report.push_str(&failures_report);
        report.push_str(&format_summary(&name, &result));
        total.merge(&result);
    }
    Ok((total, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fixture;
    use layered_discourse::{LanguageProfile, Phenomenon};

    fn registry() -> LanguageRegistry {
        let mut registry = LanguageRegistry::new();
        registry.register(
            LanguageProfile::new("fr")
                .with_formality_class("t_class", &["tu"])
                .with_formality_class("v_class", &["vous"]),
        );
        registry
    }

    const FIXTURE: &str = r#"
        language = "fr"
        phenomena = ["formality"]

        [[sentences]]
        source = "you/PRON///stop"
        target = "tu/PRON///stop"
        alignment = "0-0"
        expect = "-"

        [[sentences]]
        source = "you/PRON///stop"
        target = "tu/PRON///stop"
        alignment = "0-0"
        expect = "-"
    "#;

    #[test]
    fn mismatches_point_at_positions() {
        let fixture = parse_fixture(FIXTURE).unwrap();
        let run = run_fixture(&fixture, &registry()).unwrap();

        assert!(!run.passed());
        assert_eq!(run.positions, 2);
        assert_eq!(
            run.mismatches,
            vec![TagMismatch {
                document: 0,
                sentence: 1,
                position: 0,
                token: "tu".to_string(),
                expected: TagSet::new(),
                actual: [Phenomenon::Formality].into_iter().collect(),
            }]
        );
    }

    #[test]
    fn expected_failures_are_not_regressions() {
        let fixture = parse_fixture(FIXTURE).unwrap();
        let failures: ExpectedFailures = toml::from_str(
            r#"
            [[known]]
            fixture = "inline.toml"
            assertion = "S1.[0]"
            reason = "written with the wrong expectation"
            "#,
        )
        .unwrap();

        let (result, report) = check_fixture("inline.toml", &fixture, &registry(), &failures).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.passed, 1);
        assert_eq!(result.expected_failures, 1);
        assert!(result.success());
        assert!(report.is_empty());

        let (result, report) =
            check_fixture("other.toml", &fixture, &registry(), &failures).unwrap();
        assert_eq!(result.regressions, 1);
        assert!(report.contains("other.toml:S1.[0]"));
    }

    #[test]
    fn unknown_language_is_an_error() {
        let fixture = parse_fixture("language = \"xx\"").unwrap();
        assert!(run_fixture(&fixture, &registry()).is_err());
    }
}
