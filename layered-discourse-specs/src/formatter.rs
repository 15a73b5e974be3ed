//! Human-readable reports for tag mismatches.

use std::fmt::{self, Write};

use layered_discourse::{ExpandedSentence, TagSet, TaggedSentenceDisplay};

use crate::failures::{ExpectedFailures, HarnessResult};
use crate::fixture::FixtureSentence;
use crate::runner::TagMismatch;

/// Tags in fixture syntax: `-` or names joined by `+`.
pub fn format_tags(tags: &TagSet) -> String {
    if tags.is_empty() {
        return "-".to_string();
    }
    tags.iter()
        .map(|tag| tag.name())
        .collect::<Vec<_>>()
        .join("+")
}

/// Render one mismatch with the expected and produced tags of its sentence.
pub fn format_failure(
    fixture_name: &str,
    sentence: &FixtureSentence,
    actual: &[TagSet],
    mismatch: &TagMismatch,
) -> String {
    let mut output = String::new();
    // writing into a String cannot fail
    let _ = write_failure(&mut output, fixture_name, sentence, actual, mismatch);
    output
}

fn write_failure(
    output: &mut String,
    fixture_name: &str,
    sentence: &FixtureSentence,
    actual: &[TagSet],
    mismatch: &TagMismatch,
) -> fmt::Result {
    let target = ExpandedSentence::new(sentence.target.clone());

    writeln!(
        output,
        "\nFAIL: {}:{}",
        fixture_name,
        ExpectedFailures::format_ref(mismatch.sentence, mismatch.position)
    )?;
    writeln!(output)?;

    writeln!(output, "  expected:")?;
    write_indented(output, &TaggedSentenceDisplay::new(&target, &sentence.expect))?;
    writeln!(output, "  found:")?;
    write_indented(output, &TaggedSentenceDisplay::new(&target, actual))?;
    writeln!(output)?;

    writeln!(
        output,
        "  tags differ on {:?} (document {}, position {}): expected `{}`, found `{}`",
        mismatch.token,
        mismatch.document,
        mismatch.position,
        format_tags(&mismatch.expected),
        format_tags(&mismatch.actual)
    )?;
    Ok(())
}

fn write_indented(output: &mut String, display: &dyn fmt::Display) -> fmt::Result {
    for line in display.to_string().lines() {
        writeln!(output, "    {}", line)?;
    }
    Ok(())
}

/// One-paragraph summary of a fixture's tallies.
pub fn format_summary(fixture_name: &str, result: &HarnessResult) -> String {
    let status = if result.success() { "PASS" } else { "FAIL" };
    let failed = result.total - result.passed;
    format!(
        "\n{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status, fixture_name, result.passed, failed, result.expected_failures, result.regressions
    )
}
