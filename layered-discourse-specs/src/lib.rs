#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven testing for `layered-discourse`.
//!
//! Test cases are small corpora of pre-annotated sentence pairs written in
//! TOML, each target position carrying the tags it is expected to receive.
//! Running a fixture builds the documents exactly as the tagging surface
//! would, tags them with the fixture's language profile and reports every
//! position whose tags differ.
//!
//! ## Modules
//!
//! - [`parser`] - Token, marker and tag syntax
//! - [`fixture`] - Fixture data structures
//! - [`loader`] - Reading fixtures from disk
//! - [`runner`] - Tagging a fixture and collecting mismatches
//! - [`formatter`] - Readable mismatch reports
//! - [`failures`] - Expected failures tracking via TOML
//! - [`errors`] - Error types
//!
//! ## Usage
//!
//! ```
//! use layered_discourse_langs::builtin_registry;
//! use layered_discourse_specs::{parse_fixture, run_fixture};
//!
//! let fixture = parse_fixture(r#"
//! language = "fr"
//! phenomena = ["formality"]
//!
//! [[sentences]]
//! source = "you/PRON///stop"
//! target = "vous/PRON///stop"
//! alignment = "0-0"
//! expect = "-"
//!
//! [[sentences]]
//! source = "you/PRON///stop"
//! target = "vous/PRON///stop"
//! alignment = "0-0"
//! expect = "formality"
//! "#).unwrap();
//!
//! let run = run_fixture(&fixture, &builtin_registry()).unwrap();
//! assert!(run.passed());
//! ```

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod parser;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{DiscourseFixture, FixtureSentence};
pub use formatter::{format_failure, format_summary, format_tags};
pub use loader::{load_all_fixtures, load_fixture};
pub use parser::{parse_fixture, parse_markers, parse_tags, parse_token, parse_tokens};
pub use runner::{check_directory, check_fixture, run_fixture, FixtureRun, TagMismatch};
