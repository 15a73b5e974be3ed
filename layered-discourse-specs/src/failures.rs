//! Tracking of known and pending tag mismatches.
//!
//! A failures file lists fixture positions that are allowed to disagree with
//! their expected tags, so a run only fails on regressions:
//!
//! ```toml
//! [[pending]]
//! fixture = "pronouns-de.toml"
//! assertion = "S2.[1]"
//! reason = "es aligned to a dropped subject"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{SpecError, SpecResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Mismatches nobody plans to fix soon.
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Mismatches awaiting a fix.
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Position reference, see [`ExpectedFailures::format_ref`].
    pub assertion: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Known,
    Pending,
    /// Not listed anywhere: the mismatch is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn is_expected(&self, fixture: &str, assertion_ref: &str) -> FailureState {
        if self.find(&self.known, fixture, assertion_ref).is_some() {
            FailureState::Known
        } else if self.find(&self.pending, fixture, assertion_ref).is_some() {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    /// Reference for target position `position` of fixture sentence `sentence`.
    pub fn format_ref(sentence: usize, position: usize) -> String {
        format!("S{}.[{}]", sentence, position)
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn get_entry(&self, fixture: &str, assertion_ref: &str) -> Option<&FailureEntry> {
        self.find(&self.known, fixture, assertion_ref)
            .or_else(|| self.find(&self.pending, fixture, assertion_ref))
    }

    fn find<'a>(
        &self,
        entries: &'a [FailureEntry],
        fixture: &str,
        assertion_ref: &str,
    ) -> Option<&'a FailureEntry> {
        entries
            .iter()
            .find(|e| e.fixture == fixture && e.assertion == assertion_ref)
    }
}

/// Tallies over every compared position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Known and pending mismatches.
    pub expected_failures: usize,
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0 when there are no regressions, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }

    /// Add another fixture's tallies.
    pub fn merge(&mut self, other: &HarnessResult) {
        self.total += other.total;
        self.passed += other.passed;
        self.expected_failures += other.expected_failures;
        self.regressions += other.regressions;
    }
}
