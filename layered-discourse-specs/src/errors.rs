//! Error types for the fixture harness.
//!
//! This module defines error types for fixture parsing, fixture loading,
//! and running a fixture through the tagger.

use layered_discourse::TaggerError;
use thiserror::Error;

/// Errors that can occur while loading or running a fixture.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture file.
    #[error("parse error in sentence {sentence}: {message}")]
    Parse { sentence: usize, message: String },

    /// The fixture is not valid TOML or misses a required key.
    #[error("invalid fixture: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error loading a fixture file.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The tagger rejected the fixture's documents or configuration.
    #[error("tagger error: {0}")]
    Tagger(#[from] TaggerError),
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
