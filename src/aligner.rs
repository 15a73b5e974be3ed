//! Batch word-aligner adapter.
//!
//! The aligner runs once over the whole corpus before any document is tagged.
//! [`AwesomeAlign`] drives an external `awesome-align` style executable through
//! temporary files; tests and embedders can provide their own [`Aligner`].

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::alignment::{aligner_record, parse_alignment_output, reconcile_alignments};
use crate::{Alignment, Diagnostics, ExpandedSentence, TaggerError, TaggerResult};

/// Produces raw alignment records for parallel sentences.
///
/// Implementations return whatever the underlying tool emitted; the record
/// count is checked by [`align_corpus`].
pub trait Aligner {
    fn align(
        &self,
        sources: &[ExpandedSentence],
        targets: &[ExpandedSentence],
    ) -> TaggerResult<Vec<Alignment>>;
}

/// Align a whole corpus and reconcile the record count.
pub fn align_corpus(
    aligner: &dyn Aligner,
    sources: &[ExpandedSentence],
    targets: &[ExpandedSentence],
    diagnostics: &mut Diagnostics,
) -> TaggerResult<Vec<Alignment>> {
    TaggerError::check_lengths("source sentences", sources.len(), "target sentences", targets.len())?;
    let alignments = aligner.align(sources, targets)?;
    reconcile_alignments(alignments, sources.len(), diagnostics)
}

/// Settings for the external aligner executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwesomeAlignConfig {
    pub program: String,
    pub model: String,
    pub cache_dir: Option<PathBuf>,
    pub batch_size: usize,
    pub extraction: String,
}

impl Default for AwesomeAlignConfig {
    fn default() -> Self {
        Self {
            program: "awesome-align".into(),
            model: "bert-base-multilingual-cased".into(),
            cache_dir: None,
            batch_size: 32,
            extraction: "softmax".into(),
        }
    }
}

/// Subprocess aligner speaking the `src ||| tgt` / `i-j` file protocol.
#[derive(Debug, Clone, Default)]
pub struct AwesomeAlign {
    config: AwesomeAlignConfig,
}

impl AwesomeAlign {
    pub fn new(config: AwesomeAlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AwesomeAlignConfig {
        &self.config
    }

    fn command(&self, data_file: &std::path::Path, output_file: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.arg("--output_file")
            .arg(output_file)
            .arg("--model_name_or_path")
            .arg(&self.config.model)
            .arg("--data_file")
            .arg(data_file)
            .arg("--extraction")
            .arg(&self.config.extraction)
            .arg("--batch_size")
            .arg(self.config.batch_size.to_string());
        if let Some(cache_dir) = &self.config.cache_dir {
            cmd.arg("--cache_dir").arg(cache_dir);
        }
        cmd
    }
}

impl Aligner for AwesomeAlign {
    fn align(
        &self,
        sources: &[ExpandedSentence],
        targets: &[ExpandedSentence],
    ) -> TaggerResult<Vec<Alignment>> {
        let mut data = tempfile::NamedTempFile::new()?;
        for (src, tgt) in sources.iter().zip(targets) {
            writeln!(data, "{}", aligner_record(src, tgt))?;
        }
        data.flush()?;

        let output = tempfile::NamedTempFile::new()?;
        log::debug!(
            "running {} over {} sentence pairs",
            self.config.program,
            sources.len()
        );
        let status = self
            .command(data.path(), output.path())
            .status()
            .map_err(|e| TaggerError::Aligner(format!("failed to spawn {}: {}", self.config.program, e)))?;
        if !status.success() {
            return Err(TaggerError::Aligner(format!(
                "{} exited with {}",
                self.config.program, status
            )));
        }

        let text = fs::read_to_string(output.path())?;
        parse_alignment_output(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Token;

    struct FixedAligner(Vec<Alignment>);

    impl Aligner for FixedAligner {
        fn align(
            &self,
            _sources: &[ExpandedSentence],
            _targets: &[ExpandedSentence],
        ) -> TaggerResult<Vec<Alignment>> {
            Ok(self.0.clone())
        }
    }

    fn sentences(n: usize) -> Vec<ExpandedSentence> {
        (0..n)
            .map(|_| ExpandedSentence::new(vec![Token::new("x")]))
            .collect()
    }

    #[test]
    fn align_corpus_corrects_trailing_duplicate() {
        let aligner = FixedAligner(vec![Alignment::parse("0-0").unwrap(); 3]);
        let mut diag = Diagnostics::new();
        let out = align_corpus(&aligner, &sentences(2), &sentences(2), &mut diag).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(diag.trailing_alignments_dropped(), 1);
    }

    #[test]
    fn align_corpus_checks_parallel_inputs() {
        let aligner = FixedAligner(Vec::new());
        let mut diag = Diagnostics::new();
        let err = align_corpus(&aligner, &sentences(2), &sentences(1), &mut diag).unwrap_err();
        assert!(matches!(err, TaggerError::LengthMismatch { .. }));
    }

    #[test]
    fn missing_program_is_an_aligner_error() {
        let aligner = AwesomeAlign::new(AwesomeAlignConfig {
            program: "definitely-not-an-installed-aligner".into(),
            ..AwesomeAlignConfig::default()
        });
        let err = aligner.align(&sentences(1), &sentences(1)).unwrap_err();
        assert!(matches!(err, TaggerError::Aligner(_)));
    }

    #[test]
    fn command_includes_cache_dir_only_when_set() {
        let aligner = AwesomeAlign::default();
        let cmd = aligner.command(std::path::Path::new("in.txt"), std::path::Path::new("out.txt"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert!(args.contains(&"bert-base-multilingual-cased".to_string()));
        assert!(!args.contains(&"--cache_dir".to_string()));

        let aligner = AwesomeAlign::new(AwesomeAlignConfig {
            cache_dir: Some(PathBuf::from("/tmp/align-cache")),
            ..AwesomeAlignConfig::default()
        });
        let cmd = aligner.command(std::path::Path::new("in.txt"), std::path::Path::new("out.txt"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert!(args.contains(&"--cache_dir".to_string()));
    }
}
