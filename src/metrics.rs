//! Per-phenomenon agreement between reference and hypothesis tags.
//!
//! Each hypothesis token is matched to the k-th occurrence of the same
//! normalized word in the reference sentence, where k counts earlier
//! occurrences in the hypothesis. A tag matches when both matched tokens
//! carry it.

use std::collections::{BTreeMap, HashMap};

use crate::{normalize, Phenomenon, Tagging, TaggerError, TaggerResult};

/// Precision, recall and F1 per phenomenon.
///
/// Phenomena absent from both sides have no entry; the accessors report 0.0
/// for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMetrics {
    pub precision: BTreeMap<Phenomenon, f64>,
    pub recall: BTreeMap<Phenomenon, f64>,
    pub f1: BTreeMap<Phenomenon, f64>,
}

impl TagMetrics {
    pub fn precision(&self, phenomenon: Phenomenon) -> f64 {
        self.precision.get(&phenomenon).copied().unwrap_or(0.0)
    }

    pub fn recall(&self, phenomenon: Phenomenon) -> f64 {
        self.recall.get(&phenomenon).copied().unwrap_or(0.0)
    }

    pub fn f1(&self, phenomenon: Phenomenon) -> f64 {
        self.f1.get(&phenomenon).copied().unwrap_or(0.0)
    }
}

#[derive(Default)]
struct Counts {
    matches: usize,
    reference_total: usize,
    hypothesis_total: usize,
}

/// Compare tagged reference translations with tagged hypotheses.
///
/// Both inputs are document-major lists of tagged sentences; documents are
/// flattened and sentences are compared in order.
pub fn compute_metrics(
    reference: &[Vec<Vec<Tagging>>],
    hypothesis: &[Vec<Vec<Tagging>>],
) -> TaggerResult<TagMetrics> {
    let reference: Vec<&Vec<Tagging>> = reference.iter().flatten().collect();
    let hypothesis: Vec<&Vec<Tagging>> = hypothesis.iter().flatten().collect();
    TaggerError::check_lengths(
        "reference sentences",
        reference.len(),
        "hypothesis sentences",
        hypothesis.len(),
    )?;

    let mut counts: BTreeMap<Phenomenon, Counts> = BTreeMap::new();

    for (ref_sent, hyp_sent) in reference.into_iter().zip(hypothesis) {
        let mut ref_positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, tagging) in ref_sent.iter().enumerate() {
            ref_positions
                .entry(normalize(&tagging.token))
                .or_default()
                .push(idx);
            for tag in &tagging.tags {
                counts.entry(*tag).or_default().reference_total += 1;
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for tagging in hyp_sent {
            let word = normalize(&tagging.token);
            for tag in &tagging.tags {
                counts.entry(*tag).or_default().hypothesis_total += 1;
            }

            let occurrence = seen.entry(word.clone()).or_insert(0);
            let matched = ref_positions
                .get(&word)
                .and_then(|positions| positions.get(*occurrence))
                .map(|&idx| &ref_sent[idx]);
            *occurrence += 1;

            let Some(matched) = matched else {
                continue;
            };
            for tag in &tagging.tags {
                if matched.tags.contains(tag) {
                    counts.entry(*tag).or_default().matches += 1;
                }
            }
        }
    }

    let mut metrics = TagMetrics::default();
    for (phenomenon, c) in counts {
        let precision = ratio(c.matches, c.hypothesis_total);
        let recall = ratio(c.matches, c.reference_total);
        if c.hypothesis_total > 0 {
            metrics.precision.insert(phenomenon, precision);
        }
        if c.reference_total > 0 {
            metrics.recall.insert(phenomenon, recall);
        }
        let f1 = 2.0 * precision * recall / (precision + recall).max(1e-20);
        metrics.f1.insert(phenomenon, f1);
    }
    Ok(metrics)
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
