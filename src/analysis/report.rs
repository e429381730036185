use serde::{Deserialize, Serialize};

use super::align::{align, rezip_values, unzip_values, AlignedPair};
use super::metrics::{cosine, euclidean, pearson, rmse, sid, SidVerdict};
use super::smooth::smooth;
use crate::data::model::Sample;
use crate::settings::ComparisonSettings;

/// All five scores for one unordered sample pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub sample_a: String,
    pub sample_b: String,
    pub pearson: f64,
    pub rmse: f64,
    pub euclidean: f64,
    pub cosine: f64,
    pub sid: f64,
}

impl SimilarityResult {
    pub fn verdict(&self) -> SidVerdict {
        SidVerdict::classify(self.sid)
    }

    fn involves(&self, a: &str, b: &str) -> bool {
        (self.sample_a == a && self.sample_b == b) || (self.sample_a == b && self.sample_b == a)
    }
}

/// Samples compared plus one result per comparable pair, in pair order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub samples: Vec<Sample>,
    pub results: Vec<SimilarityResult>,
}

impl ComparisonReport {
    /// Result for a pair, looked up in either order.
    pub fn result_for(&self, a: &str, b: &str) -> Option<&SimilarityResult> {
        self.results.iter().find(|r| r.involves(a, b))
    }

    /// `true` when no pair produced a result.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Compare every unordered pair `(i, j)`, `i < j`, in input order.
///
/// Pairs whose overlap is empty after the wavelength range filter are
/// skipped and produce no result.
pub fn build_report(samples: &[Sample], settings: &ComparisonSettings) -> ComparisonReport {
    let range = settings.range();
    let mut results = Vec::new();

    for (i, first) in samples.iter().enumerate() {
        for second in &samples[i + 1..] {
            let pairs = range.filter(align(first.spectrum(), second.spectrum()));
            if pairs.is_empty() {
                log::debug!(
                    "Skipping {} / {}: no overlap inside {:.1}-{:.1}",
                    first.id(),
                    second.id(),
                    range.min,
                    range.upper()
                );
                continue;
            }

            let pairs = if settings.smoothing {
                smooth_pairs(&pairs, settings.window)
            } else {
                pairs
            };

            results.push(score_pair(first.id(), second.id(), &pairs, settings));
        }
    }

    log::info!(
        "Compared {} samples: {} of {} pairs scored",
        samples.len(),
        results.len(),
        samples.len() * samples.len().saturating_sub(1) / 2
    );

    ComparisonReport {
        samples: samples.to_vec(),
        results,
    }
}

fn smooth_pairs(pairs: &[AlignedPair], window: usize) -> Vec<AlignedPair> {
    let (a, b) = unzip_values(pairs);
    rezip_values(pairs, &smooth(&a, window), &smooth(&b, window))
}

fn score_pair(
    a: &str,
    b: &str,
    pairs: &[AlignedPair],
    settings: &ComparisonSettings,
) -> SimilarityResult {
    SimilarityResult {
        sample_a: a.to_string(),
        sample_b: b.to_string(),
        pearson: pearson(pairs),
        rmse: rmse(pairs, settings.normalization),
        euclidean: euclidean(pairs, settings.normalization),
        cosine: cosine(pairs),
        sid: sid(pairs),
    }
}
