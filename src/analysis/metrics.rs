//! Pairwise similarity and divergence metrics over aligned spectra.
//!
//! Each metric picks its own normalization:
//!
//! | Metric    | Runs on                                        |
//! |-----------|------------------------------------------------|
//! | Pearson   | raw values                                     |
//! | Cosine    | raw values                                     |
//! | RMSE      | caller's policy, `none` replaced by `area`     |
//! | Euclidean | caller's policy, `none` replaced by `area`     |
//! | SID       | epsilon-floored values, always `area`          |

use std::fmt;

use serde::{Deserialize, Serialize};

use super::align::{unzip_values, AlignedPair};
use super::guard::{mean, ratio_or_zero};
use super::normalize::{normalize, Normalization};

/// Floor applied to every value before SID treats it as a probability.
pub const SID_EPSILON: f64 = 1e-10;

/// SID below this reads as chemically identical.
pub const SID_IDENTICAL: f64 = 1e-5;

/// SID below this reads as very similar.
pub const SID_VERY_SIMILAR: f64 = 1e-3;

/// Pearson product-moment correlation of the raw values.
///
/// `0.0` for fewer than two points or when either series is flat.
pub fn pearson(pairs: &[AlignedPair]) -> f64 {
    if pairs.len() < 2 {
        return 0.0;
    }
    let (a, b) = unzip_values(pairs);
    let mean_a = mean(&a);
    let mean_b = mean(&b);

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(&b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    ratio_or_zero(cov, (var_a * var_b).sqrt())
}

/// Cosine of the angle between the raw value vectors; `0.0` when either
/// vector has zero magnitude.
pub fn cosine(pairs: &[AlignedPair]) -> f64 {
    let (mut dot, mut norm_a, mut norm_b) = (0.0, 0.0, 0.0);
    for p in pairs {
        dot += p.a * p.b;
        norm_a += p.a * p.a;
        norm_b += p.b * p.b;
    }
    ratio_or_zero(dot, norm_a.sqrt() * norm_b.sqrt())
}

/// Root-mean-square difference after normalization.
pub fn rmse(pairs: &[AlignedPair], policy: Normalization) -> f64 {
    let sq = squared_differences(pairs, policy.for_distance());
    ratio_or_zero(sq, pairs.len() as f64).sqrt()
}

/// Euclidean distance after normalization.
pub fn euclidean(pairs: &[AlignedPair], policy: Normalization) -> f64 {
    squared_differences(pairs, policy.for_distance()).sqrt()
}

/// Spectral Information Divergence.
///
/// Both series are floored at [`SID_EPSILON`], area-normalized into
/// probability vectors `p`, `q`, and scored as
/// `Σ (p_i - q_i)(ln p_i - ln q_i)`. Reported as computed, so rounding can
/// leave a tiny negative value for near-identical inputs.
pub fn sid(pairs: &[AlignedPair]) -> f64 {
    let (a, b) = unzip_values(pairs);
    let p = normalize(&floor_at_epsilon(&a), Normalization::Area);
    let q = normalize(&floor_at_epsilon(&b), Normalization::Area);
    p.iter()
        .zip(&q)
        .map(|(p, q)| (p - q) * (p.ln() - q.ln()))
        .sum()
}

fn squared_differences(pairs: &[AlignedPair], policy: Normalization) -> f64 {
    let (a, b) = unzip_values(pairs);
    let a = normalize(&a, policy);
    let b = normalize(&b, policy);
    a.iter().zip(&b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn floor_at_epsilon(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.max(SID_EPSILON)).collect()
}

// ---------------------------------------------------------------------------
// Verdict – presentation reading of a SID score
// ---------------------------------------------------------------------------

/// Qualitative reading of a SID value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidVerdict {
    Identical,
    VerySimilar,
    Different,
}

impl SidVerdict {
    pub fn classify(sid: f64) -> Self {
        if sid < SID_IDENTICAL {
            SidVerdict::Identical
        } else if sid < SID_VERY_SIMILAR {
            SidVerdict::VerySimilar
        } else {
            SidVerdict::Different
        }
    }
}

impl fmt::Display for SidVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SidVerdict::Identical => "chemically identical",
            SidVerdict::VerySimilar => "very similar",
            SidVerdict::Different => "different",
        };
        f.write_str(label)
    }
}
