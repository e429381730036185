//! Guarded arithmetic shared by the analysis stages.
//!
//! Every ratio in the pipeline goes through here so a zero denominator
//! yields a documented sentinel instead of NaN or infinity.

/// `num / den`, or `fallback` when `den` is exactly zero.
#[inline]
pub fn ratio_or(num: f64, den: f64, fallback: f64) -> f64 {
    if den == 0.0 {
        fallback
    } else {
        num / den
    }
}

/// `num / den`, or `0.0` when `den` is exactly zero.
#[inline]
pub fn ratio_or_zero(num: f64, den: f64) -> f64 {
    ratio_or(num, den, 0.0)
}

/// Arithmetic mean; `0.0` for an empty slice.
///
/// Summed as offsets from the first element, so a constant slice returns
/// that constant exactly.
pub fn mean(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    let offset: f64 = values.iter().map(|v| v - first).sum();
    first + offset / values.len() as f64
}
