use crate::data::model::{SpectralPoint, Spectrum};

/// Spacing of the shared synthetic wavelength grid.
pub const ALIGN_STEP: f64 = 0.5;

/// Both spectra sampled at one shared wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    pub x: f64,
    pub a: f64,
    pub b: f64,
}

/// Split aligned points into their two value series.
pub fn unzip_values(pairs: &[AlignedPair]) -> (Vec<f64>, Vec<f64>) {
    pairs.iter().map(|p| (p.a, p.b)).unzip()
}

/// Re-pair two value series positionally against the wavelengths of
/// `pairs`. Stops at the shortest input.
pub fn rezip_values(pairs: &[AlignedPair], a: &[f64], b: &[f64]) -> Vec<AlignedPair> {
    pairs
        .iter()
        .zip(a.iter().zip(b.iter()))
        .map(|(p, (&a, &b))| AlignedPair { x: p.x, a, b })
        .collect()
}

/// Resample two spectra onto a shared grid over their overlapping domain.
///
/// The grid runs from `max(min_a, min_b)` to `min(max_a, max_b)` in
/// [`ALIGN_STEP`] increments. Non-overlapping or empty spectra yield an
/// empty vector, which means "nothing to compare" rather than an error.
pub fn align(a: &Spectrum, b: &Spectrum) -> Vec<AlignedPair> {
    let (Some(a_min), Some(a_max), Some(b_min), Some(b_max)) = (
        a.min_wavelength(),
        a.max_wavelength(),
        b.min_wavelength(),
        b.max_wavelength(),
    ) else {
        return Vec::new();
    };

    let lo = a_min.max(b_min);
    let hi = a_max.min(b_max);
    if lo > hi {
        return Vec::new();
    }

    // Index-based stepping keeps the grid free of accumulated drift.
    let mut pairs = Vec::with_capacity(((hi - lo) / ALIGN_STEP) as usize + 1);
    let mut k = 0u32;
    loop {
        let x = lo + f64::from(k) * ALIGN_STEP;
        if x > hi {
            break;
        }
        pairs.push(AlignedPair {
            x,
            a: interpolate(a.points(), x),
            b: interpolate(b.points(), x),
        });
        k += 1;
    }
    pairs
}

/// Clamped linear interpolation of `points` at wavelength `w`.
///
/// Below the first point the first absorbance is returned, beyond the last
/// the last one; nothing is extrapolated. An empty slice gives `0.0`.
pub fn interpolate(points: &[SpectralPoint], w: f64) -> f64 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let idx = points.partition_point(|p| p.wavelength < w);
    if idx == 0 {
        return first.absorption;
    }
    if idx == points.len() {
        return last.absorption;
    }

    let hi = points[idx];
    if hi.wavelength == w {
        return hi.absorption;
    }
    let lo = points[idx - 1];
    let t = (w - lo.wavelength) / (hi.wavelength - lo.wavelength);
    lo.absorption + (hi.absorption - lo.absorption) * t
}
