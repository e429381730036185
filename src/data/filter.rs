use serde::{Deserialize, Serialize};

use crate::analysis::align::AlignedPair;

/// Upper wavelength limit of the instrument; ranges are capped here.
pub const MAX_WAVELENGTH: f64 = 1100.0;

// ---------------------------------------------------------------------------
// Wavelength range predicate
// ---------------------------------------------------------------------------

/// Inclusive wavelength window applied to aligned points.
///
/// The upper bound is always capped at [`MAX_WAVELENGTH`]. A range whose
/// minimum exceeds its maximum is valid and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthRange {
    pub min: f64,
    pub max: f64,
}

impl WavelengthRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Effective upper bound after the instrument cap.
    pub fn upper(&self) -> f64 {
        self.max.min(MAX_WAVELENGTH)
    }

    pub fn contains(&self, wavelength: f64) -> bool {
        wavelength >= self.min && wavelength <= self.upper()
    }

    /// Keep the aligned points whose wavelength falls inside the range.
    pub fn filter(&self, pairs: Vec<AlignedPair>) -> Vec<AlignedPair> {
        pairs
            .into_iter()
            .filter(|p| self.contains(p.x))
            .collect()
    }
}
