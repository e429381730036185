use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::normalize::Normalization;
use crate::data::filter::WavelengthRange;

// ---------------------------------------------------------------------------
// Comparison settings
// ---------------------------------------------------------------------------

/// Errors raised while loading or checking [`ComparisonSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("wavelength range bounds must be finite (got {min} to {max})")]
    NonFiniteRange { min: f64, max: f64 },

    #[error("smoothing window must be odd (got {0})")]
    EvenWindow(usize),

    #[error("reading settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything a report build depends on besides the samples.
///
/// A build is a pure function of this snapshot and the sample list, so two
/// equal snapshots over the same samples always give the same report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    /// Lower inclusive wavelength bound.
    pub range_min: f64,
    /// Upper inclusive wavelength bound, capped at `MAX_WAVELENGTH`.
    pub range_max: f64,
    pub normalization: Normalization,
    pub smoothing: bool,
    /// Moving-average width in points; only used when `smoothing` is on.
    pub window: usize,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            range_min: 200.0,
            range_max: 800.0,
            normalization: Normalization::None,
            smoothing: false,
            window: 5,
        }
    }
}

impl ComparisonSettings {
    pub fn new(
        range_min: f64,
        range_max: f64,
        normalization: Normalization,
        smoothing: bool,
        window: usize,
    ) -> Self {
        Self {
            range_min,
            range_max,
            normalization,
            smoothing,
            window,
        }
    }

    /// Read a JSON settings file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn range(&self) -> WavelengthRange {
        WavelengthRange::new(self.range_min, self.range_max)
    }

    /// Reject snapshots the pipeline cannot honour literally.
    ///
    /// An inverted range is accepted: it just compares nothing.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.range_min.is_finite() || !self.range_max.is_finite() {
            return Err(SettingsError::NonFiniteRange {
                min: self.range_min,
                max: self.range_max,
            });
        }
        if self.window > 1 && self.window % 2 == 0 {
            return Err(SettingsError::EvenWindow(self.window));
        }
        Ok(())
    }
}
