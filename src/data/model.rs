use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{generate_palette, DisplayColor};

// ---------------------------------------------------------------------------
// SpectralPoint / Spectrum
// ---------------------------------------------------------------------------

/// One measurement: absorbance at a wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralPoint {
    pub wavelength: f64,
    pub absorption: f64,
}

impl SpectralPoint {
    pub fn new(wavelength: f64, absorption: f64) -> Self {
        Self {
            wavelength,
            absorption,
        }
    }
}

/// An absorbance curve ordered by wavelength.
///
/// Ordering (non-decreasing, no duplicate wavelengths) is the caller's
/// contract; nothing here re-sorts or re-checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Spectrum {
    points: Vec<SpectralPoint>,
}

impl Spectrum {
    pub fn new(points: Vec<SpectralPoint>) -> Self {
        Self { points }
    }

    /// Zip parallel wavelength / absorbance slices. Extra trailing values on
    /// the longer side are ignored.
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        Self::new(
            x.iter()
                .zip(y.iter())
                .map(|(&w, &a)| SpectralPoint::new(w, a))
                .collect(),
        )
    }

    pub fn points(&self) -> &[SpectralPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest wavelength, i.e. the first point.
    pub fn min_wavelength(&self) -> Option<f64> {
        self.points.first().map(|p| p.wavelength)
    }

    /// Highest wavelength, i.e. the last point.
    pub fn max_wavelength(&self) -> Option<f64> {
        self.points.last().map(|p| p.wavelength)
    }
}

// ---------------------------------------------------------------------------
// Sample
// ---------------------------------------------------------------------------

/// A named, coloured spectrum. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    id: String,
    name: String,
    spectrum: Spectrum,
    color: DisplayColor,
}

impl Sample {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        spectrum: Spectrum,
        color: DisplayColor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            spectrum,
            color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn color(&self) -> DisplayColor {
        self.color
    }

    /// Same sample with a different display colour.
    pub fn with_color(self, color: DisplayColor) -> Self {
        Self { color, ..self }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} points)", self.name, self.spectrum.len())
    }
}

// ---------------------------------------------------------------------------
// SampleSet – the working set handed to the report builder
// ---------------------------------------------------------------------------

/// Ordered collection of samples with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from loaded samples, colouring them evenly across the
    /// palette. Later duplicates of an id are dropped.
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut set = Self::new();
        for sample in samples {
            set.insert(sample);
        }
        set.recolor();
        set
    }

    /// Append a sample and re-spread the palette so it gets a colour of
    /// its own. Returns `false` (and keeps the set unchanged) when the id
    /// is already taken.
    pub fn push(&mut self, sample: Sample) -> bool {
        if !self.insert(sample) {
            return false;
        }
        self.recolor();
        true
    }

    fn insert(&mut self, sample: Sample) -> bool {
        if self.get(sample.id()).is_some() {
            log::warn!("Duplicate sample id '{}' ignored", sample.id());
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Remove a sample wholesale; the rest keep their order.
    pub fn remove(&mut self, id: &str) -> Option<Sample> {
        let idx = self.samples.iter().position(|s| s.id() == id)?;
        Some(self.samples.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id() == id)
    }

    /// Re-spread the palette over the current members.
    pub fn recolor(&mut self) {
        let palette = generate_palette(self.samples.len());
        let samples = std::mem::take(&mut self.samples);
        self.samples = samples
            .into_iter()
            .zip(palette)
            .map(|(s, c)| s.with_color(c))
            .collect();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
