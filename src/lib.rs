pub mod analysis;
pub mod color;
pub mod data;
pub mod export;
pub mod settings;

pub use analysis::{build_report, ComparisonReport, Normalization, SimilarityResult};
pub use data::model::{Sample, SampleSet, SpectralPoint, Spectrum};
pub use settings::{ComparisonSettings, SettingsError};
