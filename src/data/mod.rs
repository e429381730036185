/// Data layer: core types, loading, and range filtering.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Vec<Sample>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ SampleSet │  ordered samples, unique ids, display colours
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  wavelength window applied to aligned pairs
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
