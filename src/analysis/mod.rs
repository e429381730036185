/// Numeric core: alignment, smoothing, normalization, metrics, reports.
///
/// Pipeline per sample pair:
/// ```text
///   Spectrum A ─┐
///               ├─ align ─ range filter ─ [smooth] ─ metrics ─ SimilarityResult
///   Spectrum B ─┘                                      │
///                                                  normalize (per metric)
/// ```
///
/// Nothing in here fails: degenerate input maps to documented sentinel
/// values (see [`guard`]).

pub mod align;
pub mod guard;
pub mod metrics;
pub mod normalize;
pub mod report;
pub mod smooth;

pub use align::{align, AlignedPair};
pub use metrics::{cosine, euclidean, pearson, rmse, sid, SidVerdict};
pub use normalize::{normalize, Normalization};
pub use report::{build_report, ComparisonReport, SimilarityResult};
pub use smooth::smooth;
