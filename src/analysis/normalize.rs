use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Intensity rescaling applied before a metric compares two series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Raw values.
    #[default]
    None,
    /// Divide by the L1 norm so absolute values sum to one.
    Area,
    /// Linear stretch into `[0, 1]`.
    MinMax,
}

impl Normalization {
    pub fn name(&self) -> &'static str {
        match self {
            Normalization::None => "none",
            Normalization::Area => "area",
            Normalization::MinMax => "minmax",
        }
    }

    /// Policy the distance metrics (RMSE, Euclidean) actually run under:
    /// raw data is compared on the area-normalized scale instead.
    pub fn for_distance(self) -> Self {
        match self {
            Normalization::None => Normalization::Area,
            other => other,
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(Normalization::None),
            "area" => Ok(Normalization::Area),
            "minmax" | "min-max" => Ok(Normalization::MinMax),
            other => Err(format!(
                "unknown normalization '{other}' (expected none, area or minmax)"
            )),
        }
    }
}

/// Rescale `values` under `policy`.
///
/// * `Area` leaves an all-zero signal untouched.
/// * `MinMax` maps a constant signal to all zeros.
pub fn normalize(values: &[f64], policy: Normalization) -> Vec<f64> {
    match policy {
        Normalization::None => values.to_vec(),
        Normalization::Area => {
            let total: f64 = values.iter().map(|v| v.abs()).sum();
            if total == 0.0 {
                return values.to_vec();
            }
            values.iter().map(|v| v / total).collect()
        }
        Normalization::MinMax => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if range == 0.0 {
                return vec![0.0; values.len()];
            }
            values.iter().map(|v| (v - min) / range).collect()
        }
    }
}
