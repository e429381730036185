use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeListArray, ListArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Sample, SpectralPoint, Spectrum};
use crate::color::DisplayColor;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load samples from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – `x` and `y` list columns, optional `id` / `name`
/// * `.json`    – `[{ "id": "...", "name": "...", "x": [...], "y": [...] }, ...]`
/// * `.csv`     – columns `x` and `y` containing semicolon-separated floats,
///   optional `id` / `name`
///
/// Samples come back in file order with wavelength-sorted spectra and the
/// default display colour; [`super::model::SampleSet`] assigns real ones.
pub fn load_file(path: &Path) -> Result<Vec<Sample>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sample")
        .to_string();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let samples = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| row.into_sample(&stem, i))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Format-independent row
// ---------------------------------------------------------------------------

/// One parsed record before validation.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl RawRow {
    fn into_sample(self, stem: &str, row: usize) -> Result<Sample> {
        if self.x.len() != self.y.len() {
            bail!(
                "Row {row}: x has {} values but y has {}",
                self.x.len(),
                self.y.len()
            );
        }
        if let Some(j) = self
            .x
            .iter()
            .zip(&self.y)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            bail!("Row {row}: non-finite value at index {j}");
        }

        let id = self
            .id
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{stem}#{row}"));
        let name = self.name.filter(|s| !s.is_empty()).unwrap_or_else(|| id.clone());

        Ok(Sample::new(
            id,
            name,
            sorted_spectrum(&self.x, &self.y),
            DisplayColor::default(),
        ))
    }
}

/// Instruments often scan high-to-low; the analysis expects ascending.
fn sorted_spectrum(x: &[f64], y: &[f64]) -> Spectrum {
    let mut points: Vec<SpectralPoint> = x
        .iter()
        .zip(y)
        .map(|(&w, &a)| SpectralPoint::new(w, a))
        .collect();
    points.sort_by(|a, b| a.wavelength.total_cmp(&b.wavelength));
    if points.windows(2).any(|w| w[0].wavelength == w[1].wavelength) {
        log::warn!("Spectrum contains duplicate wavelengths");
    }
    Spectrum::new(points)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "id": "tap-01",
///     "name": "Tap water, kitchen",
///     "x": [200.0, 200.8, ...],
///     "y": [0.12,  0.14,  ...]
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names.
/// `x` and `y` columns contain semicolon-separated floats:
///   `"200.0;200.5;201.0"`, `"0.12;0.14;0.11"`
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let x_idx = column("x").context("CSV missing 'x' column")?;
    let y_idx = column("y").context("CSV missing 'y' column")?;
    let id_idx = column("id");
    let name_idx = column("name");

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let text = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);

        rows.push(RawRow {
            id: text(id_idx),
            name: text(name_idx),
            x: parse_semicolon_floats(record.get(x_idx).unwrap_or(""), row_no, "x")?,
            y: parse_semicolon_floats(record.get(y_idx).unwrap_or(""), row_no, "y")?,
        });
    }
    Ok(rows)
}

fn parse_semicolon_floats(s: &str, row: usize, col: &str) -> Result<Vec<f64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .enumerate()
        .map(|(j, tok)| {
            tok.trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row}, {col}[{j}]: '{tok}' is not a number"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one sample per row.
///
/// Expected schema:
/// - `x`: List<Float64> or LargeList<Float64> – wavelength arrays
/// - `y`: List<Float64> or LargeList<Float64> – absorbance arrays
/// - `id`, `name` (optional): string or integer columns
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;
        let id_col = schema.index_of("id").ok().map(|i| batch.column(i));
        let name_col = schema.index_of("name").ok().map(|i| batch.column(i));

        let x_col = batch.column(x_idx);
        let y_col = batch.column(y_idx);

        for row in 0..batch.num_rows() {
            let at = rows.len();
            rows.push(RawRow {
                id: id_col.and_then(|c| extract_label(c, row)),
                name: name_col.and_then(|c| extract_label(c, row)),
                x: extract_f64_list(x_col, row)
                    .with_context(|| format!("Row {at}: failed to read 'x'"))?,
                y: extract_f64_list(y_col, row)
                    .with_context(|| format!("Row {at}: failed to read 'y'"))?,
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Extract a `Vec<f64>` from a List or LargeList column at the given row.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }

    let values_array = match col.data_type() {
        DataType::List(_) => col
            .as_any()
            .downcast_ref::<ListArray>()
            .context("expected ListArray")?
            .value(row),
        DataType::LargeList(_) => col
            .as_any()
            .downcast_ref::<LargeListArray>()
            .context("expected LargeListArray")?
            .value(row),
        other => bail!("Expected List or LargeList column, got {other:?}"),
    };

    // Nulls inside a list become NaN and are rejected later.
    if let Some(f64_arr) = values_array.as_any().downcast_ref::<Float64Array>() {
        Ok(f64_arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    } else if let Some(f32_arr) = values_array.as_any().downcast_ref::<Float32Array>() {
        Ok(f32_arr.iter().map(|v| v.map_or(f64::NAN, f64::from)).collect())
    } else {
        bail!(
            "List inner type is {:?}, expected Float64 or Float32",
            values_array.data_type()
        )
    }
}

/// Read an `id`/`name` cell as text. Unsupported types and nulls give `None`.
fn extract_label(col: &Arc<dyn Array>, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        other => {
            log::warn!("Ignoring label column of type {other:?}");
            None
        }
    }
}
