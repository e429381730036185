use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Absorbance on `wavelengths`: Gaussian bands over an exponential
/// scattering baseline, plus noise.
fn generate_absorbance(
    wavelengths: &[f64],
    bands: &[(f64, f64, f64)],
    baseline: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&wl| {
            let signal: f64 = bands
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
                .sum();
            let scatter = baseline * (-(wl - 200.0) / 60.0).exp();
            (signal + scatter + rng.gauss(0.0, noise_level)).max(0.0)
        })
        .collect()
}

/// Instrument-like grid: jittered start, uneven steps.
fn jittered_grid(start: f64, end: f64, mean_step: f64, rng: &mut SimpleRng) -> Vec<f64> {
    let mut grid = Vec::new();
    let mut wl = start + rng.next_f64() * mean_step;
    while wl <= end {
        grid.push(wl);
        wl += mean_step * (0.6 + 0.8 * rng.next_f64());
    }
    grid
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

#[derive(Serialize)]
struct Record {
    id: String,
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
}

fn append_lists(rows: &[&Vec<f64>]) -> arrow::array::ListArray {
    let mut builder = ListBuilder::new(Float64Builder::new());
    for row in rows {
        builder.values().append_slice(row);
        builder.append(true);
    }
    builder.finish()
}

fn write_parquet(records: &[Record], output_path: &str) -> Result<()> {
    let x_array = append_lists(&records.iter().map(|r| &r.x).collect::<Vec<_>>());
    let y_array = append_lists(&records.iter().map(|r| &r.y).collect::<Vec<_>>());
    let id_array = StringArray::from(records.iter().map(|r| r.id.as_str()).collect::<Vec<_>>());
    let name_array =
        StringArray::from(records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());

    let item = || Arc::new(Field::new("item", DataType::Float64, true));
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("x", DataType::List(item()), false),
        Field::new("y", DataType::List(item()), false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(id_array),
            Arc::new(name_array),
            Arc::new(x_array),
            Arc::new(y_array),
        ],
    )
    .context("creating record batch")?;

    let file = std::fs::File::create(output_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (id, name, bands (centre nm, width nm, amplitude), scatter baseline)
    let water_samples: Vec<(&str, &str, Vec<(f64, f64, f64)>, f64)> = vec![
        ("tap-01", "Tap water, kitchen", vec![(220.0, 8.0, 0.35), (254.0, 25.0, 0.05)], 0.10),
        ("tap-02", "Tap water, kitchen (repeat)", vec![(220.0, 8.0, 0.35), (254.0, 25.0, 0.05)], 0.10),
        ("river-01", "River, upstream", vec![(220.0, 8.0, 0.20), (254.0, 30.0, 0.40)], 0.25),
        ("well-01", "Well, farm", vec![(220.0, 8.0, 0.90), (300.0, 20.0, 0.08)], 0.05),
    ];

    let records: Vec<Record> = water_samples
        .iter()
        .map(|(id, name, bands, baseline)| {
            let x = jittered_grid(195.0, 400.0, 1.0, &mut rng);
            let y = generate_absorbance(&x, bands, *baseline, 0.002, &mut rng);
            Record {
                id: id.to_string(),
                name: name.to_string(),
                x,
                y,
            }
        })
        .collect();

    let json_path = "sample_data.json";
    let json = serde_json::to_string_pretty(&records).context("serializing samples")?;
    std::fs::write(json_path, json).context("writing JSON output")?;

    let parquet_path = "sample_data.parquet";
    write_parquet(&records, parquet_path)?;

    println!(
        "Wrote {} samples to {json_path} and {parquet_path}",
        records.len()
    );
    Ok(())
}
