use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rusty_absorbance::data::loader::load_file;
use rusty_absorbance::export::{write_csv, write_json};
use rusty_absorbance::{build_report, ComparisonSettings, Normalization, SampleSet};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "rusty-absorbance")]
#[command(about = "Pairwise similarity of absorbance spectra", long_about = None)]
struct Cli {
    /// Sample files (.json, .csv, .parquet), compared in argument order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Settings JSON file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lower wavelength bound (inclusive)
    #[arg(long)]
    range_min: Option<f64>,

    /// Upper wavelength bound (inclusive, capped at the instrument limit)
    #[arg(long)]
    range_max: Option<f64>,

    /// Normalization for distance metrics: none, area, minmax
    #[arg(short, long)]
    normalization: Option<Normalization>,

    /// Enable moving-average smoothing
    #[arg(long, default_value_t = false)]
    smooth: bool,

    /// Smoothing window in points (odd)
    #[arg(long)]
    window: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Result<ComparisonSettings> {
        let mut settings = match &self.config {
            Some(path) => ComparisonSettings::from_json_file(path)?,
            None => ComparisonSettings::default(),
        };
        if let Some(v) = self.range_min {
            settings.range_min = v;
        }
        if let Some(v) = self.range_max {
            settings.range_max = v;
        }
        if let Some(v) = self.normalization {
            settings.normalization = v;
        }
        if self.smooth {
            settings.smoothing = true;
        }
        if let Some(v) = self.window {
            settings.window = v;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    log::debug!("Settings: {settings:?}");

    let mut loaded = Vec::new();
    for path in &cli.files {
        loaded.extend(load_file(path).with_context(|| format!("reading {}", path.display()))?);
    }
    let samples = SampleSet::from_samples(loaded);

    let report = build_report(samples.as_slice(), &settings);
    if report.is_empty() && samples.len() > 1 {
        log::warn!("No sample pair overlaps inside the selected wavelength range");
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match cli.format {
        OutputFormat::Json => write_json(&report, out),
        OutputFormat::Csv => write_csv(&report, out),
    }
}
