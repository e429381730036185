use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::report::ComparisonReport;

/// Write the whole report as pretty-printed JSON.
pub fn write_json<W: Write>(report: &ComparisonReport, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("serializing report")?;
    writeln!(out).context("writing report")?;
    out.flush().context("flushing report")?;
    Ok(())
}

/// One CSV line per scored pair.
#[derive(Serialize)]
struct CsvRow<'a> {
    sample_a: &'a str,
    sample_b: &'a str,
    pearson: f64,
    rmse: f64,
    euclidean: f64,
    cosine: f64,
    sid: f64,
    verdict: String,
}

/// Write the pair results as CSV with a header row.
pub fn write_csv<W: Write>(report: &ComparisonReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for r in &report.results {
        writer
            .serialize(CsvRow {
                sample_a: &r.sample_a,
                sample_b: &r.sample_b,
                pearson: r.pearson,
                rmse: r.rmse,
                euclidean: r.euclidean,
                cosine: r.cosine,
                sid: r.sid,
                verdict: r.verdict().to_string(),
            })
            .with_context(|| format!("writing row {} / {}", r.sample_a, r.sample_b))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::report::SimilarityResult;

    fn report() -> ComparisonReport {
        ComparisonReport {
            samples: Vec::new(),
            results: vec![SimilarityResult {
                sample_a: "a".into(),
                sample_b: "b".into(),
                pearson: 0.5,
                rmse: 0.25,
                euclidean: 1.0,
                cosine: 0.75,
                sid: 0.0,
            }],
        }
    }

    #[test]
    fn csv_has_header_and_verdict() {
        let mut buf = Vec::new();
        write_csv(&report(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sample_a,sample_b,pearson,rmse,euclidean,cosine,sid,verdict")
        );
        assert_eq!(lines.next(), Some("a,b,0.5,0.25,1.0,0.75,0.0,chemically identical"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_round_trips() {
        let mut buf = Vec::new();
        write_json(&report(), &mut buf).unwrap();
        let back: ComparisonReport = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, report());
    }
}
