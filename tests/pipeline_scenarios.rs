//! End-to-end comparisons driven through the public API.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use rusty_absorbance::analysis::{align, metrics::SidVerdict};
use rusty_absorbance::color::DisplayColor;
use rusty_absorbance::{
    build_report, ComparisonSettings, Normalization, Sample, SampleSet, Spectrum,
};

fn sample(id: &str, points: &[(f64, f64)]) -> Sample {
    let (x, y): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    Sample::new(id, id, Spectrum::from_xy(&x, &y), DisplayColor::default())
}

fn wide_range() -> ComparisonSettings {
    ComparisonSettings {
        range_min: 0.0,
        range_max: 1000.0,
        ..ComparisonSettings::default()
    }
}

#[test]
fn identical_samples_score_as_identical() {
    let pts = [(200.0, 0.10), (210.0, 0.30), (220.0, 0.20)];
    let a = sample("A", &pts);
    let b = sample("B", &pts);

    let pairs = align(a.spectrum(), b.spectrum());
    assert_eq!(pairs.first().map(|p| p.x), Some(200.0));
    assert_eq!(pairs.last().map(|p| p.x), Some(220.0));
    assert!(pairs.iter().all(|p| p.a == p.b));

    let report = build_report(&[a, b], &wide_range());
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_relative_eq!(r.pearson, 1.0, epsilon = 1e-12);
    assert_relative_eq!(r.cosine, 1.0, epsilon = 1e-12);
    assert_eq!(r.rmse, 0.0);
    assert_eq!(r.euclidean, 0.0);
    assert_abs_diff_eq!(r.sid, 0.0, epsilon = 1e-12);
    assert_eq!(r.verdict(), SidVerdict::Identical);
}

#[test]
fn shared_grid_reproduces_measured_values() {
    let a = sample("A", &[(200.0, 0.10), (210.0, 0.30), (220.0, 0.20)]);
    let b = sample("B", &[(200.0, 0.50), (210.0, 0.70), (220.0, 0.40)]);
    let pairs = align(a.spectrum(), b.spectrum());
    for (w, ya, yb) in [(200.0, 0.10, 0.50), (210.0, 0.30, 0.70), (220.0, 0.20, 0.40)] {
        let p = pairs.iter().find(|p| p.x == w).expect("grid point present");
        assert_eq!((p.a, p.b), (ya, yb));
    }
}

#[test]
fn opposite_ramps_are_anticorrelated() {
    let a = sample("A", &[(200.0, 0.0), (300.0, 1.0)]);
    let b = sample("B", &[(200.0, 1.0), (300.0, 0.0)]);
    let report = build_report(&[a, b], &wide_range());
    let r = &report.results[0];

    assert_relative_eq!(r.pearson, -1.0, epsilon = 1e-9);
    // Both ramps are non-negative, so the raw dot product stays positive.
    assert!(r.cosine > 0.0 && r.cosine < 1.0);
    assert_relative_eq!(r.cosine, 0.496_259_351_620_947_5, epsilon = 1e-9);
    assert_eq!(r.verdict(), SidVerdict::Different);
}

#[test]
fn disjoint_samples_produce_no_result() {
    let a = sample("A", &[(200.0, 0.1), (210.0, 0.2)]);
    let b = sample("B", &[(250.0, 0.1), (260.0, 0.2)]);
    assert!(align(a.spectrum(), b.spectrum()).is_empty());
    assert!(build_report(&[a, b], &wide_range()).is_empty());
}

#[test]
fn only_overlapping_pairs_are_reported() {
    let a = sample("A", &[(200.0, 0.1), (300.0, 0.2)]);
    let b = sample("B", &[(250.0, 0.3), (350.0, 0.1)]);
    let c = sample("C", &[(500.0, 0.3), (600.0, 0.1)]);
    let report = build_report(&[a, b, c], &wide_range());
    assert_eq!(report.results.len(), 1);
    assert!(report.result_for("A", "B").is_some());
    assert!(report.result_for("A", "C").is_none());
    assert_eq!(report.samples.len(), 3);
}

#[test]
fn metrics_stay_finite_on_degenerate_spectra() {
    let zero = sample("zero", &[(200.0, 0.0), (300.0, 0.0)]);
    let flat = sample("flat", &[(200.0, 0.5), (300.0, 0.5)]);
    let ramp = sample("ramp", &[(200.0, 0.0), (300.0, 1.0)]);

    for policy in [Normalization::None, Normalization::Area, Normalization::MinMax] {
        for smoothing in [false, true] {
            let settings = ComparisonSettings {
                normalization: policy,
                smoothing,
                ..wide_range()
            };
            let report = build_report(&[zero.clone(), flat.clone(), ramp.clone()], &settings);
            assert_eq!(report.results.len(), 3);
            for r in &report.results {
                for v in [r.pearson, r.rmse, r.euclidean, r.cosine, r.sid] {
                    assert!(v.is_finite(), "{policy} {smoothing}: {r:?}");
                }
            }
            let zf = report.result_for("zero", "flat").unwrap();
            assert_eq!(zf.pearson, 0.0);
            assert_eq!(zf.cosine, 0.0);
            let fr = report.result_for("flat", "ramp").unwrap();
            assert_eq!(fr.pearson, 0.0, "{policy} {smoothing}");
        }
    }
}

#[test]
fn smoothed_flat_blank_has_no_correlation() {
    // 200-1000 nm aligns to 1601 points, long enough for rounding to build up.
    let blank = sample("blank", &[(200.0, 0.1), (600.0, 0.1), (1000.0, 0.1)]);
    let rising = sample("rising", &[(200.0, 0.0), (1000.0, 2.0)]);

    for window in [3, 5, 21] {
        let settings = ComparisonSettings {
            smoothing: true,
            window,
            ..wide_range()
        };
        let report = build_report(&[blank.clone(), rising.clone()], &settings);
        let r = &report.results[0];
        assert_eq!(r.pearson, 0.0, "window {window}");
        assert!(r.cosine > 0.0);
        for v in [r.rmse, r.euclidean, r.sid] {
            assert!(v.is_finite());
        }
    }
}

#[test]
fn range_cap_limits_compared_region() {
    let a = sample("A", &[(1000.0, 0.1), (1200.0, 0.9)]);
    let b = sample("B", &[(1000.0, 0.9), (1200.0, 0.1)]);
    let settings = ComparisonSettings {
        range_min: 1150.0,
        range_max: 5000.0,
        ..ComparisonSettings::default()
    };
    // Overlap exists but lies entirely above the instrument limit.
    assert!(build_report(&[a, b], &settings).is_empty());
}

#[test]
fn rebuilding_the_same_snapshot_is_bitwise_stable() {
    let set = SampleSet::from_samples(vec![
        sample("A", &[(200.0, 0.12), (230.0, 0.40), (260.0, 0.22), (290.0, 0.05)]),
        sample("B", &[(205.0, 0.10), (233.0, 0.35), (257.0, 0.30), (301.0, 0.07)]),
        sample("C", &[(190.0, 0.50), (250.0, 0.20), (310.0, 0.10)]),
    ]);
    let settings = ComparisonSettings {
        normalization: Normalization::MinMax,
        smoothing: true,
        window: 7,
        ..wide_range()
    };
    let run1 = build_report(set.as_slice(), &settings);
    let run2 = build_report(set.as_slice(), &settings.clone());
    assert_eq!(run1.results.len(), 3);
    for (r1, r2) in run1.results.iter().zip(&run2.results) {
        assert_eq!(r1.sid.to_bits(), r2.sid.to_bits());
        assert_eq!(r1.rmse.to_bits(), r2.rmse.to_bits());
        assert_eq!(r1.pearson.to_bits(), r2.pearson.to_bits());
    }
}

#[test]
fn removing_a_sample_drops_its_pairs() {
    let mut set = SampleSet::from_samples(vec![
        sample("A", &[(200.0, 0.1), (300.0, 0.2)]),
        sample("B", &[(200.0, 0.3), (300.0, 0.1)]),
        sample("C", &[(200.0, 0.2), (300.0, 0.2)]),
    ]);
    assert_eq!(build_report(set.as_slice(), &wide_range()).results.len(), 3);

    set.remove("B");
    let report = build_report(set.as_slice(), &wide_range());
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].sample_a, "A");
    assert_eq!(report.results[0].sample_b, "C");
}
