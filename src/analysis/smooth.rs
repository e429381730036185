use super::guard::mean;

/// Centered moving average with truncated edges.
///
/// Element `i` becomes the mean of the values in
/// `[i - window/2, i + window/2]` that actually exist, so boundary points
/// average over fewer neighbours. `window <= 1` or an empty input returns
/// the input unchanged.
pub fn smooth(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let half = window / 2;
    let n = values.len();

    // Each window is averaged on its own; no running state carries rounding
    // error along the series.
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            mean(&values[start..end])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn window_of_one_is_identity() {
        let v = vec![0.3, 1.7, -2.0, 4.25];
        assert_eq!(smooth(&v, 1), v);
        assert_eq!(smooth(&v, 0), v);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(smooth(&[], 5).is_empty());
    }

    #[test]
    fn edges_average_over_fewer_points() {
        let out = smooth(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        let expected = [1.5, 2.0, 3.0, 4.0, 4.5];
        for (o, e) in out.iter().zip(expected) {
            assert_relative_eq!(*o, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn window_wider_than_input_flattens_interior() {
        let out = smooth(&[0.0, 3.0, 6.0], 7);
        for o in out {
            assert_relative_eq!(o, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_spike_spreads_evenly() {
        let out = smooth(&[0.0, 0.0, 5.0, 0.0, 0.0], 5);
        assert_relative_eq!(out[0], 5.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(out[1], 5.0 / 4.0, epsilon = 1e-12);
        assert_relative_eq!(out[2], 1.0, epsilon = 1e-12);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn long_constant_series_is_unchanged() {
        for c in [0.1, 0.7, 0.0123] {
            let flat = vec![c; 2000];
            for window in [3, 5, 11, 51] {
                let out = smooth(&flat, window);
                assert_eq!(out.len(), flat.len());
                assert!(
                    out.iter().all(|&v| v == c),
                    "window {window} drifted away from {c}"
                );
            }
        }
    }

    #[test]
    fn late_windows_match_local_mean() {
        // Values far down a long series must not depend on earlier ones.
        let v: Vec<f64> = (0..5000).map(|i| 0.1 + f64::from(i % 7) * 0.01).collect();
        let out = smooth(&v, 5);
        let direct = v[4993..4998].iter().sum::<f64>() / 5.0;
        assert_relative_eq!(out[4995], direct, epsilon = 1e-15);
    }
}
