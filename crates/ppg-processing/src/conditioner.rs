//! Signal conditioning
//!
//! Two passes prepare the raw red-channel trace for peak detection: a wide
//! symmetric moving-average subtraction removes the baseline wander, then a
//! narrow symmetric moving average smooths frame-to-frame noise. Both passes
//! shrink their windows near the edges so no samples are dropped.

/// Smoothing radius: 7-point moving average in the interior
const SMOOTHING_RADIUS: usize = 3;

/// Baseline radius cap
const BASELINE_RADIUS_MAX: usize = 30;

/// Subtract the local baseline from each sample.
///
/// The baseline at index `i` is the mean over `i - r ..= i + r`, clipped to
/// the slice, with `r = min(30, len / 3)`. Output is zero-centred.
pub fn remove_baseline(values: &[f32]) -> Vec<f32> {
    if values.len() < 5 {
        return values.to_vec();
    }

    let radius = BASELINE_RADIUS_MAX.min(values.len() / 3);
    windowed_mean_map(values, radius, |value, local_mean| value - local_mean)
}

/// Symmetric moving-average smoothing with the window clipped at the edges.
pub fn smooth(values: &[f32]) -> Vec<f32> {
    if values.len() < 5 {
        return values.to_vec();
    }

    windowed_mean_map(values, SMOOTHING_RADIUS, |_, local_mean| local_mean)
}

/// Full conditioning pass: baseline removal followed by smoothing.
pub fn condition(values: &[f32]) -> Vec<f32> {
    smooth(&remove_baseline(values))
}

fn windowed_mean_map(values: &[f32], radius: usize, f: impl Fn(f32, f32) -> f32) -> Vec<f32> {
    let len = values.len();
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let start = i.saturating_sub(radius);
        let end = (i + radius + 1).min(len);
        let local_mean = values[start..end].iter().sum::<f32>() / (end - start) as f32;
        out.push(f(values[i], local_mean));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_passes_through() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(remove_baseline(&values), values.to_vec());
        assert_eq!(smooth(&values), values.to_vec());
        assert_eq!(condition(&values), values.to_vec());
    }

    #[test]
    fn test_output_length_matches_input() {
        let values: Vec<f32> = (0..150).map(|i| (i as f32 * 0.2).sin()).collect();
        assert_eq!(condition(&values).len(), values.len());
    }

    #[test]
    fn test_baseline_removal_centres_constant_offset() {
        // sinusoid riding on a large DC offset
        let values: Vec<f32> = (0..150)
            .map(|i| 120.0 + 10.0 * (i as f32 * 0.3).sin())
            .collect();
        let conditioned = condition(&values);
        let mean = conditioned.iter().sum::<f32>() / conditioned.len() as f32;
        assert!(mean.abs() < 1.0, "residual mean {} too large", mean);
    }

    #[test]
    fn test_baseline_removal_tracks_slow_drift() {
        // linear drift of 30 units across the window should mostly vanish
        let values: Vec<f32> = (0..150)
            .map(|i| 100.0 + i as f32 * 0.2 + 5.0 * (i as f32 * 0.4).sin())
            .collect();
        let centred = remove_baseline(&values);
        // compare interior samples, edge windows are asymmetric
        let interior = &centred[30..120];
        let mean = interior.iter().sum::<f32>() / interior.len() as f32;
        assert!(mean.abs() < 0.5, "drift residual {} too large", mean);
    }

    #[test]
    fn test_smoothing_reduces_variance() {
        // alternating spike noise on a flat signal
        let values: Vec<f32> = (0..100)
            .map(|i| if i % 2 == 0 { 10.0 } else { -10.0 })
            .collect();
        let smoothed = smooth(&values);
        let raw_energy: f32 = values.iter().map(|v| v * v).sum();
        let smooth_energy: f32 = smoothed.iter().map(|v| v * v).sum();
        assert!(smooth_energy < raw_energy * 0.1);
    }

    #[test]
    fn test_constant_signal_conditions_to_zero() {
        let values = [80.0f32; 60];
        let conditioned = condition(&values);
        for v in conditioned {
            assert!(v.abs() < 1e-4);
        }
    }
}
