//! Peak detection over a conditioned trace
//!
//! A sample qualifies as a peak when it strictly exceeds its four nearest
//! neighbours, clears the range-relative threshold, and sits far enough after
//! the previously accepted peak. A near-flat trace produces no peaks at all
//! rather than amplified noise.

/// Signal range below which the trace is treated as flat
const FLAT_RANGE_FLOOR: f32 = 1.0;

/// Indices of detected peaks, in ascending order.
///
/// `threshold_fraction` positions the amplitude threshold inside the signal
/// range; `min_distance` is the minimum index gap between accepted peaks.
pub fn detect_peaks(values: &[f32], threshold_fraction: f64, min_distance: usize) -> Vec<usize> {
    if values.len() < 5 {
        return Vec::new();
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    let range = max - min;
    if range < FLAT_RANGE_FLOOR {
        return Vec::new();
    }

    let threshold = min + range * threshold_fraction as f32;
    let mut peaks: Vec<usize> = Vec::new();

    for i in 2..values.len() - 2 {
        let v = values[i];
        if v <= threshold {
            continue;
        }
        let local_max = v > values[i - 1]
            && v > values[i + 1]
            && v > values[i - 2]
            && v > values[i + 2];
        if !local_max {
            continue;
        }
        if let Some(&last) = peaks.last() {
            if i - last < min_distance {
                continue;
            }
        }
        peaks.push(i);
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sinusoid(len: usize, period: f32) -> Vec<f32> {
        (0..len)
            .map(|i| 50.0 * (i as f32 * std::f32::consts::TAU / period).sin())
            .collect()
    }

    #[test]
    fn test_flat_signal_yields_no_peaks() {
        let values = [10.0f32; 150];
        assert!(detect_peaks(&values, 0.4, 12).is_empty());
    }

    #[test]
    fn test_tiny_range_treated_as_flat() {
        let values: Vec<f32> = (0..150).map(|i| 10.0 + 0.004 * (i % 3) as f32).collect();
        assert!(detect_peaks(&values, 0.4, 12).is_empty());
    }

    #[test]
    fn test_too_short_input() {
        assert!(detect_peaks(&[0.0, 5.0, 0.0, 5.0], 0.4, 12).is_empty());
    }

    #[test]
    fn test_sinusoid_peak_spacing() {
        // period 25 samples -> 72 BPM at 30 Hz
        let values = sinusoid(150, 25.0);
        let peaks = detect_peaks(&values, 0.4, 12);
        assert!(peaks.len() >= 4, "expected several peaks, got {:?}", peaks);
        for pair in peaks.windows(2) {
            let gap = pair[1] - pair[0];
            assert!((24..=26).contains(&gap), "gap {} out of tolerance", gap);
        }
    }

    #[test]
    fn test_min_distance_suppresses_close_peaks() {
        // period 8 would imply 225 BPM; spacing floor must thin the peaks
        let values = sinusoid(150, 8.0);
        let peaks = detect_peaks(&values, 0.4, 12);
        for pair in peaks.windows(2) {
            assert!(pair[1] - pair[0] >= 12);
        }
    }

    #[test]
    fn test_subthreshold_bumps_ignored() {
        // small bumps on top of one dominant oscillation
        let mut values = sinusoid(150, 30.0);
        for (i, v) in values.iter_mut().enumerate() {
            *v += 2.0 * (i as f32 * 1.3).sin();
        }
        let peaks = detect_peaks(&values, 0.4, 12);
        // only the dominant crests survive the threshold
        assert!(peaks.len() <= 6);
        for pair in peaks.windows(2) {
            assert!(pair[1] - pair[0] >= 25, "gap {} too small", pair[1] - pair[0]);
        }
    }

    #[test]
    fn test_peaks_exclude_borders() {
        let mut values = vec![0.0f32; 20];
        values[0] = 100.0;
        values[19] = 100.0;
        values[10] = 50.0;
        let peaks = detect_peaks(&values, 0.2, 3);
        assert_eq!(peaks, vec![10]);
    }
}
