//! Blood oxygen estimation
//!
//! Classic ratio-of-ratios over the red and infrared tracks. The infrared
//! track is an approximation derived from the camera's blue and green
//! channels, so the output is an indicative estimate only; out-of-range
//! ratios clamp to the ends of the calibration curve instead of
//! extrapolating.

use ppg_core::{SignalStats, Spo2Estimate};

/// Minimum samples per track before an estimate is attempted
const MIN_SAMPLES: usize = 60;

/// AC amplitude below which the pulsatile component counts as weak
const WEAK_AC_FLOOR: f32 = 2.0;

/// Estimate SpO2 from parallel red and infrared tracks.
///
/// Returns `None` when the tracks are too short, mismatched, or any
/// DC/AC component vanishes.
pub fn estimate(red: &[f32], infrared: &[f32]) -> Option<Spo2Estimate> {
    if red.len() < MIN_SAMPLES || red.len() != infrared.len() {
        return None;
    }

    let red_stats = SignalStats::compute(red)?;
    let ir_stats = SignalStats::compute(infrared)?;

    let red_dc = red_stats.mean;
    let ir_dc = ir_stats.mean;
    let red_ac = red_stats.std_dev;
    let ir_ac = ir_stats.std_dev;

    if red_dc <= 0.0 || ir_dc <= 0.0 || red_ac <= 0.0 || ir_ac <= 0.0 {
        return None;
    }

    let ratio = (red_ac / red_dc) / (ir_ac / ir_dc);

    // linear calibration segment, clamped at both ends
    let mut spo2 = if ratio < 0.5 {
        100.0
    } else if ratio > 3.4 {
        70.0
    } else {
        110.0 - 25.0 * ratio
    };

    if red_ac.min(ir_ac) < WEAK_AC_FLOOR {
        spo2 -= 2.0;
    }

    Some(Spo2Estimate {
        spo2_pct: spo2.clamp(70.0, 100.0).round() as u8,
        ratio_x100: (ratio * 100.0).round().clamp(0.0, u16::MAX as f32) as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sinusoid with a given mean and amplitude, long enough to estimate.
    fn track(mean: f32, amplitude: f32) -> Vec<f32> {
        (0..90)
            .map(|i| mean + amplitude * (i as f32 * std::f32::consts::TAU / 25.0).sin())
            .collect()
    }

    #[test]
    fn test_too_short() {
        let red = track(150.0, 5.0);
        assert!(estimate(&red[..50], &red[..50]).is_none());
    }

    #[test]
    fn test_mismatched_lengths() {
        let red = track(150.0, 5.0);
        let ir = track(100.0, 5.0);
        assert!(estimate(&red, &ir[..80]).is_none());
    }

    #[test]
    fn test_flat_track_yields_none() {
        let red = track(150.0, 5.0);
        let flat = vec![100.0f32; 90];
        assert!(estimate(&red, &flat).is_none());
        assert!(estimate(&flat, &red).is_none());
    }

    #[test]
    fn test_equal_perfusion_ratio_one() {
        // identical relative pulsatility on both tracks: R = 1, SpO2 = 85
        let red = track(150.0, 15.0);
        let ir = track(150.0, 15.0);
        let est = estimate(&red, &ir).unwrap();
        assert_eq!(est.ratio_x100, 100);
        assert_eq!(est.spo2_pct, 85);
    }

    #[test]
    fn test_low_ratio_clamps_high() {
        // red barely pulses relative to infrared: R well below 0.5
        let red = track(200.0, 3.0);
        let ir = track(100.0, 20.0);
        let est = estimate(&red, &ir).unwrap();
        assert_eq!(est.spo2_pct, 100);
    }

    #[test]
    fn test_high_ratio_clamps_low() {
        let red = track(100.0, 40.0);
        let ir = track(200.0, 3.0);
        let est = estimate(&red, &ir).unwrap();
        assert!(est.spo2_pct >= 70);
        assert!(est.spo2_pct <= 72);
    }

    #[test]
    fn test_weak_signal_penalty() {
        // both tracks pulse with AC below the weak floor
        let red = track(150.0, 2.0);
        let ir = track(150.0, 2.0);
        let est = estimate(&red, &ir).unwrap();
        // R = 1 gives 85, weak penalty brings it to 83
        assert_eq!(est.spo2_pct, 83);
    }
}
