//! Heart-rate and confidence estimation
//!
//! Peak-to-peak intervals convert to instantaneous rates; intervals implying
//! a physiologically impossible rate are discarded before averaging. The
//! confidence score blends interval consistency, waveform quality and peak
//! yield.

use crate::config::AnalysisConfig;
use crate::conditioner;
use crate::peaks;

/// Average heart rate implied by a peak index series.
///
/// Returns `None` when no interval survives the plausibility filter, or
/// when the average lands outside the acceptance band. A single surviving
/// interval (two peaks) is enough for an estimate.
pub fn estimate_heart_rate(peak_indices: &[usize], config: &AnalysisConfig) -> Option<u32> {
    let rates: Vec<f64> = peak_indices
        .windows(2)
        .map(|pair| config.sample_rate * 60.0 / (pair[1] - pair[0]) as f64)
        .filter(|bpm| (config.min_interval_bpm..=config.max_interval_bpm).contains(bpm))
        .collect();

    if rates.is_empty() {
        return None;
    }

    let bpm = (rates.iter().sum::<f64>() / rates.len() as f64).round() as u32;
    if (config.min_accept_bpm..=config.max_accept_bpm).contains(&bpm) {
        Some(bpm)
    } else {
        None
    }
}

/// Consistency of the interval series: `max(0, (1 - CV) * 100)`.
///
/// A single interval is perfectly consistent with itself; an empty series
/// scores zero.
pub fn interval_consistency(peak_indices: &[usize]) -> f64 {
    let intervals: Vec<f64> = peak_indices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .collect();
    if intervals.is_empty() {
        return 0.0;
    }
    if intervals.len() == 1 {
        return 100.0;
    }

    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }
    let variance =
        intervals.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / intervals.len() as f64;
    let cv = variance.sqrt() / mean;
    ((1.0 - cv) * 100.0).max(0.0)
}

/// Composite confidence: 40% interval consistency, 40% waveform quality,
/// 20% peak yield against the profile's saturation count.
pub fn confidence(peak_indices: &[usize], signal_quality: u8, config: &AnalysisConfig) -> u8 {
    let consistency = interval_consistency(peak_indices);
    let peak_term = ((peak_indices.len() as f64 / config.peak_count_full) * 100.0).min(100.0);
    let blended = 0.4 * consistency + 0.4 * signal_quality as f64 + 0.2 * peak_term;
    blended.round().clamp(0.0, 100.0) as u8
}

/// Waveform quality score, 0..=100, judged on the raw red-channel trace.
///
/// Tiered additive scoring over amplitude, signal-to-noise, brightness range
/// and variability, with a bonus when a coarse peak search lands in the
/// plausible rate band.
pub fn signal_quality(raw_values: &[f32], config: &AnalysisConfig) -> u8 {
    let Some(stats) = ppg_core::SignalStats::compute(raw_values) else {
        return 0;
    };

    let mut score = 0i32;

    if stats.amplitude > 5.0 {
        score += 30;
    } else if stats.amplitude > 2.0 {
        score += 15;
    }

    let snr = stats.amplitude / (stats.std_dev + 0.001);
    if snr > 3.0 {
        score += 25;
    } else if snr > 1.5 {
        score += 15;
    } else if snr > 0.5 {
        score += 5;
    }

    if (50.0..=200.0).contains(&stats.mean) {
        score += 20;
    } else if (30.0..=220.0).contains(&stats.mean) {
        score += 10;
    }

    if (2.0..=20.0).contains(&stats.std_dev) {
        score += 15;
    } else if stats.std_dev > 1.0 {
        score += 5;
    }

    if raw_values.len() >= 60 && plausible_rhythm_present(raw_values, config) {
        score += 10;
    }

    score.clamp(0, 100) as u8
}

/// Coarse rhythm check: condition, find peaks at a permissive threshold and
/// test whether the mean interval implies 40..=200 BPM.
fn plausible_rhythm_present(raw_values: &[f32], config: &AnalysisConfig) -> bool {
    let conditioned = conditioner::condition(raw_values);
    let peak_indices = peaks::detect_peaks(&conditioned, 0.3, config.min_peak_distance());
    if peak_indices.len() < 2 {
        return false;
    }
    let intervals: Vec<f64> = peak_indices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .collect();
    let mean_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let bpm = config.sample_rate * 60.0 / mean_interval;
    (40.0..=200.0).contains(&bpm)
}
