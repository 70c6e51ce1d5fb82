//! Heart-rate variability statistics
//!
//! Peak indices become RR intervals in milliseconds, then the standard
//! time-domain trio: SDNN, RMSSD and pNN50.

use ppg_core::HrvMetrics;

/// RR intervals in milliseconds from a peak index series.
pub fn rr_intervals_ms(peak_indices: &[usize], sample_rate: f64) -> Vec<f64> {
    peak_indices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64 / sample_rate * 1000.0)
        .collect()
}

/// Time-domain HRV metrics over a peak series.
///
/// Requires at least three RR intervals; returns `None` below that.
pub fn analyze(peak_indices: &[usize], sample_rate: f64) -> Option<HrvMetrics> {
    let rr = rr_intervals_ms(peak_indices, sample_rate);
    analyze_intervals(&rr)
}

/// Same as [`analyze`] but over an already-computed RR series.
pub fn analyze_intervals(rr_ms: &[f64]) -> Option<HrvMetrics> {
    if rr_ms.len() < 3 {
        return None;
    }

    let n = rr_ms.len() as f64;
    let mean_rr = rr_ms.iter().sum::<f64>() / n;
    let variance = rr_ms.iter().map(|rr| (rr - mean_rr).powi(2)).sum::<f64>() / n;
    let sdnn = variance.sqrt();

    let diffs: Vec<f64> = rr_ms.windows(2).map(|pair| pair[1] - pair[0]).collect();
    let rmssd = (diffs.iter().map(|d| d * d).sum::<f64>() / diffs.len() as f64).sqrt();
    let over_50 = diffs.iter().filter(|d| d.abs() > 50.0).count();
    let pnn50 = over_50 as f64 / diffs.len() as f64 * 100.0;

    Some(HrvMetrics {
        sdnn_ms: sdnn,
        rmssd_ms: rmssd,
        pnn50_pct: pnn50,
        mean_rr_ms: mean_rr,
        interval_count: rr_ms.len(),
    })
}
