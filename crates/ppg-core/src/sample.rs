//! Sample types shared across the pipeline
//!
//! One camera frame reduces to one [`ChannelSample`]: a red-channel average
//! (the primary pulsatile signal) plus an infrared approximation derived from
//! the blue and green channels. Timestamps are epoch milliseconds.

use serde::{Deserialize, Serialize};

/// One accepted frame reduced to its per-channel averages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSample {
    /// Red channel average, the primary PPG signal
    pub red: f32,
    /// Infrared approximation: blue * 0.7 + green * 0.3
    pub infrared: f32,
    /// Capture time, epoch milliseconds
    pub timestamp_ms: u64,
}

impl ChannelSample {
    pub fn new(red: f32, infrared: f32, timestamp_ms: u64) -> Self {
        Self {
            red,
            infrared,
            timestamp_ms,
        }
    }
}

/// Descriptive statistics over a signal slice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub mean: f32,
    /// Population standard deviation
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    /// max - min
    pub amplitude: f32,
}

impl SignalStats {
    /// Compute stats over a slice. Returns `None` for an empty slice.
    pub fn compute(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f32;
        let mean = values.iter().sum::<f32>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;

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

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            amplitude: max - min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_slice() {
        assert!(SignalStats::compute(&[]).is_none());
    }

    #[test]
    fn test_stats_constant_signal() {
        let stats = SignalStats::compute(&[42.0; 8]).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.amplitude, 0.0);
    }

    #[test]
    fn test_stats_known_values() {
        let stats = SignalStats::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-6);
        // population std dev of this classic series is exactly 2
        assert!((stats.std_dev - 2.0).abs() < 1e-6);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.amplitude, 7.0);
    }
}
