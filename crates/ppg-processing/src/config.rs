//! Analysis configuration
//!
//! Two built-in profiles drive the analyzer: the live profile runs every few
//! frames while the finger is on the lens, the final profile runs once over
//! the full window when a session ends. The final pass trades latency for a
//! lower peak threshold and a stricter sample floor.

use ppg_core::{PpgError, PpgResult, NOMINAL_SAMPLE_RATE};
use serde::{Deserialize, Serialize};

/// Tuning for one analyzer pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Samples per second the window was captured at
    pub sample_rate: f64,
    /// Peak threshold as a fraction of the signal range, 0..1
    pub peak_threshold: f64,
    /// Intervals implying a rate below this are discarded before averaging
    pub min_interval_bpm: f64,
    /// Intervals implying a rate above this are discarded before averaging
    pub max_interval_bpm: f64,
    /// Final acceptance band lower bound, BPM
    pub min_accept_bpm: u32,
    /// Final acceptance band upper bound, BPM
    pub max_accept_bpm: u32,
    /// Peak count that saturates the confidence peak term
    pub peak_count_full: f64,
    /// Minimum window length for this pass to run
    pub min_samples: usize,
}

impl AnalysisConfig {
    /// Profile for the in-flight estimate shown while measuring.
    pub fn live() -> Self {
        Self {
            sample_rate: NOMINAL_SAMPLE_RATE,
            peak_threshold: 0.4,
            min_interval_bpm: 35.0,
            max_interval_bpm: 220.0,
            min_accept_bpm: 40,
            max_accept_bpm: 200,
            peak_count_full: 5.0,
            min_samples: 45,
        }
    }

    /// Profile for the single full-window pass at session end.
    pub fn final_pass() -> Self {
        Self {
            peak_threshold: 0.3,
            peak_count_full: 10.0,
            min_samples: 60,
            ..Self::live()
        }
    }

    /// Minimum spacing between accepted peaks, in samples.
    ///
    /// 0.4 s at the nominal rate, which caps detectable rates at 150 BPM.
    pub fn min_peak_distance(&self) -> usize {
        (self.sample_rate * 0.4).floor() as usize
    }

    pub fn validate(&self) -> PpgResult<()> {
        if self.sample_rate <= 0.0 {
            return Err(PpgError::InvalidConfig {
                reason: format!("sample_rate must be positive, got {}", self.sample_rate),
            });
        }
        if !(0.0..1.0).contains(&self.peak_threshold) || self.peak_threshold == 0.0 {
            return Err(PpgError::InvalidConfig {
                reason: format!(
                    "peak_threshold must be in (0, 1), got {}",
                    self.peak_threshold
                ),
            });
        }
        if self.min_interval_bpm >= self.max_interval_bpm {
            return Err(PpgError::InvalidConfig {
                reason: "min_interval_bpm must be below max_interval_bpm".to_string(),
            });
        }
        if self.min_accept_bpm >= self.max_accept_bpm {
            return Err(PpgError::InvalidConfig {
                reason: "min_accept_bpm must be below max_accept_bpm".to_string(),
            });
        }
        if self.min_samples == 0 {
            return Err(PpgError::InvalidConfig {
                reason: "min_samples must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> PpgResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PpgError::InvalidConfig {
            reason: format!("serialization failed: {}", e),
        })
    }

    pub fn from_json(json: &str) -> PpgResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| PpgError::InvalidConfig {
            reason: format!("deserialization failed: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_validate() {
        assert!(AnalysisConfig::live().validate().is_ok());
        assert!(AnalysisConfig::final_pass().validate().is_ok());
    }

    #[test]
    fn test_final_pass_differs_where_it_should() {
        let live = AnalysisConfig::live();
        let final_pass = AnalysisConfig::final_pass();
        assert_eq!(final_pass.peak_threshold, 0.3);
        assert_eq!(final_pass.min_samples, 60);
        assert_eq!(final_pass.peak_count_full, 10.0);
        assert_eq!(final_pass.sample_rate, live.sample_rate);
        assert_eq!(final_pass.min_accept_bpm, live.min_accept_bpm);
    }

    #[test]
    fn test_min_peak_distance_at_nominal_rate() {
        assert_eq!(AnalysisConfig::live().min_peak_distance(), 12);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let mut config = AnalysisConfig::live();
        config.peak_threshold = 1.5;
        assert!(config.validate().is_err());
        config.peak_threshold = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let mut config = AnalysisConfig::live();
        config.sample_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalysisConfig::final_pass();
        let json = config.to_json().unwrap();
        let restored = AnalysisConfig::from_json(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_from_json_validates() {
        let mut config = AnalysisConfig::live();
        config.min_samples = 0;
        let json = serde_json::to_string(&config).unwrap();
        assert!(AnalysisConfig::from_json(&json).is_err());
    }
}
