//! Full analysis pass over a signal window
//!
//! [`SignalAnalyzer`] wires the stages together: condition the red trace,
//! detect peaks, estimate heart rate and confidence, then derive HRV, the
//! rhythm screen and the SpO2 estimate from the same peak series.

use ppg_core::{ArrhythmiaResult, HrvMetrics, PpgResult, Spo2Estimate};
use serde::{Deserialize, Serialize};

use crate::arrhythmia;
use crate::conditioner;
use crate::config::AnalysisConfig;
use crate::hrv;
use crate::peaks;
use crate::spo2;
use crate::vitals;

/// Everything one analysis pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub heart_rate_bpm: Option<u32>,
    /// Confidence in the estimate, 0..=100
    pub confidence: u8,
    /// Waveform quality of the raw trace, 0..=100
    pub signal_quality: u8,
    /// Peaks found in the conditioned trace
    pub peak_count: usize,
    /// RR intervals backing the HRV and rhythm outputs, milliseconds
    pub rr_intervals_ms: Vec<f64>,
    pub hrv: Option<HrvMetrics>,
    pub arrhythmia: ArrhythmiaResult,
    pub spo2: Option<Spo2Estimate>,
}

/// Analysis pipeline bound to one configuration profile
#[derive(Debug, Clone)]
pub struct SignalAnalyzer {
    config: AnalysisConfig,
}

impl SignalAnalyzer {
    pub fn new(config: AnalysisConfig) -> PpgResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn live() -> Self {
        Self {
            config: AnalysisConfig::live(),
        }
    }

    pub fn final_pass() -> Self {
        Self {
            config: AnalysisConfig::final_pass(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pass. Returns `None` when the window is shorter than the
    /// profile's sample floor.
    pub fn analyze(&self, red_raw: &[f32], infrared_raw: &[f32]) -> Option<AnalysisOutcome> {
        if red_raw.len() < self.config.min_samples {
            return None;
        }

        let conditioned = conditioner::condition(red_raw);
        let peak_indices = peaks::detect_peaks(
            &conditioned,
            self.config.peak_threshold,
            self.config.min_peak_distance(),
        );

        let signal_quality = vitals::signal_quality(red_raw, &self.config);
        let heart_rate_bpm = vitals::estimate_heart_rate(&peak_indices, &self.config);
        let confidence = if heart_rate_bpm.is_some() {
            vitals::confidence(&peak_indices, signal_quality, &self.config)
        } else {
            0
        };

        let rr_intervals_ms = hrv::rr_intervals_ms(&peak_indices, self.config.sample_rate);

        Some(AnalysisOutcome {
            heart_rate_bpm,
            confidence,
            signal_quality,
            peak_count: peak_indices.len(),
            hrv: hrv::analyze_intervals(&rr_intervals_ms),
            arrhythmia: arrhythmia::classify(&rr_intervals_ms),
            spo2: spo2::estimate(red_raw, infrared_raw),
            rr_intervals_ms,
        })
    }
}
