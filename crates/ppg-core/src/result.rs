//! Shared result and assessment types
//!
//! These are the values the pipeline hands outward: placement assessments
//! during acquisition, and the final measurement record once a session
//! completes. Everything serializes so downstream consumers can persist or
//! forward results as-is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Heart-rate variability statistics over an RR-interval series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrvMetrics {
    /// Standard deviation of RR intervals, milliseconds
    pub sdnn_ms: f64,
    /// Root mean square of successive RR differences, milliseconds
    pub rmssd_ms: f64,
    /// Percentage of successive differences exceeding 50 ms
    pub pnn50_pct: f64,
    /// Mean RR interval, milliseconds
    pub mean_rr_ms: f64,
    /// Number of RR intervals analysed
    pub interval_count: usize,
}

/// Rhythm classification from RR-interval heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrhythmiaKind {
    /// Fewer than 2 RR intervals available
    InsufficientData,
    /// Irregular rhythm with elevated rate
    PossibleAtrialFibrillation,
    /// Resting rate below 50 BPM
    Bradycardia,
    /// Resting rate above 120 BPM
    Tachycardia,
    /// No irregularity flagged
    Normal,
}

/// Severity attached to a rhythm finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrhythmiaSeverity {
    None,
    Medium,
    High,
}

/// Outcome of the heuristic rhythm screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrhythmiaResult {
    pub kind: ArrhythmiaKind,
    /// Whether the screen flagged an irregularity
    pub detected: bool,
    /// Confidence in the finding, 0..=100
    pub confidence: u8,
    pub severity: ArrhythmiaSeverity,
    /// Coefficient of variation of the RR series
    pub rr_cv: f64,
    /// Mean rate implied by the RR series, BPM
    pub mean_bpm: f64,
}

/// Blood oxygen estimate from the red/infrared ratio-of-ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spo2Estimate {
    /// Estimated saturation, clamped to 70..=100 percent
    pub spo2_pct: u8,
    /// Ratio-of-ratios value the estimate was derived from, scaled x100
    pub ratio_x100: u16,
}

/// Finger-placement assessment for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Whether the lens appears covered by a finger at all
    pub finger_detected: bool,
    /// Composite placement score, 0..=100
    pub score: u8,
    /// Whether every factor clears its hard floor
    pub acceptable: bool,
    /// Guidance keyed to the weakest factor
    pub message: String,
    /// Mean brightness of the centre region
    pub brightness: f32,
    /// red / (green + blue + 1) over the wide region
    pub red_dominance: f32,
    /// Centre-vs-corner coverage score, 0..=100
    pub coverage: f32,
    /// Brightness spread inside the centre region
    pub contrast: f32,
    /// Score stability over recent history, 0..=100
    pub stability: f32,
}

impl QualityAssessment {
    /// Assessment for a frame with no usable signal at all.
    pub fn no_signal(message: impl Into<String>) -> Self {
        Self {
            finger_detected: false,
            score: 0,
            acceptable: false,
            message: message.into(),
            brightness: 0.0,
            red_dominance: 0.0,
            coverage: 0.0,
            contrast: 0.0,
            stability: 50.0,
        }
    }
}

/// Final record produced when a measurement session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Unique id for this measurement
    pub id: Uuid,
    /// Whether the session yielded a usable estimate
    pub success: bool,
    /// Estimated heart rate, BPM
    pub heart_rate_bpm: Option<u32>,
    /// Confidence in the estimate, 0..=100
    pub confidence: u8,
    /// Waveform quality of the analysed window, 0..=100
    pub signal_quality: u8,
    /// Peaks found by the final pass
    pub peaks_detected: usize,
    pub hrv: Option<HrvMetrics>,
    pub arrhythmia: Option<ArrhythmiaResult>,
    pub spo2: Option<Spo2Estimate>,
    /// Wall-clock measurement length, seconds
    pub duration_secs: f64,
    /// Samples accepted into the window over the session
    pub sample_count: usize,
    /// Mean placement score over the session, 0..=100
    pub average_quality: f32,
    /// Populated when `success` is false
    pub error: Option<String>,
    /// Completion time, epoch milliseconds
    pub completed_at_ms: u64,
}

impl MeasurementResult {
    /// Record for a session that ended without a usable estimate.
    pub fn failure(
        error: impl Into<String>,
        duration_secs: f64,
        sample_count: usize,
        average_quality: f32,
        completed_at_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            success: false,
            heart_rate_bpm: None,
            confidence: 0,
            signal_quality: 0,
            peaks_detected: 0,
            hrv: None,
            arrhythmia: None,
            spo2: None,
            duration_secs,
            sample_count,
            average_quality,
            error: Some(error.into()),
            completed_at_ms,
        }
    }
}
