//! Measurement orchestration
//!
//! [`MeasurementSession`] drives one measurement: it owns the signal window,
//! the placement assessor and both analyzer profiles, and enforces the state
//! machine around them. It is synchronous and clock-agnostic, callers pass
//! epoch-millisecond timestamps in, so the whole flow is testable without a
//! camera or a runtime.

use ppg_core::{
    MeasurementResult, PpgError, PpgResult, QualityAssessment, SignalWindow, DEFAULT_WINDOW_SIZE,
};
use ppg_acquisition::{CameraProfile, FrameBuffer, OpticalSampler, QualityAssessor};
use ppg_processing::SignalAnalyzer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::SessionState;

/// In-flight estimate surfaced while sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveVitals {
    pub heart_rate_bpm: Option<u32>,
    pub confidence: u8,
    pub signal_quality: u8,
    pub sample_count: usize,
    pub elapsed_secs: f64,
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Measurement length before auto-completion, seconds
    pub target_duration_secs: u64,
    /// Placement score floor for showing live estimates
    pub live_min_quality: u8,
    /// Signal window capacity, samples
    pub window_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_duration_secs: 30,
            live_min_quality: 20,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// One measurement session end to end
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    config: SessionConfig,
    state: SessionState,
    window: SignalWindow,
    sampler: OpticalSampler,
    assessor: QualityAssessor,
    live_analyzer: SignalAnalyzer,
    final_analyzer: SignalAnalyzer,
    started_at_ms: Option<u64>,
    samples_accepted: usize,
    quality_sum: f64,
    quality_count: usize,
    last_assessment: Option<QualityAssessment>,
    result: Option<MeasurementResult>,
}

impl MeasurementSession {
    pub fn new(profile: CameraProfile, config: SessionConfig) -> Self {
        Self {
            window: SignalWindow::new(config.window_size),
            config,
            state: SessionState::Idle,
            sampler: OpticalSampler::new(),
            assessor: QualityAssessor::new(profile),
            live_analyzer: SignalAnalyzer::live(),
            final_analyzer: SignalAnalyzer::final_pass(),
            started_at_ms: None,
            samples_accepted: 0,
            quality_sum: 0.0,
            quality_count: 0,
            last_assessment: None,
            result: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_assessment(&self) -> Option<&QualityAssessment> {
        self.last_assessment.as_ref()
    }

    pub fn result(&self) -> Option<&MeasurementResult> {
        self.result.as_ref()
    }

    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// Camera acquisition has begun.
    pub fn begin_acquisition(&mut self) -> PpgResult<()> {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Acquiring;
                Ok(())
            }
            _ => Err(self.bad_transition("begin acquisition")),
        }
    }

    /// The camera delivered its first frame and is ready to measure.
    pub fn device_ready(&mut self) -> PpgResult<()> {
        match self.state {
            SessionState::Acquiring => {
                self.state = SessionState::Armed;
                Ok(())
            }
            _ => Err(self.bad_transition("arm")),
        }
    }

    /// Camera acquisition failed; fall back to Idle so it can be retried.
    pub fn device_failed(&mut self) {
        if self.state == SessionState::Acquiring {
            self.state = SessionState::Idle;
        }
    }

    /// Begin measuring. Legal only from Armed; resets the window, the
    /// placement history and all per-session accumulators atomically.
    pub fn start(&mut self, now_ms: u64) -> PpgResult<()> {
        if !self.state.can_start() {
            return Err(self.bad_transition("start"));
        }
        self.window.clear();
        self.assessor.reset();
        self.started_at_ms = Some(now_ms);
        self.samples_accepted = 0;
        self.quality_sum = 0.0;
        self.quality_count = 0;
        self.last_assessment = None;
        self.result = None;
        self.state = SessionState::Sampling;
        Ok(())
    }

    /// Fold one frame in. Placement is assessed in Armed (to guide the user
    /// before starting) and in Sampling; samples only accumulate while
    /// Sampling.
    pub fn ingest_frame(&mut self, frame: &FrameBuffer) -> PpgResult<QualityAssessment> {
        if !matches!(self.state, SessionState::Armed | SessionState::Sampling) {
            return Err(self.bad_transition("ingest a frame"));
        }

        let assessment = self.assessor.assess(frame);

        if self.state.is_sampling() {
            self.quality_sum += assessment.score as f64;
            self.quality_count += 1;
            if let Some(sample) = self.sampler.sample(frame) {
                self.window.push(sample);
                self.samples_accepted += 1;
            }
        }

        self.last_assessment = Some(assessment.clone());
        Ok(assessment)
    }

    /// Live estimate for display. `None` until the window holds enough
    /// samples and placement clears the quality floor.
    pub fn live_vitals(&self, now_ms: u64) -> Option<LiveVitals> {
        if !self.state.is_sampling() {
            return None;
        }
        let assessment = self.last_assessment.as_ref()?;
        if assessment.score <= self.config.live_min_quality {
            return None;
        }

        let outcome = self
            .live_analyzer
            .analyze(&self.window.red_values(), &self.window.infrared_values())?;

        Some(LiveVitals {
            heart_rate_bpm: outcome.heart_rate_bpm,
            confidence: outcome.confidence,
            signal_quality: outcome.signal_quality,
            sample_count: self.window.len(),
            elapsed_secs: self.elapsed_secs(now_ms),
        })
    }

    /// Clock tick. Auto-completes the measurement once the target duration
    /// has elapsed; returns the result when that happens.
    pub fn tick(&mut self, now_ms: u64) -> Option<MeasurementResult> {
        if !self.state.is_sampling() {
            return None;
        }
        if self.elapsed_secs(now_ms) >= self.config.target_duration_secs as f64 {
            return Some(self.finish(now_ms));
        }
        None
    }

    /// Stop early. The result reflects the true elapsed duration.
    pub fn stop(&mut self, now_ms: u64) -> PpgResult<MeasurementResult> {
        if !self.state.is_sampling() {
            return Err(self.bad_transition("stop"));
        }
        Ok(self.finish(now_ms))
    }

    /// Discard the result and return to Armed for another attempt.
    pub fn retake(&mut self) -> PpgResult<()> {
        match self.state {
            SessionState::Complete => {
                self.reset_to_armed();
                Ok(())
            }
            _ => Err(self.bad_transition("retake")),
        }
    }

    /// Abandon whatever is in progress and return to Armed. Legal from any
    /// state with a camera attached.
    pub fn reset(&mut self) -> PpgResult<()> {
        match self.state {
            SessionState::Idle | SessionState::Acquiring => Err(self.bad_transition("reset")),
            _ => {
                self.reset_to_armed();
                Ok(())
            }
        }
    }

    fn reset_to_armed(&mut self) {
        self.window.clear();
        self.assessor.reset();
        self.started_at_ms = None;
        self.samples_accepted = 0;
        self.quality_sum = 0.0;
        self.quality_count = 0;
        self.last_assessment = None;
        self.result = None;
        self.state = SessionState::Armed;
    }

    fn elapsed_secs(&self, now_ms: u64) -> f64 {
        match self.started_at_ms {
            Some(start) => now_ms.saturating_sub(start) as f64 / 1000.0,
            None => 0.0,
        }
    }

    fn finish(&mut self, now_ms: u64) -> MeasurementResult {
        let duration_secs = self.elapsed_secs(now_ms);
        let average_quality = if self.quality_count > 0 {
            (self.quality_sum / self.quality_count as f64) as f32
        } else {
            0.0
        };

        let result = match self
            .final_analyzer
            .analyze(&self.window.red_values(), &self.window.infrared_values())
        {
            None => MeasurementResult::failure(
                "Not enough signal was collected. Keep your finger steady on the lens and try again.",
                duration_secs,
                self.samples_accepted,
                average_quality,
                now_ms,
            ),
            Some(outcome) => match outcome.heart_rate_bpm {
                None => MeasurementResult::failure(
                    "No stable pulse could be found in the signal. Adjust your finger and try again.",
                    duration_secs,
                    self.samples_accepted,
                    average_quality,
                    now_ms,
                ),
                Some(bpm) => MeasurementResult {
                    id: Uuid::new_v4(),
                    success: true,
                    heart_rate_bpm: Some(bpm),
                    confidence: outcome.confidence,
                    signal_quality: outcome.signal_quality,
                    peaks_detected: outcome.peak_count,
                    hrv: outcome.hrv,
                    arrhythmia: Some(outcome.arrhythmia),
                    spo2: outcome.spo2,
                    duration_secs,
                    sample_count: self.samples_accepted,
                    average_quality,
                    error: None,
                    completed_at_ms: now_ms,
                },
            },
        };

        self.state = SessionState::Complete;
        self.result = Some(result.clone());
        result
    }

    fn bad_transition(&self, action: &'static str) -> PpgError {
        PpgError::InvalidTransition {
            from: self.state.name(),
            action,
        }
    }
}
