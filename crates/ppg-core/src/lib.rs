//! Core types for the PPG vitals pipeline
//!
//! This crate holds the vocabulary the rest of the workspace speaks:
//! per-frame samples, the bounded signal window, measurement results, and the
//! pipeline error taxonomy. It contains no signal processing of its own.

pub mod category;
pub mod error;
pub mod result;
pub mod sample;
pub mod window;

pub use category::{validate_measurement, HeartRateCategory, MeasurementValidation};
pub use error::{AcquisitionErrorKind, PpgError, PpgResult};
pub use result::{
    ArrhythmiaKind, ArrhythmiaResult, ArrhythmiaSeverity, HrvMetrics, MeasurementResult,
    QualityAssessment, Spo2Estimate,
};
pub use sample::{ChannelSample, SignalStats};
pub use window::{SignalWindow, DEFAULT_WINDOW_SIZE};

/// Nominal camera frame rate the pipeline is tuned for, Hz
pub const NOMINAL_SAMPLE_RATE: f64 = 30.0;
