//! Signal processing for the PPG vitals pipeline
//!
//! Stages run in a fixed order over a window snapshot: conditioning, peak
//! detection, rate/confidence estimation, then HRV, the rhythm screen and
//! SpO2. [`SignalAnalyzer`] bundles the stages behind one call; the stage
//! modules stay public for callers that need a single step.

pub mod analyzer;
pub mod arrhythmia;
pub mod conditioner;
pub mod config;
pub mod hrv;
pub mod peaks;
pub mod spo2;
pub mod vitals;

pub use analyzer::{AnalysisOutcome, SignalAnalyzer};
pub use config::AnalysisConfig;
