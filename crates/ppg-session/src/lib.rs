//! Session orchestration for the PPG vitals pipeline
//!
//! The synchronous [`MeasurementSession`] enforces the measurement state
//! machine and is fully testable without a clock or a camera;
//! [`SessionService`] wraps it in a tokio task wired to a frame source, with
//! commands in over mpsc and events fanned out over broadcast.

pub mod orchestrator;
pub mod scheduler;
pub mod service;
pub mod state;

pub use orchestrator::{LiveVitals, MeasurementSession, SessionConfig};
pub use scheduler::{AnalysisScheduler, DEFAULT_ANALYSIS_INTERVAL_MS};
pub use service::{SessionCommand, SessionEvent, SessionHandle, SessionService};
pub use state::SessionState;
