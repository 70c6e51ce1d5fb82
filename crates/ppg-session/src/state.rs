//! Measurement session states
//!
//! Sampling can only ever be entered from Armed, so a measurement never
//! starts before the camera is confirmed ready. Acquisition failures fall
//! back to Idle; completing, stopping or retaking moves through Complete and
//! back to Armed without tearing the camera down.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No camera attached
    Idle,
    /// Camera being acquired
    Acquiring,
    /// Camera ready, waiting for start
    Armed,
    /// Measurement in progress
    Sampling,
    /// Measurement finished, result available
    Complete,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Acquiring => "Acquiring",
            SessionState::Armed => "Armed",
            SessionState::Sampling => "Sampling",
            SessionState::Complete => "Complete",
        }
    }

    /// Whether `start()` is legal from this state.
    pub fn can_start(&self) -> bool {
        matches!(self, SessionState::Armed)
    }

    /// Whether frames are being folded into the signal window.
    pub fn is_sampling(&self) -> bool {
        matches!(self, SessionState::Sampling)
    }
}
