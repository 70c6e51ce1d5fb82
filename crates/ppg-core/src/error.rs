//! Error handling for the PPG vitals pipeline
//!
//! Acquisition failures carry a retryable flag and a user-facing message;
//! insufficient-data conditions are modelled as `Option`/enum values at the
//! call sites, never as errors.

use core::fmt;

/// Result type alias for pipeline operations
pub type PpgResult<T> = Result<T, PpgError>;

/// Error type for all pipeline operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PpgError {
    /// Pixel buffer doesn't match its declared geometry
    InvalidFrame {
        /// Description of the frame problem
        reason: String,
    },

    /// Invalid configuration value
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// Rejected state-machine transition
    InvalidTransition {
        /// State the session was in
        from: &'static str,
        /// Operation that was attempted
        action: &'static str,
    },

    /// Camera/device acquisition failure
    Acquisition {
        /// Failure classification
        kind: AcquisitionErrorKind,
        /// Device-level detail
        detail: String,
    },

    /// Unexpected failure inside conditioning/detection/analysis
    Processing {
        /// Description of the fault
        message: String,
    },
}

/// Classification of camera acquisition failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionErrorKind {
    /// User or platform denied camera permission
    PermissionDenied,
    /// No camera device present
    DeviceNotFound,
    /// Device held by another consumer
    DeviceBusy,
    /// Requested constraints not supported
    Unsupported,
    /// Access blocked by a security policy
    SecurityBlocked,
    /// Anything else
    Unknown,
}

impl AcquisitionErrorKind {
    /// Whether retrying the acquisition can succeed without user action
    /// beyond granting permission or freeing the device.
    pub fn retryable(&self) -> bool {
        !matches!(
            self,
            AcquisitionErrorKind::DeviceNotFound | AcquisitionErrorKind::SecurityBlocked
        )
    }

    /// User-facing guidance for this failure class.
    pub fn user_message(&self) -> &'static str {
        match self {
            AcquisitionErrorKind::PermissionDenied => {
                "Camera permission denied. Please allow camera access in your settings."
            }
            AcquisitionErrorKind::DeviceNotFound => "No camera found on this device.",
            AcquisitionErrorKind::DeviceBusy => {
                "Camera is currently being used by another application."
            }
            AcquisitionErrorKind::Unsupported => "Camera settings not supported on this device.",
            AcquisitionErrorKind::SecurityBlocked => "Camera access blocked by security settings.",
            AcquisitionErrorKind::Unknown => {
                "Failed to access camera. Please check your device settings."
            }
        }
    }
}

impl PpgError {
    /// Convenience constructor for acquisition errors.
    pub fn acquisition(kind: AcquisitionErrorKind, detail: impl Into<String>) -> Self {
        PpgError::Acquisition {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PpgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PpgError::InvalidFrame { reason } => {
                write!(f, "Invalid frame: {}", reason)
            }
            PpgError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            PpgError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while session is {}", action, from)
            }
            PpgError::Acquisition { kind, detail } => {
                write!(f, "Acquisition failed: {} ({})", kind.user_message(), detail)
            }
            PpgError::Processing { message } => {
                write!(f, "Processing fault: {}", message)
            }
        }
    }
}

impl std::error::Error for PpgError {}
