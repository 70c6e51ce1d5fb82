//! Frame source abstraction
//!
//! The pipeline pulls frames through [`FrameSource`] so sessions run the
//! same against a platform camera or the simulator. Sources must release
//! their device on `release()` from any state; the session guarantees it
//! calls this exactly once per acquisition, including on error paths.

use ppg_core::{AcquisitionErrorKind, PpgResult};

use crate::frame::FrameBuffer;

/// A device or synthetic producer of camera frames
pub trait FrameSource {
    /// Pull the next frame. Blocks until one is available or fails with an
    /// acquisition error.
    fn next_frame(&mut self) -> PpgResult<FrameBuffer>;

    /// Frames per second the source delivers at.
    fn frame_rate(&self) -> f64;

    /// Release the underlying device. Must be idempotent.
    fn release(&mut self);
}

/// Torch control for sources that have one
pub trait TorchControl {
    /// Turn the torch on or off. Sources without a torch report
    /// [`AcquisitionErrorKind::Unsupported`].
    fn set_torch(&mut self, on: bool) -> PpgResult<()>;
}

/// Map a platform error name onto an acquisition error class.
///
/// Names follow the conventions camera stacks use for getUserMedia-style
/// failures; anything unrecognised maps to `Unknown`.
pub fn classify_device_error(name: &str) -> AcquisitionErrorKind {
    match name {
        "NotAllowedError" | "PermissionDeniedError" => AcquisitionErrorKind::PermissionDenied,
        "NotFoundError" | "DevicesNotFoundError" => AcquisitionErrorKind::DeviceNotFound,
        "NotReadableError" | "TrackStartError" | "AbortError" => AcquisitionErrorKind::DeviceBusy,
        "OverconstrainedError" | "ConstraintNotSatisfiedError" => AcquisitionErrorKind::Unsupported,
        "SecurityError" => AcquisitionErrorKind::SecurityBlocked,
        _ => AcquisitionErrorKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_error_names() {
        assert_eq!(
            classify_device_error("NotAllowedError"),
            AcquisitionErrorKind::PermissionDenied
        );
        assert_eq!(
            classify_device_error("NotFoundError"),
            AcquisitionErrorKind::DeviceNotFound
        );
        assert_eq!(
            classify_device_error("NotReadableError"),
            AcquisitionErrorKind::DeviceBusy
        );
        assert_eq!(
            classify_device_error("OverconstrainedError"),
            AcquisitionErrorKind::Unsupported
        );
        assert_eq!(
            classify_device_error("SecurityError"),
            AcquisitionErrorKind::SecurityBlocked
        );
    }

    #[test]
    fn test_unknown_error_name() {
        assert_eq!(
            classify_device_error("SomethingElse"),
            AcquisitionErrorKind::Unknown
        );
    }
}
