//! Optical acquisition for the PPG vitals pipeline
//!
//! Everything between the camera and the signal window: frame buffers,
//! per-frame channel sampling, finger-placement assessment against a camera
//! profile, and a deterministic pulse simulator for tests and demos.

pub mod device;
pub mod frame;
pub mod profile;
pub mod quality;
pub mod sampler;
pub mod simulator;

pub use device::{classify_device_error, FrameSource, TorchControl};
pub use frame::{FrameBuffer, RegionStats};
pub use profile::{CameraProfile, FactorTiers};
pub use quality::QualityAssessor;
pub use sampler::OpticalSampler;
pub use simulator::{PulseSimulator, PulseSimulatorConfig};
