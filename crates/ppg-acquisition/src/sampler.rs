//! Per-frame optical sampling
//!
//! Reduces a frame to one [`ChannelSample`]: red-channel average over the
//! centred sampling square, plus an infrared approximation blended from blue
//! and green. Frames with too little red are dropped outright, a dark frame
//! means no finger is covering the lens.

use ppg_core::ChannelSample;

use crate::frame::FrameBuffer;

/// Red average below which a frame carries no usable signal
const MIN_RED_AVERAGE: f32 = 30.0;

/// Infrared approximation weights for the blue and green channels
const IR_BLUE_WEIGHT: f32 = 0.7;
const IR_GREEN_WEIGHT: f32 = 0.3;

/// Reduces frames to channel samples
#[derive(Debug, Clone, Default)]
pub struct OpticalSampler;

impl OpticalSampler {
    pub fn new() -> Self {
        Self
    }

    /// Reduce one frame. Returns `None` when the red average falls below the
    /// rejection floor.
    pub fn sample(&self, frame: &FrameBuffer) -> Option<ChannelSample> {
        let radius = frame.min_dimension() / 4;
        let stats = frame.center_stats(radius);

        if stats.red < MIN_RED_AVERAGE {
            return None;
        }

        let infrared = stats.blue * IR_BLUE_WEIGHT + stats.green * IR_GREEN_WEIGHT;
        Some(ChannelSample::new(stats.red, infrared, frame.timestamp_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuffer;

    fn solid_frame(rgb: [u8; 3], timestamp_ms: u64) -> FrameBuffer {
        let mut pixels = Vec::with_capacity(16 * 16 * 4);
        for _ in 0..16 * 16 {
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        FrameBuffer::new(16, 16, timestamp_ms, pixels).unwrap()
    }

    #[test]
    fn test_bright_red_frame_accepted() {
        let sampler = OpticalSampler::new();
        let sample = sampler.sample(&solid_frame([180, 40, 60], 123)).unwrap();
        assert_eq!(sample.red, 180.0);
        assert_eq!(sample.timestamp_ms, 123);
        // 60 * 0.7 + 40 * 0.3
        assert!((sample.infrared - 54.0).abs() < 1e-3);
    }

    #[test]
    fn test_dark_frame_rejected() {
        let sampler = OpticalSampler::new();
        assert!(sampler.sample(&solid_frame([20, 20, 20], 0)).is_none());
    }

    #[test]
    fn test_rejection_boundary() {
        let sampler = OpticalSampler::new();
        assert!(sampler.sample(&solid_frame([29, 0, 0], 0)).is_none());
        assert!(sampler.sample(&solid_frame([30, 0, 0], 0)).is_some());
    }
}
