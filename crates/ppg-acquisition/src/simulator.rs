//! Synthetic pulse source
//!
//! Renders frames the way a torch-lit fingertip looks to a phone camera: a
//! bright red centre falling off toward dark corners, with the red intensity
//! modulated by a sinusoidal pulse plus Gaussian noise. Seedable, so tests
//! and demos are reproducible end to end.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use ppg_core::{AcquisitionErrorKind, PpgError, PpgResult};

use crate::device::{FrameSource, TorchControl};
use crate::frame::FrameBuffer;

/// Tuning for the synthetic source
#[derive(Debug, Clone)]
pub struct PulseSimulatorConfig {
    /// Simulated heart rate
    pub bpm: f64,
    /// Frame geometry, pixels
    pub width: usize,
    pub height: usize,
    /// Frames per second
    pub frame_rate: f64,
    /// Standard deviation of the per-frame intensity noise
    pub noise_std: f32,
    /// When false, frames show an uncovered lens instead of a finger
    pub finger_present: bool,
    /// Epoch milliseconds of the first frame
    pub start_ms: u64,
}

impl Default for PulseSimulatorConfig {
    fn default() -> Self {
        Self {
            bpm: 72.0,
            width: 64,
            height: 64,
            frame_rate: 30.0,
            noise_std: 1.5,
            finger_present: true,
            start_ms: 1_700_000_000_000,
        }
    }
}

/// Deterministic synthetic camera
#[derive(Debug)]
pub struct PulseSimulator {
    config: PulseSimulatorConfig,
    rng: StdRng,
    noise: Normal<f32>,
    frame_index: u64,
    torch_on: bool,
    released: bool,
}

impl PulseSimulator {
    pub fn new(config: PulseSimulatorConfig, seed: u64) -> Self {
        let noise_std = config.noise_std.max(f32::MIN_POSITIVE);
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            // positive std by construction
            noise: Normal::new(0.0, noise_std).unwrap(),
            frame_index: 0,
            torch_on: true,
            released: false,
        }
    }

    /// Simulator with the default 72 BPM finger scene.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(PulseSimulatorConfig::default(), seed)
    }

    /// Simulator rendering an uncovered lens.
    pub fn no_finger(seed: u64) -> Self {
        Self::new(
            PulseSimulatorConfig {
                finger_present: false,
                ..PulseSimulatorConfig::default()
            },
            seed,
        )
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn render_finger(&mut self) -> Vec<u8> {
        let t = self.frame_index as f64 / self.config.frame_rate;
        let phase = std::f64::consts::TAU * t * self.config.bpm / 60.0;
        let pulse = 165.0 + 15.0 * phase.sin() as f32 + self.noise.sample(&mut self.rng);
        let torch_gain = if self.torch_on { 1.0f32 } else { 0.05 };

        let w = self.config.width;
        let h = self.config.height;
        let cx = w as f32 / 2.0;
        let cy = h as f32 / 2.0;
        let half_min = w.min(h) as f32 / 2.0;

        let mut pixels = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                let falloff = (1.0 - (dx * dx + dy * dy).sqrt() / half_min).max(0.0);
                let r = ((pulse * falloff + 15.0) * torch_gain).clamp(0.0, 255.0) as u8;
                let g = ((pulse * 0.25 * falloff) * torch_gain).clamp(0.0, 255.0) as u8;
                let b = ((pulse * 0.2 * falloff) * torch_gain).clamp(0.0, 255.0) as u8;
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }
        pixels
    }

    fn render_uncovered(&mut self) -> Vec<u8> {
        let w = self.config.width;
        let h = self.config.height;
        let mut pixels = Vec::with_capacity(w * h * 4);
        for _ in 0..w * h {
            let level = (8.0 + self.noise.sample(&mut self.rng)).clamp(0.0, 255.0) as u8;
            pixels.extend_from_slice(&[level, level, level, 255]);
        }
        pixels
    }
}

impl FrameSource for PulseSimulator {
    fn next_frame(&mut self) -> PpgResult<FrameBuffer> {
        if self.released {
            return Err(PpgError::acquisition(
                AcquisitionErrorKind::Unknown,
                "frame source already released",
            ));
        }

        let pixels = if self.config.finger_present {
            self.render_finger()
        } else {
            self.render_uncovered()
        };

        let frame_ms = (self.frame_index as f64 / self.config.frame_rate * 1000.0) as u64;
        let frame = FrameBuffer::new(
            self.config.width,
            self.config.height,
            self.config.start_ms + frame_ms,
            pixels,
        )?;
        self.frame_index += 1;
        Ok(frame)
    }

    fn frame_rate(&self) -> f64 {
        self.config.frame_rate
    }

    fn release(&mut self) {
        self.released = true;
    }
}

impl TorchControl for PulseSimulator {
    fn set_torch(&mut self, on: bool) -> PpgResult<()> {
        self.torch_on = on;
        Ok(())
    }
}
