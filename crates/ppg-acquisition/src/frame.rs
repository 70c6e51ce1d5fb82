//! Camera frame buffer and region statistics
//!
//! Frames arrive as tightly packed RGBA bytes. All sampling works over
//! square regions clipped to the frame, described by a centre point and a
//! radius in pixels.

use ppg_core::{PpgError, PpgResult};

/// Per-channel averages over one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStats {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    /// Mean of per-pixel (r + g + b) / 3
    pub brightness: f32,
    /// Spread of per-pixel brightness inside the region
    pub brightness_range: f32,
}

/// One captured frame, RGBA, row-major
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    /// Capture time, epoch milliseconds
    pub timestamp_ms: u64,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, timestamp_ms: u64, pixels: Vec<u8>) -> PpgResult<Self> {
        if width == 0 || height == 0 {
            return Err(PpgError::InvalidFrame {
                reason: format!("degenerate geometry {}x{}", width, height),
            });
        }
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(PpgError::InvalidFrame {
                reason: format!(
                    "{}x{} frame needs {} bytes, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            timestamp_ms,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Channel averages over the square of the given radius around
    /// `(cx, cy)`, clipped to the frame.
    pub fn region_stats(&self, cx: usize, cy: usize, radius: usize) -> RegionStats {
        let x0 = cx.saturating_sub(radius);
        let y0 = cy.saturating_sub(radius);
        let x1 = (cx + radius + 1).min(self.width);
        let y1 = (cy + radius + 1).min(self.height);

        let mut red_sum = 0.0f64;
        let mut green_sum = 0.0f64;
        let mut blue_sum = 0.0f64;
        let mut bright_min = f32::INFINITY;
        let mut bright_max = f32::NEG_INFINITY;
        let mut count = 0usize;

        for y in y0..y1 {
            let row = y * self.width * 4;
            for x in x0..x1 {
                let p = row + x * 4;
                let r = self.pixels[p] as f32;
                let g = self.pixels[p + 1] as f32;
                let b = self.pixels[p + 2] as f32;
                red_sum += r as f64;
                green_sum += g as f64;
                blue_sum += b as f64;
                let brightness = (r + g + b) / 3.0;
                if brightness < bright_min {
                    bright_min = brightness;
                }
                if brightness > bright_max {
                    bright_max = brightness;
                }
                count += 1;
            }
        }

        // geometry validation guarantees at least one pixel
        let n = count as f64;
        let red = (red_sum / n) as f32;
        let green = (green_sum / n) as f32;
        let blue = (blue_sum / n) as f32;
        RegionStats {
            red,
            green,
            blue,
            brightness: (red + green + blue) / 3.0,
            brightness_range: bright_max - bright_min,
        }
    }

    /// Stats over the centred square of the given radius.
    pub fn center_stats(&self, radius: usize) -> RegionStats {
        self.region_stats(self.width / 2, self.height / 2, radius)
    }

    /// Shorter frame side, the basis for all region radii.
    pub fn min_dimension(&self) -> usize {
        self.width.min(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: usize, height: usize, rgb: [u8; 3]) -> FrameBuffer {
        let mut pixels = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        FrameBuffer::new(width, height, 0, pixels).unwrap()
    }

    #[test]
    fn test_rejects_wrong_byte_count() {
        assert!(FrameBuffer::new(4, 4, 0, vec![0; 10]).is_err());
        assert!(FrameBuffer::new(0, 4, 0, vec![]).is_err());
    }

    #[test]
    fn test_solid_frame_stats() {
        let frame = solid_frame(16, 16, [200, 60, 40]);
        let stats = frame.center_stats(4);
        assert_eq!(stats.red, 200.0);
        assert_eq!(stats.green, 60.0);
        assert_eq!(stats.blue, 40.0);
        assert_eq!(stats.brightness, 100.0);
        assert_eq!(stats.brightness_range, 0.0);
    }

    #[test]
    fn test_region_clips_to_frame() {
        let frame = solid_frame(8, 8, [100, 100, 100]);
        // corner region larger than the frame still averages cleanly
        let stats = frame.region_stats(0, 0, 20);
        assert_eq!(stats.red, 100.0);
    }

    #[test]
    fn test_region_isolates_pixels() {
        // left half red, right half dark
        let width = 8;
        let height = 4;
        let mut pixels = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                if x < 4 {
                    pixels.extend_from_slice(&[240, 10, 10, 255]);
                } else {
                    pixels.extend_from_slice(&[10, 10, 10, 255]);
                }
            }
        }
        let frame = FrameBuffer::new(width, height, 0, pixels).unwrap();
        let left = frame.region_stats(1, 2, 1);
        let right = frame.region_stats(6, 2, 1);
        assert_eq!(left.red, 240.0);
        assert_eq!(right.red, 10.0);
    }
}
