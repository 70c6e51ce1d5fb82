//! Finger-placement assessment
//!
//! Four factors are measured per frame: centre brightness, red dominance over
//! a wide region, centre-vs-corner coverage, and centre contrast. Each factor
//! scores tiered points against the camera profile; the composite score feeds
//! a rolling stability measure so guidance doesn't flicker frame to frame.

use std::collections::VecDeque;

use ppg_core::QualityAssessment;

use crate::frame::FrameBuffer;
use crate::profile::CameraProfile;

/// Scores retained for the stability window
const HISTORY_LEN: usize = 10;

/// History entries required before stability is computed
const STABILITY_WARMUP: usize = 5;

/// Centre brightness below which the lens is considered uncovered
const NO_SIGNAL_BRIGHTNESS: f32 = 5.0;

/// Stateful placement assessor for one measurement session
#[derive(Debug, Clone)]
pub struct QualityAssessor {
    profile: CameraProfile,
    history: VecDeque<f32>,
}

impl QualityAssessor {
    pub fn new(profile: CameraProfile) -> Self {
        Self {
            profile,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn profile(&self) -> &CameraProfile {
        &self.profile
    }

    /// Clear the stability history. Call when a new session starts.
    pub fn reset(&mut self) {
        self.history.clear();
    }

    /// Assess one frame and update the stability history.
    pub fn assess(&mut self, frame: &FrameBuffer) -> QualityAssessment {
        let min_dim = frame.min_dimension();
        let center = frame.center_stats(min_dim / 6);

        if center.brightness < NO_SIGNAL_BRIGHTNESS {
            self.push_score(0.0);
            return QualityAssessment::no_signal("Place your finger over the camera lens");
        }

        let wide = frame.center_stats(min_dim / 3);
        let corner_radius = min_dim / 10;
        let w = frame.width();
        let h = frame.height();
        let corners = [
            frame.region_stats(corner_radius, corner_radius, corner_radius),
            frame.region_stats(w - 1 - corner_radius, corner_radius, corner_radius),
            frame.region_stats(corner_radius, h - 1 - corner_radius, corner_radius),
            frame.region_stats(w - 1 - corner_radius, h - 1 - corner_radius, corner_radius),
        ];
        let corner_brightness =
            corners.iter().map(|c| c.brightness).sum::<f32>() / corners.len() as f32;

        let brightness = center.brightness;
        let red_dominance = wide.red / (wide.green + wide.blue + 1.0);
        let coverage = (brightness / (corner_brightness + 1.0) * 10.0).min(100.0);
        let contrast = center.brightness_range;

        let brightness_pts = self.profile.brightness_points(brightness);
        let red_pts = self.profile.red_dominance_tiers.points(red_dominance);
        let coverage_pts = self.profile.coverage_tiers.points(coverage);
        let contrast_pts = self.profile.contrast_tiers.points(contrast);
        let score =
            (brightness_pts + red_pts + coverage_pts + contrast_pts).min(100) as f32;

        let acceptable = brightness >= self.profile.min_brightness
            && brightness <= self.profile.max_brightness
            && red_dominance >= self.profile.min_red_dominance
            && coverage >= self.profile.min_coverage
            && contrast >= self.profile.min_contrast;

        let message = self.guidance(
            brightness,
            [brightness_pts, red_pts, coverage_pts, contrast_pts],
            score as u8,
        );

        self.push_score(score);

        QualityAssessment {
            finger_detected: true,
            score: score as u8,
            acceptable,
            message,
            brightness,
            red_dominance,
            coverage,
            contrast,
            stability: self.stability(),
        }
    }

    /// Guidance keyed to the weakest factor; ties resolve in factor order.
    fn guidance(&self, brightness: f32, points: [u8; 4], score: u8) -> String {
        if score >= 90 {
            return "Good placement, hold steady".to_string();
        }

        let weakest = points
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| **p)
            .map(|(i, _)| i)
            .unwrap_or(0);

        match weakest {
            0 => {
                if brightness < self.profile.brightness_good.0 {
                    if self.profile.torch_assumed {
                        "Too dark, make sure the torch is on".to_string()
                    } else {
                        "Too dark, move closer to a light source".to_string()
                    }
                } else {
                    "Too bright, ease your finger off slightly".to_string()
                }
            }
            1 => "Cover the lens fully with the pad of your finger".to_string(),
            2 => "Press your finger flat over the whole lens".to_string(),
            _ => "Hold still and press gently".to_string(),
        }
    }

    fn push_score(&mut self, score: f32) {
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(score);
    }

    /// Score stability over recent history: neutral until warmed up, then
    /// `max(0, 100 - 2 * stddev)`.
    fn stability(&self) -> f32 {
        if self.history.len() < STABILITY_WARMUP {
            return 50.0;
        }
        let n = self.history.len() as f32;
        let mean = self.history.iter().sum::<f32>() / n;
        let variance = self.history.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / n;
        (100.0 - 2.0 * variance.sqrt()).max(0.0)
    }
}
