//! Camera quality profiles
//!
//! Placement scoring is tuned per camera class. Phone cameras sit directly
//! under the finger with the torch on, so the mobile profile expects a
//! bright, strongly red frame; webcams see the finger at a distance in
//! ambient light, so the desktop profile is considerably looser.

use serde::{Deserialize, Serialize};

/// Good/acceptable cut points for one scored factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorTiers {
    /// At or above this the factor scores full points
    pub good: f32,
    /// At or above this the factor scores partial points
    pub ok: f32,
}

impl FactorTiers {
    /// Points for a value against these tiers: 25 good, 15 acceptable,
    /// 5 otherwise.
    pub fn points(&self, value: f32) -> u8 {
        if value >= self.good {
            25
        } else if value >= self.ok {
            15
        } else {
            5
        }
    }
}

/// Thresholds for placement assessment on one camera class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraProfile {
    /// Hard acceptance floors, a frame failing any of these is unusable
    pub min_brightness: f32,
    pub max_brightness: f32,
    pub min_red_dominance: f32,
    pub min_coverage: f32,
    pub min_contrast: f32,

    /// Whether the camera is expected to have a torch lighting the finger.
    /// Steers dark-frame guidance toward the torch or ambient light.
    pub torch_assumed: bool,

    /// Brightness band scoring full points
    pub brightness_good: (f32, f32),
    /// Brightness band scoring partial points
    pub brightness_ok: (f32, f32),
    pub red_dominance_tiers: FactorTiers,
    pub coverage_tiers: FactorTiers,
    pub contrast_tiers: FactorTiers,
}

impl CameraProfile {
    /// Torch-lit phone camera pressed against the finger.
    pub fn mobile() -> Self {
        Self {
            min_brightness: 20.0,
            max_brightness: 240.0,
            min_red_dominance: 1.1,
            min_coverage: 30.0,
            min_contrast: 5.0,
            torch_assumed: true,
            brightness_good: (60.0, 200.0),
            brightness_ok: (40.0, 220.0),
            red_dominance_tiers: FactorTiers { good: 1.3, ok: 1.15 },
            coverage_tiers: FactorTiers { good: 60.0, ok: 40.0 },
            contrast_tiers: FactorTiers { good: 10.0, ok: 5.0 },
        }
    }

    /// Webcam in ambient light, finger held near the lens.
    pub fn desktop() -> Self {
        Self {
            min_brightness: 15.0,
            max_brightness: 250.0,
            min_red_dominance: 1.05,
            min_coverage: 20.0,
            min_contrast: 3.0,
            torch_assumed: false,
            brightness_good: (30.0, 220.0),
            brightness_ok: (20.0, 240.0),
            red_dominance_tiers: FactorTiers { good: 1.1, ok: 1.05 },
            coverage_tiers: FactorTiers { good: 30.0, ok: 15.0 },
            contrast_tiers: FactorTiers { good: 5.0, ok: 3.0 },
        }
    }

    /// Points for a brightness reading: bands rather than one-sided tiers,
    /// over- and under-exposure both lose points.
    pub fn brightness_points(&self, brightness: f32) -> u8 {
        let (good_lo, good_hi) = self.brightness_good;
        let (ok_lo, ok_hi) = self.brightness_ok;
        if (good_lo..=good_hi).contains(&brightness) {
            25
        } else if (ok_lo..=ok_hi).contains(&brightness) {
            15
        } else {
            5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_tier_points() {
        let tiers = FactorTiers { good: 60.0, ok: 40.0 };
        assert_eq!(tiers.points(75.0), 25);
        assert_eq!(tiers.points(60.0), 25);
        assert_eq!(tiers.points(45.0), 15);
        assert_eq!(tiers.points(10.0), 5);
    }

    #[test]
    fn test_brightness_band_scoring() {
        let profile = CameraProfile::mobile();
        assert_eq!(profile.brightness_points(120.0), 25);
        assert_eq!(profile.brightness_points(50.0), 15);
        assert_eq!(profile.brightness_points(210.0), 15);
        assert_eq!(profile.brightness_points(230.0), 5);
        assert_eq!(profile.brightness_points(10.0), 5);
    }

    #[test]
    fn test_desktop_is_looser_than_mobile() {
        let mobile = CameraProfile::mobile();
        let desktop = CameraProfile::desktop();
        assert!(desktop.min_brightness < mobile.min_brightness);
        assert!(desktop.max_brightness > mobile.max_brightness);
        assert!(desktop.min_red_dominance < mobile.min_red_dominance);
        assert!(desktop.min_coverage < mobile.min_coverage);
        assert!(desktop.min_contrast < mobile.min_contrast);
        assert!(desktop.red_dominance_tiers.good < mobile.red_dominance_tiers.good);
    }
}
