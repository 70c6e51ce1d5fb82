//! Heart-rate categorisation and result validation

use serde::{Deserialize, Serialize};

use crate::result::MeasurementResult;

/// Resting heart-rate band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeartRateCategory {
    /// Below 50 BPM
    SevereBradycardia,
    /// 50..60 BPM
    Bradycardia,
    /// 60..=100 BPM
    Normal,
    /// 101..=120 BPM
    MildTachycardia,
    /// Above 120 BPM
    SevereTachycardia,
}

impl HeartRateCategory {
    pub fn from_bpm(bpm: u32) -> Self {
        if bpm < 50 {
            HeartRateCategory::SevereBradycardia
        } else if bpm < 60 {
            HeartRateCategory::Bradycardia
        } else if bpm <= 100 {
            HeartRateCategory::Normal
        } else if bpm <= 120 {
            HeartRateCategory::MildTachycardia
        } else {
            HeartRateCategory::SevereTachycardia
        }
    }

    /// Whether the band warrants prompting the user to seek advice.
    pub fn needs_attention(&self) -> bool {
        matches!(
            self,
            HeartRateCategory::SevereBradycardia | HeartRateCategory::SevereTachycardia
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeartRateCategory::SevereBradycardia => "Very low heart rate",
            HeartRateCategory::Bradycardia => "Low heart rate",
            HeartRateCategory::Normal => "Normal heart rate",
            HeartRateCategory::MildTachycardia => "Slightly elevated heart rate",
            HeartRateCategory::SevereTachycardia => "High heart rate",
        }
    }
}

/// Sanity review of a completed measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValidation {
    /// False when any error was raised
    pub is_valid: bool,
    /// Soft findings worth surfacing to the user
    pub warnings: Vec<String>,
    /// Hard findings that invalidate the measurement
    pub errors: Vec<String>,
}

/// Review a completed measurement for plausibility.
///
/// Errors invalidate the result; warnings only annotate it.
pub fn validate_measurement(result: &MeasurementResult) -> MeasurementValidation {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    match result.heart_rate_bpm {
        None => errors.push("No heart rate could be estimated".to_string()),
        Some(bpm) if !(30..=250).contains(&bpm) => {
            errors.push(format!("Heart rate {} BPM is outside the plausible range", bpm));
        }
        Some(_) => {}
    }

    if result.average_quality < 30.0 {
        warnings.push("Signal quality was low during the measurement".to_string());
    }
    if result.confidence < 50 {
        warnings.push("Low confidence in the estimate".to_string());
    }
    if result.duration_secs < 15.0 {
        warnings.push("Measurement was shorter than recommended".to_string());
    }

    MeasurementValidation {
        is_valid: errors.is_empty(),
        warnings,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(HeartRateCategory::from_bpm(49), HeartRateCategory::SevereBradycardia);
        assert_eq!(HeartRateCategory::from_bpm(50), HeartRateCategory::Bradycardia);
        assert_eq!(HeartRateCategory::from_bpm(59), HeartRateCategory::Bradycardia);
        assert_eq!(HeartRateCategory::from_bpm(60), HeartRateCategory::Normal);
        assert_eq!(HeartRateCategory::from_bpm(100), HeartRateCategory::Normal);
        assert_eq!(HeartRateCategory::from_bpm(101), HeartRateCategory::MildTachycardia);
        assert_eq!(HeartRateCategory::from_bpm(120), HeartRateCategory::MildTachycardia);
        assert_eq!(HeartRateCategory::from_bpm(121), HeartRateCategory::SevereTachycardia);
    }

    #[test]
    fn test_attention_flags() {
        assert!(HeartRateCategory::from_bpm(40).needs_attention());
        assert!(HeartRateCategory::from_bpm(150).needs_attention());
        assert!(!HeartRateCategory::from_bpm(72).needs_attention());
        assert!(!HeartRateCategory::from_bpm(110).needs_attention());
    }

    fn successful_result(bpm: u32) -> MeasurementResult {
        MeasurementResult {
            id: uuid::Uuid::new_v4(),
            success: true,
            heart_rate_bpm: Some(bpm),
            confidence: 80,
            signal_quality: 75,
            peaks_detected: 30,
            hrv: None,
            arrhythmia: None,
            spo2: None,
            duration_secs: 30.0,
            sample_count: 600,
            average_quality: 75.0,
            error: None,
            completed_at_ms: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_validation_clean_result() {
        let validation = validate_measurement(&successful_result(72));
        assert!(validation.is_valid);
        assert!(validation.warnings.is_empty());
        assert!(validation.errors.is_empty());
    }

    #[test]
    fn test_validation_missing_heart_rate() {
        let mut result = successful_result(72);
        result.heart_rate_bpm = None;
        let validation = validate_measurement(&result);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors.len(), 1);
    }

    #[test]
    fn test_validation_implausible_rate() {
        let validation = validate_measurement(&successful_result(260));
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_validation_warnings_accumulate() {
        let mut result = successful_result(72);
        result.average_quality = 20.0;
        result.confidence = 40;
        result.duration_secs = 10.0;
        let validation = validate_measurement(&result);
        assert!(validation.is_valid);
        assert_eq!(validation.warnings.len(), 3);
    }
}
