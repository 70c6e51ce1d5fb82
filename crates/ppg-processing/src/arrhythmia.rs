//! Heuristic rhythm screen
//!
//! Rule-based classification over an RR-interval series. This is a coarse
//! irregularity flag for user feedback, not a diagnostic instrument; the
//! rules fire in a fixed precedence order.

use ppg_core::{ArrhythmiaKind, ArrhythmiaResult, ArrhythmiaSeverity};

/// Coefficient of variation above which the rhythm counts as irregular
const IRREGULARITY_CV: f64 = 0.3;

/// Classify an RR-interval series (milliseconds).
pub fn classify(rr_ms: &[f64]) -> ArrhythmiaResult {
    if rr_ms.len() < 2 {
        return ArrhythmiaResult {
            kind: ArrhythmiaKind::InsufficientData,
            detected: false,
            confidence: 0,
            severity: ArrhythmiaSeverity::None,
            rr_cv: 0.0,
            mean_bpm: 0.0,
        };
    }

    let n = rr_ms.len() as f64;
    let mean_rr = rr_ms.iter().sum::<f64>() / n;
    let variance = rr_ms.iter().map(|rr| (rr - mean_rr).powi(2)).sum::<f64>() / n;
    let cv = if mean_rr > 0.0 {
        variance.sqrt() / mean_rr
    } else {
        0.0
    };
    let bpm = if mean_rr > 0.0 { 60_000.0 / mean_rr } else { 0.0 };

    if cv > IRREGULARITY_CV && bpm > 90.0 {
        return ArrhythmiaResult {
            kind: ArrhythmiaKind::PossibleAtrialFibrillation,
            detected: true,
            confidence: (cv * 100.0).round().min(95.0) as u8,
            severity: ArrhythmiaSeverity::High,
            rr_cv: cv,
            mean_bpm: bpm,
        };
    }

    if bpm < 50.0 {
        return ArrhythmiaResult {
            kind: ArrhythmiaKind::Bradycardia,
            detected: true,
            confidence: 90,
            severity: ArrhythmiaSeverity::Medium,
            rr_cv: cv,
            mean_bpm: bpm,
        };
    }

    if bpm > 120.0 {
        return ArrhythmiaResult {
            kind: ArrhythmiaKind::Tachycardia,
            detected: true,
            confidence: 90,
            severity: ArrhythmiaSeverity::Medium,
            rr_cv: cv,
            mean_bpm: bpm,
        };
    }

    ArrhythmiaResult {
        kind: ArrhythmiaKind::Normal,
        detected: false,
        confidence: 95,
        severity: ArrhythmiaSeverity::None,
        rr_cv: cv,
        mean_bpm: bpm,
    }
}
