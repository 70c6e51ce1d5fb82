//! Demo: run a full measurement against the pulse simulator.
//!
//! Arms a session on the synthetic camera, measures for a few seconds while
//! printing live feedback, then prints the final result with its category
//! and validation findings.

use anyhow::Result;
use chrono::Utc;
use ppg_core::{validate_measurement, HeartRateCategory};
use ppg_acquisition::{CameraProfile, PulseSimulator, PulseSimulatorConfig};
use ppg_session::{SessionCommand, SessionConfig, SessionEvent, SessionService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let simulator = PulseSimulator::new(
        PulseSimulatorConfig {
            bpm: 72.0,
            start_ms: Utc::now().timestamp_millis() as u64,
            ..PulseSimulatorConfig::default()
        },
        42,
    );

    let config = SessionConfig {
        target_duration_secs: 10,
        ..SessionConfig::default()
    };
    let (service, handle) =
        SessionService::new(Box::new(simulator), CameraProfile::mobile(), config);
    let mut events = handle.subscribe();
    let task = tokio::spawn(service.run());

    handle.send(SessionCommand::Start).await;
    info!("measurement started");

    loop {
        match events.recv().await? {
            SessionEvent::Live(live) => {
                info!(
                    bpm = ?live.heart_rate_bpm,
                    confidence = live.confidence,
                    quality = live.signal_quality,
                    elapsed = format!("{:.1}s", live.elapsed_secs),
                    "live estimate"
                );
            }
            SessionEvent::AcquisitionFailed { retryable, message } => {
                info!(retryable, "acquisition failed: {}", message);
                break;
            }
            SessionEvent::Completed(result) => {
                if let Some(bpm) = result.heart_rate_bpm {
                    let category = HeartRateCategory::from_bpm(bpm);
                    info!(
                        bpm,
                        confidence = result.confidence,
                        category = category.label(),
                        attention = category.needs_attention(),
                        "measurement complete"
                    );
                    if let Some(hrv) = &result.hrv {
                        info!(
                            sdnn = format!("{:.1}ms", hrv.sdnn_ms),
                            rmssd = format!("{:.1}ms", hrv.rmssd_ms),
                            pnn50 = format!("{:.1}%", hrv.pnn50_pct),
                            "heart rate variability"
                        );
                    }
                    if let Some(spo2) = &result.spo2 {
                        info!(spo2 = spo2.spo2_pct, "blood oxygen estimate");
                    }
                } else {
                    info!(error = ?result.error, "measurement failed");
                }

                let validation = validate_measurement(&result);
                for warning in &validation.warnings {
                    info!("warning: {}", warning);
                }
                for error in &validation.errors {
                    info!("error: {}", error);
                }
                break;
            }
            _ => {}
        }
    }

    handle.send(SessionCommand::Shutdown).await;
    task.await?;
    Ok(())
}
