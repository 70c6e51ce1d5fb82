//! Async session service
//!
//! Wraps a [`MeasurementSession`] and a frame source in a tokio task: a
//! command channel drives the state machine, a broadcast channel fans out
//! placement feedback, live estimates and the final result. The frame source
//! is released when the task ends, whatever path it took to get there.

use ppg_core::{MeasurementResult, PpgError, QualityAssessment};
use ppg_acquisition::{CameraProfile, FrameSource};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::orchestrator::{LiveVitals, MeasurementSession, SessionConfig};
use crate::scheduler::AnalysisScheduler;
use crate::state::SessionState;

const COMMAND_BUFFER: usize = 16;
const EVENT_BUFFER: usize = 256;

/// Commands accepted by a running service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Stop,
    Retake,
    Reset,
    Shutdown,
}

/// Events fanned out to subscribers
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged(SessionState),
    Placement(QualityAssessment),
    Live(LiveVitals),
    Completed(MeasurementResult),
    AcquisitionFailed {
        retryable: bool,
        message: String,
    },
}

/// Caller-side handle to a running service
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.command_tx.send(command).await.is_ok()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }
}

/// The service task state
pub struct SessionService {
    session: MeasurementSession,
    source: Box<dyn FrameSource + Send>,
    scheduler: AnalysisScheduler,
    command_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<SessionEvent>,
    last_frame_ms: u64,
}

impl SessionService {
    pub fn new(
        source: Box<dyn FrameSource + Send>,
        profile: CameraProfile,
        config: SessionConfig,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
        let handle = SessionHandle {
            command_tx,
            event_tx: event_tx.clone(),
        };
        let service = Self {
            session: MeasurementSession::new(profile, config),
            source,
            scheduler: AnalysisScheduler::default(),
            command_rx,
            event_tx,
            last_frame_ms: 0,
        };
        (service, handle)
    }

    /// Run until Shutdown or until acquisition fails. The frame source is
    /// released before this returns.
    pub async fn run(mut self) {
        let outcome = self.run_inner().await;
        self.source.release();
        info!("frame source released");
        if let Err(e) = outcome {
            warn!(error = %e, "session service stopped on error");
        }
    }

    async fn run_inner(&mut self) -> Result<(), PpgError> {
        self.session.begin_acquisition()?;
        info!("acquiring camera");

        // first frame confirms the device before the session arms
        match self.source.next_frame() {
            Ok(frame) => {
                self.last_frame_ms = frame.timestamp_ms;
                self.session.device_ready()?;
                self.emit(SessionEvent::StateChanged(self.session.state()));
                info!("camera ready");
            }
            Err(e) => {
                self.session.device_failed();
                self.emit_acquisition_failure(&e);
                return Err(e);
            }
        }

        let frame_interval =
            std::time::Duration::from_secs_f64(1.0 / self.source.frame_rate());
        let mut ticker = tokio::time::interval(frame_interval);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        None | Some(SessionCommand::Shutdown) => {
                            info!("session service shutting down");
                            return Ok(());
                        }
                        Some(command) => self.handle_command(command),
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.pump_frame() {
                        self.emit_acquisition_failure(&e);
                        return Err(e);
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        let result = match command {
            SessionCommand::Start => {
                debug!(now_ms = self.last_frame_ms, "start requested");
                self.session.start(self.last_frame_ms).map(|_| {
                    self.scheduler.reset();
                })
            }
            SessionCommand::Stop => self.session.stop(self.last_frame_ms).map(|result| {
                self.emit(SessionEvent::Completed(result));
            }),
            SessionCommand::Retake => self.session.retake(),
            SessionCommand::Reset => self.session.reset(),
            SessionCommand::Shutdown => unreachable!("handled by the run loop"),
        };

        match result {
            Ok(()) => self.emit(SessionEvent::StateChanged(self.session.state())),
            Err(e) => warn!(command = ?command, error = %e, "command rejected"),
        }
    }

    fn pump_frame(&mut self) -> Result<(), PpgError> {
        if !matches!(
            self.session.state(),
            SessionState::Armed | SessionState::Sampling
        ) {
            return Ok(());
        }

        let frame = self.source.next_frame()?;
        self.last_frame_ms = frame.timestamp_ms;
        let assessment = self.session.ingest_frame(&frame)?;
        self.emit(SessionEvent::Placement(assessment));

        if self.session.state().is_sampling() {
            if self.scheduler.should_run(self.last_frame_ms) {
                if let Some(live) = self.session.live_vitals(self.last_frame_ms) {
                    self.emit(SessionEvent::Live(live));
                }
            }
            if let Some(result) = self.session.tick(self.last_frame_ms) {
                info!(
                    success = result.success,
                    bpm = ?result.heart_rate_bpm,
                    "measurement complete"
                );
                self.emit(SessionEvent::Completed(result));
                self.emit(SessionEvent::StateChanged(self.session.state()));
            }
        }
        Ok(())
    }

    fn emit(&self, event: SessionEvent) {
        // a send error only means nobody is subscribed right now
        let _ = self.event_tx.send(event);
    }

    fn emit_acquisition_failure(&self, error: &PpgError) {
        let (retryable, message) = match error {
            PpgError::Acquisition { kind, .. } => {
                (kind.retryable(), kind.user_message().to_string())
            }
            other => (false, other.to_string()),
        };
        warn!(error = %error, retryable, "acquisition failed");
        self.emit(SessionEvent::AcquisitionFailed { retryable, message });
    }
}
