//! Live analysis throttle
//!
//! Live estimates are recomputed at most once per interval, always over the
//! latest window snapshot. Frames keep arriving at 30 fps regardless; only
//! the analysis work is gated.

/// Minimum spacing between live analysis runs, milliseconds
pub const DEFAULT_ANALYSIS_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct AnalysisScheduler {
    min_interval_ms: u64,
    last_run_ms: Option<u64>,
}

impl AnalysisScheduler {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_run_ms: None,
        }
    }

    /// Whether an analysis pass should run now. Marks the pass as taken
    /// when it answers yes.
    pub fn should_run(&mut self, now_ms: u64) -> bool {
        match self.last_run_ms {
            Some(last) if now_ms.saturating_sub(last) < self.min_interval_ms => false,
            _ => {
                self.last_run_ms = Some(now_ms);
                true
            }
        }
    }

    /// Forget the last run, the next query fires immediately.
    pub fn reset(&mut self) {
        self.last_run_ms = None;
    }
}

impl Default for AnalysisScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_INTERVAL_MS)
    }
}
