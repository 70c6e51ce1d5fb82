//! Bounded signal window
//!
//! Ring-buffer semantics over the most recent samples: once full, pushing a
//! new sample evicts the oldest. Red and infrared tracks advance in lockstep
//! with their timestamps.

use std::collections::VecDeque;

use crate::sample::ChannelSample;

/// Default capacity: 5 seconds at the 30 Hz nominal frame rate
pub const DEFAULT_WINDOW_SIZE: usize = 150;

/// Sliding window over the most recent accepted samples
#[derive(Debug, Clone)]
pub struct SignalWindow {
    capacity: usize,
    red: VecDeque<f32>,
    infrared: VecDeque<f32>,
    timestamps_ms: VecDeque<u64>,
}

impl SignalWindow {
    /// Create a window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            red: VecDeque::with_capacity(capacity),
            infrared: VecDeque::with_capacity(capacity),
            timestamps_ms: VecDeque::with_capacity(capacity),
        }
    }

    /// Append one sample, evicting the oldest when full.
    pub fn push(&mut self, sample: ChannelSample) {
        if self.red.len() == self.capacity {
            self.red.pop_front();
            self.infrared.pop_front();
            self.timestamps_ms.pop_front();
        }
        self.red.push_back(sample.red);
        self.infrared.push_back(sample.infrared);
        self.timestamps_ms.push_back(sample.timestamp_ms);
    }

    /// Contiguous snapshot of the red track, oldest first.
    pub fn red_values(&self) -> Vec<f32> {
        self.red.iter().copied().collect()
    }

    /// Contiguous snapshot of the infrared track, oldest first.
    pub fn infrared_values(&self) -> Vec<f32> {
        self.infrared.iter().copied().collect()
    }

    /// Capture timestamps, oldest first.
    pub fn timestamps_ms(&self) -> Vec<u64> {
        self.timestamps_ms.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.red.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard all samples. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.red.clear();
        self.infrared.clear();
        self.timestamps_ms.clear();
    }
}

impl Default for SignalWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: f32, t: u64) -> ChannelSample {
        ChannelSample::new(v, v * 0.5, t)
    }

    #[test]
    fn test_push_below_capacity() {
        let mut window = SignalWindow::new(4);
        window.push(sample(1.0, 10));
        window.push(sample(2.0, 20));
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        assert_eq!(window.red_values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut window = SignalWindow::new(3);
        for i in 0..5u64 {
            window.push(sample(i as f32, i * 33));
        }
        assert!(window.is_full());
        assert_eq!(window.red_values(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.timestamps_ms(), vec![66, 99, 132]);
    }

    #[test]
    fn test_tracks_advance_in_lockstep() {
        let mut window = SignalWindow::new(2);
        window.push(sample(10.0, 1));
        window.push(sample(20.0, 2));
        window.push(sample(30.0, 3));
        assert_eq!(window.red_values(), vec![20.0, 30.0]);
        assert_eq!(window.infrared_values(), vec![10.0, 15.0]);
    }

    #[test]
    fn test_clear_preserves_capacity() {
        let mut window = SignalWindow::new(8);
        window.push(sample(1.0, 1));
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 8);
    }
}
