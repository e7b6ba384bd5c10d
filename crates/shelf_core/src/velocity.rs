//! Pointer velocity estimation
//!
//! Keeps a short rolling window of position samples and fits a least-squares
//! line through them. Samples older than the horizon, or separated from the
//! newest sample by a long pause, don't contribute.

use std::collections::VecDeque;

/// Maximum number of samples kept
const HISTORY_SIZE: usize = 20;

/// Only samples this recent (relative to the newest) are considered
const HORIZON_MS: f64 = 100.0;

/// A pause this long between samples means the pointer stopped
const ASSUME_STOPPED_MS: f64 = 40.0;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: f64,
    position: f32,
}

/// Rolling single-axis velocity tracker
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Record a position at the given time
    pub fn add_sample(&mut self, time_ms: f64, position: f32) {
        if let Some(last) = self.samples.back() {
            if time_ms < last.time_ms {
                // Out-of-order timestamps start a fresh window
                self.samples.clear();
            }
        }
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { time_ms, position });
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Estimated velocity in pixels per second, clamped to `±max_velocity`
    pub fn velocity(&self, max_velocity: f32) -> f32 {
        let Some(newest) = self.samples.back() else {
            return 0.0;
        };

        // Walk backwards collecting the contiguous recent window
        let mut window: Vec<Sample> = Vec::with_capacity(self.samples.len());
        let mut previous_time = newest.time_ms;
        for sample in self.samples.iter().rev() {
            if newest.time_ms - sample.time_ms > HORIZON_MS
                || previous_time - sample.time_ms > ASSUME_STOPPED_MS
            {
                break;
            }
            previous_time = sample.time_ms;
            window.push(*sample);
        }

        if window.len() < 2 {
            return 0.0;
        }

        let n = window.len() as f64;
        let mean_t = window.iter().map(|s| s.time_ms).sum::<f64>() / n;
        let mean_x = window.iter().map(|s| s.position as f64).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for sample in &window {
            let dt = sample.time_ms - mean_t;
            numerator += dt * (sample.position as f64 - mean_x);
            denominator += dt * dt;
        }

        if denominator <= f64::EPSILON {
            return 0.0;
        }

        // Slope is px/ms
        let velocity = (numerator / denominator * 1000.0) as f32;
        let max_velocity = max_velocity.abs();
        velocity.clamp(-max_velocity, max_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_velocity() {
        let mut tracker = VelocityTracker::new();
        for i in 0..6 {
            tracker.add_sample(i as f64 * 8.0, i as f32 * -4.0);
        }
        // -4px per 8ms
        assert!((tracker.velocity(10_000.0) + 500.0).abs() < 0.5);
    }

    #[test]
    fn test_single_sample_is_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 50.0);
        assert_eq!(tracker.velocity(8_000.0), 0.0);
    }

    #[test]
    fn test_pause_resets_window() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0.0);
        tracker.add_sample(10.0, 100.0);
        // Long pause, then the pointer is held still
        tracker.add_sample(200.0, 100.0);
        assert_eq!(tracker.velocity(8_000.0), 0.0);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0.0, 0.0);
        tracker.add_sample(1.0, 1_000.0);
        assert_eq!(tracker.velocity(8_000.0), 8_000.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = VelocityTracker::new();
        for i in 0..50 {
            tracker.add_sample(i as f64, i as f32);
        }
        assert_eq!(tracker.len(), HISTORY_SIZE);
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
