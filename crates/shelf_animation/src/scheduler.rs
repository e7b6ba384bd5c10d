//! Frame scheduling
//!
//! Animations never poll a clock. Whoever owns an animation asks the host for
//! one more frame through [`FrameScheduler::request_frame`] and is called back
//! with the frame time. [`ManualFrameClock`] is a host that frames are pumped
//! through by hand, for tests and headless use.

use std::cell::RefCell;
use std::rc::Rc;

/// Host hook for "call me back on the next frame"
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// Scheduler that drops every request; for coordinators that are never animated
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScheduler;

impl FrameScheduler for NoopScheduler {
    fn request_frame(&self) {}
}

#[derive(Debug)]
struct ClockState {
    now_ms: f64,
    frame_interval_ms: f64,
    pending: bool,
    frames: u64,
    requests: u64,
}

/// A hand-pumped frame clock
///
/// Clones share the same clock, so one clone can be handed to a coordinator
/// while the test keeps another to pump frames.
#[derive(Clone, Debug)]
pub struct ManualFrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualFrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                now_ms: 0.0,
                frame_interval_ms: 1000.0 / target_fps.max(1) as f64,
                pending: false,
                frames: 0,
                requests: 0,
            })),
        }
    }

    pub fn set_target_fps(&self, fps: u32) {
        self.state.borrow_mut().frame_interval_ms = 1000.0 / fps.max(1) as f64;
    }

    pub fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    /// Move the clock, e.g. to line it up with pointer event timestamps
    pub fn set_now_ms(&self, now_ms: f64) {
        self.state.borrow_mut().now_ms = now_ms;
    }

    pub fn has_pending_frame(&self) -> bool {
        self.state.borrow().pending
    }

    /// Consume the pending frame request, advancing the clock by one frame.
    /// Returns the new frame time, or None if nobody asked for a frame.
    pub fn next_frame(&self) -> Option<f64> {
        let mut state = self.state.borrow_mut();
        if !state.pending {
            return None;
        }
        state.pending = false;
        state.now_ms += state.frame_interval_ms;
        state.frames += 1;
        Some(state.now_ms)
    }

    /// Pump frames into `on_frame` until no more are requested or `max_frames`
    /// have run. Returns the number of frames delivered.
    pub fn run_until_idle(&self, max_frames: usize, mut on_frame: impl FnMut(f64)) -> usize {
        let mut delivered = 0;
        while delivered < max_frames {
            let Some(time) = self.next_frame() else {
                break;
            };
            on_frame(time);
            delivered += 1;
        }
        delivered
    }

    /// Frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frames
    }

    /// Frame requests received so far
    pub fn request_count(&self) -> u64 {
        self.state.borrow().requests
    }
}

impl Default for ManualFrameClock {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&self) {
        let mut state = self.state.borrow_mut();
        state.pending = true;
        state.requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frame_without_request() {
        let clock = ManualFrameClock::default();
        assert_eq!(clock.next_frame(), None);
        assert_eq!(clock.frame_count(), 0);
    }

    #[test]
    fn test_requests_coalesce_into_one_frame() {
        let clock = ManualFrameClock::new(100);
        clock.request_frame();
        clock.request_frame();

        assert_eq!(clock.next_frame(), Some(10.0));
        assert_eq!(clock.next_frame(), None);
        assert_eq!(clock.request_count(), 2);
    }

    #[test]
    fn test_run_until_idle_follows_rerequests() {
        let clock = ManualFrameClock::new(100);
        let handle = clock.clone();
        let mut seen = Vec::new();

        clock.request_frame();
        let delivered = clock.run_until_idle(100, |t| {
            seen.push(t);
            if seen.len() < 3 {
                handle.request_frame();
            }
        });

        assert_eq!(delivered, 3);
        assert_eq!(seen, vec![10.0, 20.0, 30.0]);
        assert!(!clock.has_pending_frame());
    }
}
