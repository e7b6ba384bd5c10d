//! Fixed-duration integer tween
//!
//! Moves an integer value from `from` to `to` over a fixed duration through an
//! easing curve. Intermediate values truncate toward `from`; the last frame
//! always lands exactly on `to`.

use crate::easing::Easing;

#[derive(Clone, Debug)]
pub struct Tween {
    from: i32,
    to: i32,
    duration_ms: u32,
    easing: Easing,
    start_time_ms: Option<f64>,
    value: i32,
    finished: bool,
}

impl Tween {
    pub fn new(from: i32, to: i32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            start_time_ms: None,
            value: from,
            finished: false,
        }
    }

    /// Value at the given frame time. The first call pins the start time.
    pub fn advance(&mut self, frame_time_ms: f64) -> i32 {
        if self.finished {
            return self.value;
        }

        let start = *self.start_time_ms.get_or_insert(frame_time_ms);
        let elapsed = (frame_time_ms - start).max(0.0);

        if self.duration_ms == 0 || elapsed >= self.duration_ms as f64 {
            self.value = self.to;
            self.finished = true;
            return self.value;
        }

        let progress = (elapsed / self.duration_ms as f64) as f32;
        let eased = self.easing.apply(progress);
        self.value = self.from + ((self.to - self.from) as f32 * eased) as i32;
        self.value
    }

    /// Stop at the current value
    pub fn cancel(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn target(&self) -> i32 {
        self.to
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_start_value() {
        let mut tween = Tween::new(0, -200, 300, Easing::decelerate());
        assert_eq!(tween.advance(1_000.0), 0);
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_decelerate_halfway() {
        let mut tween = Tween::new(0, -200, 300, Easing::decelerate());
        tween.advance(0.0);
        // 0.75 of the way at half time
        assert_eq!(tween.advance(150.0), -150);
    }

    #[test]
    fn test_lands_on_target() {
        let mut tween = Tween::new(-37, 0, 100, Easing::decelerate());
        tween.advance(0.0);
        tween.advance(50.0);
        assert_eq!(tween.advance(100.0), 0);
        assert!(tween.is_finished());
        // Finished tweens hold their value
        assert_eq!(tween.advance(500.0), 0);
    }

    #[test]
    fn test_cancel_holds_current_value() {
        let mut tween = Tween::new(0, 100, 200, Easing::Linear);
        tween.advance(0.0);
        let mid = tween.advance(100.0);
        tween.cancel();
        assert_eq!(tween.advance(200.0), mid);
        assert_eq!(mid, 50);
    }
}
