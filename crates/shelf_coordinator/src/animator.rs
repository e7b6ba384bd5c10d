//! The header's single offset animation slot

use shelf_animation::{Fling, Tween};

/// The one animation that may drive the header offset at a time
#[derive(Clone, Debug)]
pub enum OffsetAnimation {
    /// Momentum after a drag release, in actual (drawn) offset space
    Fling(Fling),
    /// Eased move to a target, in logical offset space
    Eased(Tween),
}

impl OffsetAnimation {
    /// Step to `frame_time_ms`. Returns the offset to write, if any.
    pub fn advance(&mut self, frame_time_ms: f64) -> Option<i32> {
        match self {
            OffsetAnimation::Fling(fling) => {
                if fling.is_finished() {
                    return None;
                }
                fling.advance(frame_time_ms);
                Some(fling.current())
            }
            OffsetAnimation::Eased(tween) => {
                if tween.is_finished() {
                    return None;
                }
                Some(tween.advance(frame_time_ms))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            OffsetAnimation::Fling(fling) => fling.is_finished(),
            OffsetAnimation::Eased(tween) => tween.is_finished(),
        }
    }

    pub fn is_fling(&self) -> bool {
        matches!(self, OffsetAnimation::Fling(_))
    }

    pub fn cancel(&mut self) {
        match self {
            OffsetAnimation::Fling(fling) => fling.abort(),
            OffsetAnimation::Eased(tween) => tween.cancel(),
        }
    }

    /// Where the animation will come to rest
    pub fn target(&self) -> i32 {
        match self {
            OffsetAnimation::Fling(fling) => fling.final_position(),
            OffsetAnimation::Eased(tween) => tween.target(),
        }
    }
}

/// Duration of an eased move over `distance` pixels
///
/// With a release velocity the move takes three times as long as covering
/// the distance at that velocity. Without one it scales with the distance
/// relative to the header width. Either way it is capped at `max_ms`.
pub fn offset_animation_duration(
    distance: i32,
    velocity: f32,
    header_width: i32,
    max_ms: u32,
) -> u32 {
    let distance = distance.abs() as f32;
    let velocity = velocity.abs();

    let duration = if velocity > 0.0 {
        3.0 * (1000.0 * distance / velocity).round()
    } else if header_width > 0 {
        ((distance / header_width as f32 + 1.0) * 150.0).round()
    } else {
        return max_ms;
    };

    if !duration.is_finite() || duration >= max_ms as f32 {
        max_ms
    } else {
        duration.max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_animation::{Easing, FlingConfig};

    #[test]
    fn test_duration_from_distance() {
        // (200/400 + 1) * 150
        assert_eq!(offset_animation_duration(200, 0.0, 400, 600), 225);
        assert_eq!(offset_animation_duration(-400, 0.0, 400, 600), 300);
        assert_eq!(offset_animation_duration(0, 0.0, 400, 600), 150);
    }

    #[test]
    fn test_duration_from_velocity() {
        // 3 * 1000 * 100 / 2000
        assert_eq!(offset_animation_duration(100, -2_000.0, 400, 600), 150);
        assert_eq!(offset_animation_duration(400, 100.0, 400, 600), 600);
    }

    #[test]
    fn test_duration_without_header_width() {
        assert_eq!(offset_animation_duration(100, 0.0, 0, 600), 600);
    }

    #[test]
    fn test_eased_advance_and_cancel() {
        let mut animation = OffsetAnimation::Eased(Tween::new(0, -100, 100, Easing::Linear));
        assert_eq!(animation.advance(0.0), Some(0));
        assert_eq!(animation.advance(50.0), Some(-50));
        assert_eq!(animation.target(), -100);

        animation.cancel();
        assert!(animation.is_finished());
        assert_eq!(animation.advance(60.0), None);
    }

    #[test]
    fn test_fling_slot() {
        let fling = Fling::new(&FlingConfig::default(), 0, -3_000.0, -300, 0);
        let mut animation = OffsetAnimation::Fling(fling);
        assert!(animation.is_fling());
        assert!(!animation.is_finished());
        assert_eq!(animation.target(), -300);

        let mut t = 0.0;
        while animation.advance(t).is_some() {
            t += 16.0;
            assert!(t < 10_000.0);
        }
        assert!(animation.is_finished());
    }
}
