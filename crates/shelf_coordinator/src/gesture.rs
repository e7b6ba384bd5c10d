//! Single-pointer drag tracking
//!
//! Turns raw pointer events into drag deltas and a release velocity. The
//! tracker only follows the pointer that went down first; additional pointers
//! are ignored, and losing the tracked pointer aborts the gesture.
//!
//! ```text
//! Idle --POINTER_DOWN--> Tracking --DRAG--> Dragging
//!   ^                        |                  |
//!   +----- POINTER_UP / POINTER_CANCEL / POINTER_LOST
//! ```

use shelf_core::events::event_types::*;
use shelf_core::{
    EventType, PointerEvent, PointerId, PointerSample, StateMachine, StateTransitions,
    VelocityTracker,
};

use crate::config::CoordinatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer is down on the header, not yet past the touch slop
    Tracking,
    Dragging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (GestureState::Idle, POINTER_DOWN) => Some(GestureState::Tracking),
            (GestureState::Tracking, DRAG) => Some(GestureState::Dragging),
            (
                GestureState::Tracking | GestureState::Dragging,
                POINTER_UP | POINTER_CANCEL | POINTER_LOST,
            ) => Some(GestureState::Idle),
            _ => None,
        }
    }
}

/// Outcome of a move event while handling touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStep {
    /// No tracked pointer in this event; the gesture is over
    Lost,
    /// Still inside the touch slop
    Tracking,
    /// Scroll the header by this delta (last x minus new x)
    Drag(i32),
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    machine: StateMachine<GestureState>,
    active_pointer: Option<PointerId>,
    last_x: i32,
    velocity: Option<VelocityTracker>,
    touch_slop: i32,
    max_fling_velocity: f32,
    min_fling_velocity: f32,
}

impl GestureTracker {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self {
            machine: StateMachine::new(GestureState::Idle),
            active_pointer: None,
            last_x: 0,
            velocity: None,
            touch_slop: config.touch_slop,
            max_fling_velocity: config.max_fling_velocity,
            min_fling_velocity: config.min_fling_velocity,
        }
    }

    pub fn state(&self) -> GestureState {
        self.machine.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.is_in(GestureState::Dragging)
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn touch_slop(&self) -> i32 {
        self.touch_slop
    }

    /// Start tracking `pointer`, dropping whatever was tracked before
    pub fn begin(&mut self, pointer: &PointerSample) {
        self.reset();
        self.machine.send(POINTER_DOWN);
        self.active_pointer = Some(pointer.id);
        self.last_x = pointer.x as i32;
        self.velocity = Some(VelocityTracker::new());
    }

    /// Feed the velocity tracker with the tracked pointer's position
    pub fn record(&mut self, event: &PointerEvent) {
        let (Some(tracker), Some(id)) = (self.velocity.as_mut(), self.active_pointer) else {
            return;
        };
        if let Some(pointer) = event.find(id) {
            tracker.add_sample(event.timestamp_ms, pointer.x);
        }
    }

    /// Move while deciding whether to intercept. Returns true once dragging.
    pub fn intercept_move(&mut self, event: &PointerEvent) -> bool {
        let Some(id) = self.active_pointer else {
            return false;
        };
        let Some(pointer) = event.find(id) else {
            self.abort();
            return false;
        };

        let x = pointer.x as i32;
        if self.machine.is_in(GestureState::Tracking) && (x - self.last_x).abs() > self.touch_slop
        {
            self.machine.send(DRAG);
            self.last_x = x;
        }
        self.is_dragging()
    }

    /// Move while handling touches
    pub fn touch_move(&mut self, event: &PointerEvent) -> DragStep {
        let Some(id) = self.active_pointer else {
            return DragStep::Lost;
        };
        let Some(pointer) = event.find(id) else {
            self.abort();
            return DragStep::Lost;
        };

        let x = pointer.x as i32;
        let mut dx = self.last_x - x;
        if self.machine.is_in(GestureState::Tracking) && dx.abs() > self.touch_slop {
            self.machine.send(DRAG);
            // Don't jump by the slop we just crossed
            dx -= self.touch_slop * dx.signum();
        }

        if !self.is_dragging() {
            return DragStep::Tracking;
        }
        self.last_x = x;
        DragStep::Drag(dx)
    }

    /// Pointer up. Returns the release velocity if a pointer was tracked.
    pub fn release(&mut self, event: &PointerEvent) -> Option<f32> {
        self.record(event);
        let velocity = self
            .velocity
            .as_ref()
            .map(|tracker| tracker.velocity(self.max_fling_velocity))
            .map(|v| if v.abs() < self.min_fling_velocity { 0.0 } else { v });
        self.finish(event.event_type());
        velocity
    }

    pub fn cancel(&mut self) {
        self.finish(POINTER_CANCEL);
    }

    /// Clear all gesture state without logging a transition
    pub fn reset(&mut self) {
        self.machine.reset(GestureState::Idle);
        self.active_pointer = None;
        self.velocity = None;
    }

    fn abort(&mut self) {
        tracing::debug!("tracked pointer lost, aborting drag");
        self.finish(POINTER_LOST);
    }

    fn finish(&mut self, event: EventType) {
        self.machine.send(event);
        self.reset();
    }
}
