//! Pointer and nested-scroll event primitives
//!
//! Unified event data for the coordinator, independent of any windowing
//! platform. Hosts translate their native touch events into [`PointerEvent`]s.

use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_CANCEL: EventType = 4;
    /// Movement exceeded the touch slop
    pub const DRAG: EventType = 6;
    /// Active pointer vanished mid-gesture
    pub const POINTER_LOST: EventType = 32;
}

/// Identifier the platform assigns to a pointer for the duration of a touch
pub type PointerId = u32;

/// What happened to the pointer(s) carried by a [`PointerEvent`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// First pointer went down
    Down,
    /// One or more pointers moved
    Move,
    /// Last pointer went up
    Up,
    /// Gesture was taken away from us
    Cancel,
    /// An additional pointer went down while another is already tracked
    SecondaryDown,
    /// A non-primary pointer went up
    SecondaryUp,
}

/// A single pointer position within an event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f32,
    pub y: f32,
}

/// A pointer event with all pointers currently down
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pointers: SmallVec<[PointerSample; 2]>,
    /// Event time in milliseconds (host clock)
    pub timestamp_ms: f64,
}

impl PointerEvent {
    fn single(action: PointerAction, id: PointerId, x: f32, y: f32, timestamp_ms: f64) -> Self {
        let mut pointers = SmallVec::new();
        pointers.push(PointerSample { id, x, y });
        Self {
            action,
            pointers,
            timestamp_ms,
        }
    }

    pub fn down(id: PointerId, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self::single(PointerAction::Down, id, x, y, timestamp_ms)
    }

    pub fn moved(id: PointerId, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self::single(PointerAction::Move, id, x, y, timestamp_ms)
    }

    pub fn up(id: PointerId, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self::single(PointerAction::Up, id, x, y, timestamp_ms)
    }

    pub fn cancel(timestamp_ms: f64) -> Self {
        Self {
            action: PointerAction::Cancel,
            pointers: SmallVec::new(),
            timestamp_ms,
        }
    }

    /// Add another pointer to this event
    pub fn with_pointer(mut self, id: PointerId, x: f32, y: f32) -> Self {
        self.pointers.push(PointerSample { id, x, y });
        self
    }

    /// First pointer of the event (the one that triggered a `Down`)
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    /// Look up a pointer by id
    pub fn find(&self, id: PointerId) -> Option<&PointerSample> {
        self.pointers.iter().find(|p| p.id == id)
    }

    /// Map the action onto a state machine event id
    pub fn event_type(&self) -> EventType {
        match self.action {
            PointerAction::Down | PointerAction::SecondaryDown => event_types::POINTER_DOWN,
            PointerAction::Move => event_types::POINTER_MOVE,
            PointerAction::Up | PointerAction::SecondaryUp => event_types::POINTER_UP,
            PointerAction::Cancel => event_types::POINTER_CANCEL,
        }
    }
}

/// Axes a nested scroll gesture runs along
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScrollAxes {
    bits: u8,
}

impl ScrollAxes {
    pub const NONE: ScrollAxes = ScrollAxes { bits: 0 };
    pub const HORIZONTAL: ScrollAxes = ScrollAxes { bits: 0b01 };
    pub const VERTICAL: ScrollAxes = ScrollAxes { bits: 0b10 };
    pub const BOTH: ScrollAxes = ScrollAxes { bits: 0b11 };

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b11 }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn horizontal(&self) -> bool {
        self.bits & Self::HORIZONTAL.bits != 0
    }

    pub const fn vertical(&self) -> bool {
        self.bits & Self::VERTICAL.bits != 0
    }
}

/// Where the deltas of a nested scroll come from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollSource {
    /// A finger is on the screen
    #[default]
    Touch,
    /// Momentum or programmatic scrolling after the finger lifted
    NonTouch,
}
