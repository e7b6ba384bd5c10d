//! Behavior traits
//!
//! The coordinator reacts to three kinds of input: direct pointer drags on
//! the header, nested scroll deltas from a content panel, and the end of a
//! gesture (snap). Each gets its own trait so hosts can drive them
//! independently.

use shelf_core::{PointerEvent, ScrollAxes, ScrollSource};

use crate::content::ContentId;
use crate::header::Header;

/// Overrides the default drag policy. Return false to ignore drags.
pub type DragCallback = Box<dyn Fn(&Header) -> bool>;

/// Dragging the header directly with a pointer
pub trait Draggable {
    /// Whether a pointer going down on the header may start a drag
    fn can_drag(&self) -> bool;

    /// Lowest offset a drag can reach
    fn max_drag_offset(&self) -> i32;

    /// Range a fling after a drag may travel
    fn scroll_range_for_drag_fling(&self) -> i32;

    /// Sees every pointer event before the content does. Returns true to
    /// take the rest of the gesture.
    fn on_intercept_pointer(&mut self, event: &PointerEvent) -> bool;

    /// Handle a pointer event. Returns false if the event is not ours.
    fn on_pointer_event(&mut self, event: &PointerEvent) -> bool;
}

/// Receiving nested scroll deltas from a content panel
pub trait NestedScrollTarget {
    /// Whether to take part in the scroll `target` is starting
    fn on_start_nested_scroll(
        &mut self,
        target: ContentId,
        axes: ScrollAxes,
        source: ScrollSource,
    ) -> bool;

    /// Take a share of `dx` before the content scrolls. Returns the consumed part.
    fn on_nested_pre_scroll(&mut self, target: ContentId, dx: i32, source: ScrollSource) -> i32;

    /// Take what the content could not consume. Returns the consumed part.
    fn on_nested_scroll(
        &mut self,
        target: ContentId,
        dx_consumed: i32,
        dx_unconsumed: i32,
        source: ScrollSource,
    ) -> i32;

    fn on_stop_nested_scroll(&mut self, target: ContentId, source: ScrollSource);
}

/// Settling on a panel edge when motion ends
pub trait Snappable {
    /// Start an eased move to the nearest snap edge. Returns true if one started.
    fn snap_to_child_if_needed(&mut self) -> bool;

    fn on_fling_finished(&mut self) {
        self.snap_to_child_if_needed();
    }
}
