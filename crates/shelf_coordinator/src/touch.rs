//! Dragging the header directly

use shelf_core::{PointerAction, PointerEvent, PointerSample};

use crate::behavior::Draggable;
use crate::coordinator::Coordinator;
use crate::gesture::DragStep;

impl Coordinator {
    fn is_on_header(&self, pointer: &PointerSample) -> bool {
        self.header_bounds()
            .contains_point(pointer.x as i32, pointer.y as i32)
    }

    fn begin_drag_tracking(&mut self, pointer: &PointerSample) {
        self.cancel_animation();
        self.gesture.begin(pointer);
        tracing::trace!("tracking pointer {} at x={}", pointer.id, pointer.x);
    }
}

impl Draggable for Coordinator {
    fn can_drag(&self) -> bool {
        if let Some(callback) = &self.drag_callback {
            return callback(&self.header);
        }
        match self.last_nested_child {
            // Only while the last scrolled content is back at its start
            Some(id) => self
                .contents
                .get(id)
                .map(|content| content.visible && !content.can_scroll_backward())
                .unwrap_or(false),
            None => true,
        }
    }

    fn max_drag_offset(&self) -> i32 {
        -self.header.down_nested_scroll_range()
    }

    fn scroll_range_for_drag_fling(&self) -> i32 {
        self.header.total_scroll_range()
    }

    fn on_intercept_pointer(&mut self, event: &PointerEvent) -> bool {
        if event.action == PointerAction::Move && self.gesture.is_dragging() {
            return true;
        }

        match event.action {
            PointerAction::Down => {
                self.gesture.reset();
                if let Some(pointer) = event.primary().copied() {
                    if self.can_drag() && self.is_on_header(&pointer) {
                        self.begin_drag_tracking(&pointer);
                    }
                }
            }
            PointerAction::Move => {
                self.gesture.intercept_move(event);
            }
            PointerAction::Up => self.gesture.reset(),
            PointerAction::Cancel => self.gesture.cancel(),
            PointerAction::SecondaryDown | PointerAction::SecondaryUp => {}
        }

        self.gesture.record(event);
        self.gesture.is_dragging()
    }

    fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.action {
            PointerAction::Down => {
                let Some(pointer) = event.primary().copied() else {
                    return false;
                };
                if !(self.is_on_header(&pointer) && self.can_drag()) {
                    return false;
                }
                self.begin_drag_tracking(&pointer);
            }
            PointerAction::Move => match self.gesture.touch_move(event) {
                DragStep::Lost => return false,
                DragStep::Tracking => {}
                DragStep::Drag(dx) => {
                    let min = self.max_drag_offset();
                    self.scroll(dx, min, 0);
                }
            },
            PointerAction::Up => {
                if let Some(velocity) = self.gesture.release(event) {
                    let range = self.scroll_range_for_drag_fling();
                    self.fling(-range, 0, velocity);
                }
            }
            PointerAction::Cancel => self.gesture.cancel(),
            PointerAction::SecondaryDown | PointerAction::SecondaryUp => {}
        }

        self.gesture.record(event);
        true
    }
}
