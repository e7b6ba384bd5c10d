//! Nested scrolling from content panels into the header

use shelf_core::{ScrollAxes, ScrollSource};

use crate::behavior::{NestedScrollTarget, Snappable};
use crate::content::ContentId;
use crate::coordinator::Coordinator;

impl NestedScrollTarget for Coordinator {
    fn on_start_nested_scroll(
        &mut self,
        target: ContentId,
        axes: ScrollAxes,
        _source: ScrollSource,
    ) -> bool {
        let (width, _) = self.size();
        let started = match self.contents.get(target) {
            // Only when the content can't fit without pushing the header
            Some(content) => {
                axes.horizontal()
                    && self.header.has_scrollable_panels()
                    && width - content.measured_width() <= self.header.width()
            }
            None => false,
        };

        if started {
            self.cancel_animation();
            self.gesture.reset();
        }
        self.last_nested_child = None;
        tracing::debug!("nested scroll start: granted={}", started);
        started
    }

    fn on_nested_pre_scroll(&mut self, _target: ContentId, dx: i32, _source: ScrollSource) -> i32 {
        if dx == 0 {
            return 0;
        }
        let (min, max) = if dx < 0 {
            // Revealing: quick-return panels come back first
            let min = -self.header.total_scroll_range();
            (min, min + self.header.down_nested_pre_scroll_range())
        } else {
            (-self.header.up_nested_pre_scroll_range(), 0)
        };
        if min == max {
            return 0;
        }
        self.scroll(dx, min, max)
    }

    fn on_nested_scroll(
        &mut self,
        _target: ContentId,
        _dx_consumed: i32,
        dx_unconsumed: i32,
        _source: ScrollSource,
    ) -> i32 {
        // Content hit its own start; the rest reveals the header
        if dx_unconsumed < 0 {
            let min = -self.header.down_nested_scroll_range();
            return self.scroll(dx_unconsumed, min, 0);
        }
        0
    }

    fn on_stop_nested_scroll(&mut self, target: ContentId, source: ScrollSource) {
        if source == ScrollSource::Touch {
            self.snap_to_child_if_needed();
        }
        self.last_nested_child = self.contents.contains_key(target).then_some(target);
    }
}
