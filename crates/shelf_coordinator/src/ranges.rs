//! Scroll range computation
//!
//! The three ranges a header can scroll through, derived from its panels'
//! sizes and scroll flags. Each is cached until the next size or inset change.

use std::cell::Cell;

use crate::flags::ScrollFlags;
use crate::panel::Panel;

/// How far the header can scroll off in total
pub fn total_scroll_range(panels: &[&Panel], left_inset: i32) -> i32 {
    let mut range = 0;
    for panel in panels {
        if !panel.flags.contains(ScrollFlags::SCROLL) {
            // Panels behind a fixed one can't scroll under it
            break;
        }
        range += panel.width_with_margins();
        if panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
            range -= panel.min_width;
            break;
        }
    }
    (range - left_inset).max(0)
}

/// How far the header re-enters ahead of the content when scrolling back
pub fn down_nested_pre_scroll_range(panels: &[&Panel], left_inset: i32) -> i32 {
    let mut range = 0;
    for panel in panels.iter().rev() {
        if panel.flags.contains(ScrollFlags::QUICK_RETURN) {
            range += panel.margin_left + panel.margin_right;
            if panel.flags.contains(ScrollFlags::ENTER_ALWAYS_COLLAPSED) {
                range += panel.min_width;
            } else if panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
                range += panel.width - panel.min_width;
            } else {
                range += panel.width - left_inset;
            }
        } else if range > 0 {
            break;
        }
    }
    range.max(0)
}

/// How far the header re-enters once the content has scrolled back to its start
pub fn down_nested_scroll_range(panels: &[&Panel], left_inset: i32) -> i32 {
    let mut range = 0;
    for panel in panels {
        if !panel.flags.contains(ScrollFlags::SCROLL) {
            break;
        }
        range += panel.width_with_margins();
        if panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
            range -= panel.min_width + left_inset;
            break;
        }
    }
    range.max(0)
}

/// Memoized ranges, invalidated together
#[derive(Debug, Default)]
pub struct RangeCache {
    total: Cell<Option<i32>>,
    down_pre: Cell<Option<i32>>,
    down: Cell<Option<i32>>,
}

impl RangeCache {
    pub fn invalidate(&self) {
        self.total.set(None);
        self.down_pre.set(None);
        self.down.set(None);
    }

    pub fn total(&self, compute: impl FnOnce() -> i32) -> i32 {
        cached(&self.total, compute)
    }

    pub fn down_pre(&self, compute: impl FnOnce() -> i32) -> i32 {
        cached(&self.down_pre, compute)
    }

    pub fn down(&self, compute: impl FnOnce() -> i32) -> i32 {
        cached(&self.down, compute)
    }

    #[cfg(test)]
    fn is_cleared(&self) -> bool {
        self.total.get().is_none() && self.down_pre.get().is_none() && self.down.get().is_none()
    }
}

fn cached(slot: &Cell<Option<i32>>, compute: impl FnOnce() -> i32) -> i32 {
    if let Some(value) = slot.get() {
        return value;
    }
    let value = compute();
    slot.set(Some(value));
    value
}
