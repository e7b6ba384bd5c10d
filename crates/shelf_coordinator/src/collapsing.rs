//! Collapsing container
//!
//! A container that sits inside one header panel and moves its own children
//! as the header scrolls: pinned children stay put until they reach the
//! container's trailing edge, parallax children trail the header at a
//! fraction of its offset. Attach one to a header with
//! [`Header::attach_collapsing`](crate::Header::attach_collapsing).

use shelf_core::Insets;

use crate::flags::CollapseMode;
use crate::panel::Panel;

#[derive(Clone, Debug, PartialEq)]
struct CollapsingChild {
    panel: Panel,
    /// Left edge from the last layout pass
    layout_left: i32,
    /// Translation applied on top of the layout position
    offset: i32,
}

/// Container driving pin/parallax children from the header offset
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollapsingLayout {
    width: i32,
    children: Vec<CollapsingChild>,
    fits_insets: bool,
    left_inset: i32,
    current_offset: i32,
}

impl CollapsingLayout {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Add a child; its collapse mode and parallax multiplier come from the panel
    pub fn add_child(&mut self, panel: Panel) -> usize {
        self.children.push(CollapsingChild {
            panel,
            layout_left: 0,
            offset: 0,
        });
        self.children.len() - 1
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    pub fn set_fits_insets(&mut self, fits: bool) {
        self.fits_insets = fits;
    }

    /// Returns true if the kept inset changed
    pub fn apply_insets(&mut self, insets: Insets) -> bool {
        let left = if self.fits_insets { insets.left } else { 0 };
        if left == self.left_inset {
            return false;
        }
        self.left_inset = left;
        true
    }

    /// Place children at their leading margins, shifting those that don't
    /// handle insets themselves out of the inset area
    pub fn layout(&mut self) {
        let inset = self.left_inset;
        for child in &mut self.children {
            child.layout_left = child.panel.margin_left;
            if inset > 0 && !child.panel.fits_insets && child.layout_left < inset {
                child.layout_left += inset;
            }
        }
        let offset = self.current_offset;
        self.apply_offset(offset);
    }

    /// Minimum width implied by pinned children (width plus margins), if any
    pub fn pinned_min_width(&self) -> Option<i32> {
        self.children
            .iter()
            .filter(|child| child.panel.collapse_mode == CollapseMode::Pin)
            .map(|child| child.panel.width_with_margins())
            .last()
    }

    /// How far a pinned child can travel before it hits our trailing edge
    pub fn max_offset_for_pin_child(&self, index: usize) -> i32 {
        self.children
            .get(index)
            .map(|child| {
                self.width - child.layout_left - child.panel.width - child.panel.margin_right
            })
            .unwrap_or(0)
    }

    pub fn on_offset_changed(&mut self, header_offset: i32) {
        self.current_offset = header_offset;
        self.apply_offset(header_offset);
    }

    fn apply_offset(&mut self, header_offset: i32) {
        for index in 0..self.children.len() {
            let local = match self.children[index].panel.collapse_mode {
                CollapseMode::Pin => {
                    let max = self.max_offset_for_pin_child(index).max(0);
                    (-header_offset).clamp(0, max)
                }
                CollapseMode::Parallax => {
                    let multiplier = self.children[index].panel.parallax_multiplier;
                    (-header_offset as f32 * multiplier).round() as i32
                }
                CollapseMode::Off => 0,
            };
            self.children[index].offset = local;
        }
    }

    pub fn current_offset(&self) -> i32 {
        self.current_offset
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Translation currently applied to a child
    pub fn child_offset(&self, index: usize) -> Option<i32> {
        self.children.get(index).map(|child| child.offset)
    }

    /// Left edge of a child within the container, translation included
    pub fn child_left(&self, index: usize) -> Option<i32> {
        self.children
            .get(index)
            .map(|child| child.layout_left + child.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CollapsingLayout {
        let mut layout = CollapsingLayout::new(300);
        layout.add_child(Panel::new(300).with_collapse_mode(CollapseMode::Parallax));
        layout.add_child(
            Panel::new(56)
                .with_margins(4, 4)
                .with_collapse_mode(CollapseMode::Pin),
        );
        layout.add_child(Panel::new(120));
        layout.layout();
        layout
    }

    #[test]
    fn test_pin_clamps_to_trailing_edge() {
        let mut layout = sample();
        // 300 - 4 - 56 - 4
        assert_eq!(layout.max_offset_for_pin_child(1), 236);

        layout.on_offset_changed(-100);
        assert_eq!(layout.child_offset(1), Some(100));

        layout.on_offset_changed(-280);
        assert_eq!(layout.child_offset(1), Some(236));
        assert_eq!(layout.child_left(1), Some(240));

        layout.on_offset_changed(0);
        assert_eq!(layout.child_offset(1), Some(0));
    }

    #[test]
    fn test_parallax_uses_multiplier() {
        let mut layout = sample();
        layout.on_offset_changed(-101);
        assert_eq!(layout.child_offset(0), Some(51));
        assert_eq!(layout.child_offset(2), Some(0));
    }

    #[test]
    fn test_min_width_from_pinned_child() {
        assert_eq!(sample().pinned_min_width(), Some(64));
        assert_eq!(CollapsingLayout::new(100).pinned_min_width(), None);
    }

    #[test]
    fn test_inset_shift() {
        let mut layout = sample();
        layout.set_fits_insets(true);
        assert!(layout.apply_insets(Insets::left(24)));
        layout.layout();

        assert_eq!(layout.child_left(0), Some(24));
        assert_eq!(layout.child_left(1), Some(28));
    }
}
