//! Scrolling content panels that follow the header

use shelf_core::Rect;
use slotmap::new_key_type;

use crate::header::Header;

new_key_type! {
    pub struct ContentId;
}

/// How a content panel's width is decided
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentWidth {
    /// Whatever the header leaves free, plus everything it can scroll away
    #[default]
    Fill,
    Fixed(i32),
}

/// A sibling of the header that scrolls its own content and nests its scroll
/// deltas into the header
#[derive(Clone, Debug, PartialEq)]
pub struct ContentPanel {
    pub width_mode: ContentWidth,
    pub margin_left: i32,
    pub margin_right: i32,
    /// Pixels this panel is pulled under the header at full overlap
    pub overlay_left: i32,
    /// Laid out against the header; false for free-standing siblings
    pub depends_on_header: bool,
    pub visible: bool,
    /// Own scroll position; 0 is the start of its content
    pub scroll_x: i32,
    measured_width: i32,
    left: i32,
    /// Distance between the header's trailing edge and our leading edge,
    /// fixed at layout
    layout_gap: i32,
}

impl ContentPanel {
    pub fn new() -> Self {
        Self {
            width_mode: ContentWidth::Fill,
            margin_left: 0,
            margin_right: 0,
            overlay_left: 0,
            depends_on_header: true,
            visible: true,
            scroll_x: 0,
            measured_width: 0,
            left: 0,
            layout_gap: 0,
        }
    }

    pub fn with_width(mut self, width: ContentWidth) -> Self {
        self.width_mode = width;
        self
    }

    pub fn with_margins(mut self, left: i32, right: i32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    pub fn with_overlay_left(mut self, overlay: i32) -> Self {
        self.overlay_left = overlay;
        self
    }

    pub fn independent(mut self) -> Self {
        self.depends_on_header = false;
        self
    }

    /// Whether the content can still scroll back toward its start
    pub fn can_scroll_backward(&self) -> bool {
        self.scroll_x > 0
    }

    pub fn measured_width(&self) -> i32 {
        self.measured_width
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.left + self.measured_width
    }

    pub fn layout_gap(&self) -> i32 {
        self.layout_gap
    }

    pub fn bounds(&self, height: i32) -> Rect {
        Rect::new(self.left, 0, self.right(), height)
    }

    /// Measure against the coordinator width and the header it follows
    pub(crate) fn measure(&mut self, available_width: i32, header: Option<&Header>) {
        self.measured_width = match (self.width_mode, header) {
            (ContentWidth::Fixed(width), _) => width,
            (ContentWidth::Fill, Some(header)) => {
                available_width - header.width() + header.total_scroll_range()
                    - self.margin_left
                    - self.margin_right
            }
            (ContentWidth::Fill, None) => available_width - self.margin_left - self.margin_right,
        }
        .max(0);
    }

    /// Place at the header's trailing edge, remembering the gap
    pub(crate) fn layout(&mut self, header_right: Option<i32>, overlap: i32) {
        match header_right {
            Some(header_right) => {
                let left = header_right + self.margin_left;
                self.left = left - overlap;
                self.layout_gap = left - header_right;
            }
            None => {
                self.left = self.margin_left;
                self.layout_gap = 0;
            }
        }
    }

    /// Follow a header move
    pub(crate) fn follow(&mut self, header_right: i32, offset_delta: i32, overlap: i32) {
        self.left = header_right + offset_delta + self.layout_gap - overlap;
    }
}

impl Default for ContentPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of the overlay applied at the header's logical offset
pub fn overlap_ratio(header: &Header, logical_offset: i32) -> f32 {
    let total = header.total_scroll_range();
    let pre_scroll_down = header.down_nested_pre_scroll_range();

    if pre_scroll_down != 0 && total + logical_offset <= pre_scroll_down {
        // Inside the quick-return pre-scroll: no overlap
        return 0.0;
    }
    let available = total - pre_scroll_down;
    if available == 0 {
        return 0.0;
    }
    1.0 + logical_offset as f32 / available as f32
}

/// Overlap in pixels, clamped to `[0, overlay]`
pub fn overlap_pixels(overlay: i32, ratio: f32) -> i32 {
    if overlay == 0 {
        return 0;
    }
    ((ratio * overlay as f32) as i32).clamp(0, overlay.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ScrollFlags;
    use crate::panel::Panel;

    #[test]
    fn test_fill_measure_adds_scroll_range() {
        let mut header = Header::new();
        header.add_panel(
            Panel::new(300)
                .with_min_width(100)
                .with_flags(ScrollFlags::SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED),
        );
        let mut content = ContentPanel::new();
        content.measure(800, Some(&header));
        // 800 - 300 + 200
        assert_eq!(content.measured_width(), 700);

        let mut fixed = ContentPanel::new().with_width(ContentWidth::Fixed(320));
        fixed.measure(800, Some(&header));
        assert_eq!(fixed.measured_width(), 320);
    }

    #[test]
    fn test_layout_keeps_gap() {
        let mut content = ContentPanel::new().with_margins(12, 0);
        content.layout(Some(300), 0);
        assert_eq!(content.left(), 312);
        assert_eq!(content.layout_gap(), 12);

        content.follow(180, 0, 0);
        assert_eq!(content.left(), 192);
        content.follow(180, -5, 10);
        assert_eq!(content.left(), 177);
    }

    #[test]
    fn test_overlap_ratio() {
        let mut header = Header::new();
        header.add_panel(Panel::new(400));
        assert_eq!(overlap_ratio(&header, 0), 1.0);
        assert_eq!(overlap_ratio(&header, -200), 0.5);
        assert_eq!(overlap_ratio(&header, -400), 0.0);

        assert_eq!(overlap_pixels(40, 0.5), 20);
        assert_eq!(overlap_pixels(40, 1.5), 40);
        assert_eq!(overlap_pixels(40, -0.2), 0);
        assert_eq!(overlap_pixels(0, 1.0), 0);
    }

    #[test]
    fn test_overlap_zero_inside_pre_scroll() {
        let mut header = Header::new();
        header.add_panel(Panel::new(250));
        header.add_panel(Panel::new(150).with_flags(ScrollFlags::QUICK_RETURN));
        assert_eq!(header.total_scroll_range(), 400);
        assert_eq!(header.down_nested_pre_scroll_range(), 150);

        assert_eq!(overlap_ratio(&header, -300), 0.0);
        assert_eq!(overlap_ratio(&header, -125), 0.5);
    }
}
