//! Integer geometry along the horizontal stacking axis

/// Leading/trailing edges of a panel along the stack, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub leading: i32,
    pub trailing: i32,
}

impl Span {
    pub const fn new(leading: i32, trailing: i32) -> Self {
        Self { leading, trailing }
    }

    pub const fn len(&self) -> i32 {
        self.trailing - self.leading
    }

    pub const fn is_empty(&self) -> bool {
        self.trailing <= self.leading
    }

    /// Inclusive on both edges
    pub const fn contains(&self, position: i32) -> bool {
        self.leading <= position && position <= self.trailing
    }
}

/// Window chrome insets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const fn left(left: i32) -> Self {
        Self {
            left,
            top: 0,
            right: 0,
            bottom: 0,
        }
    }
}

/// Axis-aligned rectangle, right/bottom exclusive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether `other` lies fully inside this rect
    pub const fn contains(&self, other: &Rect) -> bool {
        !self.is_empty()
            && self.left <= other.left
            && self.top <= other.top
            && self.right >= other.right
            && self.bottom >= other.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_edges() {
        let span = Span::new(100, 250);
        assert!(span.contains(100));
        assert!(span.contains(250));
        assert!(!span.contains(251));
        assert_eq!(span.len(), 150);
    }

    #[test]
    fn test_rect_contains() {
        let parent = Rect::new(0, 0, 400, 300);
        let mut child = Rect::new(10, 10, 50, 50);
        assert!(parent.contains(&child));

        child.offset(380, 0);
        assert!(!parent.contains(&child));
        assert!(parent.contains_point(0, 0));
        assert!(!parent.contains_point(400, 0));
    }
}
