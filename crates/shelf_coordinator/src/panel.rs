//! Header panels

use shelf_animation::Easing;
use slotmap::new_key_type;

use crate::flags::{CollapseMode, ScrollFlags};

new_key_type! {
    pub struct PanelId;
}

/// One panel of the header stack, with its measured size and scroll metadata
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub width: i32,
    pub min_width: i32,
    pub margin_left: i32,
    pub margin_right: i32,
    pub flags: ScrollFlags,
    /// Remaps the offset while this panel is scrolling; `None` scrolls 1:1
    pub interpolator: Option<Easing>,
    /// The panel applies window insets itself
    pub fits_insets: bool,
    pub collapse_mode: CollapseMode,
    pub parallax_multiplier: f32,
}

impl Panel {
    pub fn new(width: i32) -> Self {
        Self {
            width,
            min_width: 0,
            margin_left: 0,
            margin_right: 0,
            flags: ScrollFlags::SCROLL,
            interpolator: None,
            fits_insets: false,
            collapse_mode: CollapseMode::Off,
            parallax_multiplier: 0.5,
        }
    }

    pub fn with_min_width(mut self, min_width: i32) -> Self {
        self.min_width = min_width;
        self
    }

    pub fn with_margins(mut self, left: i32, right: i32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    pub fn with_flags(mut self, flags: ScrollFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_interpolator(mut self, easing: Easing) -> Self {
        self.interpolator = Some(easing);
        self
    }

    pub fn with_fits_insets(mut self, fits: bool) -> Self {
        self.fits_insets = fits;
        self
    }

    pub fn with_collapse_mode(mut self, mode: CollapseMode) -> Self {
        self.collapse_mode = mode;
        self
    }

    pub fn with_parallax_multiplier(mut self, multiplier: f32) -> Self {
        self.parallax_multiplier = multiplier;
        self
    }

    pub fn width_with_margins(&self) -> i32 {
        self.width + self.margin_left + self.margin_right
    }
}
