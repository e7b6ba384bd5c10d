//! Per-panel scroll flags and collapse modes

use std::ops::BitOr;

/// How a panel takes part in scrolling the header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScrollFlags {
    bits: u8,
}

impl ScrollFlags {
    pub const NONE: ScrollFlags = ScrollFlags { bits: 0 };
    /// Scrolls with the content; required for any other flag to matter
    pub const SCROLL: ScrollFlags = ScrollFlags { bits: 0x01 };
    /// Exits only until its minimum width is left
    pub const EXIT_UNTIL_COLLAPSED: ScrollFlags = ScrollFlags { bits: 0x02 };
    /// Re-enters on any reverse scroll (quick return)
    pub const ENTER_ALWAYS: ScrollFlags = ScrollFlags { bits: 0x04 };
    /// Quick return re-enters only up to the minimum width at first
    pub const ENTER_ALWAYS_COLLAPSED: ScrollFlags = ScrollFlags { bits: 0x08 };
    /// Settles to its nearest edge when a scroll ends part way through
    pub const SNAP: ScrollFlags = ScrollFlags { bits: 0x10 };

    pub const QUICK_RETURN: ScrollFlags = ScrollFlags {
        bits: Self::SCROLL.bits | Self::ENTER_ALWAYS.bits,
    };
    pub const SNAP_SCROLL: ScrollFlags = ScrollFlags {
        bits: Self::SCROLL.bits | Self::SNAP.bits,
    };
    pub const COLLAPSIBLE: ScrollFlags = ScrollFlags {
        bits: Self::EXIT_UNTIL_COLLAPSED.bits | Self::ENTER_ALWAYS_COLLAPSED.bits,
    };

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0x1f }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// All bits of `other` are set
    pub const fn contains(&self, other: ScrollFlags) -> bool {
        self.bits & other.bits == other.bits
    }

    /// Any bit of `other` is set
    pub const fn intersects(&self, other: ScrollFlags) -> bool {
        self.bits & other.bits != 0
    }

    /// Scrolls and can collapse down to a minimum width
    pub const fn is_collapsible(&self) -> bool {
        self.contains(Self::SCROLL) && self.intersects(Self::COLLAPSIBLE)
    }
}

impl BitOr for ScrollFlags {
    type Output = ScrollFlags;

    fn bitor(self, rhs: ScrollFlags) -> ScrollFlags {
        ScrollFlags {
            bits: self.bits | rhs.bits,
        }
    }
}

/// How a child of a collapsing container follows the header offset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CollapseMode {
    /// Moves with its container
    #[default]
    Off,
    /// Stays in place until it hits the container's trailing edge
    Pin,
    /// Moves at a fraction of the header offset
    Parallax,
}
