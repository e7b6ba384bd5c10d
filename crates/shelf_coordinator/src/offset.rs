//! Header offset storage and per-panel offset interpolation

use crate::flags::ScrollFlags;
use crate::header::Header;

/// Current header translation
///
/// `offset` is where the header is drawn. When a panel interpolator remaps
/// the offset, `offset_delta` holds the difference to the un-interpolated
/// value so `offset + offset_delta` is the logical scroll position that
/// scrolling siblings follow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OffsetStore {
    pub offset: i32,
    pub offset_delta: i32,
}

impl OffsetStore {
    pub fn logical_offset(&self) -> i32 {
        self.offset + self.offset_delta
    }
}

/// Remap `offset` through the interpolator of the panel it currently falls
/// in. Offsets outside any interpolated panel come back unchanged.
pub fn interpolate_offset(header: &Header, offset: i32) -> i32 {
    let position = offset.abs();
    let Some(index) = header.child_index_on_offset(offset) else {
        return offset;
    };
    let (Some(panel), Some(span)) = (header.panel_at(index), header.span_at(index)) else {
        return offset;
    };
    let Some(interpolator) = panel.interpolator else {
        return offset;
    };

    let mut scrollable = 0;
    if panel.flags.contains(ScrollFlags::SCROLL) {
        scrollable += panel.width_with_margins();
        if panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
            scrollable -= panel.min_width;
        }
    }
    if panel.fits_insets {
        scrollable -= header.left_inset();
    }
    if scrollable <= 0 {
        return offset;
    }

    let within = position - span.leading;
    let eased = interpolator.apply(within as f32 / scrollable as f32);
    let diff = (scrollable as f32 * eased).round() as i32;
    offset.signum() * (span.leading + diff)
}
