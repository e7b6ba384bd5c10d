//! Snap resolution
//!
//! When a scroll gesture ends with the header partly scrolled into a panel
//! flagged `SNAP_SCROLL`, the header settles on one of that panel's edges.

use crate::flags::ScrollFlags;
use crate::header::Header;

/// Offset to settle on from `offset`, or None if the panel under it doesn't snap
pub fn resolve_snap_target(header: &Header, offset: i32) -> Option<i32> {
    let index = header.child_index_on_offset(offset)?;
    let panel = header.panel_at(index)?;
    let span = header.span_at(index)?;
    if !panel.flags.contains(ScrollFlags::SNAP_SCROLL) {
        return None;
    }

    let mut leading = -span.leading;
    let mut trailing = -span.trailing;
    if index + 1 == header.len() {
        trailing += header.left_inset();
    }

    if panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
        trailing += panel.min_width;
    } else if panel.flags.contains(ScrollFlags::QUICK_RETURN) {
        // Quick-return panels also rest at the seam where only the
        // collapsed part is left
        let seam = trailing + panel.min_width;
        if offset < seam {
            leading = seam;
        } else {
            trailing = seam;
        }
    }

    let target = if (offset - trailing).abs() <= (leading - offset).abs() {
        trailing
    } else {
        leading
    };
    Some(target.clamp(-header.total_scroll_range(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Panel;

    fn exit_header() -> Header {
        let mut header = Header::new();
        header.add_panel(
            Panel::new(300)
                .with_min_width(100)
                .with_flags(ScrollFlags::SCROLL | ScrollFlags::SNAP | ScrollFlags::EXIT_UNTIL_COLLAPSED),
        );
        header
    }

    #[test]
    fn test_exit_until_collapsed_snaps_to_collapsed_edge() {
        let header = exit_header();
        assert_eq!(resolve_snap_target(&header, -150), Some(-200));
        assert_eq!(resolve_snap_target(&header, -90), Some(0));
    }

    #[test]
    fn test_tie_goes_to_trailing_edge() {
        let header = exit_header();
        assert_eq!(resolve_snap_target(&header, -100), Some(-200));
    }

    #[test]
    fn test_plain_scroll_panel_without_snap() {
        let mut header = Header::new();
        header.add_panel(Panel::new(300));
        assert_eq!(resolve_snap_target(&header, -150), None);
    }

    #[test]
    fn test_quick_return_seam() {
        let mut header = Header::new();
        header.add_panel(
            Panel::new(200)
                .with_min_width(50)
                .with_flags(ScrollFlags::SCROLL | ScrollFlags::SNAP | ScrollFlags::ENTER_ALWAYS),
        );
        header.add_panel(Panel::new(100).with_flags(ScrollFlags::NONE));
        assert_eq!(header.total_scroll_range(), 200);

        // Seam sits at -150; between 0 and -150 we pick the nearer end
        assert_eq!(resolve_snap_target(&header, -40), Some(0));
        assert_eq!(resolve_snap_target(&header, -120), Some(-150));
        // Past the seam we choose between the seam and full scroll
        assert_eq!(resolve_snap_target(&header, -160), Some(-150));
        assert_eq!(resolve_snap_target(&header, -190), Some(-200));
    }
}
