//! The collapsible header
//!
//! A [`Header`] is an ordered stack of [`Panel`]s laid out left to right. It
//! owns the panels, the memoized scroll ranges derived from them, the
//! collapsible/collapsed visual state, any programmatic expand/collapse
//! waiting for the next layout, and the offset listeners. The offset itself
//! lives with the coordinator that moves the header.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shelf_core::{Insets, Span};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::collapsing::CollapsingLayout;
use crate::flags::ScrollFlags;
use crate::listeners::{ListenerId, OffsetListeners};
use crate::panel::{Panel, PanelId};
use crate::ranges::{self, RangeCache};

/// Stacking direction of the header's panels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// What the host should draw for the header's state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualState {
    /// Some panel can collapse to a minimum width
    pub collapsible: bool,
    /// The header currently sits at a collapsed offset
    pub collapsed: bool,
    /// Skip any state transition animation and show the new state directly
    pub jump_to_current: bool,
}

pub type VisualStateHook = Box<dyn FnMut(VisualState)>;

/// Expand/collapse request waiting to be applied
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PendingAction {
    bits: u8,
}

impl PendingAction {
    pub const NONE: PendingAction = PendingAction { bits: 0 };
    const EXPANDED: u8 = 0x1;
    const COLLAPSED: u8 = 0x2;
    const ANIMATE: u8 = 0x4;
    const FORCE: u8 = 0x8;

    pub const fn new(expanded: bool, animate: bool, force: bool) -> Self {
        let mut bits = if expanded {
            Self::EXPANDED
        } else {
            Self::COLLAPSED
        };
        if animate {
            bits |= Self::ANIMATE;
        }
        if force {
            bits |= Self::FORCE;
        }
        Self { bits }
    }

    pub const fn is_none(&self) -> bool {
        self.bits == 0
    }

    pub const fn is_expand(&self) -> bool {
        self.bits & Self::EXPANDED != 0
    }

    pub const fn is_collapse(&self) -> bool {
        self.bits & Self::COLLAPSED != 0
    }

    pub const fn animate(&self) -> bool {
        self.bits & Self::ANIMATE != 0
    }

    /// Forced actions win over a restored position on the next layout
    pub const fn is_forced(&self) -> bool {
        self.bits & Self::FORCE != 0
    }
}

struct AttachedCollapsing {
    panel: PanelId,
    listener: ListenerId,
    layout: Weak<RefCell<CollapsingLayout>>,
}

/// Collapsible header bar
pub struct Header {
    panels: SlotMap<PanelId, Panel>,
    order: Vec<PanelId>,
    /// Explicit minimum width of the whole header
    min_width: i32,
    fits_insets: bool,
    left_inset: i32,
    ranges: RangeCache,
    has_interpolator: bool,
    collapsible: bool,
    collapsed: bool,
    pending: PendingAction,
    listeners: OffsetListeners,
    visual_state_hook: Option<VisualStateHook>,
    collapsing: Vec<AttachedCollapsing>,
}

impl Header {
    pub fn new() -> Self {
        Self {
            panels: SlotMap::with_key(),
            order: Vec::new(),
            min_width: 0,
            fits_insets: false,
            left_inset: 0,
            ranges: RangeCache::default(),
            has_interpolator: false,
            collapsible: false,
            collapsed: false,
            pending: PendingAction::NONE,
            listeners: OffsetListeners::new(),
            visual_state_hook: None,
            collapsing: Vec::new(),
        }
    }

    /// Headers only stack horizontally.
    ///
    /// # Panics
    ///
    /// Panics for any orientation other than [`Orientation::Horizontal`].
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != Orientation::Horizontal {
            panic!(
                "Header is always horizontal and does not support {:?} orientation",
                orientation
            );
        }
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Append a panel at the trailing end of the stack
    pub fn add_panel(&mut self, panel: Panel) -> PanelId {
        let id = self.panels.insert(panel);
        self.order.push(id);
        self.invalidate_scroll_ranges();
        id
    }

    pub fn remove_panel(&mut self, id: PanelId) -> Option<Panel> {
        let panel = self.panels.remove(id)?;
        self.order.retain(|existing| *existing != id);
        self.invalidate_scroll_ranges();
        Some(panel)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    /// Mutable access; ranges are invalidated up front since sizes may change
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.ranges.invalidate();
        self.panels.get_mut(id)
    }

    pub fn panel_at(&self, index: usize) -> Option<&Panel> {
        self.order.get(index).and_then(|id| self.panels.get(*id))
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn ordered(&self) -> SmallVec<[&Panel; 8]> {
        self.order.iter().filter_map(|id| self.panels.get(*id)).collect()
    }

    /// Measured width: every panel plus its margins
    pub fn width(&self) -> i32 {
        self.ordered().iter().map(|p| p.width_with_margins()).sum()
    }

    pub fn min_width(&self) -> i32 {
        self.min_width
    }

    pub fn set_min_width(&mut self, min_width: i32) {
        self.min_width = min_width;
    }

    /// Laid-out left/right edges of each panel, in stack order
    pub fn spans(&self) -> SmallVec<[Span; 8]> {
        let mut cursor = 0;
        self.ordered()
            .iter()
            .map(|panel| {
                let leading = cursor + panel.margin_left;
                let trailing = leading + panel.width;
                cursor = trailing + panel.margin_right;
                Span::new(leading, trailing)
            })
            .collect()
    }

    pub fn span_at(&self, index: usize) -> Option<Span> {
        self.spans().get(index).copied()
    }

    /// Index of the first panel whose span contains `|offset|`
    pub fn child_index_on_offset(&self, offset: i32) -> Option<usize> {
        let position = offset.abs();
        self.spans().iter().position(|span| span.contains(position))
    }

    // =========================================================================
    // Scroll ranges
    // =========================================================================

    pub fn total_scroll_range(&self) -> i32 {
        self.ranges
            .total(|| ranges::total_scroll_range(&self.ordered(), self.left_inset))
    }

    /// Scroll range when pre-scrolling toward collapse
    pub fn up_nested_pre_scroll_range(&self) -> i32 {
        self.total_scroll_range()
    }

    pub fn down_nested_pre_scroll_range(&self) -> i32 {
        self.ranges
            .down_pre(|| ranges::down_nested_pre_scroll_range(&self.ordered(), self.left_inset))
    }

    pub fn down_nested_scroll_range(&self) -> i32 {
        self.ranges
            .down(|| ranges::down_nested_scroll_range(&self.ordered(), self.left_inset))
    }

    pub fn has_scrollable_panels(&self) -> bool {
        self.total_scroll_range() != 0
    }

    pub fn invalidate_scroll_ranges(&self) {
        self.ranges.invalidate();
    }

    // =========================================================================
    // Insets
    // =========================================================================

    pub fn left_inset(&self) -> i32 {
        self.left_inset
    }

    pub fn fits_insets(&self) -> bool {
        self.fits_insets
    }

    pub fn set_fits_insets(&mut self, fits: bool) {
        self.fits_insets = fits;
    }

    /// Keep the window insets if we fit them. Returns true if the kept inset changed.
    pub fn apply_insets(&mut self, insets: Insets) -> bool {
        let left = if self.fits_insets { insets.left } else { 0 };
        if left == self.left_inset {
            return false;
        }
        self.left_inset = left;
        self.invalidate_scroll_ranges();
        true
    }

    /// How much of the header should stay visible when content overlaps it
    pub fn min_width_for_visible_overlapping_content(&self) -> i32 {
        if self.min_width != 0 {
            return self.min_width * 2 + self.left_inset;
        }

        let last_min = self
            .order
            .last()
            .and_then(|id| self.panels.get(*id))
            .map(|panel| panel.min_width)
            .unwrap_or(0);
        if last_min != 0 {
            return last_min * 2 + self.left_inset;
        }

        // Guess at a third of the header
        self.width() / 3
    }

    // =========================================================================
    // Layout and visual state
    // =========================================================================

    /// Refresh everything derived from the panels after they were measured
    pub fn on_layout(&mut self) {
        self.layout_collapsing();
        self.invalidate_scroll_ranges();

        let has_interpolator = self.ordered().iter().any(|p| p.interpolator.is_some());
        self.has_interpolator = has_interpolator;

        let collapsible = self.ordered().iter().any(|p| p.flags.is_collapsible());
        if collapsible != self.collapsible {
            self.collapsible = collapsible;
            self.notify_visual_state(false);
        }
    }

    pub fn has_interpolator(&self) -> bool {
        self.has_interpolator
    }

    pub fn is_collapsible(&self) -> bool {
        self.collapsible
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapsed state for `offset` moving in `direction`, or None when no
    /// panel sits at that offset
    pub fn collapsed_at(&self, offset: i32, direction: i32) -> Option<bool> {
        let index = self.child_index_on_offset(offset)?;
        let panel = self.panel_at(index)?;
        let span = self.span_at(index)?;

        let mut collapsed = false;
        if panel.flags.contains(ScrollFlags::SCROLL) {
            let threshold = span.trailing - panel.min_width - self.left_inset;
            let entering = direction > 0
                && panel
                    .flags
                    .intersects(ScrollFlags::ENTER_ALWAYS | ScrollFlags::ENTER_ALWAYS_COLLAPSED);
            if entering || panel.flags.contains(ScrollFlags::EXIT_UNTIL_COLLAPSED) {
                collapsed = -offset >= threshold;
            }
        }
        Some(collapsed)
    }

    /// Returns true if the collapsed state changed
    pub(crate) fn set_collapsed_state(&mut self, collapsed: bool) -> bool {
        if self.collapsed == collapsed {
            return false;
        }
        self.collapsed = collapsed;
        tracing::debug!("header collapsed={}", collapsed);
        true
    }

    pub fn set_visual_state_hook(&mut self, hook: impl FnMut(VisualState) + 'static) {
        self.visual_state_hook = Some(Box::new(hook));
    }

    pub fn visual_state(&self) -> VisualState {
        VisualState {
            collapsible: self.collapsible,
            collapsed: self.collapsible && self.collapsed,
            jump_to_current: false,
        }
    }

    pub(crate) fn notify_visual_state(&mut self, jump_to_current: bool) {
        let state = VisualState {
            jump_to_current,
            ..self.visual_state()
        };
        if let Some(hook) = self.visual_state_hook.as_mut() {
            hook(state);
        }
    }

    // =========================================================================
    // Programmatic expand/collapse
    // =========================================================================

    /// Request the header to expand or collapse fully on the next layout
    pub fn set_expanded(&mut self, expanded: bool, animate: bool) {
        self.pending = PendingAction::new(expanded, animate, true);
    }

    pub fn pending_action(&self) -> PendingAction {
        self.pending
    }

    pub(crate) fn reset_pending_action(&mut self) {
        self.pending = PendingAction::NONE;
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_offset_listener(&mut self, listener: impl FnMut(i32) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_offset_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub(crate) fn dispatch_offset_updates(&mut self, offset: i32) {
        self.listeners.dispatch(offset);
    }

    /// Drive a collapsing container from this header's offset. The header
    /// only keeps a weak handle; dropping the container detaches it on the
    /// next layout.
    pub fn attach_collapsing(
        &mut self,
        panel: PanelId,
        layout: &Rc<RefCell<CollapsingLayout>>,
    ) -> Option<ListenerId> {
        if !self.panels.contains_key(panel) {
            return None;
        }
        let weak = Rc::downgrade(layout);
        let handle = weak.clone();
        let listener = self.listeners.add(move |offset| {
            if let Some(layout) = handle.upgrade() {
                layout.borrow_mut().on_offset_changed(offset);
            }
        });
        self.collapsing.push(AttachedCollapsing {
            panel,
            listener,
            layout: weak,
        });
        Some(listener)
    }

    pub fn detach_collapsing(&mut self, listener: ListenerId) -> bool {
        let before = self.collapsing.len();
        self.collapsing.retain(|attached| attached.listener != listener);
        self.listeners.remove(listener);
        self.collapsing.len() != before
    }

    /// Lay out attached containers inside their panels and take over their
    /// minimum widths
    fn layout_collapsing(&mut self) {
        let mut dead = Vec::new();
        for attached in &self.collapsing {
            let Some(layout) = attached.layout.upgrade() else {
                dead.push(attached.listener);
                continue;
            };
            let Some(panel) = self.panels.get_mut(attached.panel) else {
                dead.push(attached.listener);
                continue;
            };
            let mut layout = layout.borrow_mut();
            layout.set_width(panel.width);
            layout.apply_insets(Insets::left(self.left_inset));
            layout.layout();
            if let Some(min_width) = layout.pinned_min_width() {
                panel.min_width = min_width;
            }
        }
        for listener in dead {
            self.detach_collapsing(listener);
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Header")
            .field("panels", &self.ordered())
            .field("left_inset", &self.left_inset)
            .field("collapsible", &self.collapsible)
            .field("collapsed", &self.collapsed)
            .field("pending", &self.pending)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_panel(width: i32, min: i32) -> Panel {
        Panel::new(width)
            .with_min_width(min)
            .with_flags(ScrollFlags::SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED)
    }

    #[test]
    #[should_panic(expected = "always horizontal")]
    fn test_vertical_orientation_panics() {
        let mut header = Header::new();
        header.set_orientation(Orientation::Vertical);
    }

    #[test]
    fn test_spans_follow_margins() {
        let mut header = Header::new();
        header.add_panel(Panel::new(100).with_margins(10, 5));
        header.add_panel(Panel::new(50));

        let spans = header.spans();
        assert_eq!(spans[0], Span::new(10, 110));
        assert_eq!(spans[1], Span::new(115, 165));
        assert_eq!(header.width(), 165);
        assert_eq!(header.child_index_on_offset(-120), Some(1));
        // Inside the margin between the two panels
        assert_eq!(header.child_index_on_offset(-112), None);
        assert_eq!(header.child_index_on_offset(-200), None);
    }

    #[test]
    fn test_layout_detects_interpolator() {
        let mut header = Header::new();
        let id = header.add_panel(Panel::new(200));
        header.on_layout();
        assert!(!header.has_interpolator());

        header.panel_mut(id).unwrap().interpolator = Some(shelf_animation::Easing::decelerate());
        header.on_layout();
        assert!(header.has_interpolator());
    }

    #[test]
    fn test_ranges_invalidate_on_panel_change() {
        let mut header = Header::new();
        let id = header.add_panel(Panel::new(200));
        assert_eq!(header.total_scroll_range(), 200);

        header.panel_mut(id).unwrap().width = 260;
        assert_eq!(header.total_scroll_range(), 260);

        header.remove_panel(id);
        assert_eq!(header.total_scroll_range(), 0);
        assert!(!header.has_scrollable_panels());
    }

    #[test]
    fn test_insets_only_kept_when_fitting() {
        let mut header = Header::new();
        header.add_panel(exit_panel(300, 100));
        assert!(!header.apply_insets(Insets::left(24)));
        assert_eq!(header.left_inset(), 0);

        header.set_fits_insets(true);
        assert!(header.apply_insets(Insets::left(24)));
        assert_eq!(header.total_scroll_range(), 176);
        assert!(!header.apply_insets(Insets::left(24)));
    }

    #[test]
    fn test_collapsed_at_offset() {
        let mut header = Header::new();
        header.add_panel(exit_panel(300, 100));

        assert_eq!(header.collapsed_at(-150, -1), Some(false));
        assert_eq!(header.collapsed_at(-200, -1), Some(true));
        assert_eq!(header.collapsed_at(-400, -1), None);
    }

    #[test]
    fn test_collapsible_flip_notifies_hook() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut header = Header::new();
        let sink = seen.clone();
        header.set_visual_state_hook(move |state| sink.borrow_mut().push(state));

        header.add_panel(exit_panel(300, 100));
        header.on_layout();
        header.on_layout();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].collapsible);
        assert!(!seen[0].collapsed);
    }

    #[test]
    fn test_min_width_for_overlapping_content() {
        let mut header = Header::new();
        header.add_panel(Panel::new(90));
        assert_eq!(header.min_width_for_visible_overlapping_content(), 30);

        header.add_panel(exit_panel(300, 40));
        assert_eq!(header.min_width_for_visible_overlapping_content(), 80);

        header.set_min_width(25);
        assert_eq!(header.min_width_for_visible_overlapping_content(), 50);
    }

    #[test]
    fn test_set_expanded_is_forced() {
        let mut header = Header::new();
        assert!(header.pending_action().is_none());

        header.set_expanded(false, true);
        let pending = header.pending_action();
        assert!(pending.is_collapse() && pending.animate() && pending.is_forced());

        header.reset_pending_action();
        assert!(header.pending_action().is_none());
    }
}
