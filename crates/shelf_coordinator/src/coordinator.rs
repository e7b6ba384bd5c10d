//! Coordinator
//!
//! Owns a [`Header`] and the content panels laid out after it, and keeps the
//! header offset in sync between them. Every offset change goes through one
//! clamped write that updates the offset store, notifies listeners, refreshes
//! the collapsed state and moves dependent contents.
//!
//! Input arrives through the behavior traits implemented in `nested.rs` and
//! `touch.rs`. Animations are frame driven: the coordinator asks its
//! [`FrameScheduler`] for a frame and the host calls [`Coordinator::on_frame`].
//!
//! # Example
//!
//! ```rust
//! use shelf_coordinator::{
//!     ContentPanel, Coordinator, Header, NestedScrollTarget, Panel, ScrollFlags,
//! };
//! use shelf_core::{ScrollAxes, ScrollSource};
//!
//! let mut header = Header::new();
//! header.add_panel(
//!     Panel::new(300)
//!         .with_min_width(100)
//!         .with_flags(ScrollFlags::SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED),
//! );
//!
//! let mut coordinator = Coordinator::new(800, 600, header);
//! let list = coordinator.add_content(ContentPanel::new());
//! coordinator.layout();
//!
//! assert!(coordinator.on_start_nested_scroll(list, ScrollAxes::HORIZONTAL, ScrollSource::Touch));
//! let consumed = coordinator.on_nested_pre_scroll(list, 50, ScrollSource::Touch);
//! assert_eq!(consumed, 50);
//! assert_eq!(coordinator.header_offset(), -50);
//! ```

use shelf_animation::{Easing, Fling, FlingConfig, FrameScheduler, NoopScheduler, Tween};
use shelf_core::{Insets, Rect};
use slotmap::SlotMap;

use crate::animator::{offset_animation_duration, OffsetAnimation};
use crate::behavior::{DragCallback, Snappable};
use crate::config::CoordinatorConfig;
use crate::content::{overlap_pixels, overlap_ratio, ContentId, ContentPanel};
use crate::error::Result;
use crate::gesture::GestureTracker;
use crate::header::{Header, PendingAction};
use crate::offset::{interpolate_offset, OffsetStore};
use crate::saved_state::SavedPosition;
use crate::snap::resolve_snap_target;

pub struct Coordinator {
    config: CoordinatorConfig,
    fling_config: FlingConfig,
    width: i32,
    height: i32,
    pub(crate) header: Header,
    pub(crate) store: OffsetStore,
    pub(crate) contents: SlotMap<ContentId, ContentPanel>,
    /// Content that last finished a nested scroll with us
    pub(crate) last_nested_child: Option<ContentId>,
    pub(crate) drag_callback: Option<DragCallback>,
    pub(crate) gesture: GestureTracker,
    animation: Option<OffsetAnimation>,
    frames: Box<dyn FrameScheduler>,
    pending_restore: Option<SavedPosition>,
    laid_out: bool,
}

impl Coordinator {
    pub fn new(width: i32, height: i32, header: Header) -> Self {
        Self::build(width, height, header, CoordinatorConfig::default())
    }

    /// Create a coordinator with custom tunables, rejecting invalid ones
    pub fn with_config(
        width: i32,
        height: i32,
        header: Header,
        config: CoordinatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(width, height, header, config))
    }

    fn build(width: i32, height: i32, header: Header, config: CoordinatorConfig) -> Self {
        Self {
            fling_config: config.fling_config(),
            gesture: GestureTracker::new(&config),
            config,
            width,
            height,
            header,
            store: OffsetStore::default(),
            contents: SlotMap::with_key(),
            last_nested_child: None,
            drag_callback: None,
            animation: None,
            frames: Box::new(NoopScheduler),
            pending_restore: None,
            laid_out: false,
        }
    }

    /// Use `scheduler` to request animation frames
    pub fn with_frame_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.frames = Box::new(scheduler);
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable access to the header. Structural changes take effect on the
    /// next [`layout`](Self::layout).
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    // =========================================================================
    // Contents
    // =========================================================================

    pub fn add_content(&mut self, content: ContentPanel) -> ContentId {
        self.contents.insert(content)
    }

    pub fn remove_content(&mut self, id: ContentId) -> Option<ContentPanel> {
        self.contents.remove(id)
    }

    pub fn content(&self, id: ContentId) -> Option<&ContentPanel> {
        self.contents.get(id)
    }

    pub fn content_mut(&mut self, id: ContentId) -> Option<&mut ContentPanel> {
        self.contents.get_mut(id)
    }

    /// Content that last finished a nested scroll, if it still exists
    pub fn last_nested_child(&self) -> Option<ContentId> {
        self.last_nested_child
            .filter(|id| self.contents.contains_key(*id))
    }

    // =========================================================================
    // Offset
    // =========================================================================

    /// Where the header is drawn
    pub fn header_offset(&self) -> i32 {
        self.store.offset
    }

    pub fn offset_delta(&self) -> i32 {
        self.store.offset_delta
    }

    /// Scroll position before interpolation
    pub fn logical_offset(&self) -> i32 {
        self.store.logical_offset()
    }

    pub fn header_bounds(&self) -> Rect {
        Rect::new(
            self.store.offset,
            0,
            self.store.offset + self.header.width(),
            self.height,
        )
    }

    pub fn set_drag_callback(&mut self, callback: impl Fn(&Header) -> bool + 'static) {
        self.drag_callback = Some(Box::new(callback));
    }

    pub fn clear_drag_callback(&mut self) {
        self.drag_callback = None;
    }

    pub fn apply_insets(&mut self, insets: Insets) -> bool {
        self.header.apply_insets(insets)
    }

    /// Move the header to `requested`, clamped to `[min, max]` intersected
    /// with the full scroll range. Returns the consumed distance
    /// (previous logical offset minus the new one).
    pub(crate) fn set_header_offset_bounded(&mut self, requested: i32, min: i32, max: i32) -> i32 {
        let total = self.header.total_scroll_range();
        let min = min.max(-total);
        let max = max.min(0);
        if min == 0 || min > max {
            self.store.offset_delta = 0;
            return 0;
        }

        let current = self.store.logical_offset();
        let target = requested.clamp(min, max);
        if target == current {
            return 0;
        }

        let applied = if self.header.has_interpolator() {
            interpolate_offset(&self.header, target).clamp(-total, 0)
        } else {
            target
        };
        self.store.offset = applied;
        self.store.offset_delta = target - applied;
        tracing::trace!(
            "header offset {} -> {} (drawn at {})",
            current,
            target,
            applied
        );

        self.header.dispatch_offset_updates(applied);
        let direction = if target < current { -1 } else { 1 };
        self.update_collapsed_state(target, direction, false);
        self.propagate_to_contents();
        current - target
    }

    /// Move the header anywhere within its scroll range
    pub(crate) fn set_header_offset(&mut self, requested: i32) -> i32 {
        self.set_header_offset_bounded(requested, i32::MIN, i32::MAX)
    }

    /// Scroll the header by `dx`; positive values collapse it
    pub(crate) fn scroll(&mut self, dx: i32, min: i32, max: i32) -> i32 {
        let requested = self.store.logical_offset() - dx;
        self.set_header_offset_bounded(requested, min, max)
    }

    fn update_collapsed_state(&mut self, offset: i32, direction: i32, force_jump: bool) {
        let Some(collapsed) = self.header.collapsed_at(offset, direction) else {
            return;
        };
        let changed = self.header.set_collapsed_state(collapsed);
        let jump = force_jump || (changed && self.has_overlapping_dependent());
        if changed || jump {
            self.header.notify_visual_state(jump);
        }
    }

    fn has_overlapping_dependent(&self) -> bool {
        self.contents
            .values()
            .find(|content| content.depends_on_header)
            .map(|content| content.overlay_left != 0)
            .unwrap_or(false)
    }

    fn propagate_to_contents(&mut self) {
        let header_right = self.store.offset + self.header.width();
        let delta = self.store.offset_delta;
        let ratio = overlap_ratio(&self.header, self.store.logical_offset());
        for content in self.contents.values_mut() {
            if content.depends_on_header {
                content.follow(header_right, delta, overlap_pixels(content.overlay_left, ratio));
            }
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Lay out the header and contents, applying pending expand/collapse
    /// requests and restored positions
    pub fn layout(&mut self) {
        self.header.on_layout();

        let pending = self.header.pending_action();
        let restored = match self.pending_restore.take() {
            Some(position) if !pending.is_forced() => position.resolve(&self.header),
            _ => None,
        };

        if let Some(offset) = restored {
            tracing::debug!("restoring header offset {}", offset);
            self.set_header_offset(offset);
        } else if !pending.is_none() {
            self.apply_pending_action(pending);
        }
        self.header.reset_pending_action();

        let total = self.header.total_scroll_range();
        self.store.offset = self.store.offset.clamp(-total, 0);
        let offset = self.store.offset;
        self.update_collapsed_state(offset, 0, true);
        self.header.dispatch_offset_updates(offset);

        self.layout_contents();
        self.laid_out = true;
    }

    fn layout_contents(&mut self) {
        let width = self.width;
        let header_right = self.store.offset + self.header.width();
        let ratio = overlap_ratio(&self.header, self.store.logical_offset());
        for content in self.contents.values_mut() {
            if content.depends_on_header {
                content.measure(width, Some(&self.header));
                content.layout(Some(header_right), overlap_pixels(content.overlay_left, ratio));
            } else {
                content.measure(width, None);
                content.layout(None, 0);
            }
        }
    }

    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    fn apply_pending_action(&mut self, pending: PendingAction) {
        let target = if pending.is_collapse() {
            -self.header.up_nested_pre_scroll_range()
        } else {
            0
        };
        if pending.animate() {
            self.animate_offset_to(target, 0.0);
        } else {
            self.set_header_offset(target);
        }
    }

    /// Expand or collapse the header fully. Before the first layout the
    /// request waits for it.
    pub fn set_expanded(&mut self, expanded: bool, animate: bool) {
        self.header.set_expanded(expanded, animate);
        if self.laid_out {
            let pending = self.header.pending_action();
            self.header.reset_pending_action();
            self.apply_pending_action(pending);
        }
    }

    /// A content panel wants `rect` (in its own coordinates) on screen.
    /// Collapses the header if the rect is not fully visible.
    pub fn request_rect_on_screen(&mut self, id: ContentId, rect: Rect, immediate: bool) -> bool {
        let Some(content) = self.contents.get(id) else {
            return false;
        };
        if !content.depends_on_header || self.header.is_empty() {
            return false;
        }

        let mut rect = rect;
        rect.offset(content.left(), 0);
        let parent = Rect::new(0, 0, self.width, self.height);
        if parent.contains(&rect) {
            return false;
        }
        tracing::debug!("rect {:?} off screen, collapsing header", rect);
        self.set_expanded(false, !immediate);
        true
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn save_state(&self) -> Option<SavedPosition> {
        SavedPosition::capture(&self.header, self.store.offset)
    }

    /// Apply `position` on the next layout
    pub fn restore_state(&mut self, position: SavedPosition) {
        self.pending_restore = Some(position);
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Ease the header to `target`. A release velocity shortens the move.
    pub(crate) fn animate_offset_to(&mut self, target: i32, velocity: f32) -> bool {
        let distance = self.store.logical_offset() - target;
        let duration = offset_animation_duration(
            distance,
            velocity,
            self.header.width(),
            self.config.max_offset_animation_ms,
        );
        self.animate_offset_with_duration(target, duration)
    }

    pub(crate) fn animate_offset_with_duration(&mut self, target: i32, duration_ms: u32) -> bool {
        let current = self.store.logical_offset();
        self.cancel_animation();
        if current == target {
            return false;
        }

        let duration = duration_ms.min(self.config.max_offset_animation_ms);
        tracing::debug!(
            "animating header offset {} -> {} over {}ms",
            current,
            target,
            duration
        );
        self.animation = Some(OffsetAnimation::Eased(Tween::new(
            current,
            target,
            duration,
            Easing::decelerate(),
        )));
        self.frames.request_frame();
        true
    }

    /// Fling the drawn offset with `velocity` px/s inside `[min, max]`
    pub(crate) fn fling(&mut self, min: i32, max: i32, velocity: f32) -> bool {
        self.cancel_animation();
        let fling = Fling::new(&self.fling_config, self.store.offset, velocity, min, max);
        if fling.is_finished() {
            self.on_fling_finished();
            return false;
        }
        tracing::debug!(
            "fling from {} toward {} at {:.0}px/s",
            fling.start(),
            fling.final_position(),
            velocity
        );
        self.animation = Some(OffsetAnimation::Fling(fling));
        self.frames.request_frame();
        true
    }

    /// Advance the running animation. Returns true while more frames are needed.
    pub fn on_frame(&mut self, frame_time_ms: f64) -> bool {
        let Some(mut animation) = self.animation.take() else {
            return false;
        };

        if let Some(value) = animation.advance(frame_time_ms) {
            self.set_header_offset(value);
        }
        if !animation.is_finished() {
            self.animation = Some(animation);
            self.frames.request_frame();
            return true;
        }

        if animation.is_fling() {
            tracing::debug!("fling finished at {}", self.store.offset);
            self.on_fling_finished();
        }
        self.animation.is_some()
    }

    /// Stop whatever animation is running, leaving the offset where it is
    pub fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            if !animation.is_finished() {
                tracing::debug!("cancelling header animation at {}", self.store.offset);
            }
            animation.cancel();
        }
    }

    pub fn is_offset_animation_running(&self) -> bool {
        matches!(&self.animation, Some(OffsetAnimation::Eased(tween)) if !tween.is_finished())
    }

    pub fn is_flinging(&self) -> bool {
        matches!(&self.animation, Some(OffsetAnimation::Fling(fling)) if !fling.is_finished())
    }

    /// Target of the running animation, if any
    pub fn animation_target(&self) -> Option<i32> {
        self.animation.as_ref().map(OffsetAnimation::target)
    }
}

impl Snappable for Coordinator {
    fn snap_to_child_if_needed(&mut self) -> bool {
        let offset = self.store.logical_offset();
        let Some(target) = resolve_snap_target(&self.header, offset) else {
            return false;
        };
        tracing::debug!("snapping header {} -> {}", offset, target);
        self.animate_offset_to(target, 0.0)
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("header", &self.header)
            .field("store", &self.store)
            .field("contents", &self.contents.len())
            .field("gesture", &self.gesture.state())
            .field("animation", &self.animation)
            .field("laid_out", &self.laid_out)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ScrollFlags;
    use crate::panel::Panel;
    use shelf_animation::ManualFrameClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn exit_header() -> Header {
        let mut header = Header::new();
        header.add_panel(
            Panel::new(300)
                .with_min_width(100)
                .with_flags(ScrollFlags::SNAP_SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED),
        );
        header
    }

    fn coordinator(header: Header) -> (Coordinator, ManualFrameClock) {
        let clock = ManualFrameClock::default();
        let mut coordinator = Coordinator::new(800, 600, header).with_frame_scheduler(clock.clone());
        coordinator.layout();
        (coordinator, clock)
    }

    #[test]
    fn test_with_config_validates() {
        let config = CoordinatorConfig {
            max_fling_velocity: f32::NAN,
            ..CoordinatorConfig::default()
        };
        let err = Coordinator::with_config(800, 600, exit_header(), config).unwrap_err();
        assert!(matches!(err, crate::error::ShelfError::InvalidConfig(_)));

        let config = CoordinatorConfig {
            touch_slop: 16,
            ..CoordinatorConfig::default()
        };
        let coordinator = Coordinator::with_config(800, 600, exit_header(), config).unwrap();
        assert_eq!(coordinator.config().touch_slop, 16);
    }

    fn run(coordinator: &mut Coordinator, clock: &ManualFrameClock) {
        clock.run_until_idle(1_000, |t| {
            coordinator.on_frame(t);
        });
    }

    #[test]
    fn test_bounded_write_reports_consumed() {
        let (mut coordinator, _) = coordinator(exit_header());
        assert_eq!(coordinator.set_header_offset_bounded(-50, -200, 0), 50);
        assert_eq!(coordinator.header_offset(), -50);
        // Clamped to the bound
        assert_eq!(coordinator.set_header_offset_bounded(-500, -200, 0), 150);
        assert_eq!(coordinator.header_offset(), -200);
        // Already there
        assert_eq!(coordinator.set_header_offset_bounded(-500, -200, 0), 0);
    }

    #[test]
    fn test_write_without_scroll_range_is_noop() {
        let mut header = Header::new();
        header.add_panel(Panel::new(300).with_flags(ScrollFlags::NONE));
        let (mut coordinator, _) = coordinator(header);
        assert_eq!(coordinator.set_header_offset(-100), 0);
        assert_eq!(coordinator.header_offset(), 0);
    }

    #[test]
    fn test_collapsed_state_follows_offset() {
        let (mut coordinator, _) = coordinator(exit_header());
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = states.clone();
        coordinator
            .header_mut()
            .set_visual_state_hook(move |state| sink.borrow_mut().push(state.collapsed));

        coordinator.set_header_offset(-150);
        assert!(!coordinator.header().is_collapsed());
        coordinator.set_header_offset(-200);
        assert!(coordinator.header().is_collapsed());
        coordinator.set_header_offset(-20);
        assert!(!coordinator.header().is_collapsed());
        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn test_animated_expand_runs_to_target() {
        let (mut coordinator, clock) = coordinator(exit_header());
        coordinator.set_header_offset(-200);
        coordinator.set_expanded(true, true);
        assert!(coordinator.is_offset_animation_running());
        assert_eq!(coordinator.animation_target(), Some(0));

        run(&mut coordinator, &clock);
        assert_eq!(coordinator.header_offset(), 0);
        assert!(!coordinator.is_offset_animation_running());
    }

    #[test]
    fn test_animation_to_current_offset_does_nothing() {
        let (mut coordinator, clock) = coordinator(exit_header());
        assert!(!coordinator.animate_offset_to(0, 0.0));
        assert!(!clock.has_pending_frame());
    }

    #[test]
    fn test_fling_then_snap() {
        let (mut coordinator, clock) = coordinator(exit_header());
        assert!(coordinator.fling(-200, 0, -1_200.0));
        assert!(coordinator.is_flinging());

        run(&mut coordinator, &clock);
        assert!(!coordinator.is_flinging());
        let offset = coordinator.header_offset();
        assert!(offset == 0 || offset == -200, "settled at {}", offset);
    }

    #[test]
    fn test_rect_off_screen_collapses() {
        let (mut coordinator, _) = coordinator(exit_header());
        let list = coordinator.add_content(ContentPanel::new());
        coordinator.layout();
        assert_eq!(coordinator.content(list).unwrap().left(), 300);

        assert!(!coordinator.request_rect_on_screen(list, Rect::new(0, 0, 100, 50), true));
        assert!(coordinator.request_rect_on_screen(list, Rect::new(450, 0, 600, 50), true));
        assert_eq!(coordinator.header_offset(), -200);
        assert_eq!(coordinator.content(list).unwrap().left(), 100);
    }

    #[test]
    fn test_pending_restore_applied_on_layout() {
        let (mut before, _) = coordinator(exit_header());
        before.set_header_offset(-150);
        let saved = before.save_state().unwrap();

        let mut restored = Coordinator::new(800, 600, exit_header());
        restored.restore_state(saved);
        restored.layout();
        assert_eq!(restored.header_offset(), -150);
    }
}
