//! Shelf Coordinator
//!
//! Coordination engine for a horizontally collapsing header and the content
//! panels that scroll next to it.
//!
//! # Features
//!
//! - **Header**: an ordered stack of panels with per-panel scroll flags and
//!   memoized scroll ranges
//! - **Nested Scrolling**: content panels hand their scroll deltas to the
//!   header before and after consuming them
//! - **Dragging**: the header itself can be dragged and flung
//! - **Snapping**: partial scrolls settle on the nearest panel edge
//! - **Collapsing Containers**: pinned and parallax children inside a panel
//! - **Persistence**: a versioned, panel-relative saved position
//!
//! # Example
//!
//! ```rust
//! use shelf_coordinator::{Coordinator, Header, Panel, ScrollFlags};
//!
//! let mut header = Header::new();
//! header.add_panel(
//!     Panel::new(300)
//!         .with_min_width(100)
//!         .with_flags(ScrollFlags::SNAP_SCROLL | ScrollFlags::EXIT_UNTIL_COLLAPSED),
//! );
//!
//! let mut coordinator = Coordinator::new(800, 600, header);
//! coordinator.layout();
//! assert_eq!(coordinator.header().total_scroll_range(), 200);
//!
//! coordinator.set_expanded(false, false);
//! assert_eq!(coordinator.header_offset(), -200);
//! assert!(coordinator.header().is_collapsed());
//! ```

pub mod animator;
pub mod behavior;
pub mod collapsing;
pub mod config;
pub mod content;
pub mod coordinator;
pub mod error;
pub mod flags;
pub mod gesture;
pub mod header;
pub mod listeners;
pub mod offset;
pub mod panel;
pub mod ranges;
pub mod saved_state;
pub mod snap;

mod nested;
mod touch;

pub use animator::OffsetAnimation;
pub use behavior::{DragCallback, Draggable, NestedScrollTarget, Snappable};
pub use collapsing::CollapsingLayout;
pub use config::CoordinatorConfig;
pub use content::{ContentId, ContentPanel, ContentWidth};
pub use coordinator::Coordinator;
pub use error::{Result, ShelfError};
pub use flags::{CollapseMode, ScrollFlags};
pub use gesture::{DragStep, GestureState, GestureTracker};
pub use header::{Header, Orientation, PendingAction, VisualState};
pub use listeners::ListenerId;
pub use offset::OffsetStore;
pub use panel::{Panel, PanelId};
pub use saved_state::SavedPosition;
