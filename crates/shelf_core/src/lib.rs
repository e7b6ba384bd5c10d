//! Shelf Core Runtime
//!
//! This crate provides the foundational primitives shared by the Shelf crates:
//!
//! - **Pointer Events**: Platform-agnostic pointer samples and event type ids
//! - **State Machines**: Enum-driven state machines with transition history
//! - **Geometry**: Integer spans, rects and insets along the horizontal axis
//! - **Velocity Tracking**: Least-squares pointer velocity estimation
//!
//! # Example
//!
//! ```rust
//! use shelf_core::velocity::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! tracker.add_sample(0.0, 0.0);
//! tracker.add_sample(10.0, 10.0);
//! tracker.add_sample(20.0, 20.0);
//!
//! // 10px every 10ms
//! let velocity = tracker.velocity(8_000.0);
//! assert!((velocity - 1_000.0).abs() < 1.0);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;
pub mod velocity;

pub use events::{
    EventType, PointerAction, PointerEvent, PointerId, PointerSample, ScrollAxes, ScrollSource,
};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Insets, Rect, Span};
pub use velocity::VelocityTracker;
