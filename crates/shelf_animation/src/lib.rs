//! Shelf Animation System
//!
//! Frame-driven motion for collapsing headers.
//!
//! # Features
//!
//! - **Spline Flings**: Friction-based deceleration shortened at hard bounds
//! - **Tweens**: Fixed-duration integer transitions through an easing curve
//! - **Easing**: Decelerate, cubic bezier and friends, also used for
//!   per-panel scroll interpolation
//! - **Frame Scheduling**: Hosts drive animations; nothing polls a clock

pub mod easing;
pub mod fling;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use fling::{Fling, FlingConfig};
pub use scheduler::{FrameScheduler, ManualFrameClock, NoopScheduler};
pub use tween::Tween;
