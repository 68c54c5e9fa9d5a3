//! Platform abstraction layer
//!
//! Handles browser/native differences for frame scheduling. The game session
//! only sees the [`FrameScheduler`] trait; the browser implementation sits on
//! `requestAnimationFrame`, the native one is driven by hand.

pub mod scheduler;

pub use scheduler::{FrameScheduler, ManualScheduler};

#[cfg(target_arch = "wasm32")]
pub use scheduler::RafScheduler;
