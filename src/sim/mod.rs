//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as frame timestamps, never read from a clock
//! - Path geometry depends only on the surface size
//! - No rendering or platform dependencies

pub mod curve;
pub mod easing;
pub mod input;
pub mod path;
pub mod state;
pub mod tick;

pub use curve::{ArcLengthTable, CubicSegment};
pub use easing::{ease_in_out_cubic, lerp, smooth_step};
pub use input::{SurfaceBounds, apply_tap, direction_for_tap};
pub use path::{ZigzagPath, amplitude_for_width, zigzag_points};
pub use state::{Direction, RoundPhase, RoundState, Trail, TrailPoint, Winner};
pub use tick::integrate;
