//! Zigzag Duel - a two-player tap duel along a zigzag path
//!
//! Core modules:
//! - `sim`: Path geometry, round state and the per-frame integrator
//! - `game`: Session that owns the round and drives it from frame callbacks
//! - `platform`: Frame scheduling abstraction (requestAnimationFrame on web)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameView, GameSession, Viewport};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Speed the ball eases toward after a tap (px/s along the path)
    pub const BASE_SPEED: f32 = 160.0;
    /// Duration of the velocity ramp after each tap (ms)
    pub const EASE_DURATION_MS: f64 = 300.0;
    /// Where a new round puts the ball
    pub const START_PROGRESS: f32 = 0.5;

    /// Trail samples kept
    pub const TRAIL_CAPACITY: usize = 25;
    /// Trail samples older than this are not drawn (ms)
    pub const TRAIL_MAX_AGE_MS: f64 = 500.0;

    /// Path layout
    pub const PATH_TOP_MARGIN: f32 = 12.0;
    pub const SEGMENTS_PER_HALF: usize = 5;
    pub const MIN_AMPLITUDE: f32 = 40.0;
    pub const AMPLITUDE_RATIO: f32 = 0.28;

    /// Visuals (px)
    pub const BALL_RADIUS: f32 = 14.0;
    pub const PATH_STROKE_WIDTH: f32 = 3.0;
    pub const TRAIL_MAX_RADIUS: f32 = 6.0;
    pub const TRAIL_MIN_RADIUS: f32 = 1.0;
    pub const TRAIL_MAX_OPACITY: f32 = 0.6;
}
