//! Per-frame scene assembly
//!
//! Turns a [`FrameView`] into one triangle list, back to front: half tints,
//! center line, path stroke, trail, glow, ball.

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex};
use crate::consts::{BALL_RADIUS, PATH_STROKE_WIDTH, TRAIL_MAX_AGE_MS};
use crate::game::FrameView;
use crate::settings::Settings;

/// Curve samples per path segment when stroking
const PATH_SAMPLES_PER_SEGMENT: usize = 16;
const BALL_SEGMENTS: u32 = 32;
const CENTER_LINE_WIDTH: f32 = 2.0;
/// Glow extends this far past the ball edge (px)
const GLOW_SPREAD: f32 = 8.0;

/// Build the vertex list for one frame in surface pixel coordinates
pub fn build_scene(
    view: &FrameView<'_>,
    size: (f32, f32),
    settings: &Settings,
    now_ms: f64,
) -> Vec<Vertex> {
    let (w, h) = size;
    let palette = Palette::for_settings(settings.high_contrast);
    let mut vertices = Vec::new();

    // Player halves and the line between them
    vertices.extend(shapes::rect(Vec2::ZERO, Vec2::new(w, h / 2.0), palette.top_half));
    vertices.extend(shapes::rect(Vec2::new(0.0, h / 2.0), Vec2::new(w, h), palette.bottom_half));
    vertices.extend(shapes::rect(
        Vec2::new(0.0, h / 2.0 - CENTER_LINE_WIDTH / 2.0),
        Vec2::new(w, h / 2.0 + CENTER_LINE_WIDTH / 2.0),
        palette.center_line,
    ));

    if settings.show_path {
        let line = view.path.polyline(PATH_SAMPLES_PER_SEGMENT);
        vertices.extend(shapes::polyline(&line, PATH_STROKE_WIDTH, palette.path));
    }

    if settings.effective_trails() {
        vertices.extend(shapes::ball_trail(
            view.trail,
            now_ms,
            TRAIL_MAX_AGE_MS,
            palette.trail,
        ));
    }

    if settings.effective_ball_glow() {
        vertices.extend(shapes::glow(
            view.ball,
            BALL_RADIUS,
            BALL_RADIUS + GLOW_SPREAD,
            palette.ball_glow,
        ));
    }

    vertices.extend(shapes::circle(view.ball, BALL_RADIUS, palette.ball, BALL_SEGMENTS));

    vertices
}
