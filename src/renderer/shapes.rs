//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in surface pixel coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::{TRAIL_MAX_OPACITY, TRAIL_MAX_RADIUS, TRAIL_MIN_RADIUS};
use crate::sim::{Trail, smooth_step};

/// Scale a color's alpha
#[inline]
fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Soft glow: concentric rings fading out from `inner_radius` to `outer_radius`
pub fn glow(center: Vec2, inner_radius: f32, outer_radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    const BANDS: u32 = 4;
    const SEGMENTS: u32 = 32;
    let mut vertices = Vec::with_capacity((BANDS * SEGMENTS * 6) as usize);
    let span = outer_radius - inner_radius;

    for band in 0..BANDS {
        let r0 = inner_radius + span * band as f32 / BANDS as f32;
        let r1 = inner_radius + span * (band + 1) as f32 / BANDS as f32;
        let fade = 1.0 - smooth_step(inner_radius, outer_radius, (r0 + r1) / 2.0);
        vertices.extend(ring(center, r0, r1, with_alpha(color, fade), SEGMENTS));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Stroke an open polyline with a constant width
///
/// Each segment becomes a quad; zero-length segments are skipped.
pub fn polyline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Fading discs for recent ball positions
///
/// A sample of freshness `t` (1 = now, 0 = `max_age_ms` old) is drawn with
/// radius `6t + 1` and opacity `0.6t`; older samples are skipped.
pub fn ball_trail(trail: &Trail, now_ms: f64, max_age_ms: f64, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (point, t) in trail.visible(now_ms, max_age_ms) {
        let radius = TRAIL_MAX_RADIUS * t + TRAIL_MIN_RADIUS;
        let alpha = (t * TRAIL_MAX_OPACITY).max(0.0);
        vertices.extend(circle(point.pos, radius, with_alpha(color, alpha), 16));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 12);
        assert_eq!(v.len(), 36);
        assert!(v.iter().all(|v| {
            let d = Vec2::from(v.position).distance(Vec2::new(10.0, 10.0));
            d <= 5.0 + 1e-4
        }));
    }

    #[test]
    fn test_polyline_skips_degenerate_segments() {
        let pts = [Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0)];
        let v = polyline(&pts, 2.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert!(v.iter().all(|v| v.position[1].abs() <= 1.0 + 1e-6));
        assert!(polyline(&pts[..1], 2.0, [1.0; 4]).is_empty());
    }

    #[test]
    fn test_trail_respects_age_cutoff() {
        let mut trail = Trail::new();
        trail.push(Vec2::new(0.0, 0.0), 0.0);
        trail.push(Vec2::new(5.0, 5.0), 600.0);
        trail.push(Vec2::new(9.0, 9.0), 1000.0);

        let v = ball_trail(&trail, 1000.0, 500.0, [1.0; 4]);
        // Only the two samples younger than 500ms
        assert_eq!(v.len(), 2 * 16 * 3);

        // Newest sample: full radius 7 and opacity 0.6
        let newest = &v[16 * 3..];
        assert!((newest[0].color[3] - 0.6).abs() < 1e-6);
        let r = Vec2::from(newest[1].position).distance(Vec2::new(9.0, 9.0));
        assert!((r - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_glow_fades_outward() {
        let v = glow(Vec2::ZERO, 14.0, 22.0, [1.0, 1.0, 1.0, 1.0]);
        let first = v.first().unwrap().color[3];
        let last = v.last().unwrap().color[3];
        assert!(first > last);
    }

    #[test]
    fn test_rect() {
        let v = rect(Vec2::ZERO, Vec2::new(4.0, 2.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
    }
}
