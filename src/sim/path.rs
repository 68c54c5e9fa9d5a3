//! Zigzag path construction
//!
//! The path runs from top-center to bottom-center of the play surface. The
//! top half alternates right/left of center in `SEGMENTS_PER_HALF` steps and
//! ends exactly on the vertical midpoint; the bottom half is its mirror image
//! through `y -> height - y`. The points are joined by Catmull-Rom cubics.

use std::cmp::Ordering;

use glam::Vec2;

use super::curve::{CubicSegment, LENGTH_EPSILON};
use crate::consts::{MIN_AMPLITUDE, AMPLITUDE_RATIO, PATH_TOP_MARGIN, SEGMENTS_PER_HALF};

/// Horizontal swing of the zigzag for a given width
#[inline]
pub fn amplitude_for_width(width: f32) -> f32 {
    (width.max(1.0) * AMPLITUDE_RATIO).max(MIN_AMPLITUDE)
}

/// Generate the zigzag control points for a `width` x `height` surface
///
/// Dimensions below 1 are clamped to 1. The returned sequence holds the top
/// half (start, `SEGMENTS_PER_HALF` swings, midpoint) followed by the
/// mirrored bottom half without a second copy of the midpoint.
pub fn zigzag_points(width: f32, height: f32) -> Vec<Vec2> {
    let w = width.max(1.0);
    let h = height.max(1.0);
    let cx = w / 2.0;
    let step_y = (h / 2.0 - PATH_TOP_MARGIN) / SEGMENTS_PER_HALF as f32;
    let amplitude = amplitude_for_width(w);

    let mut top = Vec::with_capacity(SEGMENTS_PER_HALF + 2);
    top.push(Vec2::new(cx, PATH_TOP_MARGIN));
    let mut y = PATH_TOP_MARGIN;
    let mut side = 1.0;
    for _ in 0..SEGMENTS_PER_HALF {
        y += step_y;
        top.push(Vec2::new(cx + side * amplitude, y));
        side = -side;
    }
    top.push(Vec2::new(cx, h / 2.0));

    let mut points = Vec::with_capacity(top.len() * 2 - 1);
    points.extend_from_slice(&top);
    points.extend(top.iter().rev().skip(1).map(|p| Vec2::new(p.x, h - p.y)));
    points
}

/// A built zigzag path with arc-length lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ZigzagPath {
    width: f32,
    height: f32,
    points: Vec<Vec2>,
    segments: Vec<CubicSegment>,
    /// Arc length at the end of each segment
    cumulative_lengths: Vec<f32>,
    total_length: f32,
}

impl ZigzagPath {
    /// Build the path for a surface size (pure; same size gives same path)
    pub fn build(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let points = zigzag_points(width, height);

        let last = points.len() - 1;
        let segments: Vec<CubicSegment> = (0..last)
            .map(|i| {
                let p0 = points[i.saturating_sub(1)];
                let p1 = points[i];
                let p2 = points[i + 1];
                let p3 = points[(i + 2).min(last)];
                CubicSegment::catmull_rom(p0, p1, p2, p3)
            })
            .collect();

        let mut cumulative_lengths = Vec::with_capacity(segments.len());
        let mut total_length = 0.0;
        for segment in &segments {
            total_length += segment.length();
            cumulative_lengths.push(total_length);
        }

        log::debug!(
            "Built zigzag path for {}x{}: {} points, length {:.1}",
            width,
            height,
            points.len(),
            total_length
        );

        Self {
            width,
            height,
            points,
            segments,
            cumulative_lengths,
            total_length,
        }
    }

    /// Surface size the path was built for (after clamping)
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// All control points the curve passes through, top to bottom
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Top-half points, from the start through the midpoint
    pub fn top_half(&self) -> &[Vec2] {
        &self.points[..=SEGMENTS_PER_HALF + 1]
    }

    /// Bottom-half points, after the midpoint through the end
    pub fn bottom_half(&self) -> &[Vec2] {
        &self.points[SEGMENTS_PER_HALF + 2..]
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    #[inline]
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Player 1's end
    pub fn start(&self) -> Vec2 {
        self.points[0]
    }

    /// Player 2's end
    pub fn end(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    /// Point at arc length `length` from the start (clamped to the path)
    pub fn point_at_length(&self, length: f32) -> Vec2 {
        if self.total_length <= LENGTH_EPSILON || length <= 0.0 {
            return self.start();
        }
        if length >= self.total_length {
            return self.end();
        }

        let mut idx = match self
            .cumulative_lengths
            .binary_search_by(|len| len.partial_cmp(&length).unwrap_or(Ordering::Less))
        {
            Ok(ix) => ix,
            Err(ix) => ix,
        };
        if idx >= self.segments.len() {
            idx = self.segments.len() - 1;
        }
        let seg_start_len = if idx == 0 {
            0.0
        } else {
            self.cumulative_lengths[idx - 1]
        };
        let seg = &self.segments[idx];
        if seg.length() <= LENGTH_EPSILON {
            return seg.end;
        }
        seg.point_at_length((length - seg_start_len).clamp(0.0, seg.length()))
    }

    /// Point at normalized progress (0 = start, 1 = end)
    pub fn point_at_progress(&self, progress: f32) -> Vec2 {
        self.point_at_length(progress.clamp(0.0, 1.0) * self.total_length)
    }

    /// Evenly spaced samples along the curve for stroking
    pub fn polyline(&self, samples_per_segment: usize) -> Vec<Vec2> {
        let n = samples_per_segment.max(1);
        let mut out = Vec::with_capacity(self.segments.len() * n + 1);
        out.push(self.start());
        for seg in &self.segments {
            for i in 1..=n {
                out.push(seg.point_at(i as f32 / n as f32));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_concrete_300x600() {
        let path = ZigzagPath::build(300.0, 600.0);
        assert_eq!(path.start(), Vec2::new(150.0, 12.0));
        assert_eq!(path.end(), Vec2::new(150.0, 588.0));
        assert!((amplitude_for_width(300.0) - 84.0).abs() < 1e-4);
        // First swing goes right of center
        assert!((path.points()[1].x - 234.0).abs() < 1e-3);
        assert!((path.points()[2].x - 66.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_count_and_midpoint() {
        let path = ZigzagPath::build(300.0, 600.0);
        assert_eq!(path.points().len(), 2 * SEGMENTS_PER_HALF + 3);
        assert_eq!(path.segments().len(), path.points().len() - 1);
        assert_eq!(*path.top_half().last().unwrap(), Vec2::new(150.0, 300.0));
    }

    #[test]
    fn test_narrow_width_uses_min_amplitude() {
        assert_eq!(amplitude_for_width(100.0), MIN_AMPLITUDE);
        let path = ZigzagPath::build(100.0, 400.0);
        assert!((path.points()[1].x - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_sizes_are_clamped() {
        for (w, h) in [(0.0, 0.0), (1.0, 1.0), (-20.0, 50.0)] {
            let path = ZigzagPath::build(w, h);
            assert!(path.total_length().is_finite());
            assert!(path.points().iter().all(|p| p.is_finite()));
            let p = path.point_at_progress(0.5);
            assert!(p.is_finite());
        }
    }

    #[test]
    fn test_point_at_length_endpoints_and_clamp() {
        let path = ZigzagPath::build(320.0, 640.0);
        assert_eq!(path.point_at_length(0.0), path.start());
        assert_eq!(path.point_at_length(path.total_length()), path.end());
        assert_eq!(path.point_at_length(-10.0), path.start());
        assert_eq!(path.point_at_length(path.total_length() * 2.0), path.end());
    }

    #[test]
    fn test_half_length_lands_on_midline() {
        let path = ZigzagPath::build(300.0, 600.0);
        let mid = path.point_at_progress(0.5);
        assert!((mid.x - 150.0).abs() < 0.5);
        assert!((mid.y - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_point_at_length_moves_downward_overall() {
        let path = ZigzagPath::build(300.0, 600.0);
        let a = path.point_at_progress(0.1);
        let b = path.point_at_progress(0.9);
        assert!(a.y < b.y);
    }

    #[test]
    fn test_polyline_shape() {
        let path = ZigzagPath::build(300.0, 600.0);
        let line = path.polyline(8);
        assert_eq!(line.len(), path.segments().len() * 8 + 1);
        assert_eq!(line[0], path.start());
        assert_eq!(*line.last().unwrap(), path.end());
    }

    proptest! {
        #[test]
        fn prop_endpoints(w in 1u32..4000, h in 1u32..4000) {
            let (wf, hf) = (w as f32, h as f32);
            let path = ZigzagPath::build(wf, hf);
            prop_assert_eq!(path.start(), Vec2::new(wf / 2.0, PATH_TOP_MARGIN));
            prop_assert_eq!(path.end(), Vec2::new(wf / 2.0, hf - PATH_TOP_MARGIN));
        }

        #[test]
        fn prop_bottom_mirrors_top(w in 1u32..4000, h in 1u32..4000) {
            let hf = h as f32;
            let path = ZigzagPath::build(w as f32, hf);
            let top = path.top_half();
            let bottom = path.bottom_half();
            prop_assert_eq!(bottom.len(), top.len() - 1);
            for (b, t) in bottom.iter().zip(top.iter().rev().skip(1)) {
                prop_assert_eq!(*b, Vec2::new(t.x, hf - t.y));
            }
        }

        #[test]
        fn prop_build_is_idempotent(w in 1u32..4000, h in 1u32..4000) {
            let a = ZigzagPath::build(w as f32, h as f32);
            let b = ZigzagPath::build(w as f32, h as f32);
            prop_assert_eq!(a.points(), b.points());
            prop_assert_eq!(a.total_length().to_bits(), b.total_length().to_bits());
        }

        #[test]
        fn prop_point_at_length_stays_finite(w in 1u32..2000, h in 1u32..2000, p in 0.0f32..=1.0) {
            let path = ZigzagPath::build(w as f32, h as f32);
            prop_assert!(path.point_at_progress(p).is_finite());
        }
    }
}
