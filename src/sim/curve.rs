//! Cubic Bézier segments with sampled arc-length tables
//!
//! There is no closed-form inverse for the arc length of a cubic, so each
//! segment samples itself at a fixed resolution and answers
//! "parameter at length" queries by binary search over the cumulative table.

use std::cmp::Ordering;

use glam::Vec2;

/// Samples per segment used to build the arc-length table
pub const CURVE_TABLE_SAMPLES: usize = 32;

/// Lengths below this are treated as zero
pub const LENGTH_EPSILON: f32 = 1e-5;

/// Cumulative chord lengths of a curve sampled at uniform parameter steps
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLengthTable {
    cumulative: Vec<f32>,
    total: f32,
}

impl ArcLengthTable {
    /// Sample `sample_fn` at `samples + 1` evenly spaced parameters in [0, 1]
    pub fn new(samples: usize, mut sample_fn: impl FnMut(f32) -> Vec2) -> Self {
        let samples = samples.max(1);
        let mut cumulative = Vec::with_capacity(samples + 1);
        let mut total = 0.0;

        let mut prev = sample_fn(0.0);
        cumulative.push(0.0);

        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            let point = sample_fn(t);
            total += point.distance(prev);
            cumulative.push(total);
            prev = point;
        }

        Self { cumulative, total }
    }

    #[inline]
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Curve parameter whose arc length from the start is `length` (clamped)
    pub fn param_for_length(&self, length: f32) -> f32 {
        if self.total <= LENGTH_EPSILON {
            return 0.0;
        }
        let target = length.clamp(0.0, self.total);
        let idx = match self
            .cumulative
            .binary_search_by(|val| val.partial_cmp(&target).unwrap_or(Ordering::Less))
        {
            Ok(ix) => ix,
            Err(ix) => ix,
        };
        if idx == 0 {
            return 0.0;
        }
        if idx >= self.cumulative.len() {
            return 1.0;
        }

        let prev = self.cumulative[idx - 1];
        let next = self.cumulative[idx];
        let span = next - prev;
        let alpha = if span <= 0.0 { 0.0 } else { (target - prev) / span };
        let samples = (self.cumulative.len() - 1) as f32;
        let t0 = (idx - 1) as f32 / samples;
        let t1 = idx as f32 / samples;
        t0 + (t1 - t0) * alpha
    }
}

/// A single cubic Bézier segment
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSegment {
    pub start: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub end: Vec2,
    table: ArcLengthTable,
}

impl CubicSegment {
    pub fn new(start: Vec2, ctrl1: Vec2, ctrl2: Vec2, end: Vec2) -> Self {
        let table = ArcLengthTable::new(CURVE_TABLE_SAMPLES, |t| {
            cubic_point(start, ctrl1, ctrl2, end, t)
        });
        Self {
            start,
            ctrl1,
            ctrl2,
            end,
            table,
        }
    }

    /// Segment through `p1` → `p2` with Catmull-Rom tangents from the neighbors
    ///
    /// Control points sit at `p1 + (p2 - p0) / 6` and `p2 - (p3 - p1) / 6`,
    /// which keeps the curve passing through every input point.
    pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        let ctrl1 = p1 + (p2 - p0) / 6.0;
        let ctrl2 = p2 - (p3 - p1) / 6.0;
        Self::new(p1, ctrl1, ctrl2, p2)
    }

    /// Point at curve parameter `t` (clamped to [0, 1])
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.start;
        }
        if t == 1.0 {
            return self.end;
        }
        cubic_point(self.start, self.ctrl1, self.ctrl2, self.end, t)
    }

    /// Approximate arc length of the segment
    #[inline]
    pub fn length(&self) -> f32 {
        self.table.total()
    }

    /// Point at arc length `length` from the segment start (clamped)
    pub fn point_at_length(&self, length: f32) -> Vec2 {
        self.point_at(self.table.param_for_length(length))
    }
}

/// Bernstein form of a cubic Bézier
#[inline]
fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
