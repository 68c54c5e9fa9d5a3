//! Round state and core simulation types
//!
//! Everything the integrator reads or writes between frames lives in
//! [`RoundState`]; it is replaced wholesale on restart.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_SPEED, START_PROGRESS, TRAIL_CAPACITY};

/// Which way the last tap pushes the ball along the path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Toward progress 0 (Player 1's end)
    TowardPlayerOne,
    /// No tap yet
    #[default]
    Idle,
    /// Toward progress 1 (Player 2's end)
    TowardPlayerTwo,
}

impl Direction {
    /// -1, 0 or +1
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::TowardPlayerOne => -1.0,
            Direction::Idle => 0.0,
            Direction::TowardPlayerTwo => 1.0,
        }
    }
}

/// Declared winner of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::PlayerOne => "Player 1",
            Winner::PlayerTwo => "Player 2",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integrator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ball is moving, taps are accepted
    Running,
    /// A winner is set; only a restart leaves this phase
    Ended,
}

/// A sampled ball position for the fading trail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Frame timestamp in milliseconds
    pub time_ms: f64,
}

/// Bounded history of recent ball positions, oldest first
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    /// Append a sample, evicting the oldest once over capacity
    pub fn push(&mut self, pos: Vec2, time_ms: f64) {
        self.points.push_back(TrailPoint { pos, time_ms });
        while self.points.len() > TRAIL_CAPACITY {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// All stored samples in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Samples younger than `max_age_ms`, paired with their freshness
    /// (1.0 = just recorded, approaching 0.0 at `max_age_ms`)
    pub fn visible(&self, now_ms: f64, max_age_ms: f64) -> impl Iterator<Item = (&TrailPoint, f32)> {
        self.points.iter().filter_map(move |p| {
            let age = now_ms - p.time_ms;
            if age < max_age_ms {
                let freshness = (1.0 - age.max(0.0) / max_age_ms) as f32;
                Some((p, freshness))
            } else {
                None
            }
        })
    }
}

/// Complete per-round state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Position along the path, 0 = Player 1's end, 1 = Player 2's end
    pub progress: f32,
    /// Signed speed along the path (px/s)
    pub velocity: f32,
    /// Speed magnitude the ball eases toward once a tap lands
    pub target_speed: f32,
    pub direction: Direction,
    /// Start of the current velocity ramp (ms)
    pub easing_start_ms: f64,
    /// Previous frame timestamp; `None` until the first frame after (re)start
    pub last_frame_ms: Option<f64>,
    /// Last mapped ball position
    pub ball: Option<Vec2>,
    pub winner: Option<Winner>,
    pub trail: Trail,
}

impl RoundState {
    /// A fresh round with the ball at the middle of the path
    pub fn new(now_ms: f64) -> Self {
        Self {
            progress: START_PROGRESS,
            velocity: 0.0,
            target_speed: BASE_SPEED,
            direction: Direction::Idle,
            easing_start_ms: now_ms,
            last_frame_ms: None,
            ball: None,
            winner: None,
            trail: Trail::new(),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.winner.is_some() {
            RoundPhase::Ended
        } else {
            RoundPhase::Running
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase() == RoundPhase::Running
    }

    /// Drop the frame-time baseline so the next frame integrates zero time
    pub fn reset_frame_baseline(&mut self) {
        self.last_frame_ms = None;
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(0.0)
    }
}
