//! Tap input mapping
//!
//! A tap above the surface's vertical midpoint sends the ball toward
//! Player 1's end (progress 0); anything else sends it toward Player 2's end.

use super::state::{Direction, RoundState};

/// Vertical extent of the interactive surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceBounds {
    pub top: f32,
    pub height: f32,
}

impl SurfaceBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Direction for a tap at client coordinate `y`
pub fn direction_for_tap(y: f32, bounds: SurfaceBounds) -> Direction {
    if y < bounds.mid_y() {
        Direction::TowardPlayerOne
    } else {
        Direction::TowardPlayerTwo
    }
}

/// Apply a tap to the round
///
/// Overwrites the direction and restarts the velocity ramp at `now_ms`.
/// Returns `false` (and leaves the round untouched) once a winner is set.
pub fn apply_tap(state: &mut RoundState, y: f32, bounds: SurfaceBounds, now_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    state.direction = direction_for_tap(y, bounds);
    state.easing_start_ms = now_ms;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Winner;

    #[test]
    fn test_top_half_pushes_toward_player_one() {
        let bounds = SurfaceBounds::new(0.0, 600.0);
        assert_eq!(direction_for_tap(10.0, bounds), Direction::TowardPlayerOne);
        assert_eq!(direction_for_tap(299.9, bounds), Direction::TowardPlayerOne);
    }

    #[test]
    fn test_midpoint_and_below_push_toward_player_two() {
        let bounds = SurfaceBounds::new(0.0, 600.0);
        assert_eq!(direction_for_tap(300.0, bounds), Direction::TowardPlayerTwo);
        assert_eq!(direction_for_tap(599.0, bounds), Direction::TowardPlayerTwo);
    }

    #[test]
    fn test_offset_surface() {
        let bounds = SurfaceBounds::new(100.0, 200.0);
        assert_eq!(direction_for_tap(150.0, bounds), Direction::TowardPlayerOne);
        assert_eq!(direction_for_tap(250.0, bounds), Direction::TowardPlayerTwo);
    }

    #[test]
    fn test_latest_tap_wins_and_resets_ramp() {
        let bounds = SurfaceBounds::new(0.0, 600.0);
        let mut state = RoundState::new(0.0);
        assert!(apply_tap(&mut state, 50.0, bounds, 100.0));
        assert_eq!(state.direction, Direction::TowardPlayerOne);
        assert_eq!(state.easing_start_ms, 100.0);

        assert!(apply_tap(&mut state, 550.0, bounds, 250.0));
        assert_eq!(state.direction, Direction::TowardPlayerTwo);
        assert_eq!(state.easing_start_ms, 250.0);
    }

    #[test]
    fn test_tap_ignored_after_winner() {
        let bounds = SurfaceBounds::new(0.0, 600.0);
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        state.winner = Some(Winner::PlayerTwo);
        let before = state.clone();
        assert!(!apply_tap(&mut state, 10.0, bounds, 999.0));
        assert_eq!(state, before);
    }
}
