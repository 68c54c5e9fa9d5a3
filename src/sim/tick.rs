//! Per-frame motion integration
//!
//! `integrate` is a pure step: it takes the round by value, advances it to
//! the frame timestamp `now_ms` and hands it back. It never touches the
//! scheduler, so it can be driven by tests without a live frame loop.

use super::easing::{ease_in_out_cubic, lerp};
use super::path::ZigzagPath;
use super::state::{RoundState, Winner};
use crate::consts::EASE_DURATION_MS;

/// Seconds elapsed since the previous frame
///
/// The first frame after (re)start has no baseline and integrates zero time,
/// as does a clock that runs backwards.
fn frame_dt(last_frame_ms: Option<f64>, now_ms: f64) -> f32 {
    match last_frame_ms {
        Some(last) => {
            let dt = (now_ms - last) / 1000.0;
            if dt.is_finite() && dt > 0.0 { dt as f32 } else { 0.0 }
        }
        None => 0.0,
    }
}

/// Advance the round to frame time `now_ms`
pub fn integrate(mut state: RoundState, path: &ZigzagPath, now_ms: f64) -> RoundState {
    if !state.is_running() {
        return state;
    }

    let dt = frame_dt(state.last_frame_ms, now_ms);
    state.last_frame_ms = Some(now_ms);

    // Ease velocity toward the signed target
    let target = state.direction.sign() * state.target_speed;
    let ease = ((now_ms - state.easing_start_ms) / EASE_DURATION_MS).clamp(0.0, 1.0) as f32;
    state.velocity = lerp(state.velocity, target, ease_in_out_cubic(ease));

    // Advance along the path by arc length
    let total = path.total_length();
    let mut progress = state.progress;
    if total > 0.0 {
        progress += state.velocity * dt / total;
    }

    if progress <= 0.0 {
        progress = 0.0;
        state.winner = Some(Winner::PlayerOne);
    } else if progress >= 1.0 {
        progress = 1.0;
        state.winner = Some(Winner::PlayerTwo);
    }
    state.progress = progress;

    if let Some(winner) = state.winner {
        log::info!("{} wins", winner);
    }

    let pos = path.point_at_length(progress * total);
    state.ball = Some(pos);
    state.trail.push(pos, now_ms);

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TRAIL_CAPACITY;
    use crate::sim::state::{Direction, RoundPhase};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn path() -> ZigzagPath {
        ZigzagPath::build(300.0, 600.0)
    }

    /// Run frames at 60 Hz until the round ends or `max_frames` pass
    fn run(mut state: RoundState, path: &ZigzagPath, start_ms: f64, max_frames: usize) -> RoundState {
        for i in 0..max_frames {
            state = integrate(state, path, start_ms + i as f64 * FRAME_MS);
            if !state.is_running() {
                break;
            }
        }
        state
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        state.velocity = 160.0;
        // Huge timestamp with no baseline must not teleport the ball
        let state = integrate(state, &path, 1.0e9);
        assert_eq!(state.progress, 0.5);
        assert_eq!(state.last_frame_ms, Some(1.0e9));
        assert!(state.is_running());
    }

    #[test]
    fn test_idle_direction_does_not_move() {
        let path = path();
        let state = run(RoundState::new(0.0), &path, 0.0, 600);
        assert_eq!(state.progress, 0.5);
        assert_eq!(state.velocity, 0.0);
        assert!(state.is_running());
    }

    #[test]
    fn test_velocity_reaches_base_speed_after_ramp() {
        let path = ZigzagPath::build(2000.0, 20000.0);
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        state.easing_start_ms = 0.0;
        let mut t = 0.0;
        while t <= 320.0 {
            state = integrate(state, &path, t);
            t += FRAME_MS;
        }
        assert!(state.is_running());
        assert!((state.velocity - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_velocity_ramp_is_gradual() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerOne;
        state = integrate(state, &path, 0.0);
        state = integrate(state, &path, 50.0);
        assert!(state.velocity < 0.0);
        assert!(state.velocity > -160.0);
    }

    #[test]
    fn test_push_toward_player_two_wins_for_player_two() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        let state = run(state, &path, 0.0, 60 * 60);
        assert_eq!(state.winner, Some(Winner::PlayerTwo));
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.ball, Some(path.end()));
    }

    #[test]
    fn test_push_toward_player_one_wins_for_player_one() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerOne;
        let state = run(state, &path, 0.0, 60 * 60);
        assert_eq!(state.winner, Some(Winner::PlayerOne));
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.ball, Some(path.start()));
    }

    #[test]
    fn test_overshoot_clamps_exactly() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        state.velocity = 160.0;
        state.progress = 0.999;
        state.last_frame_ms = Some(0.0);
        // One long step would carry progress far past 1
        let state = integrate(state, &path, 5000.0);
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.winner, Some(Winner::PlayerTwo));

        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerOne;
        state.velocity = -160.0;
        state.progress = 0.001;
        state.last_frame_ms = Some(0.0);
        let state = integrate(state, &path, 5000.0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.winner, Some(Winner::PlayerOne));
    }

    #[test]
    fn test_ended_round_is_frozen() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerOne;
        let ended = run(state, &path, 0.0, 60 * 60);
        assert_eq!(ended.phase(), RoundPhase::Ended);

        let after = integrate(ended.clone(), &path, 1.0e6);
        assert_eq!(after, ended);
    }

    #[test]
    fn test_backwards_clock_is_zero_dt() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        state.velocity = 160.0;
        state.easing_start_ms = -1000.0;
        state.last_frame_ms = Some(500.0);
        let state = integrate(state, &path, 100.0);
        assert_eq!(state.progress, 0.5);
    }

    #[test]
    fn test_trail_bound_after_many_ticks() {
        let path = path();
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        for i in 0..(TRAIL_CAPACITY * 2) {
            state = integrate(state, &path, i as f64 * FRAME_MS);
        }
        assert!(state.is_running());
        assert_eq!(state.trail.len(), TRAIL_CAPACITY);

        let times: Vec<f64> = state.trail.iter().map(|p| p.time_ms).collect();
        let expected: Vec<f64> = (TRAIL_CAPACITY..TRAIL_CAPACITY * 2)
            .map(|i| i as f64 * FRAME_MS)
            .collect();
        assert_eq!(times, expected);
        assert_eq!(state.trail.iter().last().map(|p| p.pos), state.ball);
    }

    #[test]
    fn test_progress_always_in_range() {
        let path = ZigzagPath::build(40.0, 80.0);
        let mut state = RoundState::new(0.0);
        state.direction = Direction::TowardPlayerTwo;
        for i in 0..2000 {
            state = integrate(state, &path, i as f64 * 33.0);
            assert!((0.0..=1.0).contains(&state.progress));
        }
    }
}
