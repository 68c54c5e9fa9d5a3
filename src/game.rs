//! Game session: the single writer of round state
//!
//! Frames, taps, resizes and restart requests all come through here. The
//! session keeps the frame scheduler in step with the round: a frame is
//! pending exactly while the round is running.

use glam::Vec2;

use crate::platform::FrameScheduler;
use crate::sim::{
    RoundPhase, RoundState, SurfaceBounds, Trail, Winner, ZigzagPath, apply_tap, integrate,
};

/// Size of the play surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// From DOM client sizes, which may be zero or negative mid-layout
    pub fn from_client(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    /// Size used for geometry (never below 1x1)
    pub fn path_size(&self) -> (f32, f32) {
        (self.width.max(1) as f32, self.height.max(1) as f32)
    }

    /// Whole surface as tap bounds in surface-local coordinates
    pub fn bounds(&self) -> SurfaceBounds {
        SurfaceBounds::new(0.0, self.height as f32)
    }
}

/// What the presentation layer reads once per frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub path: &'a ZigzagPath,
    pub ball: Vec2,
    pub trail: &'a Trail,
    pub winner: Option<Winner>,
}

/// A running game bound to a frame scheduler
pub struct GameSession<S: FrameScheduler> {
    round: RoundState,
    path: ZigzagPath,
    viewport: Viewport,
    scheduler: S,
}

impl<S: FrameScheduler> GameSession<S> {
    /// Create a session with a fresh round; call [`start`](Self::start) to begin
    pub fn new(viewport: Viewport, scheduler: S, now_ms: f64) -> Self {
        let (w, h) = viewport.path_size();
        let path = ZigzagPath::build(w, h);
        let mut round = RoundState::new(now_ms);
        round.ball = Some(path.point_at_progress(round.progress));
        Self {
            round,
            path,
            viewport,
            scheduler,
        }
    }

    /// Request the first frame
    pub fn start(&mut self) {
        if self.round.is_running() {
            self.scheduler.schedule_next();
            log::info!(
                "Round started on {}x{} surface",
                self.viewport.width,
                self.viewport.height
            );
        }
    }

    /// Frame callback: integrate, then keep or stop the frame loop
    pub fn on_frame(&mut self, now_ms: f64) -> RoundPhase {
        self.scheduler.frame_delivered();
        if !self.round.is_running() {
            return RoundPhase::Ended;
        }

        let round = std::mem::take(&mut self.round);
        self.round = integrate(round, &self.path, now_ms);

        let phase = self.round.phase();
        match phase {
            RoundPhase::Running => self.scheduler.schedule_next(),
            RoundPhase::Ended => self.scheduler.cancel(),
        }
        phase
    }

    /// Tap at client coordinate `y`; ignored once the round has ended
    pub fn tap(&mut self, y: f32, bounds: SurfaceBounds, now_ms: f64) -> bool {
        apply_tap(&mut self.round, y, bounds, now_ms)
    }

    /// Container size changed: rebuild the path and restart frame timing
    ///
    /// Returns `false` if the size is unchanged.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        let (w, h) = viewport.path_size();
        self.path = ZigzagPath::build(w, h);
        self.round.ball = Some(self.path.point_at_progress(self.round.progress));
        self.round.reset_frame_baseline();
        log::info!("Resized to {}x{}", viewport.width, viewport.height);

        if self.round.is_running() {
            self.scheduler.schedule_next();
        }
        true
    }

    /// Replace the round with a fresh one and resume the frame loop
    pub fn restart(&mut self, now_ms: f64) {
        let mut round = RoundState::new(now_ms);
        round.ball = Some(self.path.point_at_progress(round.progress));
        self.round = round;
        self.scheduler.schedule_next();
        log::info!("Round restarted");
    }

    /// Stop the frame loop (page hidden or unloaded)
    pub fn teardown(&mut self) {
        self.scheduler.cancel();
    }

    /// Pick the frame loop back up after [`teardown`](Self::teardown)
    ///
    /// Time spent suspended is not simulated: the next frame has zero dt.
    /// Returns `false` when the round has already ended.
    pub fn resume(&mut self) -> bool {
        if !self.round.is_running() {
            return false;
        }
        self.round.reset_frame_baseline();
        self.scheduler.schedule_next();
        log::info!("Frame loop resumed");
        true
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            path: &self.path,
            ball: self
                .round
                .ball
                .unwrap_or_else(|| self.path.point_at_progress(self.round.progress)),
            trail: &self.round.trail,
            winner: self.round.winner,
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn path(&self) -> &ZigzagPath {
        &self.path
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
