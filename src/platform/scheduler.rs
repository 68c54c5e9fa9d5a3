//! Frame scheduling
//!
//! At most one frame is outstanding at a time: asking for the next frame
//! while one is pending replaces it rather than queueing a second callback.

/// Minimal "call me on the next frame" capability
pub trait FrameScheduler {
    /// Request a frame callback, replacing any pending request
    fn schedule_next(&mut self);
    /// Drop the pending request, if any
    fn cancel(&mut self);
    /// Mark the pending request as delivered (called at the top of a frame)
    fn frame_delivered(&mut self);
    fn is_pending(&self) -> bool;
}

/// Scheduler for native runs and tests; a driver fires frames explicitly
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    /// Total requests made
    pub requests: u32,
    /// Total cancellations of a pending request
    pub cancels: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request; the driver should then deliver a frame
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel(&mut self) {
        if self.pending {
            self.pending = false;
            self.cancels += 1;
        }
    }

    fn frame_delivered(&mut self) {
        self.pending = false;
    }

    fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(target_arch = "wasm32")]
mod raf {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use super::FrameScheduler;

    /// `requestAnimationFrame`-backed scheduler
    pub struct RafScheduler {
        window: web_sys::Window,
        callback: Closure<dyn FnMut(f64)>,
        handle: Option<i32>,
    }

    impl RafScheduler {
        /// `on_frame` receives the frame timestamp in milliseconds
        pub fn new(window: web_sys::Window, on_frame: impl FnMut(f64) + 'static) -> Self {
            Self {
                window,
                callback: Closure::new(on_frame),
                handle: None,
            }
        }
    }

    impl FrameScheduler for RafScheduler {
        fn schedule_next(&mut self) {
            self.cancel();
            match self
                .window
                .request_animation_frame(self.callback.as_ref().unchecked_ref())
            {
                Ok(id) => self.handle = Some(id),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }

        fn cancel(&mut self) {
            if let Some(id) = self.handle.take() {
                let _ = self.window.cancel_animation_frame(id);
            }
        }

        fn frame_delivered(&mut self) {
            self.handle = None;
        }

        fn is_pending(&self) -> bool {
            self.handle.is_some()
        }
    }

    impl Drop for RafScheduler {
        fn drop(&mut self) {
            // The closure dies with us; JS must not call it afterwards
            self.cancel();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use raf::RafScheduler;
