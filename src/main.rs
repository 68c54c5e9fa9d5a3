//! Zigzag Duel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, PageTransitionEvent,
        ResizeObserver, TouchEvent,
    };

    use zigzag_duel::platform::RafScheduler;
    use zigzag_duel::renderer::{Palette, RenderError, RenderState, build_scene};
    use zigzag_duel::sim::{SurfaceBounds, Winner};
    use zigzag_duel::{GameSession, Settings, Viewport};

    /// Game instance holding all state
    struct App {
        session: GameSession<RafScheduler>,
        render_state: Option<RenderState>,
        settings: Settings,
        container: Element,
        canvas: HtmlCanvasElement,
        /// Winner currently shown by the overlay
        shown_winner: Option<Winner>,
    }

    impl App {
        /// Frame callback from the scheduler
        fn frame(&mut self, time: f64) {
            self.session.on_frame(time);
            self.render(time);
            self.sync_overlay();
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let view = self.session.view();
            let vertices = build_scene(&view, render_state.logical_size, &self.settings, time);
            let palette = Palette::for_settings(self.settings.high_contrast);
            match render_state.render(&vertices, palette.background) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Show/hide the victory overlay when the winner changes
        fn sync_overlay(&mut self) {
            let winner = self.session.view().winner;
            if winner == self.shown_winner {
                return;
            }
            self.shown_winner = winner;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("victory-title") {
                if let Some(w) = winner {
                    el.set_text_content(Some(&format!("{} Wins!", w)));
                }
            }
            if let Some(el) = document.get_element_by_id("victory-overlay") {
                let class = if winner.is_some() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Container size changed
        fn resize(&mut self, time: f64) {
            let viewport =
                Viewport::from_client(self.container.client_width(), self.container.client_height());
            if !self.session.resize(viewport) {
                return;
            }
            let (pw, ph) = size_canvas(&self.canvas, viewport);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(pw, ph, viewport.path_size());
            }
            // The frame loop may be stopped (round over); draw the new layout now
            self.render(time);
        }

        fn tap(&mut self, client_y: f32, time: f64) {
            let rect = self.canvas.get_bounding_client_rect();
            let bounds = SurfaceBounds::new(rect.top() as f32, rect.height() as f32);
            self.session.tap(client_y, bounds, time);
        }

        fn restart(&mut self, time: f64) {
            self.session.restart(time);
            self.sync_overlay();
            self.render(time);
        }

        /// Keyboard shortcut for a preference; saved immediately
        fn toggle_setting(&mut self, key: &str, time: f64) {
            if !self.settings.toggle_for_key(key) {
                return;
            }
            self.settings.save();
            log::info!("Settings: {:?}", self.settings);
            // Redraw even when the round is over and no frame is pending
            self.render(time);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Match the canvas backing store to the viewport; returns physical size
    fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = ((viewport.width.max(1) as f64) * dpr) as u32;
        let height = ((viewport.height.max(1) as f64) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        viewport: Viewport,
    ) -> Result<RenderState, RenderError> {
        let (width, height) = size_canvas(canvas, viewport);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, viewport.path_size()).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Zigzag Duel starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let container = document
            .get_element_by_id("game-container")
            .ok_or("no game container")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let viewport = Viewport::from_client(container.client_width(), container.client_height());

        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let weak = weak.clone();
            let scheduler = RafScheduler::new(window.clone(), move |time: f64| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().frame(time);
                }
            });
            RefCell::new(App {
                session: GameSession::new(viewport, scheduler, now_ms()),
                render_state: None,
                settings,
                container: container.clone(),
                canvas: canvas.clone(),
                shown_winner: None,
            })
        });

        match init_renderer(&canvas, viewport).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Renderer unavailable: {}", e);
                return Err(JsValue::from_str(&e.to_string()));
            }
        }

        setup_input_handlers(&canvas, app.clone())?;
        setup_resize_observer(&container, app.clone())?;
        setup_restart_button(app.clone());
        setup_teardown(app.clone());

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        app.borrow_mut().session.start();
        log::info!("Zigzag Duel running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Mouse down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                app.borrow_mut().tap(event.client_y() as f32, now_ms());
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    app.borrow_mut().tap(touch.client_y() as f32, now_ms());
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() || event.ctrl_key() || event.meta_key() || event.alt_key() {
                    return;
                }
                app.borrow_mut().toggle_setting(&event.key(), now_ms());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_observer(container: &Element, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
            app.borrow_mut().resize(now_ms());
        });
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
        observer.observe(container);
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart(now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Page hidden: stop the loop whether or not it goes into the back/forward cache
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                app.borrow_mut().session.teardown();
                log::info!("Frame loop stopped (page hidden, cached: {})", event.persisted());
            });
            let _ =
                window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restored from the back/forward cache: the wasm instance survived, resume it
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let mut app = app.borrow_mut();
                app.session.resume();
                app.render(now_ms());
            });
            let _ =
                window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Zigzag Duel (native) starting...");
    log::info!("Native mode runs a headless scripted round - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted round driven by a manual scheduler
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use zigzag_duel::platform::ManualScheduler;
    use zigzag_duel::{GameSession, Viewport};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_ROUND_MS: f64 = 60_000.0;

    /// (time ms, surface-local y) taps for one round
    const TAPS: [(f64, f32); 4] = [(0.0, 600.0), (900.0, 40.0), (1500.0, 600.0), (1700.0, 610.0)];

    pub fn run() {
        let viewport = Viewport::new(360, 640);
        let mut session = GameSession::new(viewport, ManualScheduler::new(), 0.0);
        let bounds = viewport.bounds();
        log::info!(
            "Path: {} points, {:.1} px long",
            session.path().points().len(),
            session.path().total_length()
        );

        session.start();
        let mut now = 0.0;
        let mut taps = TAPS.iter().peekable();
        while session.scheduler_mut().take_pending() && now <= MAX_ROUND_MS {
            while let Some(&&(at, y)) = taps.peek() {
                if at > now {
                    break;
                }
                session.tap(y, bounds, now);
                taps.next();
            }
            session.on_frame(now);
            now += FRAME_MS;
        }

        let round = session.round();
        match round.winner {
            Some(winner) => log::info!("{} wins after {:.2}s", winner, now / 1000.0),
            None => log::warn!("No winner after {:.0}s", now / 1000.0),
        }
        log::info!(
            "Final progress {:.3}, trail holds {} samples",
            round.progress,
            round.trail.len()
        );

        session.teardown();
    }
}
