//! Bouncing Qyuts entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use bouncing_qyuts::renderer::{RenderState, build_frame};
    use bouncing_qyuts::{App, Settings, Viewport};

    /// Browser host: simulation plus GPU state
    struct Host {
        app: App,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        viewport: Viewport,
        last_time: f64,
        start_time: f64,
    }

    impl Host {
        /// Re-read the canvas size; resizes the surface when it changed
        fn refresh_viewport(&mut self) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let dpr = window.device_pixel_ratio();
            let w = self.canvas.client_width();
            let h = self.canvas.client_height();
            let viewport = Viewport::new(w as f32, h as f32);
            if viewport == self.viewport {
                return;
            }

            self.viewport = viewport;
            let pw = (w as f64 * dpr) as u32;
            let ph = (h as f64 * dpr) as u32;
            self.canvas.set_width(pw);
            self.canvas.set_height(ph);
            if let Some(ref mut rs) = self.render_state {
                rs.resize(pw, ph);
                rs.set_viewport(viewport);
            }
            log::debug!("Viewport now {}x{}", w, h);
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            // Boundaries follow the surface every frame
            self.refresh_viewport();
            let summary = self.app.update(dt, self.viewport);
            if !summary.removed.is_empty() {
                log::info!("{} qyut(s) worn out", summary.removed.len());
            }

            if let Some(ref mut rs) = self.render_state {
                let elapsed = (time - self.start_time) / 1000.0;
                let vertices = build_frame(self.app.snapshot(), self.viewport, &self.app.settings, elapsed);
                match rs.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        rs.resize(rs.size.0, rs.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Bouncing Qyuts starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let now = js_sys::Date::now();

        let host = Rc::new(RefCell::new(Host {
            app: App::new(settings, seed),
            render_state: None,
            canvas: canvas.clone(),
            viewport: Viewport::new(0.0, 0.0),
            last_time: 0.0,
            start_time: now,
        }));
        host.borrow_mut().refresh_viewport();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, &host).await {
            Ok(rs) => host.borrow_mut().render_state = Some(rs),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        setup_input_handlers(&canvas, host.clone());
        setup_teardown(host.clone());
        request_animation_frame(host);

        log::info!("Bouncing Qyuts running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        host: &Rc<RefCell<Host>>,
    ) -> Result<RenderState, String> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let viewport = host.borrow().viewport;
        RenderState::new(surface, &adapter, canvas.width(), canvas.height(), viewport)
            .await
            .map_err(|e| e.to_string())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Mouse click - spawn at the pointer
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                let height = h.viewport.height;
                h.app.click(event.offset_x() as f32, event.offset_y() as f32, height);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - spawn at every new touch point
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let touches = event.changed_touches();
                let mut h = host.borrow_mut();
                let height = h.viewport.height;
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let y = touch.client_y() as f32 - rect.top() as f32;
                        h.app.click(x, y, height);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the clock when the page goes away
    fn setup_teardown(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PageTransitionEvent| {
            host.borrow_mut().app.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            if h.app.is_stopped() {
                return;
            }
            h.frame(time);
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncing Qyuts (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the simulation without a window: a few scripted clicks, ten
/// simulated seconds at 60 fps, one log line per second.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless() {
    use bouncing_qyuts::{App, Settings, Viewport};

    const FRAME_DT: f32 = 1.0 / 60.0;

    let settings = Settings::load();
    let mut app = App::new(settings, 0x5eed);
    let viewport = Viewport::new(1280.0, 720.0);

    let clicks = [(200.0, 200.0), (240.0, 220.0), (640.0, 360.0), (660.0, 380.0), (1000.0, 600.0)];
    for (x, y) in clicks {
        app.click(x, y, viewport.height);
    }

    let mut removed = 0;
    for frame in 1..=600u32 {
        let summary = app.update(FRAME_DT, viewport);
        removed += summary.removed.len();

        if frame % 60 == 0 {
            let worst = app.snapshot().iter().map(|q| q.collision_count).max().unwrap_or(0);
            log::info!(
                "t={}s alive={} removed={} max_collisions={}",
                frame / 60,
                app.snapshot().len(),
                removed,
                worst
            );
        }
    }

    app.stop();
    println!(
        "Simulated {} ticks: {} alive, {} removed",
        app.state().time_ticks,
        app.snapshot().len(),
        removed
    );
}
