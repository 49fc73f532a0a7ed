//! Bounce Lab entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use bounce_lab::consts;
    use bounce_lab::renderer::vertex::colors;
    use bounce_lab::renderer::{RenderState, shapes};
    use bounce_lab::sim::{PolygonFollower, SimEvent, SimState, TickInput, tick};
    use bounce_lab::video::VideoToggle;
    use bounce_lab::{Settings, Tuning};

    /// Which visualization is active
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scene {
        Ball,
        Polygon,
    }

    /// Application instance holding all state
    struct App {
        sim: SimState,
        polygon: PolygonFollower,
        scene: Scene,
        render_state: Option<RenderState>,
        input: TickInput,
        tuning: Tuning,
        settings: Settings,
        video: VideoToggle,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(bounds: Vec2) -> Self {
            let settings = Settings::load();
            let tuning = Tuning::load();
            let video = VideoToggle::new(consts::VIDEO_ID, settings.video_toggle);
            Self {
                sim: SimState::new(bounds, &tuning),
                polygon: PolygonFollower::new(
                    settings.polygon_sides,
                    settings.polygon_radius,
                    bounds / 2.0,
                ),
                scene: Scene::Ball,
                render_state: None,
                input: TickInput::default(),
                tuning,
                settings,
                video,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation one tick and react to its events
        fn update(&mut self, time: f64) {
            let events = tick(&mut self.sim, &self.input, &self.tuning);

            // Clear one-shot inputs after processing
            self.input.grow = false;

            for event in events {
                match event {
                    SimEvent::EdgeHit(hits) => {
                        log::debug!(
                            "Edge hit (top {} left {} right {})",
                            hits.top,
                            hits.left,
                            hits.right
                        );
                        self.video.on_edge_hit();
                    }
                    SimEvent::FloorBounce { impact_speed } => {
                        log::debug!("Floor bounce at speed {impact_speed:.2}");
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let mut vertices = Vec::new();
            match self.scene {
                Scene::Ball => {
                    vertices.extend(shapes::rect_border(
                        Vec2::splat(1.0),
                        self.sim.bounds - Vec2::splat(2.0),
                        consts::BORDER_WIDTH,
                        colors::BORDER,
                    ));
                    vertices.extend(shapes::rect(
                        self.sim.body.pos,
                        self.sim.body.size,
                        colors::BODY,
                    ));
                }
                Scene::Polygon => {
                    let points = self.polygon.points();
                    vertices.extend(shapes::polygon_fan(
                        self.polygon.center,
                        &points,
                        colors::POLYGON_FILL,
                    ));
                    vertices.extend(shapes::polyline(&points, 2.0, colors::POLYGON_STROKE));
                }
            }

            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            if let Some(el) = document
                .query_selector("#hud-scene .hud-value")
                .ok()
                .flatten()
            {
                let name = match self.scene {
                    Scene::Ball => "ball",
                    Scene::Polygon => "polygon",
                };
                el.set_text_content(Some(name));
            }
        }

        fn toggle_scene(&mut self) {
            self.scene = match self.scene {
                Scene::Ball => Scene::Polygon,
                Scene::Polygon => Scene::Ball,
            };
            log::info!("Scene: {:?}", self.scene);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bounce Lab starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let bounds = Vec2::new(client_w as f32, client_h as f32);
        let app = Rc::new(RefCell::new(App::new(bounds)));

        log::info!("Canvas {client_w}x{client_h} (dpr {dpr})");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (client_w as f32, client_h as f32),
        )
        .await;
        app.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, app.clone());

        // Start animation loop
        request_animation_frame(app);

        log::info!("Bounce Lab running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - try to grab the body
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.scene != Scene::Ball {
                    return;
                }
                let pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                if a.sim.body.begin_drag(pointer) {
                    log::debug!("Drag started at {pointer}");
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - drag the body or recenter the polygon
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                match a.scene {
                    Scene::Ball => {
                        let bounds = a.sim.bounds;
                        let accel = a.tuning.drag_accel_factor;
                        a.sim.body.drag(pointer, bounds, accel);
                    }
                    Scene::Polygon => a.polygon.follow(pointer),
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - release
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().sim.body.end_drag();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - grab
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    if a.scene != Scene::Ball {
                        return;
                    }
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pointer = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    a.sim.body.begin_drag(pointer);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - drag or recenter
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pointer = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    match a.scene {
                        Scene::Ball => {
                            let bounds = a.sim.bounds;
                            let accel = a.tuning.drag_accel_factor;
                            a.sim.body.drag(pointer, bounds, accel);
                        }
                        Scene::Polygon => a.polygon.follow(pointer),
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - release
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().sim.body.end_drag();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " => a.input.grow = true,
                    "p" | "P" => a.toggle_scene(),
                    "f" | "F" => {
                        a.settings.show_fps = !a.settings.show_fps;
                        a.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
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
    log::info!("Bounce Lab (native) starting...");
    log::info!("Native mode has no canvas - run with `trunk serve` for the web version");

    println!("\nRunning headless drop check...");
    headless_drop_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_drop_check() {
    use bounce_lab::Tuning;
    use bounce_lab::sim::{SimEvent, SimState, TickInput, tick};
    use glam::Vec2;

    let tuning = Tuning::default();
    let bounds = Vec2::new(800.0, 600.0);
    let mut state = SimState::new(bounds, &tuning);

    // Resting height once the damped bounce dies out
    let rest_y = bounds.y - state.body.size.y - tuning.gravity.y;

    let mut bounces = 0u32;
    for _ in 0..20_000 {
        for event in tick(&mut state, &TickInput::default(), &tuning) {
            if matches!(event, SimEvent::FloorBounce { .. }) {
                bounces += 1;
            }
        }
        if state.body.vel.y == 0.0 && state.body.pos.y == rest_y {
            break;
        }
    }

    assert_eq!(state.body.vel.y, 0.0, "body should settle on the floor");
    assert_eq!(state.body.pos.y, rest_y);
    println!(
        "✓ Settled after {} ticks and {} bounces",
        state.time_ticks, bounces
    );
}
