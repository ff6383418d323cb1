//! Kangoo Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use kangoo_jump::audio::AudioManager;
    use kangoo_jump::consts::SIM_DT;
    use kangoo_jump::platform::web::DomScoreDisplay;
    use kangoo_jump::renderer::{RenderState, VertexBatch};
    use kangoo_jump::{Game, Settings, Tuning};

    /// Everything the animation frame needs
    struct App {
        game: Game<AudioManager, DomScoreDisplay>,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.game.record_frame(time);
            self.game.advance(dt);
            self.render();
        }

        /// Render the current frame
        fn render(&mut self) {
            let mut batch = VertexBatch::new(self.game.sprites());
            self.game.render(&mut batch);
            match self.render_state.render(&batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Match the backing store to the displayed canvas size
        fn fit_canvas(&mut self) {
            let (width, height) = canvas_pixel_size(&self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);
        }

        fn press(&mut self) {
            self.game.sound().resume();
            self.game.press();
        }
    }

    fn canvas_pixel_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    /// Balance overrides from an optional `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Kangoo Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = canvas_pixel_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let query = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&query);
        let tuning = load_tuning(&document);
        let world_size = (tuning.world_width, tuning.world_height);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height, world_size).await
        {
            Ok(state) => state,
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        };

        let audio = AudioManager::new(&settings);
        let display = DomScoreDisplay::new(document.clone());
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, tuning, settings, audio, display),
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Kangoo Jump running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "Enter" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        if !event.repeat() {
                            a.press();
                        }
                    }
                    "a" | "A" => {
                        a.game.toggle_autopilot();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the synthesized mouse events
                event.prevent_default();
                app.borrow_mut().press();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    app.borrow_mut().press();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless autopilot session: `kangoo-jump [seed] [ticks]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use kangoo_jump::platform::{ScoreLog, Silent};
    use kangoo_jump::sim::GamePhase;
    use kangoo_jump::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Kangoo Jump (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let settings = Settings {
        autopilot: true,
        ..Default::default()
    };
    let mut game = Game::new(seed, Tuning::default(), settings, Silent, ScoreLog::default());
    for _ in 0..ticks {
        game.step();
    }

    let state = game.state();
    let outcome = match state.phase {
        GamePhase::Running => "still running",
        GamePhase::Over => "crashed",
        GamePhase::Idle => "never started",
    };
    log::info!(
        "Seed {seed}: {outcome} after {ticks} ticks, score {}, speed {:.1}, rounds {}",
        state.score,
        state.speed,
        state.rounds
    );
    println!(
        "seed={seed} ticks={ticks} score={} speed={:.1} finished_rounds={:?}",
        state.score,
        state.speed,
        game.display().final_scores
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
