//! Stack Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use glam::Vec3;
    use stack_drop::Settings;
    use stack_drop::consts::*;
    use stack_drop::physics::World;
    use stack_drop::renderer::RenderState;
    use stack_drop::scene::{self, Scene};
    use stack_drop::sim::{GameEvent, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: Scene,
        world: World,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        reload_scheduled: bool,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut scene = Scene::new();
            let mut world = World::new(Vec3::new(0.0, GRAVITY_Y, 0.0), SOLVER_ITERATIONS);
            let state = GameState::new(&mut scene, &mut world);

            Self {
                state,
                scene,
                world,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                settings,
                reload_scheduled: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input, &mut self.scene, &mut self.world, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.drop = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene, self.state.camera_y) {
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
        }

        /// React to drained session events: HUD pushes and the game-over
        /// alert + delayed reload (host policy, not core behavior)
        fn process_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::Started => {}
                    GameEvent::Placed { percent, score } => {
                        log::debug!("placed: {percent}% kept, score {score:.2}");
                        self.update_hud();
                    }
                    GameEvent::Missed { score } => {
                        log::info!("game over with score {score:.2}");
                        self.schedule_reload();
                    }
                }
            }
        }

        /// Push score and last-turn percentage into the page
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score-count") {
                el.set_text_content(Some(&format!("{:.2}", self.state.score)));
            }

            if self.settings.show_percent {
                if let Some(el) = document.get_element_by_id("remaining") {
                    el.set_text_content(Some(&format!("{}", self.state.last_percent)));
                }
            }

            if self.settings.tint_hud {
                if let Some(el) = document.query_selector(".container").ok().flatten() {
                    let css = scene::layer_hue_css(self.state.stack.len());
                    let _ = el.set_attribute("style", &format!("color: {css}"));
                }
            }
        }

        /// Blocking alert, then a full page reload after a fixed delay
        fn schedule_reload(&mut self) {
            if self.reload_scheduled {
                return;
            }
            self.reload_scheduled = true;

            let window = web_sys::window().expect("no window");
            let _ = window.alert_with_message("You missed the stack, game over!");

            let closure = Closure::once(move || {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                GAME_OVER_RELOAD_MS,
            );
            closure.forget();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stack Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();

        // Size the backing store, capped by the quality preset
        let dpr = window
            .device_pixel_ratio()
            .min(settings.quality.max_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(settings)));

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

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handler(game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Stack Drop running!");
    }

    /// One pointer event does everything: the first starts the session,
    /// every later one drops the sliding layer
    fn setup_input_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            game.borrow_mut().input.drop = true;
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window
                .device_pixel_ratio()
                .min(g.settings.quality.max_pixel_ratio());
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.process_events();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stack Drop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a short scripted session with near-perfect drops
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use glam::Vec3;
    use stack_drop::consts::*;
    use stack_drop::physics::World;
    use stack_drop::scene::Scene;
    use stack_drop::sim::{GamePhase, GameState, TickInput, tick};

    let mut scene = Scene::new();
    let mut world = World::new(Vec3::new(0.0, GRAVITY_Y, 0.0), SOLVER_ITERATIONS);
    let mut state = GameState::new(&mut scene, &mut world);

    let drop = TickInput { drop: true };
    let idle = TickInput::default();

    // First click starts the slide, each later one lands near dead center
    tick(&mut state, &drop, &mut scene, &mut world, SIM_DT);
    for _ in 0..8 {
        let top = state.top_index();
        let axis = state.stack[top].axis;
        while axis.component(scene.get(state.stack[top].visual).position)
            < axis.component(scene.get(state.stack[top - 1].visual).position)
        {
            tick(&mut state, &idle, &mut scene, &mut world, SIM_DT);
        }
        tick(&mut state, &drop, &mut scene, &mut world, SIM_DT);
        if state.phase == GamePhase::Ended {
            break;
        }
    }

    log::info!(
        "demo session: {} layers placed, {} off-cuts, score {:.2}",
        state.stack.len() - 2,
        state.overhangs.len(),
        state.score
    );
}
