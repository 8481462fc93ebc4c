//! Ghost Hunt entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use ghost_hunt::audio::AudioManager;
    use ghost_hunt::platform::LocalStorage;
    use ghost_hunt::renderer::{CanvasRenderer, Renderer, scene};
    use ghost_hunt::sim::Viewport;
    use ghost_hunt::{Game, GameConfig, Preferences};

    /// Browser host: the session plus its canvas
    struct App {
        game: Game<LocalStorage, AudioManager>,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
    }

    impl App {
        fn pointer(&mut self, x: f32, y: f32, time: f64) {
            self.game.press(x, y, time);
        }

        fn key(&mut self, key: &str, time: f64) {
            match key {
                " " | "Enter" if !self.game.state().is_running() => self.game.restart(time),
                "m" | "M" => {
                    let muted = self.game.toggle_mute();
                    log::info!("Muted: {}", muted);
                }
                _ => {}
            }
        }

        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let w = self.canvas.client_width() as f64;
            let h = self.canvas.client_height() as f64;
            self.renderer.resize(w, h, window.device_pixel_ratio());
            self.game.resize(Viewport::new(w as f32, h as f32));
        }

        fn frame(&mut self, time: f64) {
            let report = self.game.frame(time);
            if let Some(run) = report.finished {
                log::info!(
                    "Final score {} (level {}), rank {:?}",
                    run.score,
                    run.level,
                    run.rank
                );
            }
            let shapes = scene(
                self.game.state(),
                self.game.leaderboard(),
                self.game.last_run(),
            );
            self.renderer.render(&shapes);
        }
    }

    /// Pointer position relative to the canvas, in CSS pixels
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn now() -> f64 {
        ghost_hunt::platform::now_ms()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Ghost Hunt starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(canvas.clone()).ok_or("no 2d context")?;

        let storage = LocalStorage::new();
        let preferences = Preferences::load(&storage);
        let mut audio = AudioManager::new();
        audio.set_master_volume(preferences.master_volume);
        audio.set_sfx_volume(preferences.sfx_volume);

        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let game = Game::new(GameConfig::default(), viewport, storage, audio);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            canvas: canvas.clone(),
        }));
        app.borrow_mut().fit_to_window();

        setup_input_handlers(&window, &canvas, app.clone());
        setup_resize(&window, app.clone());

        request_animation_frame(app);
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        // Mouse down (capture / start)
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                app.borrow_mut().pointer(x, y, now());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let (x, y) = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    app.borrow_mut().pointer(x, y, now());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().key(event.key().as_str(), now());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ghost Hunt (native) starting...");
    log::info!("Playing a scripted headless session - run with `trunk serve` for the web version");

    let summary = headless_session();
    println!(
        "\nFinal score: {}  level: {}  rank: {}",
        summary.score,
        summary.level,
        summary.rank.map_or_else(|| "-".to_string(), |r| format!("#{}", r))
    );
}

/// Play one full session at 60 fps, catching a ghost every quarter second
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() -> ghost_hunt::RunSummary {
    use ghost_hunt::audio::NullAudio;
    use ghost_hunt::platform::MemoryStorage;
    use ghost_hunt::renderer::hud_line;
    use ghost_hunt::sim::Viewport;
    use ghost_hunt::{Game, GameConfig};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let config = GameConfig {
        seed: Some(42),
        ..Default::default()
    };
    let mut game = Game::new(config, Viewport::new(800.0, 600.0), MemoryStorage::new(), NullAudio);
    game.start(0.0);

    let mut frame = 0u64;
    while game.state().is_running() {
        frame += 1;
        let now = frame as f64 * FRAME_MS;
        game.frame(now);

        if frame % 15 == 0 {
            let target = game
                .state()
                .ghosts
                .iter()
                .find(|g| !g.captured && g.opacity > 0.5)
                .map(|g| g.center());
            if let Some(center) = target {
                game.click(center.x, center.y);
            }
        }

        if frame % 60 == 0 {
            log::info!("{}", hud_line(game.state()));
        }
    }

    game.last_run().cloned().unwrap_or(ghost_hunt::RunSummary {
        score: game.state().score,
        level: game.state().level,
        rank: None,
        saved: false,
    })
}
