//! Heart Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement};

    use heart_quest::GameError;
    use heart_quest::Settings;
    use heart_quest::assets::{AssetId, AssetRegistry};
    use heart_quest::consts::*;
    use heart_quest::renderer::{CanvasRenderState, HudExtras, build_frame};
    use heart_quest::sim::{GamePhase, GameState, HeldKeys, Overlay, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        assets: AssetRegistry,
        render_state: Option<CanvasRenderState>,
        keys: HeldKeys,
        autopilot: bool,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Last overlay pushed to the DOM
        shown_overlay: Option<Overlay>,
        // The page's own end-screen message
        proposal_text: String,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::with_settings(seed, &settings),
                settings,
                assets: AssetRegistry::new(),
                render_state: None,
                keys: HeldKeys::new(),
                autopilot: false,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                shown_overlay: None,
                proposal_text: String::new(),
            }
        }

        /// Run one simulation tick
        fn update(&mut self, delta_ms: f32, time: f64) {
            let input = TickInput::from_keys(&self.keys, self.autopilot);
            tick(&mut self.state, &input, delta_ms);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

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
            if let Err(e) = render_state.patch_stores(&mut self.assets) {
                log::warn!("Store composite failed: {}", e);
            }
            let extras = HudExtras {
                fps: self.settings.show_fps.then_some(self.fps),
            };
            let list = build_frame(&self.state, &self.assets, extras);
            if let Err(e) = render_state.render(&list) {
                log::warn!("Render error: {}", e);
            }
        }

        /// Mirror screen/button visibility onto the DOM
        fn update_dom(&mut self) {
            let overlay = self.state.overlay;
            if self.shown_overlay == Some(overlay) {
                return;
            }
            self.shown_overlay = Some(overlay);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_class(&document, "start-screen", "visible", overlay.start_visible);
            set_class(&document, "end-screen", "visible", overlay.end_visible);
            set_class(&document, "end-minimize-btn", "hidden", !overlay.minimize_visible);
            set_class(&document, "restore-btn", "hidden", !overlay.restore_visible);

            if self.state.phase == GamePhase::End {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
            if let Some(el) = document.get_element_by_id("end-message") {
                el.set_text_content(Some(overlay.message.text(&self.proposal_text)));
            }
        }
    }

    fn set_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn element(document: &Document, id: &str) -> Result<Element, GameError> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| GameError::MissingElement(id.to_string()))
    }

    pub fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| GameError::Js(e.to_string()))?;

        log::info!("Heart Quest starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Js("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Js("no document".to_string()))?;

        let canvas: HtmlCanvasElement = element(&document, "game")?
            .dyn_into()
            .map_err(|_| GameError::MissingElement("game".to_string()))?;

        let settings =
            Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref());
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let render_state = CanvasRenderState::new(&document, &canvas, seed)?;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().render_state = Some(render_state);

        log::info!("Game initialized with seed: {}", seed);

        load_assets(game.clone())?;
        setup_input_handlers(game.clone())?;
        setup_buttons(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Heart Quest running!");
        Ok(())
    }

    /// Kick off every image load; each settles to ready or failed
    fn load_assets(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        for id in AssetId::all() {
            let image = HtmlImageElement::new()?;
            image.set_src(&id.path());
            let game = game.clone();
            spawn_local(async move {
                let decoded = JsFuture::from(image.decode()).await;
                let mut g = game.borrow_mut();
                let Game {
                    assets,
                    render_state,
                    ..
                } = &mut *g;
                match decoded {
                    Ok(_) => {
                        assets.mark_ready(id, image.natural_width(), image.natural_height());
                        if let Some(render_state) = render_state.as_mut() {
                            render_state.set_image(id, image);
                        }
                    }
                    Err(_) => assets.mark_failed(id),
                }
                if assets.all_settled() {
                    log::info!("All assets settled");
                }
            });
        }
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        let window = web_sys::window().ok_or_else(|| GameError::Js("no window".to_string()))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if (key == "i" || key == "I") && !event.repeat() {
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                }
                g.keys.press(&key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur drops held keys (no keyup arrives while unfocused)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: &Rc<RefCell<Game>>,
        action: fn(&mut GameState),
    ) -> Result<(), GameError> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Button #{} not found", id);
            return Ok(());
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            action(&mut g.state);
            g.update_dom();
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), GameError> {
        if let Some(text) = element(document, "end-message")?.text_content() {
            game.borrow_mut().proposal_text = text;
        }

        on_click(document, "start-button", &game, GameState::start_game)?;
        on_click(document, "yes-button", &game, |state| {
            state.celebrate();
        })?;
        on_click(document, "end-minimize-btn", &game, GameState::minimize)?;
        on_click(document, "restore-btn", &game, GameState::restore)?;

        // The "no" button runs away from the cursor
        let no_button: HtmlElement = element(document, "no-button")?
            .dyn_into()
            .map_err(|_| GameError::MissingElement("no-button".to_string()))?;
        let panel = element(document, "end-screen")?
            .query_selector(".panel")?
            .ok_or_else(|| GameError::MissingElement("end-screen .panel".to_string()))?;
        {
            let button = no_button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let bounds = panel.get_bounding_client_rect();
                let btn = button.get_bounding_client_rect();
                let pos = game.borrow_mut().state.dodge_position(
                    Vec2::new(bounds.width() as f32, bounds.height() as f32),
                    Vec2::new(btn.width() as f32, btn.height() as f32),
                );
                let style = button.style();
                let _ = style.set_property("position", "absolute");
                let _ = style.set_property("left", &format!("{}px", pos.x));
                let _ = style.set_property("top", &format!("{}px", pos.y));
            });
            no_button
                .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let delta_ms = if g.last_time > 0.0 {
                ((time - g.last_time) as f32).clamp(0.0, MAX_FRAME_MS)
            } else {
                REFERENCE_FRAME_MS
            };
            g.last_time = time;

            g.update(delta_ms, time);
            g.render();
            g.update_dom();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(JsValue::from)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Heart Quest (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    demo_round(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round on autopilot and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn demo_round(seed: u64) {
    use heart_quest::assets::AssetRegistry;
    use heart_quest::consts::REFERENCE_FRAME_MS;
    use heart_quest::renderer::{HudExtras, background, build_frame};
    use heart_quest::sim::{GamePhase, GameState, TickInput, tick};

    let backdrop = background::generate(seed);
    log::info!("Background: {} draw commands", backdrop.len());

    let mut state = GameState::new(seed);
    state.start_game();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut frames = 0u32;
    while state.phase == GamePhase::Play {
        tick(&mut state, &input, REFERENCE_FRAME_MS);
        frames += 1;
    }
    log::info!(
        "Round finished after {} frames ({:?}): score {}, hearts {}/{}, {}s left",
        frames,
        state.end_reason,
        state.score,
        state.hearts_collected,
        state.hearts_needed,
        state.display_time()
    );

    if state.celebrate() {
        let mut celebration_frames = 0u32;
        while state.celebration.active {
            tick(&mut state, &input, REFERENCE_FRAME_MS);
            celebration_frames += 1;
        }
        log::info!(
            "Celebration ran {} frames, {} hearts still floating",
            celebration_frames,
            state.floating_hearts.len()
        );
    }

    let frame = build_frame(&state, &AssetRegistry::new(), HudExtras::default());
    log::info!("Final frame: {} draw commands", frame.len());
}
