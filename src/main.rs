//! Bob's Run entry point
//!
//! The web build owns the browser loop: canvas setup, input listeners and a
//! requestAnimationFrame driver that stops once the run ends. The native
//! build plays one headless run with a simple auto-jumper.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use bobs_run::renderer::{RenderState, VertexSurface};
    use bobs_run::sim::{FrameInput, RunEvent};
    use bobs_run::{FrameStatus, RunController, Settings};

    /// Everything the browser callbacks share
    struct Game {
        run: RunController,
        render_state: Option<RenderState>,
        surface: VertexSurface,
        /// Input gathered since the last frame
        input: FrameInput,
        /// The frame loop stopped and must be re-requested on restart
        halted: bool,
    }

    impl Game {
        fn frame(&mut self) -> FrameStatus {
            // Timers and seeds share the wall clock
            let now = js_sys::Date::now();
            let input = std::mem::take(&mut self.input);
            let status = self.run.frame(now as u64, &input, &mut self.surface);
            self.present();
            self.update_hud();
            status
        }

        /// Upload the recorded draw calls
        fn present(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(self.surface.vertices(), self.surface.clear_color()) {
                Ok(()) => {}
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
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.run.score().to_string()));
            }

            for event in self.run.drain_events() {
                match event {
                    RunEvent::Ended { score } => {
                        if let Some(el) = document.get_element_by_id("final-score") {
                            el.set_text_content(Some(&score.to_string()));
                        }
                        if let Some(el) = document.get_element_by_id("game-over") {
                            let _ = el.set_attribute("class", "");
                        }
                    }
                    RunEvent::Started { .. } => {
                        if let Some(el) = document.get_element_by_id("game-over") {
                            let _ = el.set_attribute("class", "hidden");
                        }
                    }
                    RunEvent::GhostModeStarted | RunEvent::GhostModeEnded => {
                        if let Some(el) = document.get_element_by_id("hud-score") {
                            let class = if self.run.is_ghost() {
                                "hud-item ghost"
                            } else {
                                "hud-item"
                            };
                            let _ = el.set_attribute("class", class);
                        }
                    }
                    RunEvent::SpeedUp { .. } => {}
                }
            }
        }
    }

    fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, err))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Bob's Run starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Backing store in physical pixels, play field in CSS pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let now = js_sys::Date::now();
        let run = RunController::new(client_w as f32, client_h as f32, settings, now as u64)
            .map_err(|e| js_error("Invalid play field", e))?;

        let game = Rc::new(RefCell::new(Game {
            run,
            render_state: None,
            surface: VertexSurface::new(),
            input: FrameInput::default(),
            halted: false,
        }));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("Failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("Failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (client_w as f32, client_h as f32),
        )
        .await
        {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("No GPU device, running without graphics: {}", e),
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Bob's Run running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Space bar jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game
                    .borrow_mut()
                    .input
                    .key_down(&event.key(), event.repeat())
                {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Taps on the score count toward ghost mode
        if let Some(score) = window
            .document()
            .and_then(|d| d.get_element_by_id("hud-score"))
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.score_taps += 1;
            });
            score.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart-btn"))
        else {
            log::warn!("No restart button");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let resume = {
                let mut g = game.borrow_mut();
                g.run.restart(js_sys::Date::now() as u64);
                g.input = FrameInput::default();
                g.update_hud();
                std::mem::replace(&mut g.halted, false)
            };
            // The old loop stopped on game over; start a new one
            if resume {
                request_animation_frame(game.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let status = game.borrow_mut().frame();
        match status {
            FrameStatus::Continue => request_animation_frame(game),
            FrameStatus::Halted => game.borrow_mut().halted = true,
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bob's Run (native) starting...");
    log::info!("Native mode plays a headless run - run with `trunk serve` for the web version");

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let settings = bobs_run::Settings {
        seed,
        ..bobs_run::Settings::load()
    };

    match headless_run(settings) {
        Ok((score, frames)) => println!("Caught after {} frames with score {}", frames, score),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play at 60 fps on an 800x600 field, jumping whenever a pursuer gets close
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(settings: bobs_run::Settings) -> Result<(u64, u64), bobs_run::ConfigError> {
    use bobs_run::consts::FRAME_MS;
    use bobs_run::renderer::VertexSurface;
    use bobs_run::sim::FrameInput;
    use bobs_run::{FrameStatus, RunController};

    const MAX_FRAMES: u64 = 60 * 60 * 10;
    const JUMP_DISTANCE: f32 = 40.0;

    let mut run = RunController::new(800.0, 600.0, settings, 0)?;
    let mut surface = VertexSurface::new();

    for frame in 1..=MAX_FRAMES {
        let state = run.state();
        let player_right = state.player.body.right();
        let jump = state.player.grounded
            && state.pursuers.iter().any(|p| {
                let gap = p.body.pos.x - player_right;
                gap > 0.0 && gap < JUMP_DISTANCE
            });
        let input = FrameInput {
            jump,
            ..Default::default()
        };

        let now_ms = (frame as f64 * FRAME_MS) as u64;
        if run.frame(now_ms, &input, &mut surface) == FrameStatus::Halted {
            return Ok((run.score(), frame));
        }
        if frame % 600 == 0 {
            log::debug!(
                "Frame {}: score {}, speed x{:.2}, {} pursuers",
                frame,
                run.score(),
                run.speed_multiplier(),
                run.state().pursuers.len()
            );
        }
    }

    log::info!("Survived {} frames", MAX_FRAMES);
    Ok((run.score(), MAX_FRAMES))
}
