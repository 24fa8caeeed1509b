//! Arcade Core entry point
//!
//! In the browser this wires DOM input into a `FrameDriver` and hands every
//! frame to `window.renderArcadeFrame`. Natively it runs a headless autopilot
//! session and logs what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use arcade_core::sim::{Arcade, GamePhase, ObstacleKind, TickInput};

/// Scripted player for demos and headless runs
fn autopilot(arcade: &Arcade, held: &TickInput) -> TickInput {
    let mut input = TickInput::default();
    match arcade {
        Arcade::Flight(game) => {
            input.primary = match game.phase {
                GamePhase::Waiting | GamePhase::GameOver => true,
                GamePhase::Playing => {
                    let bird = &game.bird;
                    // Aim just below the centre of the next gap
                    let target = game
                        .pipes
                        .iter()
                        .filter(|p| p.body.right() > bird.left())
                        .find_map(|p| match p.kind {
                            ObstacleKind::GapPair { top_height, bottom_y } => {
                                Some((top_height + bottom_y) / 2.0 + 20.0)
                            }
                            _ => None,
                        })
                        .unwrap_or(game.tuning.world.height / 2.0);
                    bird.bottom() > target && bird.vel.y >= 0.0
                }
                GamePhase::LevelComplete => false,
            };
        }
        Arcade::Platformer(game) => match game.phase {
            GamePhase::Playing => {
                // Pace back and forth across the board, hopping as we go
                let world = game.tuning.world;
                let going_left = if game.player.right() >= world.width - 1.0 {
                    true
                } else if game.player.left() <= 1.0 {
                    false
                } else {
                    held.left
                };
                input.left = going_left;
                input.right = !going_left;
                input.jump = !game.player.airborne;
            }
            GamePhase::GameOver => input.retry = true,
            GamePhase::Waiting | GamePhase::LevelComplete => input.primary = true,
        },
    }
    input
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use arcade_core::{FrameError, GamePhase, Renderer, Snapshot};

    /// Logs phase and score changes instead of drawing
    #[derive(Default)]
    pub struct LogRenderer {
        last: Option<(GamePhase, u32, Option<u32>)>,
        pub game_overs: u32,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &Snapshot) -> Result<(), FrameError> {
            let key = (frame.phase, frame.score, frame.level);
            if self.last != Some(key) {
                if frame.phase == GamePhase::GameOver {
                    self.game_overs += 1;
                }
                match frame.level {
                    Some(level) => log::info!(
                        "{} | level {} | score {} (best {}) | {} obstacles",
                        frame.phase.as_str(),
                        level,
                        frame.score,
                        frame.best,
                        frame.obstacles.len()
                    ),
                    None => log::info!(
                        "{} | score {} (best {}) | {} obstacles",
                        frame.phase.as_str(),
                        frame.score,
                        frame.best,
                        frame.obstacles.len()
                    ),
                }
                self.last = Some(key);
            }
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use arcade_core::{Arcade, FrameDriver, FrameError, Renderer, Snapshot};

    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.renderArcadeFrame === 'function') {
                window.renderArcadeFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn present_frame(json: &str) -> Result<(), JsValue>;
    }

    /// Hands snapshots to the page's JavaScript renderer
    struct JsRenderer;

    impl Renderer for JsRenderer {
        fn render(&mut self, frame: &Snapshot) -> Result<(), FrameError> {
            let json = frame
                .to_json()
                .map_err(|e| FrameError::Render(e.to_string()))?;
            present_frame(&json).map_err(|e| FrameError::Render(format!("{:?}", e)))
        }
    }

    type Driver = Rc<RefCell<FrameDriver<JsRenderer>>>;

    /// Settings read from the page URL, e.g. `?game=platformer&demo=1`
    struct PageOptions {
        game: String,
        seed: u64,
        demo: bool,
    }

    fn page_options(window: &web_sys::Window) -> PageOptions {
        let mut options = PageOptions {
            game: "classic".to_string(),
            seed: js_sys::Date::now() as u64,
            demo: false,
        };
        let search = window.location().search().unwrap_or_default();
        for pair in search.trim_start_matches('?').split('&') {
            match pair.split_once('=') {
                Some(("game", value)) => options.game = value.to_string(),
                Some(("seed", value)) => {
                    if let Ok(seed) = value.parse() {
                        options.seed = seed;
                    }
                }
                Some(("demo", value)) => options.demo = value != "0",
                _ => {}
            }
        }
        options
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Arcade Core starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };

        let options = page_options(&window);
        let arcade = match Arcade::from_name(&options.game, options.seed) {
            Ok(arcade) => arcade,
            Err(e) => {
                log::warn!("{}; falling back to the classic game", e);
                match Arcade::from_name("classic", options.seed) {
                    Ok(arcade) => arcade,
                    Err(e) => {
                        log::error!("Default game failed to build: {}", e);
                        return;
                    }
                }
            }
        };
        log::info!(
            "Game {} initialized with seed: {}",
            options.game,
            options.seed
        );

        let driver: Driver = Rc::new(RefCell::new(FrameDriver::new(arcade, JsRenderer)));

        setup_input_handlers(&window, driver.clone());
        request_animation_frame(driver, options.demo);

        log::info!("Arcade Core running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, driver: Driver) {
        // Mouse click
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                driver.borrow_mut().input_mut().primary = true;
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                driver.borrow_mut().input_mut().primary = true;
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard down
        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = driver.borrow_mut();
                let input = d.input_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        if !event.repeat() {
                            input.primary = true;
                        }
                    }
                    "ArrowUp" | "w" | "W" => input.jump = true,
                    "ArrowLeft" | "a" | "A" => input.left = true,
                    "ArrowRight" | "d" | "D" => input.right = true,
                    "ArrowDown" | "s" | "S" => input.crouch = true,
                    "r" | "R" => input.retry = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up releases held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut d = driver.borrow_mut();
                let input = d.input_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => input.jump = false,
                    "ArrowLeft" | "a" | "A" => input.left = false,
                    "ArrowRight" | "d" | "D" => input.right = false,
                    "ArrowDown" | "s" | "S" => input.crouch = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(driver: Driver, demo: bool) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(driver, time, demo);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(driver: Driver, time: f64, demo: bool) {
        {
            let mut d = driver.borrow_mut();
            if demo {
                let held = d.input_mut().clone();
                let next = super::autopilot(d.arcade(), &held);
                *d.input_mut() = next;
            }
            // Failures are logged by the driver; the loop always reschedules
            let _ = d.frame(time);
        }

        request_animation_frame(driver, demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arcade_core::FrameDriver;
    use arcade_core::consts::REFERENCE_FRAME_MS;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "classic".to_string());
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let arcade = match Arcade::from_name(&name, seed) {
        Ok(arcade) => arcade,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: arcade-core [classic|brisk|platformer] [frames] [seed]");
            std::process::exit(2);
        }
    };

    log::info!("Arcade Core (native) running {} for {} frames, seed {}", name, frames, seed);

    let mut driver = FrameDriver::new(arcade, headless::LogRenderer::default());
    let mut held = TickInput::default();
    for frame in 0..frames {
        held = autopilot(driver.arcade(), &held);
        *driver.input_mut() = held.clone();
        let _ = driver.frame(f64::from(frame) * f64::from(REFERENCE_FRAME_MS));
    }

    let snapshot = driver.arcade().snapshot();
    println!(
        "{}: {} frames, {} game over(s), {} failed frame(s), best score {}",
        driver.arcade().name(),
        driver.frames(),
        driver.renderer().game_overs,
        driver.failures(),
        snapshot.best
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
