//! Ball Bounce entry point
//!
//! In the browser: draws on the `ballBounce` canvas and ticks from
//! `setInterval`. Natively: runs a headless session and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use ball_bounce::Settings;
    use ball_bounce::game::Game;
    use ball_bounce::platform::{Key, TickFlow};
    use ball_bounce::renderer::CanvasSurface;
    use ball_bounce::sim::Session;

    type SharedGame = Rc<RefCell<Game<CanvasSurface>>>;

    const CANVAS_ID: &str = "ballBounce";

    fn key_of(event: &KeyboardEvent) -> Option<Key> {
        Key::from_name(&event.key()).or_else(|| Key::from_code(event.key_code()))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        log::info!("Ball Bounce starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let period_ms = i32::try_from(settings.tick_ms).unwrap_or(i32::MAX);

        let session =
            Session::new(settings, seed).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let surface = CanvasSurface::new(canvas).ok_or("canvas has no 2d context")?;
        let game: SharedGame = Rc::new(RefCell::new(Game::new(session, surface)));

        log::info!("Game initialized with seed: {seed}");

        // First frame before the first tick
        game.borrow_mut().draw();

        setup_input_handlers(&window, game.clone())?;
        start_interval(&window, game, period_ms)?;

        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: SharedGame) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(key) = key_of(&event) {
                    event.prevent_default();
                    g.input.key_down(key);
                } else if matches!(event.key().as_str(), "i" | "I") {
                    g.input.toggle_idle();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = key_of(&event) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Tick every `period_ms` until the session reaches a terminal phase
    fn start_interval(
        window: &web_sys::Window,
        game: SharedGame,
        period_ms: i32,
    ) -> Result<(), JsValue> {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let closure = {
            let handle = handle.clone();
            Closure::<dyn FnMut()>::new(move || {
                if game.borrow_mut().step() == TickFlow::Stop {
                    if let (Some(window), Some(id)) = (web_sys::window(), handle.take()) {
                        window.clear_interval_with_handle(id);
                        log::info!("Tick loop stopped");
                    }
                }
            })
        };

        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )?;
        handle.set(Some(id));
        closure.forget();

        log::info!("Ball Bounce running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;

    use ball_bounce::Settings;
    use ball_bounce::game::Game;
    use ball_bounce::platform::{Interval, ManualClock, ThreadClock};
    use ball_bounce::renderer::RecordingSurface;
    use ball_bounce::sim::Session;

    /// Run a Ball Bounce session without a display
    #[derive(Parser, Debug)]
    #[command(name = "ball-bounce", version, about)]
    pub struct Args {
        /// JSON settings file (defaults to ./ball_bounce_settings.json if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed, overrides the settings file
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of enemies, overrides the settings file
        #[arg(short, long)]
        enemies: Option<usize>,

        /// Let the autopilot steer the player
        #[arg(long)]
        idle: bool,

        /// Sleep between ticks instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Stop after this many ticks even if the session is still running
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,

        /// Pretty-print the JSON summary
        #[arg(long)]
        pretty: bool,
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }

    pub fn run(args: Args) -> Result<()> {
        let mut settings = match &args.config {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load(),
        };
        if let Some(enemies) = args.enemies {
            settings.enemy_count = enemies;
        }
        let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
        let period = settings.tick_period();

        let session = Session::new(settings, seed).context("setting up session")?;
        let mut game = Game::new(session, RecordingSurface::new());
        game.input.set_idle(args.idle);

        let mut interval = Interval::new(period);
        let fired = if args.realtime {
            interval.run_for(args.max_ticks, &mut ThreadClock::new(), &mut game, Game::step)
        } else {
            interval.run_for(args.max_ticks, &mut ManualClock::new(), &mut game, Game::step)
        };

        let summary = game.summary();
        if !interval.is_cancelled() {
            log::warn!("Stopped after {fired} ticks with the session still running");
        }
        log::info!(
            "{:?} after {} ticks, {} frames drawn",
            summary.phase,
            summary.ticks,
            game.surface().frames
        );

        let json = if args.pretty {
            serde_json::to_string_pretty(&summary)
        } else {
            serde_json::to_string(&summary)
        }
        .context("serializing summary")?;
        println!("{json}");

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ball Bounce (headless) starting...");

    headless::run(headless::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
