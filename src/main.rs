use std::collections::HashMap;
use std::env;
use std::io;
use std::path::PathBuf;

use crossterm::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rocket_harvest::config::GameConfig;
use rocket_harvest::error::GameError;
use rocket_harvest::game::Game;
use rocket_harvest::input::InputAdapter;
use rocket_harvest::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use rocket_harvest::state::GameState;
use rocket_harvest::terminal_io::{KeyboardStick, ScriptedStick};
use rocket_harvest::types::Vector2D;

const DEBUG_WIDTH: u16 = 80;
const DEBUG_HEIGHT: u16 = 24;
const DEBUG_FRAMES: u64 = 600;

#[derive(Debug, Default, PartialEq)]
struct Args {
    debug: Option<(u16, u16, u64)>,
    demo: bool,
    seed: Option<u64>,
    config: Option<PathBuf>,
}

/// `--debug [W H [FRAMES]]`, `--demo`, `--seed N`, `--config PATH`.
fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => {
                let mut width = DEBUG_WIDTH;
                let mut height = DEBUG_HEIGHT;
                let mut frames = DEBUG_FRAMES;
                if let (Some(w), Some(h)) = (args.get(i + 1), args.get(i + 2)) {
                    if let (Ok(w), Ok(h)) = (w.parse::<u16>(), h.parse::<u16>()) {
                        width = w;
                        height = h;
                        i += 2;
                        if let Some(Ok(f)) = args.get(i + 1).map(|f| f.parse::<u64>()) {
                            frames = f;
                            i += 1;
                        }
                    }
                }
                parsed.debug = Some((width, height, frames));
            }
            "--demo" => parsed.demo = true,
            "--seed" => {
                parsed.seed = args.get(i + 1).and_then(|s| s.parse().ok());
                i += 1;
            }
            "--config" => {
                parsed.config = args.get(i + 1).map(PathBuf::from);
                i += 1;
            }
            other => info!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }
    parsed
}

/// A short steering pattern for headless runs: a nudge right, then up.
fn debug_script(max_deflection: i32) -> HashMap<u64, Vector2D> {
    let full = max_deflection as f64;
    let mut script = HashMap::new();
    for frame in 1..30 {
        script.insert(frame, Vector2D::new(full, 0.0));
    }
    for frame in 30..60 {
        script.insert(frame, Vector2D::new(0.0, full));
    }
    script
}

fn main() -> Result<(), GameError> {
    simple_logging::log_to_file("rocket-harvest.log", log::LevelFilter::Info)?;
    info!("Starting rocket-harvest.");

    let raw_args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&raw_args);

    let config = match &args.config {
        Some(path) => GameConfig::load(path).map_err(|e| { error!("{}", e); e })?,
        None => GameConfig::load_default(),
    };

    let rng = match args.seed {
        Some(seed) => {
            info!("Seeding RNG with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut input = InputAdapter::new(config.aggregation, config.max_deflection);
    let mut state = GameState::new(config, rng);

    let mut game = if let Some((width, height, frames)) = args.debug {
        info!("Debug mode: {}x{} for {} frames", width, height, frames);
        if !args.demo {
            input.connect(Box::new(ScriptedStick::new(debug_script(state.config().max_deflection))));
        }
        Game::new(width, height, OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height)), None, true, Some(frames))
    } else {
        enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
        info!("Terminal size: {}x{}", width, height);
        let keyboard = if args.demo {
            None
        } else {
            let (stick, handle) = KeyboardStick::new(state.config().max_deflection);
            input.connect(Box::new(stick));
            Some(handle)
        };
        Game::new(width, height, OutputTarget::Stdout(io::stdout()), keyboard, false, None)
    };
    if input.device_count() == 0 {
        info!("No input devices connected; steering randomly.");
    } else {
        info!("{} input device(s) connected.", input.device_count());
    }

    let result = play(&mut game, &mut state, &mut input);

    if args.debug.is_none() {
        game.stdout_target.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
        disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    }

    let score = result?;
    info!("Exiting. Final score: {}", score);
    Ok(())
}

fn play(game: &mut Game, state: &mut GameState, input: &mut InputAdapter) -> io::Result<u32> {
    if !matches!(game.stdout_target, OutputTarget::ScreenBuffer(_)) {
        GameGrid::new(game.terminal_width, game.terminal_height).clear_screen_manual(&mut game.stdout_target)?;
        game.stdout_target.execute_other_command(Hide)?;
    }
    game.run(state, input).map_err(|e| { error!("Game loop failed: {}", e); e })
}
