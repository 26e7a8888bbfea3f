//! Terminal runner (default binary).
//!
//! Plays the matrix game in a terminal: the display is the half-block
//! renderer, the buttons and the tilt sensor are emulated from the keyboard.
//! Sessions restart on their own after game over; Q, Esc or Ctrl-C quits.

use std::fs::File;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use matrix_tetris::core::SHAPES;
use matrix_tetris::engine::{Devices, Supervisor, SystemClock};
use matrix_tetris::input::Keyboard;
use matrix_tetris::term::TerminalRenderer;
use matrix_tetris::types::GameConfig;

const LOG_FILE_NAME: &str = "matrix-tetris.log";

fn main() -> Result<()> {
    // The terminal is in the alternate screen while playing, so log to a file.
    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err:#}");
    }

    let config = GameConfig::default();
    let mut term = TerminalRenderer::new(config.board_width as u16, config.board_height as u16);
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let keyboard = Keyboard::new();
    let mut buttons = keyboard.buttons();
    let mut tilt = keyboard.tilt();
    let mut devices = Devices {
        display: term,
        buttons: &mut buttons,
        tilt: Some(&mut tilt),
    };

    let seed = time_seed();
    log::info!("starting with seed {seed}");

    let mut clock = SystemClock::new();
    let mut supervisor = Supervisor::new(config, &SHAPES, seed);
    supervisor.run(&mut devices, &mut clock);
    Ok(())
}

fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join(LOG_FILE_NAME);
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}
