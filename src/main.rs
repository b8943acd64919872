mod asteroid;
mod config;
mod error;
mod game;
mod render;
mod snake;
mod term;

use std::process::exit;

use error::GameError;
use game::SpaceSnakeGame;
use term::TermManager;

/// Position in viewport pixels
pub type Coords = (f32, f32);

fn main() {
    // Off unless RUST_LOG is set; stderr shares the terminal with the game
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Space Snake: {}", e);
        exit(1);
    }
}

fn run() -> Result<(), GameError> {
    let mut term = TermManager::new()?;

    let result = match term.setup() {
        Ok(()) => SpaceSnakeGame::new(rand::thread_rng()).run(&mut term),
        Err(e) => Err(e.into()),
    };

    // The terminal goes back to normal even if setup or the loop failed,
    // and their error wins over one from restoring
    let restored = term.restore();
    result?;
    restored?;
    Ok(())
}
