//! Flappy - a Flappy Bird arcade core for the terminal.
//!
//! The simulation (`entities`, `game`) is independent of the terminal. The
//! binary wires it to crossterm input and a ratatui renderer through the
//! seams in [`core::game_loop`].

pub mod assets;
pub mod build_info;
pub mod core;
pub mod entities;
pub mod game;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::assets::{AssetError, AssetSource, Assets, DirectoryAssets, PlaceholderAssets};
pub use crate::core::config::{ConfigError, GameConfig};
pub use crate::core::game_loop::{FixedRateLoop, GameLoop, InputEvent, InputSource, Renderer};
pub use crate::game::{GamePhase, Session};

/// Anything that stops the game before the first frame.
#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("asset error: {0}")]
    Assets(#[from] AssetError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve every sprite and build a session in the Starting phase.
pub fn new_session(config: GameConfig, source: &dyn AssetSource) -> Result<Session, StartupError> {
    let assets = Assets::load(&config, source)?;
    Ok(Session::new(config, assets))
}
