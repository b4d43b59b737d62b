//! Game trait and its error type

use crate::input::KeyStateTable;
use thiserror::Error;

/// Gameplay collaborator driven by the frame loop
///
/// Implement this trait for your game. The engine owns the value and calls
/// `init` once after graphics setup, then `process_input`, `update` and
/// `render` exactly once per frame in that order.
pub trait Game {
    /// One-time setup
    ///
    /// Called after the window, GL context and overlay exist. Load assets and
    /// GPU resources here.
    fn init(&mut self) -> Result<(), GameError>;

    /// React to the current key state
    ///
    /// # Arguments
    /// * `delta_time` - Time since last frame in seconds
    /// * `keys` - Key-state table indexed by platform key code
    fn process_input(&mut self, delta_time: f32, keys: &KeyStateTable) -> Result<(), GameError>;

    /// Advance game state by `delta_time` seconds
    fn update(&mut self, delta_time: f32) -> Result<(), GameError>;

    /// Draw the current frame into the cleared back buffer
    fn render(&mut self) -> Result<(), GameError>;

    /// Release resources retained across frames
    ///
    /// Called once when the loop stops, while the GL context is still alive.
    fn release(&mut self) {}
}

/// Game-level errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Initialization failed
    #[error("Game initialization error: {0}")]
    Init(String),

    /// Input or update phase failed
    #[error("Game update error: {0}")]
    Update(String),

    /// Render phase failed
    #[error("Game render error: {0}")]
    Render(String),
}
