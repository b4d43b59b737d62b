//! # Arcade Engine
//!
//! Frame host for small 2D arcade games on desktop and handheld consoles.
//!
//! ## Features
//!
//! - **OpenGL context bootstrap**: GLFW window, core-profile context, fixed
//!   blend state and vsync
//! - **Frame loop**: fixed input/update/render/overlay/present/poll sequence
//!   with lifetime frame-rate statistics
//! - **Input translation**: key-state table, resize and gamepad exit handling
//! - **Diagnostic overlay**: egui panel with frame rate and frame time
//! - **Platform adapters**: desktop and handheld console (asset archive,
//!   network debug output)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arcade_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Game for MyGame {
//!     fn init(&mut self) -> Result<(), GameError> {
//!         Ok(())
//!     }
//!
//!     fn process_input(&mut self, _dt: f32, _keys: &KeyStateTable) -> Result<(), GameError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _dt: f32) -> Result<(), GameError> {
//!         Ok(())
//!     }
//!
//!     fn render(&mut self) -> Result<(), GameError> {
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), EngineError> {
//!     NativeEngine::run(EngineConfig::default(), MyGame)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod overlay;
pub mod platform;
pub mod render;

mod application;
mod engine;

pub use application::{Game, GameError};
pub use config::{Config, ConfigError, EngineConfig};
pub use engine::{load_platform_config, Engine, EngineError, LoopState};

/// Engine wired to the GLFW surface, egui overlay and the build's platform
pub type NativeEngine<G> =
    Engine<render::GlfwSurface, overlay::EguiOverlay, G, platform::NativePlatform>;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::time::{FrameSample, FrameTiming},
        input::{GamepadExitPolicy, KeyStateTable},
        platform::Platform,
        Config, EngineConfig, EngineError, Game, GameError, NativeEngine,
    };
}
