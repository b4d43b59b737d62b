//! Breakout on the arcade engine
//!
//! Reads `arcade.toml` from the platform's asset location (defaults when
//! absent), runs the game until the window closes and maps failures to
//! exit codes.

mod game;

use arcade_engine::prelude::*;
use game::Breakout;
use std::process::ExitCode;

const CONFIG_ASSET: &str = "arcade.toml";

fn main() -> ExitCode {
    let game = Breakout::new(EngineConfig::default().window.width);

    match NativeEngine::launch(CONFIG_ASSET, game) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Breakout exited with error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
