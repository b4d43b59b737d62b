//! Frame loop driver
//!
//! [`Engine`] owns the surface, overlay, game and platform for the lifetime
//! of the loop. Every frame runs the same fixed sequence:
//!
//! 1. advance frame timing
//! 2. game input phase
//! 3. game update phase
//! 4. clear the color buffer
//! 5. game render phase
//! 6. overlay frame with the timing panel
//! 7. present
//! 8. poll platform events and apply the resulting commands
//!
//! When the loop stops everything is released in reverse acquisition order,
//! ending with the platform's process-end hook.

use crate::application::{Game, GameError};
use crate::config::{Config, ConfigError, EngineConfig};
use crate::foundation::logging;
use crate::foundation::time::{FrameSample, FrameTiming};
use crate::input::{AppCommand, GamepadExitPolicy, InputEvent, InputTranslator, KeyStateTable};
use crate::overlay::{self, EguiOverlay, Overlay, OverlayError, OverlayFrame};
use crate::platform::{self, NativePlatform, Platform};
use crate::render::{ContextError, GlfwSurface, Surface};
use thiserror::Error;

/// Frame loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, game not initialized yet
    NotStarted,
    /// Running frames
    Running,
    /// Torn down; terminal
    Stopped,
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or graphics context bootstrap failed
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Overlay failed
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// The game reported an error
    #[error(transparent)]
    Game(#[from] GameError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Operation not valid in the current loop state
    #[error("Invalid engine state: {0}")]
    InvalidState(String),
}

impl EngineError {
    /// Process exit code for this failure
    ///
    /// Normal termination exits with 0; this is only for errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Context(_) => 2,
            Self::Config(_) => 3,
            Self::Overlay(_) | Self::Game(_) | Self::InvalidState(_) => 1,
        }
    }
}

/// Main loop driver
///
/// Generic over its collaborators so the loop can run against the real GLFW
/// surface and egui overlay or against headless stand-ins.
pub struct Engine<S: Surface, O: Overlay, G: Game, P: Platform> {
    surface: S,
    overlay: O,
    game: G,
    platform: P,
    config: EngineConfig,
    translator: InputTranslator,
    keys: KeyStateTable,
    timing: FrameTiming,
    state: LoopState,
    events: Vec<InputEvent>,
    commands: Vec<AppCommand>,
}

impl<G: Game> Engine<GlfwSurface, EguiOverlay, G, NativePlatform> {
    /// Run `game` on the native platform until the window closes
    pub fn run(config: EngineConfig, game: G) -> Result<(), EngineError> {
        logging::init(&EngineConfig::default().logging.level);
        let mut platform = platform::native();
        platform.on_process_start();
        Self::run_started(config, game, platform)
    }

    /// Like [`Engine::run`], reading the configuration from a platform asset
    ///
    /// The asset archive is only reachable after the platform has started, so
    /// the file is resolved and loaded in between. A missing file means
    /// defaults.
    pub fn launch(config_asset: &str, game: G) -> Result<(), EngineError> {
        logging::init(&EngineConfig::default().logging.level);
        let mut platform = platform::native();
        platform.on_process_start();

        let config = load_platform_config(&mut platform, config_asset)?;
        Self::run_started(config, game, platform)
    }

    fn run_started(
        config: EngineConfig,
        game: G,
        platform: NativePlatform,
    ) -> Result<(), EngineError> {
        logging::set_level(&config.logging.level);

        let mut engine = Self::bootstrap(
            config,
            game,
            platform,
            |config, platform| GlfwSurface::create(config, platform),
            |surface, config| EguiOverlay::new(surface.gl(), &config.graphics.glsl_version),
        )?;
        engine.run_loop()
    }
}

/// Load the engine configuration from a started platform's assets
///
/// On failure the platform is ended before the error is returned.
pub fn load_platform_config<P: Platform>(
    platform: &mut P,
    config_asset: &str,
) -> Result<EngineConfig, EngineError> {
    let path = platform.resolve_asset(config_asset);
    EngineConfig::load_or_default(&path).map_err(|e| {
        log::error!("Failed to load configuration {path}: {e}");
        platform.on_process_end();
        e.into()
    })
}

impl<S: Surface, O: Overlay, G: Game, P: Platform> Engine<S, O, G, P> {
    /// Assemble an engine from already-created collaborators
    ///
    /// The platform must already be started and the surface's context current.
    pub fn new(config: EngineConfig, surface: S, overlay: O, game: G, platform: P) -> Self {
        let translator = InputTranslator::new(config.input.gamepad_exit);
        Self {
            surface,
            overlay,
            game,
            platform,
            config,
            translator,
            keys: KeyStateTable::new(),
            timing: FrameTiming::new(),
            state: LoopState::NotStarted,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Create the surface and overlay for a started platform
    ///
    /// A failure releases whatever was already created, ends the platform and
    /// returns the error. The game is not initialized here.
    pub fn bootstrap<FS, FO>(
        config: EngineConfig,
        game: G,
        mut platform: P,
        create_surface: FS,
        create_overlay: FO,
    ) -> Result<Self, EngineError>
    where
        FS: FnOnce(&EngineConfig, &P) -> Result<S, ContextError>,
        FO: FnOnce(&S, &EngineConfig) -> Result<O, OverlayError>,
    {
        log::info!("Starting {}", config.window.title);

        let mut surface = match create_surface(&config, &platform) {
            Ok(surface) => surface,
            Err(e) => {
                platform.on_process_end();
                return Err(e.into());
            }
        };

        let overlay = match create_overlay(&surface, &config) {
            Ok(overlay) => overlay,
            Err(e) => {
                log::error!("Failed to initialize overlay: {e}");
                surface.destroy_window();
                surface.terminate();
                platform.on_process_end();
                return Err(e.into());
            }
        };

        Ok(Self::new(config, surface, overlay, game, platform))
    }

    /// Initialize the game, run frames until an exit condition, then tear down
    ///
    /// Teardown runs whether the loop ended normally or on an error; the error
    /// is returned afterwards.
    pub fn run_loop(&mut self) -> Result<(), EngineError> {
        self.start()?;
        log::info!("Starting main loop...");

        let result = loop {
            if !self.platform.should_continue() || self.surface.should_close() {
                break Ok(());
            }
            if let Err(e) = self.frame() {
                log::error!("Frame failed: {e}");
                break Err(e);
            }
        };

        self.shutdown();
        result
    }

    fn start(&mut self) -> Result<(), EngineError> {
        if self.state != LoopState::NotStarted {
            return Err(EngineError::InvalidState(format!(
                "cannot start from {:?}",
                self.state
            )));
        }

        if let Err(e) = self.game.init() {
            log::error!("Game initialization failed: {e}");
            self.shutdown();
            return Err(e.into());
        }

        self.state = LoopState::Running;
        Ok(())
    }

    /// Run a single frame
    pub fn frame(&mut self) -> Result<FrameSample, EngineError> {
        if self.state != LoopState::Running {
            return Err(EngineError::InvalidState(format!(
                "frame requested while {:?}",
                self.state
            )));
        }

        let sample = self.timing.advance(self.surface.time());

        self.game.process_input(sample.delta_time, &self.keys)?;
        self.game.update(sample.delta_time)?;

        self.surface.clear(self.config.graphics.clear_color);
        self.game.render()?;

        if self.config.overlay.enabled {
            self.overlay.begin_frame(OverlayFrame {
                resolution: self.surface.resolution(),
                pixels_per_point: self.surface.pixels_per_point(),
                time: self.timing.current_time(),
            });
            let lines = [overlay::fps_line(&sample), overlay::frame_time_line(&sample)];
            self.overlay.debug_panel(&self.config.overlay.title, &lines);
            self.overlay.end_frame()?;
        }

        self.surface.present();
        self.dispatch_events();

        Ok(sample)
    }

    fn dispatch_events(&mut self) {
        let mut events = std::mem::take(&mut self.events);
        self.surface.poll_events(&mut events);

        for event in events.drain(..) {
            // A disabled overlay never starts a frame to drain its input
            if self.config.overlay.enabled {
                self.overlay.handle_event(&event);
            }
            let surface = &self.surface;
            self.translator.translate(
                &event,
                &mut self.keys,
                || surface.primary_gamepad(),
                &mut self.commands,
            );
            self.apply_commands();
        }
        self.events = events;

        if self.translator.exit_policy() == GamepadExitPolicy::PerFrame {
            let snapshot = self.surface.primary_gamepad();
            self.translator.poll_gamepad(snapshot, &mut self.commands);
            self.apply_commands();
        }
    }

    fn apply_commands(&mut self) {
        for command in self.commands.drain(..) {
            match command {
                AppCommand::RequestExit => self.surface.request_close(),
                AppCommand::ResizeViewport { width, height } => {
                    self.surface.set_viewport(width, height);
                }
            }
        }
    }

    /// Release everything in reverse acquisition order
    ///
    /// Runs at most once; later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        log::info!("Shutting down...");

        self.game.release();
        self.overlay.shutdown_renderer();
        self.overlay.shutdown_platform();
        self.overlay.destroy_context();
        self.surface.destroy_window();
        self.surface.terminate();
        self.platform.on_process_end();

        self.state = LoopState::Stopped;
        log::info!(
            "Shutdown complete after {} frames (average {:.2} FPS)",
            self.timing.sample_count(),
            self.timing.average_fps()
        );
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frame timing state
    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    /// Key-state table as the game sees it
    pub fn keys(&self) -> &KeyStateTable {
        &self.keys
    }

    /// The game
    pub fn game(&self) -> &G {
        &self.game
    }

    /// The surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The platform
    pub fn platform(&self) -> &P {
        &self.platform
    }
}
