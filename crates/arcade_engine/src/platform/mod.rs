//! Platform capabilities
//!
//! Everything that differs between desktop and the handheld console sits
//! behind [`Platform`]: process start/end hooks (asset archive mount, debug
//! output redirect), logical asset path mapping, forced screen resolution and
//! the platform's own keep-running signal.
//!
//! The variant used by a build is [`NativePlatform`], selected from the
//! target at compile time.

mod console;
mod desktop;
#[cfg(target_os = "horizon")]
mod libnx;

pub use console::{ConsoleServices, HandheldConsole, CONSOLE_RESOLUTION};
pub use desktop::Desktop;
#[cfg(target_os = "horizon")]
pub use libnx::LibnxServices;

/// Platform-specific process lifecycle and capability queries
pub trait Platform {
    /// Acquire process-wide platform resources
    ///
    /// Runs before any graphics setup. Calling it again while already started
    /// is a no-op.
    fn on_process_start(&mut self);

    /// Release what [`Platform::on_process_start`] acquired, in reverse order
    ///
    /// Safe to call when nothing was acquired.
    fn on_process_end(&mut self);

    /// Map a logical asset name to a path for this platform
    fn resolve_asset(&self, name: &str) -> String;

    /// Resolution the platform imposes regardless of what was requested
    fn forced_resolution(&self) -> Option<(u32, u32)>;

    /// Platform-level "keep running" signal, checked once per frame
    fn should_continue(&mut self) -> bool {
        true
    }
}

/// Platform implementation for the current build target
#[cfg(target_os = "horizon")]
pub type NativePlatform = HandheldConsole<LibnxServices>;

/// Platform implementation for the current build target
#[cfg(not(target_os = "horizon"))]
pub type NativePlatform = Desktop;

/// Construct the platform for the current build target
pub fn native() -> NativePlatform {
    #[cfg(target_os = "horizon")]
    {
        HandheldConsole::new(LibnxServices::default(), cfg!(feature = "nxlink"))
    }
    #[cfg(not(target_os = "horizon"))]
    {
        Desktop::new()
    }
}
