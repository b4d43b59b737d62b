//! Window surface abstraction used by the frame loop
//!
//! The frame loop only talks to the window and graphics context through this
//! trait. [`super::GlfwSurface`] is the real implementation; tests drive the
//! loop with a recording fake.

use crate::input::{GamepadSnapshot, InputEvent};

/// Effective drawable size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Create a resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Resolve the size the surface will actually have
///
/// A platform that forces a resolution wins over whatever was requested.
pub fn effective_resolution(requested: (u32, u32), forced: Option<(u32, u32)>) -> Resolution {
    let (width, height) = forced.unwrap_or(requested);
    Resolution::new(width, height)
}

/// Framebuffer pixels per window coordinate unit
///
/// Falls back to 1.0 while either size is unknown (minimised window).
pub fn scale_factor(framebuffer_width: i32, window_width: i32) -> f32 {
    if framebuffer_width <= 0 || window_width <= 0 {
        return 1.0;
    }
    framebuffer_width as f32 / window_width as f32
}

/// Window plus current graphics context, as seen by the frame loop
pub trait Surface {
    /// Seconds since the windowing system was initialised
    fn time(&self) -> f64;

    /// Whether a close has been requested
    fn should_close(&self) -> bool;

    /// Ask the window to close at the next loop check
    fn request_close(&mut self);

    /// Current drawable size
    fn resolution(&self) -> Resolution;

    /// Framebuffer pixels per window coordinate unit (HiDPI scale)
    fn pixels_per_point(&self) -> f32 {
        1.0
    }

    /// Point the viewport at a new framebuffer size
    fn set_viewport(&mut self, width: i32, height: i32);

    /// Clear the color buffer
    fn clear(&mut self, color: [f32; 4]);

    /// Present the back buffer
    fn present(&mut self);

    /// Dispatch pending platform events and append them to `out`
    fn poll_events(&mut self, out: &mut Vec<InputEvent>);

    /// Read the primary gamepad now
    fn primary_gamepad(&self) -> GamepadSnapshot;

    /// Destroy the window and its graphics context
    fn destroy_window(&mut self);

    /// Shut down the windowing system
    fn terminate(&mut self);
}
