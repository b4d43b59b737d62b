//! Diagnostic overlay
//!
//! An immediate-mode panel drawn on top of the game every frame showing the
//! frame rate and frame time. [`Overlay`] is the seam the frame loop uses;
//! [`EguiOverlay`] renders it with egui through the GL context.
//!
//! Lifecycle: created after the GL context, `begin_frame` / `debug_panel` /
//! `end_frame` once per frame after the game has rendered, then shut down in
//! three steps (renderer, platform input backend, context) before the window
//! is destroyed.

mod egui_overlay;
mod input;

pub use egui_overlay::{shader_version_for, EguiOverlay};
pub use input::EguiInput;

use crate::foundation::time::FrameSample;
use crate::input::InputEvent;
use crate::render::Resolution;
use thiserror::Error;

/// Overlay errors
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The GL renderer could not be created or used
    #[error("Overlay renderer error: {0}")]
    Renderer(String),

    /// `end_frame` without a matching `begin_frame`
    #[error("Overlay frame was not started")]
    FrameNotStarted,

    /// Used after shutdown
    #[error("Overlay is not initialized")]
    NotInitialized,
}

/// Per-frame parameters handed to the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    /// Drawable size in pixels
    pub resolution: Resolution,
    /// Pixels per window coordinate unit; pointer events arrive in the latter
    pub pixels_per_point: f32,
    /// Platform time in seconds
    pub time: f64,
}

/// Immediate-mode overlay used by the frame loop
pub trait Overlay {
    /// Feed a platform event to the overlay's input backend
    fn handle_event(&mut self, event: &InputEvent);

    /// Start an overlay frame
    fn begin_frame(&mut self, frame: OverlayFrame);

    /// Declare a text panel for the current frame
    fn debug_panel(&mut self, title: &str, lines: &[String]);

    /// Finish the frame and draw it over whatever is in the back buffer
    fn end_frame(&mut self) -> Result<(), OverlayError>;

    /// Release GPU resources of the renderer
    fn shutdown_renderer(&mut self);

    /// Release the platform input backend
    fn shutdown_platform(&mut self);

    /// Destroy the overlay context
    fn destroy_context(&mut self);
}

/// Frame-rate line: instantaneous and lifetime average
pub fn fps_line(sample: &FrameSample) -> String {
    format!("FPS: {:.2}, AVG: {:.2}", sample.fps, sample.average_fps)
}

/// Frame-time line in seconds and milliseconds
pub fn frame_time_line(sample: &FrameSample) -> String {
    format!(
        "Frame Time: {:.6}s, {:.3}ms",
        sample.delta_time,
        sample.delta_time * 1000.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_lines() {
        let sample = FrameSample {
            delta_time: 0.016,
            fps: 62.5,
            average_fps: 60.0,
        };
        assert_eq!(fps_line(&sample), "FPS: 62.50, AVG: 60.00");
        assert_eq!(frame_time_line(&sample), "Frame Time: 0.016000s, 16.000ms");
    }

    #[test]
    fn test_first_frame_lines() {
        let sample = FrameSample {
            delta_time: 0.0,
            fps: 0.0,
            average_fps: 0.0,
        };
        assert_eq!(fps_line(&sample), "FPS: 0.00, AVG: 0.00");
        assert_eq!(frame_time_line(&sample), "Frame Time: 0.000000s, 0.000ms");
    }
}
