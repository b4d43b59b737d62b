//! Platform input backend for egui
//!
//! Collects engine [`InputEvent`]s between frames and hands them to egui as a
//! [`egui::RawInput`] when the next overlay frame starts.

use crate::input::{InputEvent, MouseButton};
use crate::render::Resolution;

/// Accumulates pointer and focus state for egui
#[derive(Debug)]
pub struct EguiInput {
    pointer: Option<egui::Pos2>,
    focused: bool,
    events: Vec<egui::Event>,
    active: bool,
}

impl Default for EguiInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiInput {
    /// Create an active backend with no pending events
    pub fn new() -> Self {
        Self {
            pointer: None,
            focused: true,
            events: Vec::new(),
            active: true,
        }
    }

    /// Record an event for the next frame
    pub fn handle_event(&mut self, event: &InputEvent) {
        if !self.active {
            return;
        }

        match event {
            InputEvent::CursorMoved { x, y } => {
                let pos = egui::pos2(*x as f32, *y as f32);
                self.pointer = Some(pos);
                self.events.push(egui::Event::PointerMoved(pos));
            }
            InputEvent::MouseButton { button, pressed } => {
                let (Some(pos), Some(button)) = (self.pointer, pointer_button(*button)) else {
                    return;
                };
                self.events.push(egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: *pressed,
                    modifiers: egui::Modifiers::default(),
                });
            }
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    self.pointer = None;
                    self.events.push(egui::Event::PointerGone);
                }
            }
            _ => {}
        }
    }

    /// Build the raw input for a new frame, draining pending events
    ///
    /// `resolution` is in framebuffer pixels; egui gets the screen in points
    /// so that it matches the window-space pointer positions.
    pub fn take_raw_input(
        &mut self,
        resolution: Resolution,
        pixels_per_point: f32,
        time: f64,
    ) -> egui::RawInput {
        let ppp = if pixels_per_point.is_finite() && pixels_per_point > 0.0 {
            pixels_per_point
        } else {
            1.0
        };
        let screen = egui::vec2(resolution.width as f32, resolution.height as f32) / ppp;

        let mut raw = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, screen)),
            time: Some(time),
            focused: self.focused,
            events: std::mem::take(&mut self.events),
            ..egui::RawInput::default()
        };
        raw.viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(ppp);
        raw
    }

    /// Number of events waiting for the next frame
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Stop collecting events and drop pending ones
    pub fn shutdown(&mut self) {
        self.active = false;
        self.pointer = None;
        self.events.clear();
    }

    /// Whether the backend still accepts events
    pub fn is_active(&self) -> bool {
        self.active
    }
}

fn pointer_button(button: MouseButton) -> Option<egui::PointerButton> {
    match button {
        MouseButton::Left => Some(egui::PointerButton::Primary),
        MouseButton::Right => Some(egui::PointerButton::Secondary),
        MouseButton::Middle => Some(egui::PointerButton::Middle),
        MouseButton::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_input_carries_screen_and_events() {
        let mut input = EguiInput::new();
        input.handle_event(&InputEvent::CursorMoved { x: 10.0, y: 20.0 });
        input.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(input.pending_events(), 2);

        let raw = input.take_raw_input(Resolution::new(1280, 720), 1.0, 1.5);
        assert_eq!(raw.events.len(), 2);
        assert_eq!(raw.time, Some(1.5));
        let rect = raw.screen_rect.unwrap();
        assert_eq!((rect.width(), rect.height()), (1280.0, 720.0));
        assert_eq!(input.pending_events(), 0);
    }

    #[test]
    fn test_hidpi_screen_in_points() {
        let mut input = EguiInput::new();
        let raw = input.take_raw_input(Resolution::new(2560, 1440), 2.0, 0.0);
        let rect = raw.screen_rect.unwrap();
        assert_eq!((rect.width(), rect.height()), (1280.0, 720.0));
        assert_eq!(
            raw.viewports[&egui::ViewportId::ROOT].native_pixels_per_point,
            Some(2.0)
        );
    }

    #[test]
    fn test_invalid_scale_falls_back_to_one() {
        let mut input = EguiInput::new();
        let raw = input.take_raw_input(Resolution::new(800, 600), 0.0, 0.0);
        let rect = raw.screen_rect.unwrap();
        assert_eq!((rect.width(), rect.height()), (800.0, 600.0));
        assert_eq!(
            raw.viewports[&egui::ViewportId::ROOT].native_pixels_per_point,
            Some(1.0)
        );
    }

    #[test]
    fn test_button_without_pointer_is_dropped() {
        let mut input = EguiInput::new();
        input.handle_event(&InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(input.pending_events(), 0);
    }

    #[test]
    fn test_keys_are_not_forwarded() {
        let mut input = EguiInput::new();
        input.handle_event(&InputEvent::Key {
            code: 65,
            action: crate::input::KeyAction::Press,
        });
        assert_eq!(input.pending_events(), 0);
    }

    #[test]
    fn test_focus_loss() {
        let mut input = EguiInput::new();
        input.handle_event(&InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        input.handle_event(&InputEvent::Focused(false));
        let raw = input.take_raw_input(Resolution::new(640, 480), 1.0, 0.0);
        assert!(!raw.focused);
        assert!(matches!(raw.events.last(), Some(egui::Event::PointerGone)));
    }

    #[test]
    fn test_shutdown_stops_collection() {
        let mut input = EguiInput::new();
        input.handle_event(&InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        input.shutdown();
        assert!(!input.is_active());
        assert_eq!(input.pending_events(), 0);

        input.handle_event(&InputEvent::CursorMoved { x: 2.0, y: 2.0 });
        assert_eq!(input.pending_events(), 0);
    }
}
