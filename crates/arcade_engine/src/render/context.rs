//! GLFW window and OpenGL context bootstrap
//!
//! Creates the one window/context pair of the process, loads GL entry points,
//! applies the fixed render state and turns GLFW events into
//! [`InputEvent`]s for the frame loop.

use super::surface::{effective_resolution, scale_factor, Resolution, Surface};
use crate::config::EngineConfig;
use crate::input::{GamepadSnapshot, InputEvent, KeyAction, MouseButton};
use crate::platform::Platform;
use glfw::Context as _;
use glow::HasContext;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use thiserror::Error;

/// GL functions that must resolve for the context to be usable
const REQUIRED_GL_SYMBOLS: [&str; 6] = [
    "glGetString",
    "glViewport",
    "glEnable",
    "glBlendFunc",
    "glClearColor",
    "glClear",
];

/// Graphics bootstrap errors
#[derive(Error, Debug)]
pub enum ContextError {
    /// The windowing system could not start
    #[error("Failed to initialize GLFW: {0}")]
    Init(String),

    /// Window or context creation was refused
    #[error("Failed to create GLFW window ({width}x{height}, OpenGL {major}.{minor} core)")]
    ContextCreationFailure {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested major version
        major: u32,
        /// Requested minor version
        minor: u32,
    },

    /// A GL entry point could not be resolved
    #[error("Failed to load OpenGL entry point {symbol}")]
    EntryPointLoadFailure {
        /// First symbol that failed to resolve
        symbol: String,
    },
}

type JoystickMessage = (glfw::JoystickId, glfw::JoystickEvent);

/// The process's window and current OpenGL context
pub struct GlfwSurface {
    glfw: Option<glfw::Glfw>,
    window: Option<glfw::PWindow>,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    joystick_events: Receiver<JoystickMessage>,
    gl: Arc<glow::Context>,
    resolution: Resolution,
}

impl GlfwSurface {
    /// Create the window, make its context current and configure render state
    pub fn create(config: &EngineConfig, platform: &dyn Platform) -> Result<Self, ContextError> {
        // Hats report as axes, not as extra buttons
        glfw::init_hint(glfw::InitHint::JoystickHatButtons(false));
        let mut glfw = glfw::init(log_glfw_error).map_err(|e| {
            log::error!("Failed to initialize GLFW: {e:?}");
            ContextError::Init(format!("{e:?}"))
        })?;

        let (major, minor) = config.graphics.context_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        if cfg!(target_os = "macos") {
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }

        let (width, height) = (config.window.width, config.window.height);
        let (mut window, events) = glfw
            .create_window(width, height, &config.window.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                log::error!("Failed to create GLFW window");
                ContextError::ContextCreationFailure {
                    width,
                    height,
                    major,
                    minor,
                }
            })?;

        window.make_current();
        let gl = Arc::new(load_gl(&mut window)?);
        log_gl_strings(&gl);

        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_focus_polling(true);
        window.set_close_polling(true);
        window.set_cursor_mode(glfw::CursorMode::Disabled);

        let (joystick_tx, joystick_events) = mpsc::channel();
        glfw.set_joystick_callback(move |id, event| {
            let _ = joystick_tx.send((id, event));
        });

        log_initial_gamepad(&glfw);

        let (fb_width, fb_height) = window.get_framebuffer_size();
        let framebuffer = (fb_width.max(0) as u32, fb_height.max(0) as u32);
        let resolution = effective_resolution(framebuffer, platform.forced_resolution());
        if (resolution.width, resolution.height) != (width, height) {
            log::info!(
                "Requested {width}x{height}, drawing at {}x{}",
                resolution.width,
                resolution.height
            );
        }

        apply_render_state(&gl, resolution);
        glfw.set_swap_interval(glfw::SwapInterval::Sync(config.graphics.vsync_interval));

        Ok(Self {
            glfw: Some(glfw),
            window: Some(window),
            events,
            joystick_events,
            gl,
            resolution,
        })
    }

    /// Shared handle to the GL function table
    pub fn gl(&self) -> Arc<glow::Context> {
        Arc::clone(&self.gl)
    }

    fn joystick_event(&self, id: glfw::JoystickId, event: glfw::JoystickEvent) -> InputEvent {
        let id_number = id as i32;
        match event {
            glfw::JoystickEvent::Connected => {
                let gamepad_name = self.glfw.as_ref().and_then(|windowing| {
                    let joystick = windowing.get_joystick(id);
                    joystick
                        .is_gamepad()
                        .then(|| joystick.get_gamepad_name().unwrap_or_default())
                });
                InputEvent::JoystickConnected {
                    id: id_number,
                    gamepad_name,
                }
            }
            glfw::JoystickEvent::Disconnected => InputEvent::JoystickDisconnected { id: id_number },
        }
    }
}

impl Surface for GlfwSurface {
    fn time(&self) -> f64 {
        self.glfw.as_ref().map_or(0.0, glfw::Glfw::get_time)
    }

    fn should_close(&self) -> bool {
        self.window.as_ref().map_or(true, |window| window.should_close())
    }

    fn request_close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.set_should_close(true);
        }
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn pixels_per_point(&self) -> f32 {
        self.window.as_ref().map_or(1.0, |window| {
            let (framebuffer_width, _) = window.get_framebuffer_size();
            let (window_width, _) = window.get_size();
            scale_factor(framebuffer_width, window_width)
        })
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            // Minimised windows report a zero framebuffer
            return;
        }
        self.resolution = Resolution::new(width as u32, height as u32);
        unsafe { self.gl.viewport(0, 0, width, height) };
    }

    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn present(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.swap_buffers();
        }
    }

    fn poll_events(&mut self, out: &mut Vec<InputEvent>) {
        let Some(windowing) = self.glfw.as_mut() else {
            return;
        };
        windowing.poll_events();

        out.extend(
            glfw::flush_messages(&self.events).filter_map(|(_, event)| translate_window_event(event)),
        );

        while let Ok((id, event)) = self.joystick_events.try_recv() {
            out.push(self.joystick_event(id, event));
        }
    }

    fn primary_gamepad(&self) -> GamepadSnapshot {
        let Some(windowing) = self.glfw.as_ref() else {
            return GamepadSnapshot::default();
        };
        let joystick = windowing.get_joystick(glfw::JoystickId::Joystick1);
        if !joystick.is_gamepad() {
            return GamepadSnapshot::default();
        }
        joystick
            .get_gamepad_state()
            .map_or_else(GamepadSnapshot::default, |state| snapshot_from_state(&state))
    }

    fn destroy_window(&mut self) {
        if self.window.take().is_some() {
            log::debug!("Window destroyed");
        }
    }

    fn terminate(&mut self) {
        if self.glfw.take().is_some() {
            log::debug!("GLFW terminated");
        }
    }
}

fn log_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {error:?}: {description}");
}

fn load_gl(window: &mut glfw::PWindow) -> Result<glow::Context, ContextError> {
    for symbol in REQUIRED_GL_SYMBOLS {
        if window.get_proc_address(symbol).is_null() {
            log::error!("Failed to load OpenGL entry point {symbol}");
            return Err(ContextError::EntryPointLoadFailure {
                symbol: symbol.to_string(),
            });
        }
    }

    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| window.get_proc_address(symbol) as *const _)
    };
    Ok(gl)
}

fn log_gl_strings(gl: &glow::Context) {
    unsafe {
        log::info!("OpenGL Vendor: {}", gl.get_parameter_string(glow::VENDOR));
        log::info!("OpenGL Renderer: {}", gl.get_parameter_string(glow::RENDERER));
        log::info!("OpenGL Version: {}", gl.get_parameter_string(glow::VERSION));
        log::info!(
            "GLSL Version: {}",
            gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)
        );
    }
}

fn log_initial_gamepad(glfw: &glfw::Glfw) {
    let joystick = glfw.get_joystick(glfw::JoystickId::Joystick1);
    if !joystick.is_gamepad() {
        return;
    }

    log::info!(
        "Gamepad detected: {}",
        joystick.get_gamepad_name().unwrap_or_default()
    );
    if let Some(state) = joystick.get_gamepad_state() {
        let snapshot = snapshot_from_state(&state);
        log::debug!("Gamepad start: {}, back: {}", snapshot.start, snapshot.back);
    }
}

fn apply_render_state(gl: &glow::Context, resolution: Resolution) {
    unsafe {
        gl.viewport(0, 0, resolution.width as i32, resolution.height as i32);
        gl.enable(glow::BLEND);
        gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }
}

fn snapshot_from_state(state: &glfw::GamepadState) -> GamepadSnapshot {
    GamepadSnapshot {
        connected: true,
        start: state.get_button_state(glfw::GamepadButton::ButtonStart) == glfw::Action::Press,
        back: state.get_button_state(glfw::GamepadButton::ButtonBack) == glfw::Action::Press,
    }
}

/// Convert a GLFW window event into an engine input event
pub fn translate_window_event(event: glfw::WindowEvent) -> Option<InputEvent> {
    match event {
        glfw::WindowEvent::Key(key, _scancode, action, _mods) => Some(InputEvent::Key {
            code: key as i32,
            action: match action {
                glfw::Action::Press => KeyAction::Press,
                glfw::Action::Release => KeyAction::Release,
                glfw::Action::Repeat => KeyAction::Repeat,
            },
        }),
        glfw::WindowEvent::FramebufferSize(width, height) => {
            Some(InputEvent::FramebufferResized { width, height })
        }
        glfw::WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x, y }),
        glfw::WindowEvent::MouseButton(button, action, _mods) => Some(InputEvent::MouseButton {
            button: match button {
                glfw::MouseButton::Button1 => MouseButton::Left,
                glfw::MouseButton::Button2 => MouseButton::Right,
                glfw::MouseButton::Button3 => MouseButton::Middle,
                other => MouseButton::Other(other as u8),
            },
            pressed: action != glfw::Action::Release,
        }),
        glfw::WindowEvent::Scroll(dx, dy) => Some(InputEvent::Scroll { dx, dy }),
        glfw::WindowEvent::Focus(focused) => Some(InputEvent::Focused(focused)),
        glfw::WindowEvent::Close => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_translation() {
        let event = glfw::WindowEvent::Key(
            glfw::Key::A,
            30,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );
        assert_eq!(
            translate_window_event(event),
            Some(InputEvent::Key {
                code: 65,
                action: KeyAction::Press
            })
        );
    }

    #[test]
    fn test_unknown_key_keeps_negative_code() {
        let event = glfw::WindowEvent::Key(
            glfw::Key::Unknown,
            0,
            glfw::Action::Release,
            glfw::Modifiers::empty(),
        );
        assert_eq!(
            translate_window_event(event),
            Some(InputEvent::Key {
                code: -1,
                action: KeyAction::Release
            })
        );
    }

    #[test]
    fn test_framebuffer_and_close_translation() {
        assert_eq!(
            translate_window_event(glfw::WindowEvent::FramebufferSize(800, 600)),
            Some(InputEvent::FramebufferResized {
                width: 800,
                height: 600
            })
        );
        assert_eq!(
            translate_window_event(glfw::WindowEvent::Close),
            Some(InputEvent::CloseRequested)
        );
        assert_eq!(translate_window_event(glfw::WindowEvent::Refresh), None);
    }

    #[test]
    fn test_mouse_button_translation() {
        let event = glfw::WindowEvent::MouseButton(
            glfw::MouseButton::Button2,
            glfw::Action::Press,
            glfw::Modifiers::empty(),
        );
        assert_eq!(
            translate_window_event(event),
            Some(InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true
            })
        );
    }
}
