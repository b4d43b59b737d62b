//! Input translation
//!
//! The windowing layer delivers raw events as [`InputEvent`] messages. The
//! [`InputTranslator`] turns them into key-state table updates and a small set
//! of [`AppCommand`]s for the frame loop. Nothing here touches a real window,
//! so the whole path can be driven from tests.

mod gamepad;
mod keys;
mod translator;

pub use gamepad::{GamepadExitPolicy, GamepadSnapshot};
pub use keys::{KeyStateTable, KEY_TABLE_SIZE};
pub use translator::InputTranslator;

/// Key transition reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Any additional button
    Other(u8),
}

/// Raw platform event, already detached from the windowing library
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Keyboard key transition; `code` is the platform key code and may be
    /// negative for unknown keys
    Key {
        /// Platform key code
        code: i32,
        /// Transition
        action: KeyAction,
    },

    /// Framebuffer was resized, in pixels
    FramebufferResized {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },

    /// A joystick was plugged in
    JoystickConnected {
        /// Joystick slot
        id: i32,
        /// Gamepad mapping name if the device has a standard mapping
        gamepad_name: Option<String>,
    },

    /// A joystick was removed
    JoystickDisconnected {
        /// Joystick slot
        id: i32,
    },

    /// Cursor moved, in window coordinates
    CursorMoved {
        /// X coordinate
        x: f64,
        /// Y coordinate
        y: f64,
    },

    /// Mouse button transition
    MouseButton {
        /// Button
        button: MouseButton,
        /// Whether the button is now down
        pressed: bool,
    },

    /// Scroll wheel or trackpad scroll
    Scroll {
        /// Horizontal delta
        dx: f64,
        /// Vertical delta
        dy: f64,
    },

    /// Window gained (`true`) or lost focus
    Focused(bool),

    /// User asked the window to close
    CloseRequested,
}

/// Discrete command for the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Stop the loop at the next iteration check
    RequestExit,
    /// Set the viewport to the new framebuffer size
    ResizeViewport {
        /// Width in pixels
        width: i32,
        /// Height in pixels
        height: i32,
    },
}
