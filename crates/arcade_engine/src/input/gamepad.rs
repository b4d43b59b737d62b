use serde::{Deserialize, Serialize};

/// Reading of the primary gamepad at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GamepadSnapshot {
    /// A device with a standard gamepad mapping is present
    pub connected: bool,
    /// Start button (the "+" button on the handheld)
    pub start: bool,
    /// Back button (the "-" button on the handheld)
    pub back: bool,
}

impl GamepadSnapshot {
    /// Whether this reading should close the application
    pub fn exit_requested(&self) -> bool {
        self.connected && (self.start || self.back)
    }
}

/// When the gamepad's exit buttons are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadExitPolicy {
    /// Read the gamepad only while handling a keyboard event. A start/back
    /// press goes unnoticed until the next key event arrives, and never in a
    /// session without keyboard input.
    OnKeyEvent,
    /// Read the gamepad once per frame after events are dispatched
    #[default]
    PerFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_requires_connected_pad() {
        let disconnected = GamepadSnapshot {
            connected: false,
            start: true,
            back: false,
        };
        assert!(!disconnected.exit_requested());

        let back = GamepadSnapshot {
            connected: true,
            start: false,
            back: true,
        };
        assert!(back.exit_requested());
        assert!(!GamepadSnapshot::default().exit_requested());
    }
}
