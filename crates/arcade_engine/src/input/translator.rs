use super::{AppCommand, GamepadExitPolicy, GamepadSnapshot, InputEvent, KeyAction, KeyStateTable};

/// Maps raw input events onto the key-state table and app commands
///
/// Holds only its configuration. Each call mutates nothing but the key table
/// passed in and the command list it appends to.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTranslator {
    exit_policy: GamepadExitPolicy,
}

impl InputTranslator {
    /// Create a translator with the given gamepad exit policy
    pub fn new(exit_policy: GamepadExitPolicy) -> Self {
        Self { exit_policy }
    }

    /// Gamepad exit policy in use
    pub fn exit_policy(&self) -> GamepadExitPolicy {
        self.exit_policy
    }

    /// Translate one event
    ///
    /// `read_gamepad` is only called for key events under
    /// [`GamepadExitPolicy::OnKeyEvent`].
    pub fn translate<F>(
        &self,
        event: &InputEvent,
        keys: &mut KeyStateTable,
        read_gamepad: F,
        commands: &mut Vec<AppCommand>,
    ) where
        F: FnOnce() -> GamepadSnapshot,
    {
        match event {
            InputEvent::Key { code, action } => {
                if self.exit_policy == GamepadExitPolicy::OnKeyEvent {
                    self.poll_gamepad(read_gamepad(), commands);
                }
                match action {
                    KeyAction::Press => {
                        keys.set(*code, true);
                    }
                    KeyAction::Release => {
                        keys.set(*code, false);
                    }
                    KeyAction::Repeat => {}
                }
            }
            InputEvent::JoystickConnected { id, gamepad_name } => {
                log::info!("Joystick {id} connected");
                if let Some(name) = gamepad_name {
                    log::info!("Joystick {id} is gamepad: \"{name}\"");
                }
            }
            InputEvent::JoystickDisconnected { id } => {
                log::info!("Joystick {id} disconnected");
            }
            InputEvent::FramebufferResized { width, height } => {
                log::info!("Framebuffer resized, width: {width}, height: {height}");
                commands.push(AppCommand::ResizeViewport {
                    width: *width,
                    height: *height,
                });
            }
            InputEvent::CloseRequested => {
                commands.push(AppCommand::RequestExit);
            }
            InputEvent::CursorMoved { .. }
            | InputEvent::MouseButton { .. }
            | InputEvent::Scroll { .. }
            | InputEvent::Focused(_) => {}
        }
    }

    /// Check a gamepad reading for the exit buttons
    pub fn poll_gamepad(&self, snapshot: GamepadSnapshot, commands: &mut Vec<AppCommand>) {
        if snapshot.exit_requested() {
            log::info!("Exit requested from gamepad");
            commands.push(AppCommand::RequestExit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const KEY_A: i32 = 65;

    fn idle_pad() -> GamepadSnapshot {
        GamepadSnapshot {
            connected: true,
            ..GamepadSnapshot::default()
        }
    }

    fn start_pressed() -> GamepadSnapshot {
        GamepadSnapshot {
            connected: true,
            start: true,
            back: false,
        }
    }

    fn key(code: i32, action: KeyAction) -> InputEvent {
        InputEvent::Key { code, action }
    }

    #[test]
    fn test_press_then_release() {
        let translator = InputTranslator::default();
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(&key(KEY_A, KeyAction::Press), &mut keys, idle_pad, &mut commands);
        assert!(keys.is_pressed(KEY_A));

        translator.translate(&key(KEY_A, KeyAction::Release), &mut keys, idle_pad, &mut commands);
        assert!(!keys.is_pressed(KEY_A));
        assert!(commands.is_empty());
    }

    #[test]
    fn test_press_without_release_stays_pressed() {
        let translator = InputTranslator::default();
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(&key(KEY_A, KeyAction::Press), &mut keys, idle_pad, &mut commands);
        translator.translate(&key(KEY_A, KeyAction::Repeat), &mut keys, idle_pad, &mut commands);
        assert!(keys.is_pressed(KEY_A));
    }

    #[test]
    fn test_out_of_range_codes_ignored() {
        let translator = InputTranslator::default();
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        for code in [-1, 1024, 4096, i32::MIN, i32::MAX] {
            translator.translate(&key(code, KeyAction::Press), &mut keys, idle_pad, &mut commands);
        }
        assert_eq!(keys.pressed_count(), 0);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_key_event_polls_gamepad_only_on_key_event_policy() {
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();
        let reads = Cell::new(0);
        let read = || {
            reads.set(reads.get() + 1);
            idle_pad()
        };

        InputTranslator::new(GamepadExitPolicy::PerFrame).translate(
            &key(KEY_A, KeyAction::Press),
            &mut keys,
            read,
            &mut commands,
        );
        assert_eq!(reads.get(), 0);

        InputTranslator::new(GamepadExitPolicy::OnKeyEvent).translate(
            &key(KEY_A, KeyAction::Release),
            &mut keys,
            read,
            &mut commands,
        );
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn test_exit_when_key_event_coincides_with_start() {
        let translator = InputTranslator::new(GamepadExitPolicy::OnKeyEvent);
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(&key(KEY_A, KeyAction::Press), &mut keys, start_pressed, &mut commands);
        assert_eq!(commands, vec![AppCommand::RequestExit]);
        // The key itself is still recorded
        assert!(keys.is_pressed(KEY_A));
    }

    #[test]
    fn test_start_press_without_key_event_is_not_seen() {
        // Under the key-event policy the pad is only read while a key event is
        // being handled. Holding start between key events does nothing until
        // the next key event arrives.
        let translator = InputTranslator::new(GamepadExitPolicy::OnKeyEvent);
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();
        let pad = Cell::new(idle_pad());

        translator.translate(&key(KEY_A, KeyAction::Press), &mut keys, || pad.get(), &mut commands);
        assert!(commands.is_empty());

        // Start goes down; no key event, so no translate call and no exit
        pad.set(start_pressed());
        assert!(commands.is_empty());

        // Non-key events do not read the pad either
        translator.translate(
            &InputEvent::CursorMoved { x: 1.0, y: 2.0 },
            &mut keys,
            || pad.get(),
            &mut commands,
        );
        assert!(commands.is_empty());

        translator.translate(&key(KEY_A, KeyAction::Release), &mut keys, || pad.get(), &mut commands);
        assert_eq!(commands, vec![AppCommand::RequestExit]);
    }

    #[test]
    fn test_back_button_exits_and_released_pad_does_not() {
        let translator = InputTranslator::new(GamepadExitPolicy::OnKeyEvent);
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(&key(KEY_A, KeyAction::Press), &mut keys, idle_pad, &mut commands);
        assert!(commands.is_empty());

        let back = || GamepadSnapshot {
            connected: true,
            start: false,
            back: true,
        };
        translator.translate(&key(KEY_A, KeyAction::Release), &mut keys, back, &mut commands);
        assert_eq!(commands, vec![AppCommand::RequestExit]);
    }

    #[test]
    fn test_per_frame_poll() {
        let translator = InputTranslator::new(GamepadExitPolicy::PerFrame);
        let mut commands = Vec::new();

        translator.poll_gamepad(idle_pad(), &mut commands);
        assert!(commands.is_empty());

        translator.poll_gamepad(start_pressed(), &mut commands);
        assert_eq!(commands, vec![AppCommand::RequestExit]);
    }

    #[test]
    fn test_resize_and_close() {
        let translator = InputTranslator::default();
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(
            &InputEvent::FramebufferResized { width: 800, height: 600 },
            &mut keys,
            idle_pad,
            &mut commands,
        );
        translator.translate(&InputEvent::CloseRequested, &mut keys, idle_pad, &mut commands);

        assert_eq!(
            commands,
            vec![
                AppCommand::ResizeViewport { width: 800, height: 600 },
                AppCommand::RequestExit,
            ]
        );
    }

    #[test]
    fn test_joystick_events_do_not_mutate_state() {
        let translator = InputTranslator::default();
        let mut keys = KeyStateTable::new();
        let mut commands = Vec::new();

        translator.translate(
            &InputEvent::JoystickConnected {
                id: 0,
                gamepad_name: Some("Pro Controller".to_string()),
            },
            &mut keys,
            start_pressed,
            &mut commands,
        );
        translator.translate(
            &InputEvent::JoystickDisconnected { id: 0 },
            &mut keys,
            start_pressed,
            &mut commands,
        );

        assert_eq!(keys.pressed_count(), 0);
        assert!(commands.is_empty());
    }
}
