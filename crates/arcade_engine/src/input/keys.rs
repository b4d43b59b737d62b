/// Number of key codes tracked by [`KeyStateTable`]
pub const KEY_TABLE_SIZE: usize = 1024;

/// Current pressed state per platform key code
///
/// Written by the input translator when key events arrive, read by the game
/// during its input phase. Codes outside `[0, KEY_TABLE_SIZE)` are never
/// stored.
#[derive(Clone)]
pub struct KeyStateTable {
    keys: [bool; KEY_TABLE_SIZE],
}

impl KeyStateTable {
    /// Create a table with every key released
    pub fn new() -> Self {
        Self {
            keys: [false; KEY_TABLE_SIZE],
        }
    }

    /// Whether `code` is currently held; out-of-range codes read as released
    pub fn is_pressed(&self, code: i32) -> bool {
        Self::index(code).is_some_and(|i| self.keys[i])
    }

    /// Set the state of `code`; returns false if the code is out of range
    pub fn set(&mut self, code: i32, pressed: bool) -> bool {
        match Self::index(code) {
            Some(i) => {
                self.keys[i] = pressed;
                true
            }
            None => false,
        }
    }

    /// Number of keys currently held
    pub fn pressed_count(&self) -> usize {
        self.keys.iter().filter(|pressed| **pressed).count()
    }

    fn index(code: i32) -> Option<usize> {
        usize::try_from(code).ok().filter(|i| *i < KEY_TABLE_SIZE)
    }
}

impl Default for KeyStateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyStateTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let held: Vec<usize> = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(code, pressed)| pressed.then_some(code))
            .collect();
        f.debug_struct("KeyStateTable").field("held", &held).finish()
    }
}
