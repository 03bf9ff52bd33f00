/// Logical keys the game reacts to. Every other key is dropped by the
/// backend before it reaches [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }

    /// Map a legacy DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Option<Key> {
        match code {
            38 => Some(Key::Up),
            40 => Some(Key::Down),
            _ => None,
        }
    }
}

/// Held state of the two movement keys. Read, never consumed, by the
/// simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::default();
        input.press(Key::Up);
        assert!(input.up);
        assert!(!input.down);

        input.press(Key::Down);
        assert!(input.up && input.down);

        input.release(Key::Up);
        assert!(!input.up);
        assert!(input.down);
    }

    #[test]
    fn test_release_without_press_is_harmless() {
        let mut input = InputState::default();
        input.release(Key::Down);
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_key("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom_key("ArrowLeft"), None);
        assert_eq!(Key::from_dom_key("w"), None);
    }

    #[test]
    fn test_key_code_mapping() {
        assert_eq!(Key::from_key_code(38), Some(Key::Up));
        assert_eq!(Key::from_key_code(40), Some(Key::Down));
        assert_eq!(Key::from_key_code(37), None);
        assert_eq!(Key::from_key_code(0), None);
    }

    #[test]
    fn test_unrecognised_key_leaves_state_untouched() {
        let mut input = InputState::default();
        input.press(Key::Up);
        if let Some(key) = Key::from_dom_key("Enter") {
            input.release(key);
        }
        assert!(input.up);
    }
}
