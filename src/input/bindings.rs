//! Raw keyboard to logical key mapping.
use bevy::prelude::*;

use super::buffer::LogicalKey;

/// Each logical key may be bound to several physical keys.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, LogicalKey)>,
}

impl KeyBindings {
    pub fn new(bindings: Vec<(KeyCode, LogicalKey)>) -> Self {
        Self { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn resolve(&self, key: KeyCode) -> Option<LogicalKey> {
        self.bindings
            .iter()
            .find(|(code, _)| *code == key)
            .map(|(_, logical)| *logical)
    }

    /// Logical keys whose bound physical keys are currently down.
    pub fn pressed(&self, keyboard: &ButtonInput<KeyCode>) -> Vec<LogicalKey> {
        let mut pressed = Vec::new();
        for (code, logical) in &self.bindings {
            if keyboard.pressed(*code) && !pressed.contains(logical) {
                pressed.push(*logical);
            }
        }
        pressed
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(vec![
            (KeyCode::ArrowUp, LogicalKey::Up),
            (KeyCode::KeyW, LogicalKey::Up),
            (KeyCode::ArrowDown, LogicalKey::Down),
            (KeyCode::KeyS, LogicalKey::Down),
            (KeyCode::ArrowLeft, LogicalKey::Left),
            (KeyCode::KeyA, LogicalKey::Left),
            (KeyCode::ArrowRight, LogicalKey::Right),
            (KeyCode::KeyD, LogicalKey::Right),
            (KeyCode::KeyE, LogicalKey::Interact),
            (KeyCode::Enter, LogicalKey::Interact),
            (KeyCode::KeyP, LogicalKey::Pause),
            (KeyCode::Escape, LogicalKey::Pause),
            (KeyCode::F3, LogicalKey::Debug),
            (KeyCode::Backquote, LogicalKey::Debug),
            (KeyCode::KeyF, LogicalKey::ToggleDoor),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_bindings_map_to_the_same_logical_key() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(KeyCode::KeyW), Some(LogicalKey::Up));
        assert_eq!(bindings.resolve(KeyCode::ArrowUp), Some(LogicalKey::Up));
        assert_eq!(bindings.resolve(KeyCode::KeyQ), None);
    }

    #[test]
    fn pressed_deduplicates_aliases() {
        let bindings = KeyBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyD);
        keyboard.press(KeyCode::ArrowRight);
        keyboard.press(KeyCode::KeyE);

        let pressed = bindings.pressed(&keyboard);
        assert_eq!(pressed, vec![LogicalKey::Right, LogicalKey::Interact]);
    }

    #[test]
    fn defaults_bind_two_keys_for_most_actions() {
        let bindings = KeyBindings::default();
        assert!(!bindings.is_empty());
        assert_eq!(bindings.len(), 15);

        let unbound = KeyBindings::new(Vec::new());
        assert!(unbound.is_empty());
        assert!(unbound.pressed(&ButtonInput::default()).is_empty());
    }
}
