//! Edge-detecting input buffer.
use std::collections::HashSet;

use serde::Serialize;

/// Logical actions the core understands. Raw key names never reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    Interact,
    Pause,
    Debug,
    ToggleDoor,
}

/// Read-only view of the keys for a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashSet<LogicalKey>,
    just_pressed: HashSet<LogicalKey>,
}

impl InputSnapshot {
    pub fn held(&self, key: LogicalKey) -> bool {
        self.held.contains(&key)
    }

    /// True only on the tick the key went from released to pressed.
    pub fn just_pressed(&self, key: LogicalKey) -> bool {
        self.just_pressed.contains(&key)
    }
}

/// Keeps the previous and current pressed sets; edges are their difference.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    previous: HashSet<LogicalKey>,
    current: HashSet<LogicalKey>,
}

impl InputBuffer {
    /// Rotates the buffer with this tick's pressed keys and returns the snapshot.
    pub fn advance<I>(&mut self, pressed: I) -> InputSnapshot
    where
        I: IntoIterator<Item = LogicalKey>,
    {
        self.previous = std::mem::take(&mut self.current);
        self.current = pressed.into_iter().collect();

        InputSnapshot {
            held: self.current.clone(),
            just_pressed: self.current.difference(&self.previous).copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fires_once_while_held() {
        let mut buffer = InputBuffer::default();

        let first = buffer.advance([LogicalKey::Interact]);
        assert!(first.just_pressed(LogicalKey::Interact));
        assert!(first.held(LogicalKey::Interact));

        for _ in 0..5 {
            let held = buffer.advance([LogicalKey::Interact]);
            assert!(!held.just_pressed(LogicalKey::Interact));
            assert!(held.held(LogicalKey::Interact));
        }

        let released = buffer.advance([]);
        assert!(!released.held(LogicalKey::Interact));

        let again = buffer.advance([LogicalKey::Interact]);
        assert!(again.just_pressed(LogicalKey::Interact));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut buffer = InputBuffer::default();
        buffer.advance([LogicalKey::Right]);
        let snapshot = buffer.advance([LogicalKey::Right, LogicalKey::Pause]);
        assert!(snapshot.just_pressed(LogicalKey::Pause));
        assert!(!snapshot.just_pressed(LogicalKey::Right));
    }
}
