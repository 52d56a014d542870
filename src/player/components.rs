//! The controllable actor and its facing direction.
use bevy::color::Color;
use serde::{Deserialize, Serialize};

use crate::{animation::AnimationClock, arena::geometry::Rect};

/// Facing direction. The discriminant order matches sprite sheet rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Left,
    #[default]
    Down,
    Right,
}

impl Direction {
    /// Sprite sheet row for this direction.
    pub fn row(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Down => 2,
            Self::Right => 3,
        }
    }
}

/// The actor steered by the keyboard. Created once per session.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub facing: Direction,
    pub moving: bool,
    pub animation: AnimationClock,
    pub color: Color,
}

impl Player {
    pub fn new(rect: Rect, speed: f32, color: Color) -> Self {
        Self {
            rect,
            speed: speed.max(0.0),
            facing: Direction::default(),
            moving: false,
            animation: AnimationClock::default(),
            color,
        }
    }

    pub fn frame_index(&self) -> usize {
        self.animation.frame_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_sheet_layout() {
        let rows: Vec<usize> = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ]
        .into_iter()
        .map(Direction::row)
        .collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn new_player_starts_idle_facing_down() {
        let rect = Rect::new(50.0, 50.0, 64.0, 64.0).expect("valid rect");
        let player = Player::new(rect, -2.0, Color::WHITE);
        assert_eq!(player.facing, Direction::Down);
        assert!(!player.moving);
        assert_eq!(player.speed, 0.0);
        assert_eq!(player.frame_index(), 0);
    }
}
