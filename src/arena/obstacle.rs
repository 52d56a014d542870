//! Walls and doors placed in the arena.
use bevy::color::Color;

use crate::{arena::geometry::Rect, core::errors::ArenaError};

/// Door-specific state. `collidable == !open` holds after every toggle.
#[derive(Debug, Clone, PartialEq)]
struct DoorState {
    open: bool,
    closed_color: Color,
    open_color: Color,
}

impl DoorState {
    fn is_open(&self) -> bool {
        self.open
    }
}

/// Plain walls and doors differ only in how `toggle` behaves.
#[derive(Debug, Clone, PartialEq)]
enum ObstacleKind {
    Plain,
    Door(DoorState),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    rect: Rect,
    color: Color,
    collidable: bool,
    kind: ObstacleKind,
}

impl Obstacle {
    pub fn wall(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            color,
            collidable: true,
            kind: ObstacleKind::Plain,
        }
    }

    pub fn door(rect: Rect, open: bool, closed_color: Color, open_color: Color) -> Self {
        Self {
            rect,
            color: if open { open_color } else { closed_color },
            collidable: !open,
            kind: ObstacleKind::Door(DoorState {
                open,
                closed_color,
                open_color,
            }),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_collidable(&self) -> bool {
        self.collidable
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, ObstacleKind::Door(_))
    }

    /// Open state for doors, `None` for plain walls.
    pub fn door_open(&self) -> Option<bool> {
        match &self.kind {
            ObstacleKind::Door(door) => Some(door.is_open()),
            ObstacleKind::Plain => None,
        }
    }

    /// Flips a door and keeps `open`, `collidable` and `color` in step.
    /// Returns the new open state; plain walls are left untouched.
    pub fn toggle(&mut self) -> Option<bool> {
        let ObstacleKind::Door(door) = &mut self.kind else {
            return None;
        };
        door.open = !door.open;
        self.collidable = !door.open;
        self.color = if door.open {
            door.open_color
        } else {
            door.closed_color
        };
        Some(door.open)
    }

    /// Scripted override for plain walls. Doors only change through `toggle`.
    pub fn set_collidable(&mut self, collidable: bool) -> Result<(), ArenaError> {
        match self.kind {
            ObstacleKind::Plain => {
                self.collidable = collidable;
                Ok(())
            }
            ObstacleKind::Door(_) => Err(ArenaError::DoorCollidability),
        }
    }
}
