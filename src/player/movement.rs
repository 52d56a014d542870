//! Movement resolver: directional intent in, validated position out.
//!
//! Moves are all-or-nothing. A candidate rectangle that overlaps any
//! collidable obstacle is rejected in full, so diagonal motion into a
//! corner stops instead of sliding along one axis.
use bevy::math::Vec2;

use crate::{
    animation::AnimationTiming,
    arena::{geometry::Rect, obstacle::Obstacle},
    input::buffer::{InputSnapshot, LogicalKey},
    player::components::{Direction, Player},
};

/// Raw direction in {-1, 0, 1}² plus the facing chosen from the held keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    pub direction: Vec2,
    pub facing: Option<Direction>,
}

/// Outcome of one resolver step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    Idle,
    Moved,
    Blocked { obstacle: usize },
}

/// Playable area used for clamping when the scene has no boundary walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

/// Keys are evaluated up, down, left, right; the last held key sets the
/// facing, so horizontal keys win over vertical ones and right wins over left.
pub fn read_intent(input: &InputSnapshot) -> MovementIntent {
    let mut direction = Vec2::ZERO;
    let mut facing = None;

    if input.held(LogicalKey::Up) {
        direction.y -= 1.0;
        facing = Some(Direction::Up);
    }
    if input.held(LogicalKey::Down) {
        direction.y += 1.0;
        facing = Some(Direction::Down);
    }
    if input.held(LogicalKey::Left) {
        direction.x -= 1.0;
        facing = Some(Direction::Left);
    }
    if input.held(LogicalKey::Right) {
        direction.x += 1.0;
        facing = Some(Direction::Right);
    }

    MovementIntent { direction, facing }
}

/// Unit direction scaled by `speed`; a zero vector stays zero.
pub fn displacement(direction: Vec2, speed: f32) -> Vec2 {
    direction.normalize_or_zero() * speed
}

/// Index of the first collidable obstacle the rectangle would overlap.
pub fn first_collision(candidate: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| obstacle.is_collidable() && candidate.overlaps(obstacle.rect()))
}

/// Applies one tick of input to the player and advances its animation clock.
pub fn resolve_movement(
    player: &mut Player,
    input: &InputSnapshot,
    elapsed_ms: f32,
    obstacles: &[Obstacle],
    bounds: Option<ArenaBounds>,
    timing: &AnimationTiming,
) -> MoveOutcome {
    let intent = read_intent(input);
    if let Some(facing) = intent.facing {
        player.facing = facing;
    }

    let step = displacement(intent.direction, player.speed);
    player.moving = intent.direction != Vec2::ZERO;

    let outcome = if player.moving {
        let mut next = player.rect.position() + step;
        if let Some(bounds) = bounds {
            next = next.clamp(
                Vec2::ZERO,
                Vec2::new(
                    (bounds.width - player.rect.width).max(0.0),
                    (bounds.height - player.rect.height).max(0.0),
                ),
            );
        }

        let candidate = player.rect.at(next);
        match first_collision(&candidate, obstacles) {
            Some(obstacle) => MoveOutcome::Blocked { obstacle },
            None => {
                player.rect = candidate;
                MoveOutcome::Moved
            }
        }
    } else {
        MoveOutcome::Idle
    };

    player.animation.advance(elapsed_ms, player.moving, timing);
    outcome
}
