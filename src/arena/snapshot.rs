//! Serializable arena snapshot logged when debug mode is switched on.
use serde::Serialize;

use crate::{
    arena::{geometry::Rect, scene::Arena},
    dialogue::interaction::InteractionPhase,
    player::components::Direction,
};

#[derive(Debug, Clone, Serialize)]
pub struct ArenaSnapshot {
    pub tick: u64,
    pub paused: bool,
    pub player: PlayerSnapshot,
    pub obstacles: Vec<ObstacleSnapshot>,
    pub npcs: Vec<NpcSnapshot>,
    pub interaction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub rect: Rect,
    pub facing: Direction,
    pub moving: bool,
    pub frame: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleSnapshot {
    pub rect: Rect,
    pub collidable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_open: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NpcSnapshot {
    pub name: String,
    pub rect: Rect,
    pub cursor: usize,
    pub talking: bool,
    pub frame: usize,
}

impl ArenaSnapshot {
    pub fn capture(arena: &Arena, tick: u64, paused: bool) -> Self {
        let player = arena.player();
        let interaction = match arena.interaction().phase() {
            InteractionPhase::Idle => "idle".to_string(),
            InteractionPhase::Proximate(id) => format!("proximate:{}", id),
            InteractionPhase::Talking(id) => format!("talking:{}", id),
        };

        Self {
            tick,
            paused,
            player: PlayerSnapshot {
                rect: player.rect,
                facing: player.facing,
                moving: player.moving,
                frame: player.frame_index(),
            },
            obstacles: arena
                .obstacles()
                .iter()
                .map(|obstacle| ObstacleSnapshot {
                    rect: *obstacle.rect(),
                    collidable: obstacle.is_collidable(),
                    door_open: obstacle.door_open(),
                })
                .collect(),
            npcs: arena
                .npcs()
                .iter()
                .map(|npc| NpcSnapshot {
                    name: npc.name().to_string(),
                    rect: *npc.rect(),
                    cursor: npc.cursor(),
                    talking: npc.is_talking(),
                    frame: npc.frame_index(),
                })
                .collect(),
            interaction,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
