//! Ordered draw list handed from the arena to the presentation layer.
use bevy::color::Color;

use crate::{
    arena::{geometry::Rect, scene::Arena},
    dialogue::interaction::InteractionPhase,
    player::components::Direction,
};

/// One entry of a frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        width: f32,
        height: f32,
        color: Color,
    },
    Obstacle {
        index: usize,
        rect: Rect,
        color: Color,
    },
    Npc {
        index: usize,
        rect: Rect,
        frame: usize,
        facing: Direction,
        color: Color,
    },
    Actor {
        rect: Rect,
        frame: usize,
        facing: Direction,
        color: Color,
    },
    DebugOutline {
        rect: Rect,
        collidable: bool,
    },
    DialoguePanel {
        speaker: String,
        line: String,
    },
    InteractionHint {
        name: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Background, obstacles, NPCs, actor, then the optional debug outlines,
    /// dialogue panel and interaction hint.
    pub fn build(arena: &Arena, debug: bool) -> Self {
        let mut commands = vec![DrawCommand::Background {
            width: arena.width(),
            height: arena.height(),
            color: arena.background(),
        }];

        for (index, obstacle) in arena.obstacles().iter().enumerate() {
            commands.push(DrawCommand::Obstacle {
                index,
                rect: *obstacle.rect(),
                color: obstacle.color(),
            });
        }

        for (index, npc) in arena.npcs().iter().enumerate() {
            commands.push(DrawCommand::Npc {
                index,
                rect: *npc.rect(),
                frame: npc.frame_index(),
                facing: npc.facing(),
                color: npc.color(),
            });
        }

        let player = arena.player();
        commands.push(DrawCommand::Actor {
            rect: player.rect,
            frame: player.frame_index(),
            facing: player.facing,
            color: player.color,
        });

        if debug {
            commands.extend(arena.obstacles().iter().map(|obstacle| DrawCommand::DebugOutline {
                rect: *obstacle.rect(),
                collidable: obstacle.is_collidable(),
            }));
        }

        let interaction = arena.interaction();
        match interaction.phase() {
            InteractionPhase::Talking(_) => {
                if let Some(surface) = interaction.surface() {
                    commands.push(DrawCommand::DialoguePanel {
                        speaker: surface.speaker.clone(),
                        line: surface.line.clone(),
                    });
                }
            }
            InteractionPhase::Proximate(id) => {
                if let Some(npc) = arena.npcs().get(id.index()) {
                    commands.push(DrawCommand::InteractionHint {
                        name: npc.name().to_string(),
                    });
                }
            }
            InteractionPhase::Idle => {}
        }

        Self { commands }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn dialogue_panel(&self) -> Option<(&str, &str)> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::DialoguePanel { speaker, line } => Some((speaker.as_str(), line.as_str())),
            _ => None,
        })
    }

    pub fn interaction_hint(&self) -> Option<&str> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::InteractionHint { name } => Some(name.as_str()),
            _ => None,
        })
    }
}
