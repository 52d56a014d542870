//! The arena: actor, obstacles and NPCs advanced one tick at a time.
use crate::{
    animation::AnimationTiming,
    arena::{
        config::{ArenaSettings, Placement},
        events::ArenaEvent,
        geometry::Rect,
        obstacle::Obstacle,
    },
    core::{errors::ArenaError, frame_loop::TickContext},
    dialogue::interaction::InteractionState,
    input::buffer::LogicalKey,
    npc::components::{Npc, NpcId},
    player::{
        components::Player,
        movement::{first_collision, resolve_movement, ArenaBounds},
    },
};
use bevy::color::Color;

#[derive(Debug, Clone)]
pub struct Arena {
    width: f32,
    height: f32,
    background: Color,
    player: Player,
    obstacles: Vec<Obstacle>,
    npcs: Vec<Npc>,
    interaction: InteractionState,
    timing: AnimationTiming,
    clamp: Option<ArenaBounds>,
}

impl Arena {
    /// Assembles an arena from already-validated parts. `clamp` is only
    /// needed when the obstacle list has no boundary walls.
    pub fn new(
        player: Player,
        obstacles: Vec<Obstacle>,
        npcs: Vec<Npc>,
        interaction: InteractionState,
        timing: AnimationTiming,
        clamp: Option<ArenaBounds>,
    ) -> Self {
        let (width, height) = clamp
            .map(|bounds| (bounds.width, bounds.height))
            .unwrap_or((800.0, 600.0));
        Self {
            width,
            height,
            background: Color::BLACK,
            player,
            obstacles,
            npcs,
            interaction,
            timing,
            clamp,
        }
    }

    pub fn from_settings(settings: &ArenaSettings) -> Result<Self, ArenaError> {
        let timing = AnimationTiming::new(settings.frame_duration_ms, settings.frame_count)?;
        let interaction = InteractionState::new(settings.proximity_radius)?;
        let cell = settings.cell_size;

        let player = Player::new(
            Rect::new(settings.player_start.x, settings.player_start.y, cell, cell)?,
            settings.player_speed,
            settings.player_color,
        );

        let mut obstacles = Vec::new();
        if settings.boundary_walls {
            for rect in boundary_walls(settings.width, settings.height, settings.wall_thickness)? {
                obstacles.push(Obstacle::wall(rect, settings.wall_color));
            }
        }
        for obstacle in &settings.obstacles {
            let mut wall = Obstacle::wall(placement_rect(&obstacle.placement)?, obstacle.color);
            wall.set_collidable(obstacle.collidable)?;
            obstacles.push(wall);
        }
        for door in &settings.doors {
            obstacles.push(Obstacle::door(
                placement_rect(&door.placement)?,
                door.open,
                door.closed_color,
                door.open_color,
            ));
        }

        if let Some(obstacle) = first_collision(&player.rect, &obstacles) {
            return Err(ArenaError::BlockedStart { obstacle });
        }

        let npcs = settings
            .npcs
            .iter()
            .enumerate()
            .map(|(index, npc)| {
                Npc::new(
                    NpcId::new(index),
                    npc.name.clone(),
                    Rect::new(npc.x, npc.y, cell, cell)?,
                    npc.lines.clone(),
                    npc.color,
                )
                .map(|built| built.with_facing(npc.facing))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let clamp = (!settings.boundary_walls).then_some(ArenaBounds {
            width: settings.width,
            height: settings.height,
        });

        Ok(Self {
            width: settings.width,
            height: settings.height,
            background: settings.background,
            player,
            obstacles,
            npcs,
            interaction,
            timing,
            clamp,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    /// One logical tick. Movement and animation run first (skipped while
    /// paused) so that door and dialogue decisions see the new position.
    pub fn tick(&mut self, ctx: &TickContext) -> Vec<ArenaEvent> {
        let mut events = Vec::new();

        if !ctx.paused {
            resolve_movement(
                &mut self.player,
                &ctx.input,
                ctx.elapsed_ms,
                &self.obstacles,
                self.clamp,
                &self.timing,
            );
            for npc in &mut self.npcs {
                npc.animate(ctx.elapsed_ms, &self.timing);
            }
        }

        if ctx.input.just_pressed(LogicalKey::ToggleDoor) {
            self.toggle_nearby_doors(&mut events);
        }

        self.interaction.update(
            &self.player.rect,
            &mut self.npcs,
            ctx.input.just_pressed(LogicalKey::Interact),
            &mut events,
        );

        events
    }

    /// Doors within the proximity radius of the actor centre flip state.
    /// An open door overlapping the actor stays open.
    fn toggle_nearby_doors(&mut self, events: &mut Vec<ArenaEvent>) {
        let actor = self.player.rect;
        let reach = self.interaction.radius();

        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            let Some(open) = obstacle.door_open() else {
                continue;
            };
            if obstacle.rect().distance_to_point(actor.center()) >= reach {
                continue;
            }
            if open && obstacle.rect().overlaps(&actor) {
                events.push(ArenaEvent::DoorBlocked { obstacle: index });
                continue;
            }
            if let Some(open) = obstacle.toggle() {
                events.push(ArenaEvent::DoorToggled {
                    obstacle: index,
                    open,
                });
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }
}

fn placement_rect(placement: &Placement) -> Result<Rect, ArenaError> {
    Rect::new(placement.x, placement.y, placement.width, placement.height)
}

/// Four walls lining the inside of the arena edges.
fn boundary_walls(width: f32, height: f32, thickness: f32) -> Result<[Rect; 4], ArenaError> {
    Ok([
        Rect::new(0.0, 0.0, width, thickness)?,
        Rect::new(0.0, height - thickness, width, thickness)?,
        Rect::new(0.0, 0.0, thickness, height)?,
        Rect::new(width - thickness, 0.0, thickness, height)?,
    ])
}
