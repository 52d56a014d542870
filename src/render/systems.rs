//! Systems presenting the draw list: one sprite per entity plus gizmo outlines.
use bevy::{math::Isometry2d, prelude::*};

use crate::{
    arena::{config::ArenaSettings, geometry::Rect},
    core::frame_loop::{FrameLoop, LatestFrame},
    render::{
        assets::{SheetHandle, SpriteSheets},
        draw_list::DrawCommand,
    },
};

const OBSTACLE_Z: f32 = 0.0;
const NPC_Z: f32 = 1.0;
const ACTOR_Z: f32 = 2.0;
const COLLIDABLE_OUTLINE: Color = Color::srgb(1.0, 0.2, 0.2);
const PASSABLE_OUTLINE: Color = Color::srgb(0.2, 1.0, 0.4);

/// Which draw command a sprite entity mirrors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSlot {
    Obstacle(usize),
    Npc(usize),
    Actor,
}

/// Arena coordinates (top-left origin, y down) to world coordinates
/// (centre origin, y up) for the centre of `rect`.
pub fn world_center(rect: &Rect, arena_width: f32, arena_height: f32) -> Vec2 {
    let center = rect.center();
    Vec2::new(center.x - arena_width * 0.5, arena_height * 0.5 - center.y)
}

/// Spawns the camera, loads sprite sheets and creates one sprite per entity.
pub fn spawn_arena_view(
    mut commands: Commands,
    frame_loop: Res<FrameLoop>,
    settings: Res<ArenaSettings>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let arena = frame_loop.arena();
    let (width, height) = (arena.width(), arena.height());

    commands.insert_resource(ClearColor(arena.background()));
    commands.spawn(Camera2d);

    let frame_count = arena.timing().frame_count();
    let sheets = SpriteSheets {
        actor: settings.player_sheet.as_deref().map(|path| {
            SheetHandle::load(
                path,
                settings.cell_size,
                frame_count,
                4,
                &asset_server,
                &mut layouts,
            )
        }),
        npcs: settings
            .npcs
            .iter()
            .map(|npc| {
                npc.sheet.as_deref().map(|path| {
                    SheetHandle::load(
                        path,
                        settings.cell_size,
                        frame_count,
                        npc.sheet_rows,
                        &asset_server,
                        &mut layouts,
                    )
                })
            })
            .collect(),
    };
    commands.insert_resource(sheets);

    for (index, obstacle) in arena.obstacles().iter().enumerate() {
        let rect = obstacle.rect();
        commands.spawn((
            Sprite::from_color(obstacle.color(), rect.size()),
            Transform::from_translation(world_center(rect, width, height).extend(OBSTACLE_Z)),
            SpriteSlot::Obstacle(index),
            Name::new(format!("Obstacle {}", index)),
        ));
    }

    for (index, npc) in arena.npcs().iter().enumerate() {
        let rect = npc.rect();
        commands.spawn((
            Sprite::from_color(npc.color(), rect.size()),
            Transform::from_translation(world_center(rect, width, height).extend(NPC_Z)),
            SpriteSlot::Npc(index),
            Name::new(format!("{} ({})", npc.name(), npc.id())),
        ));
    }

    let player = arena.player();
    commands.spawn((
        Sprite::from_color(player.color, player.rect.size()),
        Transform::from_translation(world_center(&player.rect, width, height).extend(ACTOR_Z)),
        SpriteSlot::Actor,
        Name::new("Player"),
    ));

    info!(
        "Arena view spawned: {} obstacles, {} NPCs, {:.0}x{:.0}",
        arena.obstacles().len(),
        arena.npcs().len(),
        width,
        height
    );
}

fn command_for(commands: &[DrawCommand], slot: SpriteSlot) -> Option<&DrawCommand> {
    commands.iter().find(|command| match (command, slot) {
        (DrawCommand::Obstacle { index, .. }, SpriteSlot::Obstacle(wanted)) => *index == wanted,
        (DrawCommand::Npc { index, .. }, SpriteSlot::Npc(wanted)) => *index == wanted,
        (DrawCommand::Actor { .. }, SpriteSlot::Actor) => true,
        _ => false,
    })
}

/// Uses the sheet cell when the image is loaded, a solid rectangle otherwise.
fn apply_look(
    sprite: &mut Sprite,
    rect: &Rect,
    color: Color,
    cell: Option<(&SheetHandle, usize)>,
    images: &Assets<Image>,
) {
    match cell.filter(|(sheet, _)| sheet.is_ready(images)) {
        Some((sheet, index)) => {
            sprite.image = sheet.image.clone();
            sprite.texture_atlas = Some(TextureAtlas {
                layout: sheet.layout.clone(),
                index,
            });
            sprite.color = Color::WHITE;
        }
        None => {
            sprite.image = Handle::default();
            sprite.texture_atlas = None;
            sprite.color = color;
        }
    }
    sprite.custom_size = Some(rect.size());
}

/// Mirrors the latest draw list onto the sprite entities.
pub fn present_sprites(
    latest: Res<LatestFrame>,
    frame_loop: Res<FrameLoop>,
    sheets: Res<SpriteSheets>,
    images: Res<Assets<Image>>,
    mut sprites: Query<(&SpriteSlot, &mut Sprite, &mut Transform)>,
) {
    let arena = frame_loop.arena();
    let (width, height) = (arena.width(), arena.height());
    let commands = latest.draw_list.commands();

    for (slot, mut sprite, mut transform) in sprites.iter_mut() {
        let Some(command) = command_for(commands, *slot) else {
            continue;
        };

        let rect = match command {
            DrawCommand::Obstacle { rect, color, .. } => {
                apply_look(&mut sprite, rect, *color, None, &images);
                rect
            }
            DrawCommand::Npc {
                index,
                rect,
                frame,
                facing,
                color,
            } => {
                let cell = sheets
                    .npcs
                    .get(*index)
                    .and_then(Option::as_ref)
                    .map(|sheet| (sheet, sheet.index(*facing, *frame)));
                apply_look(&mut sprite, rect, *color, cell, &images);
                rect
            }
            DrawCommand::Actor {
                rect,
                frame,
                facing,
                color,
            } => {
                let cell = sheets
                    .actor
                    .as_ref()
                    .map(|sheet| (sheet, sheet.index(*facing, *frame)));
                apply_look(&mut sprite, rect, *color, cell, &images);
                rect
            }
            _ => continue,
        };

        let center = world_center(rect, width, height);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}

/// Outlines every obstacle while debug mode is on.
pub fn draw_debug_outlines(
    latest: Res<LatestFrame>,
    frame_loop: Res<FrameLoop>,
    mut gizmos: Gizmos,
) {
    let arena = frame_loop.arena();
    for command in latest.draw_list.commands() {
        if let DrawCommand::DebugOutline { rect, collidable } = command {
            let color = if *collidable {
                COLLIDABLE_OUTLINE
            } else {
                PASSABLE_OUTLINE
            };
            gizmos.rect_2d(
                Isometry2d::from_translation(world_center(rect, arena.width(), arena.height())),
                rect.size(),
                color,
            );
        }
    }
}
