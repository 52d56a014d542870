//! ArenaRenderPlugin presents the latest draw list with sprites and gizmos.
use bevy::prelude::*;

use crate::{
    core::frame_loop::drive_frame_loop,
    render::systems::{draw_debug_outlines, present_sprites, spawn_arena_view},
};

pub struct ArenaRenderPlugin;

impl Plugin for ArenaRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena_view).add_systems(
            Update,
            (present_sprites, draw_debug_outlines).after(drive_frame_loop),
        );
    }
}
