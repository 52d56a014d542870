use bevy::prelude::*;

mod animation;
mod arena;
mod core;
mod dialogue;
mod input;
mod npc;
mod player;
mod render;
mod ui;

use crate::{
    arena::{config::ArenaSettings, scene::Arena},
    core::{frame_loop::FrameLoop, CorePlugin},
    input::InputPlugin,
    render::ArenaRenderPlugin,
    ui::UiPlugin,
};

fn main() {
    let settings = ArenaSettings::load_or_default();

    let arena = match Arena::from_settings(&settings) {
        Ok(arena) => arena,
        Err(err) => {
            eprintln!("Failed to build arena: {}", err);
            std::process::exit(1);
        }
    };

    let core_plugin = CorePlugin::with_time_scale(settings.time_scale);

    let window = Window {
        title: "NPC Arena".to_string(),
        resolution: (settings.width as u32, settings.height as u32).into(),
        resizable: false,
        ..default()
    };

    App::new()
        .insert_resource(FrameLoop::new(arena))
        .insert_resource(settings)
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(window),
                ..default()
            }),
            core_plugin,
            InputPlugin,
            ArenaRenderPlugin,
            UiPlugin, // After CorePlugin so the panel reads this frame's draw list
        ))
        .run();
}
