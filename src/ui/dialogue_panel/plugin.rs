// src/ui/dialogue_panel/plugin.rs
//
// UiPlugin coordinates dialogue panel systems and resources.

use bevy::prelude::*;

use crate::core::frame_loop::drive_frame_loop;

use super::components::DialoguePanelSettings;
use super::systems::{spawn_dialogue_panel, update_dialogue_panel};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.insert_resource(DialoguePanelSettings::default())
            .add_systems(Startup, spawn_dialogue_panel)
            .add_systems(Update, update_dialogue_panel.after(drive_frame_loop));
    }
}
