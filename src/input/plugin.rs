//! InputPlugin registers the keyboard bindings used by the frame loop.
use bevy::prelude::*;

use crate::input::bindings::KeyBindings;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .add_systems(Startup, log_key_bindings);
    }
}

fn log_key_bindings(bindings: Res<KeyBindings>) {
    if bindings.is_empty() {
        warn!("InputPlugin initialised without key bindings; the arena will not respond to input");
        return;
    }
    info!("InputPlugin initialised with {} key bindings", bindings.len());
}
