//! Render module: draw list construction and its Bevy presentation.
pub mod assets;
pub mod draw_list;
pub mod plugin;
pub mod systems;

pub use plugin::ArenaRenderPlugin;
