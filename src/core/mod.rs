//! Core module: the frame loop driving the arena and the plugin that schedules it.
pub mod errors;
pub mod frame_loop;
pub mod plugin;

pub use plugin::CorePlugin;
