// src/ui/dialogue_panel/mod.rs
//
// Dialogue panel module showing the active conversation and the talk hint.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export main types
pub use plugin::UiPlugin;
