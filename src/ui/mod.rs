// src/ui/mod.rs
//
// UI module providing screen-space UI elements.
//
// Current features:
// - Dialogue panel (speaker and line while talking)
// - Interaction hint (shown while an NPC is in range)

pub mod dialogue_panel;

// Re-export the main plugin
pub use dialogue_panel::UiPlugin;
