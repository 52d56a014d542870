// src/ui/dialogue_panel/components.rs
//
// Components and resources for the dialogue panel and interaction hint.

use bevy::prelude::*;

/// Root node of a screen-space surface, shown or hidden per frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRoot {
    Dialogue,
    Hint,
}

/// Text node whose content is rewritten from the draw list.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelText {
    Speaker,
    Line,
    Hint,
}

/// Resource containing layout settings for the dialogue surfaces.
#[derive(Resource, Debug)]
pub struct DialoguePanelSettings {
    /// Panel width (pixels).
    pub panel_width: f32,

    /// Padding inside panel (pixels).
    pub padding: f32,

    /// Border width (pixels).
    pub border_width: f32,

    /// Offset from bottom edge of screen (pixels).
    pub bottom_offset: f32,

    /// Font size for NPC name (points).
    pub name_font_size: f32,

    /// Font size for dialogue text (points).
    pub text_font_size: f32,

    /// Font size for the "press E" hint (points).
    pub hint_font_size: f32,
}

impl Default for DialoguePanelSettings {
    fn default() -> Self {
        Self {
            panel_width: 520.0,
            padding: 12.0,
            border_width: 2.0,
            bottom_offset: 20.0,
            name_font_size: 18.0,
            text_font_size: 16.0,
            hint_font_size: 14.0,
        }
    }
}
