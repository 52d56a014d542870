// src/ui/dialogue_panel/systems.rs
//
// Systems spawning the dialogue panel and hint, and syncing them with the draw list.

use bevy::prelude::*;

use crate::core::frame_loop::LatestFrame;

use super::components::{DialoguePanelSettings, PanelRoot, PanelText};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const TEXT_COLOR: Color = Color::WHITE;
const NAME_COLOR: Color = Color::srgb(1.0, 0.9, 0.4); // Yellow/gold
const HINT_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);

/// Spawn both surfaces hidden; `update_dialogue_panel` reveals them.
pub fn spawn_dialogue_panel(mut commands: Commands, settings: Res<DialoguePanelSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                left: Val::Px(settings.bottom_offset),
                width: Val::Px(settings.panel_width),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(settings.border_width)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            Visibility::Hidden,
            PanelRoot::Dialogue,
            Name::new("Dialogue Panel"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.name_font_size,
                    ..default()
                },
                TextColor(NAME_COLOR),
                PanelText::Speaker,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.text_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                Node {
                    max_width: Val::Px(settings.panel_width - settings.padding * 2.0),
                    ..default()
                },
                PanelText::Line,
            ));
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.bottom_offset),
                left: Val::Px(settings.bottom_offset),
                padding: UiRect::all(Val::Px(settings.padding * 0.5)),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            Visibility::Hidden,
            PanelRoot::Hint,
            Name::new("Interaction Hint"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.hint_font_size,
                    ..default()
                },
                TextColor(HINT_COLOR),
                PanelText::Hint,
            ));
        });
}

/// Show the panel while talking and the hint while an NPC is nearby.
pub fn update_dialogue_panel(
    latest: Res<LatestFrame>,
    mut roots: Query<(&PanelRoot, &mut Visibility)>,
    mut texts: Query<(&PanelText, &mut Text)>,
) {
    let panel = latest.draw_list.dialogue_panel();
    let hint = latest.draw_list.interaction_hint();

    for (root, mut visibility) in roots.iter_mut() {
        let shown = match root {
            PanelRoot::Dialogue => panel.is_some(),
            PanelRoot::Hint => hint.is_some(),
        };
        let wanted = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }

    for (slot, mut text) in texts.iter_mut() {
        let content = match (slot, panel, hint) {
            (PanelText::Speaker, Some((speaker, _)), _) => speaker.to_string(),
            (PanelText::Line, Some((_, line)), _) => line.to_string(),
            (PanelText::Hint, _, Some(name)) => format!("Press E to talk to {}", name),
            _ => continue,
        };
        if text.0 != content {
            text.0 = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        arena::{config::ArenaSettings, scene::Arena},
        core::frame_loop::FrameLoop,
        input::buffer::LogicalKey,
    };

    fn app_near_quirk() -> (App, FrameLoop) {
        let mut settings = ArenaSettings::default();
        settings.player_start = Vec2::new(260.0, 100.0);
        let frame_loop = FrameLoop::new(Arena::from_settings(&settings).expect("arena"));

        let mut app = App::new();
        app.insert_resource(DialoguePanelSettings::default())
            .init_resource::<LatestFrame>()
            .add_systems(Startup, spawn_dialogue_panel)
            .add_systems(Update, update_dialogue_panel);
        (app, frame_loop)
    }

    fn visibility(app: &mut App, wanted: PanelRoot) -> Visibility {
        let mut query = app.world_mut().query::<(&PanelRoot, &Visibility)>();
        query
            .iter(app.world())
            .find(|(root, _)| **root == wanted)
            .map(|(_, visibility)| *visibility)
            .expect("panel root spawned")
    }

    fn text(app: &mut App, wanted: PanelText) -> String {
        let mut query = app.world_mut().query::<(&PanelText, &Text)>();
        query
            .iter(app.world())
            .find(|(slot, _)| **slot == wanted)
            .map(|(_, text)| text.0.clone())
            .expect("panel text spawned")
    }

    #[test]
    fn surfaces_follow_the_interaction_state() {
        let (mut app, mut frame_loop) = app_near_quirk();
        let step = Duration::from_millis(16);

        app.update();
        assert_eq!(visibility(&mut app, PanelRoot::Dialogue), Visibility::Hidden);
        assert_eq!(visibility(&mut app, PanelRoot::Hint), Visibility::Hidden);

        let output = frame_loop.run_ticks(1, step, &[]);
        app.world_mut().resource_mut::<LatestFrame>().draw_list = output.draw_list;
        app.update();
        assert_eq!(visibility(&mut app, PanelRoot::Hint), Visibility::Visible);
        assert_eq!(
            text(&mut app, PanelText::Hint),
            "Press E to talk to Professor Quirk"
        );

        let output = frame_loop.run_ticks(1, step, &[LogicalKey::Interact]);
        app.world_mut().resource_mut::<LatestFrame>().draw_list = output.draw_list;
        app.update();
        assert_eq!(visibility(&mut app, PanelRoot::Dialogue), Visibility::Visible);
        assert_eq!(visibility(&mut app, PanelRoot::Hint), Visibility::Hidden);
        assert_eq!(text(&mut app, PanelText::Speaker), "Professor Quirk");
        assert_eq!(
            text(&mut app, PanelText::Line),
            "I swear these rocks are whispering secrets."
        );
    }
}
