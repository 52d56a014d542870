//! Arena configuration loaded from `config/arena.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::player::components::Direction;

const CONFIG_PATH: &str = "config/arena.toml";

#[derive(Debug, Clone, Deserialize)]
struct RawArenaConfig {
    #[serde(default)]
    arena: RawArenaSection,
    #[serde(default)]
    player: RawPlayerSection,
    #[serde(default)]
    animation: RawAnimationSection,
    #[serde(default)]
    interaction: RawInteractionSection,
    #[serde(default = "default_obstacles")]
    obstacles: Vec<RawObstacle>,
    #[serde(default = "default_doors")]
    doors: Vec<RawDoor>,
    #[serde(default = "default_npcs")]
    npcs: Vec<RawNpc>,
}

impl Default for RawArenaConfig {
    fn default() -> Self {
        Self {
            arena: RawArenaSection::default(),
            player: RawPlayerSection::default(),
            animation: RawAnimationSection::default(),
            interaction: RawInteractionSection::default(),
            obstacles: default_obstacles(),
            doors: default_doors(),
            npcs: default_npcs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawArenaSection {
    width: f32,
    height: f32,
    boundary_walls: bool,
    wall_thickness: f32,
    wall_color: [u8; 3],
    background: [u8; 3],
    time_scale: f32,
}

impl Default for RawArenaSection {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            boundary_walls: true,
            wall_thickness: 16.0,
            wall_color: [70, 70, 80],
            background: [34, 40, 49],
            time_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlayerSection {
    x: f32,
    y: f32,
    speed: f32,
    color: [u8; 3],
    sheet: Option<String>,
}

impl Default for RawPlayerSection {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            speed: 3.0,
            color: [30, 144, 255],
            sheet: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawAnimationSection {
    frame_duration_ms: f32,
    frame_count: usize,
    cell_size: f32,
}

impl Default for RawAnimationSection {
    fn default() -> Self {
        Self {
            frame_duration_ms: 100.0,
            frame_count: 4,
            cell_size: 64.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractionSection {
    proximity_radius: f32,
}

impl Default for RawInteractionSection {
    fn default() -> Self {
        Self {
            proximity_radius: 70.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawObstacle {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    color: Option<[u8; 3]>,
    #[serde(default = "default_true")]
    collidable: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDoor {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    open: bool,
    #[serde(default = "default_door_closed_color")]
    closed_color: [u8; 3],
    #[serde(default = "default_door_open_color")]
    open_color: [u8; 3],
}

#[derive(Debug, Clone, Deserialize)]
struct RawNpc {
    name: String,
    x: f32,
    y: f32,
    #[serde(default = "default_npc_color")]
    color: [u8; 3],
    #[serde(default)]
    facing: Direction,
    #[serde(default)]
    sheet: Option<String>,
    #[serde(default = "default_sheet_rows")]
    sheet_rows: usize,
    #[serde(default)]
    lines: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_door_closed_color() -> [u8; 3] {
    [139, 69, 19]
}

fn default_door_open_color() -> [u8; 3] {
    [222, 184, 135]
}

fn default_npc_color() -> [u8; 3] {
    [200, 200, 200]
}

fn default_sheet_rows() -> usize {
    1
}

fn default_obstacles() -> Vec<RawObstacle> {
    vec![
        // Interior wall split by the door below.
        RawObstacle {
            x: 560.0,
            y: 16.0,
            width: 16.0,
            height: 224.0,
            color: None,
            collidable: true,
        },
        RawObstacle {
            x: 560.0,
            y: 320.0,
            width: 16.0,
            height: 264.0,
            color: None,
            collidable: true,
        },
        RawObstacle {
            x: 640.0,
            y: 420.0,
            width: 96.0,
            height: 48.0,
            color: Some([112, 128, 144]),
            collidable: true,
        },
    ]
}

fn default_doors() -> Vec<RawDoor> {
    vec![RawDoor {
        x: 560.0,
        y: 240.0,
        width: 16.0,
        height: 80.0,
        open: false,
        closed_color: default_door_closed_color(),
        open_color: default_door_open_color(),
    }]
}

fn default_npcs() -> Vec<RawNpc> {
    let npc = |name: &str, x: f32, y: f32, color: [u8; 3], lines: &[&str]| RawNpc {
        name: name.to_string(),
        x,
        y,
        color,
        facing: Direction::Down,
        sheet: None,
        sheet_rows: 1,
        lines: lines.iter().map(|line| line.to_string()).collect(),
    };

    vec![
        npc(
            "Professor Quirk",
            300.0,
            100.0,
            [220, 20, 60],
            &[
                "I swear these rocks are whispering secrets.",
                "Listen closely. That one just said 'granite'.",
            ],
        ),
        npc(
            "Ms. Noodle",
            150.0,
            250.0,
            [128, 0, 128],
            &[
                "Spaghetti is the key to life, trust me!",
                "Never trust a straight noodle.",
                "Al dente is a state of mind.",
            ],
        ),
        npc(
            "Captain Zoom",
            450.0,
            300.0,
            [255, 165, 0],
            &[
                "Speed is everything, but where's my spaceship?",
                "Have you seen a door around here? I parked behind one.",
            ],
        ),
    ]
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::srgb_u8(r, g, b)
}

/// Placement of a rectangle in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleSettings {
    pub placement: Placement,
    pub color: Color,
    pub collidable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorSettings {
    pub placement: Placement,
    pub open: bool,
    pub closed_color: Color,
    pub open_color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NpcSettings {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub facing: Direction,
    pub sheet: Option<String>,
    pub sheet_rows: usize,
    pub lines: Vec<String>,
}

/// Validated arena layout and tuning. Invariants that cannot be repaired
/// here (empty dialogue, degenerate rectangles) are reported when the
/// arena is built.
#[derive(Resource, Debug, Clone)]
pub struct ArenaSettings {
    pub width: f32,
    pub height: f32,
    pub boundary_walls: bool,
    pub wall_thickness: f32,
    pub wall_color: Color,
    pub background: Color,
    /// Multiplier applied to real frame time before it reaches the arena.
    pub time_scale: f32,
    pub player_start: Vec2,
    pub player_speed: f32,
    pub player_color: Color,
    pub player_sheet: Option<String>,
    pub frame_duration_ms: f32,
    pub frame_count: usize,
    pub cell_size: f32,
    pub proximity_radius: f32,
    pub obstacles: Vec<ObstacleSettings>,
    pub doors: Vec<DoorSettings>,
    pub npcs: Vec<NpcSettings>,
}

impl ArenaSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_or_default(&data),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawArenaConfig::default().into()
            }
        }
    }

    fn from_toml_or_default(data: &str) -> Self {
        match toml::from_str::<RawArenaConfig>(data) {
            Ok(raw) => raw.into(),
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawArenaConfig::default().into()
            }
        }
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        RawArenaConfig::default().into()
    }
}

impl From<RawArenaConfig> for ArenaSettings {
    fn from(value: RawArenaConfig) -> Self {
        let arena = value.arena;
        let player = value.player;
        let animation = value.animation;
        let wall_color = rgb(arena.wall_color);

        Self {
            width: arena.width.max(1.0),
            height: arena.height.max(1.0),
            boundary_walls: arena.boundary_walls,
            wall_thickness: arena.wall_thickness.max(1.0),
            wall_color,
            background: rgb(arena.background),
            time_scale: arena.time_scale,
            player_start: Vec2::new(player.x, player.y),
            player_speed: player.speed.max(0.0),
            player_color: rgb(player.color),
            player_sheet: player.sheet.filter(|path| !path.trim().is_empty()),
            frame_duration_ms: animation.frame_duration_ms.max(1.0),
            frame_count: animation.frame_count,
            cell_size: animation.cell_size,
            proximity_radius: value.interaction.proximity_radius,
            obstacles: value
                .obstacles
                .into_iter()
                .map(|raw| ObstacleSettings {
                    placement: Placement {
                        x: raw.x,
                        y: raw.y,
                        width: raw.width,
                        height: raw.height,
                    },
                    color: raw.color.map(rgb).unwrap_or(wall_color),
                    collidable: raw.collidable,
                })
                .collect(),
            doors: value
                .doors
                .into_iter()
                .map(|raw| DoorSettings {
                    placement: Placement {
                        x: raw.x,
                        y: raw.y,
                        width: raw.width,
                        height: raw.height,
                    },
                    open: raw.open,
                    closed_color: rgb(raw.closed_color),
                    open_color: rgb(raw.open_color),
                })
                .collect(),
            npcs: value
                .npcs
                .into_iter()
                .map(|raw| NpcSettings {
                    name: raw.name.trim().to_string(),
                    x: raw.x,
                    y: raw.y,
                    color: rgb(raw.color),
                    facing: raw.facing,
                    sheet: raw.sheet.filter(|path| !path.trim().is_empty()),
                    sheet_rows: if raw.sheet_rows >= 4 { 4 } else { 1 },
                    lines: raw.lines,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_canonical_constants() {
        let settings = ArenaSettings::default();
        assert_eq!(settings.proximity_radius, 70.0);
        assert_eq!(settings.frame_duration_ms, 100.0);
        assert_eq!(settings.frame_count, 4);
        assert_eq!(settings.cell_size, 64.0);
        assert_eq!(settings.player_speed, 3.0);
        assert_eq!(settings.player_start, Vec2::new(50.0, 50.0));
        assert_eq!(settings.npcs.len(), 3);
        assert_eq!(settings.npcs[0].name, "Professor Quirk");
        assert_eq!(settings.doors.len(), 1);
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let settings = ArenaSettings::from_toml_or_default(
            r#"
            [interaction]
            proximity_radius = 50.0

            [[npcs]]
            name = "  Solo  "
            x = 10.0
            y = 20.0
            facing = "left"
            sheet_rows = 4
            lines = ["Hi"]
            "#,
        );

        assert_eq!(settings.proximity_radius, 50.0);
        assert_eq!(settings.frame_count, 4);
        assert_eq!(settings.npcs.len(), 1);
        assert_eq!(settings.npcs[0].name, "Solo");
        assert_eq!(settings.npcs[0].facing, Direction::Left);
        assert_eq!(settings.npcs[0].sheet_rows, 4);
        assert_eq!(settings.obstacles.len(), 3, "omitted tables keep the default scene");
    }

    #[test]
    fn time_scale_is_read_from_the_arena_section() {
        assert_eq!(ArenaSettings::default().time_scale, 1.0);

        let settings = ArenaSettings::from_toml_or_default(
            r#"
            [arena]
            time_scale = 0.5
            "#,
        );
        assert_eq!(settings.time_scale, 0.5);
        assert_eq!(settings.width, 800.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let settings = ArenaSettings::from_toml_or_default("[arena\nwidth = ");
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.npcs.len(), 3);
    }

    #[test]
    fn obstacle_colour_defaults_to_wall_colour() {
        let settings = ArenaSettings::from_toml_or_default(
            r#"
            [arena]
            wall_color = [1, 2, 3]

            [[obstacles]]
            x = 0.0
            y = 0.0
            width = 5.0
            height = 5.0
            collidable = false
            "#,
        );
        assert_eq!(settings.obstacles.len(), 1);
        assert_eq!(settings.obstacles[0].color, Color::srgb_u8(1, 2, 3));
        assert!(!settings.obstacles[0].collidable);
    }
}
