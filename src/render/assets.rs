//! Sprite sheet handles and the grid layout they are sliced with.
use bevy::prelude::*;

use crate::player::components::Direction;

/// A sheet of `columns` frames per row and either one row or one row per direction.
#[derive(Debug, Clone)]
pub struct SheetHandle {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
    pub columns: usize,
    pub rows: usize,
}

impl SheetHandle {
    pub fn load(
        path: &str,
        cell_size: f32,
        columns: usize,
        rows: usize,
        asset_server: &AssetServer,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> Self {
        let cell = UVec2::splat(cell_size.max(1.0) as u32);
        let layout = TextureAtlasLayout::from_grid(cell, columns as u32, rows as u32, None, None);
        Self {
            image: asset_server.load(path.to_string()),
            layout: layouts.add(layout),
            columns,
            rows,
        }
    }

    /// Atlas cell for a frame. Single-row sheets ignore the facing.
    pub fn index(&self, facing: Direction, frame: usize) -> usize {
        let row = if self.rows >= 4 { facing.row() } else { 0 };
        row * self.columns + frame.min(self.columns.saturating_sub(1))
    }

    /// False until the image has finished loading.
    pub fn is_ready(&self, images: &Assets<Image>) -> bool {
        images.get(&self.image).is_some()
    }
}

/// Sheets for the actor and each NPC by index; `None` means colour only.
#[derive(Resource, Debug, Default)]
pub struct SpriteSheets {
    pub actor: Option<SheetHandle>,
    pub npcs: Vec<Option<SheetHandle>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: usize) -> SheetHandle {
        SheetHandle {
            image: Handle::default(),
            layout: Handle::default(),
            columns: 4,
            rows,
        }
    }

    #[test]
    fn four_row_sheets_select_the_facing_row() {
        let sheet = sheet(4);
        assert_eq!(sheet.index(Direction::Up, 0), 0);
        assert_eq!(sheet.index(Direction::Left, 1), 5);
        assert_eq!(sheet.index(Direction::Right, 3), 15);
    }

    #[test]
    fn single_row_sheets_use_the_frame_only() {
        let sheet = sheet(1);
        assert_eq!(sheet.index(Direction::Right, 2), 2);
        assert_eq!(sheet.index(Direction::Up, 9), 3);
    }
}
