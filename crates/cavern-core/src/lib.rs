pub mod config;
pub mod input;
pub mod map;
pub mod rectangle;
pub mod render;
pub mod simulation;
pub mod units;
pub mod vector;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::time::Duration;

    use crate::config::GraphicsQuality;
    use crate::map::{TileMap, TileType};
    use crate::render::SpriteCanvas;
    use crate::units::{Pixel, Tile};
    use crate::vector::Vector;

    /// Whole-millisecond 60 Hz step.
    pub const FRAME: Duration = Duration::from_millis(16);

    /// Open grid with a single solid floor row.
    pub fn floor_map(rows: i32, cols: i32, floor_row: i32) -> TileMap {
        let mut map = TileMap::new(Tile(rows), Tile(cols));
        map.fill_row(Tile(floor_row), TileType::Wall);
        map
    }

    /// Grid walled on all four sides.
    pub fn boxed_room(rows: i32, cols: i32) -> TileMap {
        let mut map = TileMap::new(Tile(rows), Tile(cols));
        map.fill_row(Tile(0), TileType::Wall);
        map.fill_row(Tile(rows - 1), TileType::Wall);
        map.fill_col(Tile(0), TileType::Wall);
        map.fill_col(Tile(cols - 1), TileType::Wall);
        map
    }

    /// Set each listed (row, col) to a wall.
    pub fn with_walls(mut map: TileMap, walls: &[(i32, i32)]) -> TileMap {
        for &(row, col) in walls {
            map.set_tile(Tile(row), Tile(col), TileType::Wall);
        }
        map
    }

    /// Canvas that records every draw call.
    pub struct RecordingCanvas<S> {
        pub quality: GraphicsQuality,
        pub draws: Vec<(S, Vector<Pixel>)>,
    }

    impl<S> RecordingCanvas<S> {
        pub fn new(quality: GraphicsQuality) -> Self {
            Self {
                quality,
                draws: Vec::new(),
            }
        }
    }

    impl<S: Clone> SpriteCanvas for RecordingCanvas<S> {
        type Sprite = S;

        fn quality(&self) -> GraphicsQuality {
            self.quality
        }

        fn draw_sprite(&mut self, sprite: &S, position: Vector<Pixel>) {
            self.draws.push((sprite.clone(), position));
        }
    }
}
