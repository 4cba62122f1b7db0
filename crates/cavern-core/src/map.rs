use serde::{Deserialize, Serialize};

use crate::config::ScreenConfig;
use crate::rectangle::Rectangle;
use crate::units::{self, Tile};

/// Collision class of a map cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Air,
    Wall,
}

/// A grid cell touched by a query rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionTile {
    pub tile_type: TileType,
    pub row: Tile,
    pub col: Tile,
}

impl CollisionTile {
    pub fn bounds(&self) -> Rectangle {
        Rectangle::of_tile(self.row, self.col)
    }
}

/// The map contract the physics core depends on.
pub trait MapQuery {
    /// Every grid cell overlapping `rect`, tagged with its type.
    fn colliding_tiles(&self, rect: &Rectangle) -> Vec<CollisionTile>;
}

/// Largest grid side accepted, in tiles.
pub const MAX_DIMENSION: Tile = Tile(4096);

/// Fixed-size tile grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    rows: Tile,
    cols: Tile,
    /// Tile data stored row-major (row * cols + col).
    tiles: Vec<TileType>,
}

impl TileMap {
    /// An all-air grid. Each side is clamped to `0..=MAX_DIMENSION`.
    pub fn new(rows: Tile, cols: Tile) -> Self {
        let rows = Tile(rows.0.clamp(0, MAX_DIMENSION.0));
        let cols = Tile(cols.0.clamp(0, MAX_DIMENSION.0));
        let len = rows.0 as usize * cols.0 as usize;
        Self {
            rows,
            cols,
            tiles: vec![TileType::Air; len],
        }
    }

    /// The first cave test room: a floor across the screen with a short
    /// staircase on the left.
    pub fn create_test_map(screen: &ScreenConfig) -> Self {
        let mut map = Self::new(screen.height, screen.width);
        map.fill_row(Tile(11), TileType::Wall);
        for (row, col) in [(10, 5), (9, 4), (8, 3), (7, 2), (10, 3)] {
            map.set_tile(Tile(row), Tile(col), TileType::Wall);
        }
        map
    }

    pub fn rows(&self) -> Tile {
        self.rows
    }

    pub fn cols(&self) -> Tile {
        self.cols
    }

    /// Cells outside the grid read as air.
    pub fn tile(&self, row: Tile, col: Tile) -> TileType {
        self.index(row, col)
            .map_or(TileType::Air, |i| self.tiles[i])
    }

    /// Returns false when the cell lies outside the grid.
    pub fn set_tile(&mut self, row: Tile, col: Tile, tile_type: TileType) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.tiles[i] = tile_type;
                true
            },
            None => false,
        }
    }

    pub fn fill_row(&mut self, row: Tile, tile_type: TileType) {
        for col in 0..self.cols.0 {
            self.set_tile(row, Tile(col), tile_type);
        }
    }

    pub fn fill_col(&mut self, col: Tile, tile_type: TileType) {
        for row in 0..self.rows.0 {
            self.set_tile(Tile(row), col, tile_type);
        }
    }

    fn index(&self, row: Tile, col: Tile) -> Option<usize> {
        if row.0 < 0 || col.0 < 0 || row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row.0 as usize * self.cols.0 as usize + col.0 as usize)
    }
}

impl MapQuery for TileMap {
    /// Rows and columns are the floored cells of each edge, inclusive, so a
    /// rectangle whose bottom sits exactly on a tile boundary still reports
    /// the tile below it. Results are row-major.
    fn colliding_tiles(&self, rect: &Rectangle) -> Vec<CollisionTile> {
        let first_row = units::game_to_tile(rect.top()).max(Tile(0));
        let last_row = units::game_to_tile(rect.bottom()).min(self.rows - Tile(1));
        let first_col = units::game_to_tile(rect.left()).max(Tile(0));
        let last_col = units::game_to_tile(rect.right()).min(self.cols - Tile(1));

        let mut tiles = Vec::new();
        for row in first_row.0..=last_row.0 {
            for col in first_col.0..=last_col.0 {
                let (row, col) = (Tile(row), Tile(col));
                tiles.push(CollisionTile {
                    tile_type: self.tile(row, col),
                    row,
                    col,
                });
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Game;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rectangle {
        Rectangle::new(Game(x), Game(y), Game(w), Game(h))
    }

    #[test]
    fn test_map_has_floor_and_stairs() {
        let map = TileMap::create_test_map(&ScreenConfig::default());
        assert_eq!(map.rows(), Tile(15));
        assert_eq!(map.cols(), Tile(20));
        assert!((0..20).all(|c| map.tile(Tile(11), Tile(c)) == TileType::Wall));
        assert_eq!(map.tile(Tile(7), Tile(2)), TileType::Wall);
        assert_eq!(map.tile(Tile(10), Tile(10)), TileType::Air);
    }

    #[test]
    fn out_of_grid_reads_as_air() {
        let mut map = TileMap::new(Tile(2), Tile(2));
        assert_eq!(map.tile(Tile(-1), Tile(0)), TileType::Air);
        assert_eq!(map.tile(Tile(0), Tile(2)), TileType::Air);
        assert!(!map.set_tile(Tile(5), Tile(0), TileType::Wall));
    }

    #[test]
    fn oversized_grid_is_clamped() {
        let map = TileMap::new(Tile(70_000), Tile(-3));
        assert_eq!(map.rows(), MAX_DIMENSION);
        assert_eq!(map.cols(), Tile(0));
        assert!(map.colliding_tiles(&rect(0.0, 0.0, 64.0, 64.0)).is_empty());

        let screen = ScreenConfig {
            width: Tile(70_000),
            height: Tile(70_000),
        };
        let map = TileMap::create_test_map(&screen);
        assert_eq!(map.cols(), MAX_DIMENSION);
        assert_eq!(map.tile(Tile(11), Tile(4095)), TileType::Wall);
    }

    #[test]
    fn query_reports_every_overlapped_cell_row_major() {
        let mut map = TileMap::new(Tile(4), Tile(4));
        map.set_tile(Tile(1), Tile(2), TileType::Wall);
        let tiles = map.colliding_tiles(&rect(40.0, 20.0, 40.0, 20.0));
        let cells: Vec<(i32, i32)> = tiles.iter().map(|t| (t.row.0, t.col.0)).collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);
        assert_eq!(tiles[3].tile_type, TileType::Wall);
    }

    #[test]
    fn bottom_edge_on_boundary_includes_next_row() {
        let map = TileMap::new(Tile(4), Tile(4));
        let tiles = map.colliding_tiles(&rect(0.0, 17.0, 10.0, 15.0));
        assert!(tiles.iter().any(|t| t.row == Tile(1)));
    }

    #[test]
    fn query_is_clipped_to_grid() {
        let map = TileMap::new(Tile(2), Tile(2));
        assert!(map.colliding_tiles(&rect(-100.0, -100.0, 10.0, 10.0)).is_empty());
        assert_eq!(map.colliding_tiles(&rect(-10.0, -10.0, 100.0, 100.0)).len(), 4);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_reported_tile_touches_the_query(
                x in -64.0f64..640.0,
                y in -64.0f64..480.0,
                w in 0.0f64..96.0,
                h in 0.0f64..96.0,
            ) {
                let map = TileMap::new(Tile(15), Tile(20));
                let query = rect(x, y, w, h);
                for tile in map.colliding_tiles(&query) {
                    let bounds = tile.bounds();
                    prop_assert!(bounds.left() <= query.right());
                    prop_assert!(bounds.right() >= query.left());
                    prop_assert!(bounds.top() <= query.bottom());
                    prop_assert!(bounds.bottom() >= query.top());
                }
            }

            #[test]
            fn walls_inside_the_query_are_never_missed(
                row in 0i32..15,
                col in 0i32..20,
                dx in 1.0f64..31.0,
                dy in 1.0f64..31.0,
            ) {
                let mut map = TileMap::new(Tile(15), Tile(20));
                map.set_tile(Tile(row), Tile(col), TileType::Wall);
                let origin = Rectangle::of_tile(Tile(row), Tile(col));
                let query = rect(origin.left().0 + dx, origin.top().0 + dy, 0.0, 0.0);
                let walls = map
                    .colliding_tiles(&query)
                    .into_iter()
                    .filter(|t| t.tile_type == TileType::Wall)
                    .count();
                prop_assert_eq!(walls, 1);
            }
        }
    }
}
