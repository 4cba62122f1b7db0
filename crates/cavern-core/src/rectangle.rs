use serde::{Deserialize, Serialize};

use crate::units::{self, Game, Tile};
use crate::vector::Vector;

/// Axis-aligned box in world units, anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    x: Game,
    y: Game,
    width: Game,
    height: Game,
}

impl Rectangle {
    pub const fn new(x: Game, y: Game, width: Game, height: Game) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of the grid cell at (`row`, `col`).
    pub fn of_tile(row: Tile, col: Tile) -> Self {
        Self::new(
            units::tile_to_game(col),
            units::tile_to_game(row),
            units::TILE_SIZE,
            units::TILE_SIZE,
        )
    }

    pub fn left(&self) -> Game {
        self.x
    }

    pub fn right(&self) -> Game {
        self.x + self.width
    }

    pub fn top(&self) -> Game {
        self.y
    }

    pub fn bottom(&self) -> Game {
        self.y + self.height
    }

    pub fn width(&self) -> Game {
        self.width
    }

    pub fn height(&self) -> Game {
        self.height
    }

    pub fn center(&self) -> Vector<Game> {
        Vector::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn collides_with(&self, other: &Rectangle) -> bool {
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}
