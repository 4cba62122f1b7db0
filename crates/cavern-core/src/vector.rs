use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::config::GraphicsQuality;
use crate::units::{self, Game, Pixel, Tile};

/// Two-component value in a single unit space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector<U> {
    pub x: U,
    pub y: U,
}

impl<U> Vector<U> {
    pub const fn new(x: U, y: U) -> Self {
        Self { x, y }
    }
}

impl<U: Add<Output = U>> Add for Vector<U> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<U: Sub<Output = U>> Sub for Vector<U> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Vector<Tile> {
    pub fn to_game(self) -> Vector<Game> {
        Vector::new(units::tile_to_game(self.x), units::tile_to_game(self.y))
    }
}

impl Vector<Game> {
    pub fn to_pixel(self, quality: GraphicsQuality) -> Vector<Pixel> {
        Vector::new(
            units::game_to_pixel(self.x, quality),
            units::game_to_pixel(self.y, quality),
        )
    }
}
