//! Nominal unit types for the three coordinate spaces (tile, world, pixel)
//! and the rates that move things through world space.
//!
//! Values never change space implicitly: mixing a [`Game`] with a [`Pixel`]
//! is a type error, and every crossing goes through one of the named
//! conversion functions at the bottom of this module.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::GraphicsQuality;

macro_rules! real_unit {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            pub const ZERO: Self = Self(0.0);

            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

macro_rules! grid_unit {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<i32> for $name {
            type Output = Self;
            fn mul(self, rhs: i32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<i32> for $name {
            type Output = Self;
            fn div(self, rhs: i32) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

real_unit!(
    /// Continuous world coordinate used by all physics.
    Game
);
real_unit!(
    /// World units per millisecond.
    Velocity
);
real_unit!(
    /// World units per millisecond squared.
    Acceleration
);
real_unit!(Degrees);
real_unit!(
    /// Degrees per millisecond.
    AngularVelocity
);

grid_unit!(
    /// Discrete map grid coordinate (row or column).
    Tile
);
grid_unit!(
    /// Render-target coordinate.
    Pixel
);

/// Frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fps(pub u32);

impl Fps {
    /// Whole-millisecond frame time (`1000 / fps`), the logical step length.
    pub fn frame_time(self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.0.max(1)))
    }
}

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl Mul<Duration> for Acceleration {
    type Output = Velocity;
    fn mul(self, rhs: Duration) -> Velocity {
        Velocity(self.0 * millis(rhs))
    }
}

impl Mul<Duration> for Velocity {
    type Output = Game;
    fn mul(self, rhs: Duration) -> Game {
        Game(self.0 * millis(rhs))
    }
}

impl Mul<Duration> for AngularVelocity {
    type Output = Degrees;
    fn mul(self, rhs: Duration) -> Degrees {
        Degrees(self.0 * millis(rhs))
    }
}

/// Side length of one map tile in world units.
pub const TILE_SIZE: Game = Game(32.0);
pub const HALF_TILE: Game = Game(16.0);

/// Fractional millisecond count of `elapsed`.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_nanos() as f64 / 1_000_000.0
}

pub fn tile_to_game(tile: Tile) -> Game {
    Game(f64::from(tile.0) * TILE_SIZE.0)
}

/// Grid cell containing `game` (floored, so negative coordinates map to
/// negative tiles).
pub fn game_to_tile(game: Game) -> Tile {
    Tile((game.0 / TILE_SIZE.0).floor() as i32)
}

pub fn game_to_pixel(game: Game, quality: GraphicsQuality) -> Pixel {
    Pixel((game.0 / quality.game_units_per_pixel()).round() as i32)
}

pub fn tile_to_pixel(tile: Tile, quality: GraphicsQuality) -> Pixel {
    game_to_pixel(tile_to_game(tile), quality)
}
