use std::time::Duration;

use serde::{Deserialize, Serialize};

use cavern_core::rectangle::Rectangle;
use cavern_core::render::SpriteCanvas;
use cavern_core::units::{AngularVelocity, Degrees, Game, HALF_TILE, TILE_SIZE};
use cavern_core::vector::Vector;

use crate::motion::HorizontalFacing;

/// 120 degrees per second.
pub const FLIGHT_SPEED: AngularVelocity = AngularVelocity(120.0 / 1000.0);
pub const FLIGHT_AMPLITUDE: Game = Game(5.0 * HALF_TILE.0 / 2.0);
pub const BAT_CONTACT_DAMAGE: u32 = 1;
pub const BAT_MAX_HEALTH: u32 = 3;

#[derive(Debug, Clone)]
pub struct BatSprites<S> {
    pub left: S,
    pub right: S,
}

/// Hovering enemy of the first cave. Bobs on a sine path around its spawn
/// height and turns to face the player; it never moves horizontally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveBat {
    x: Game,
    center_y: Game,
    flight_angle: Degrees,
    facing: HorizontalFacing,
    health: u32,
}

impl CaveBat {
    pub fn new(position: Vector<Game>) -> Self {
        Self {
            x: position.x,
            center_y: position.y,
            flight_angle: Degrees::ZERO,
            facing: HorizontalFacing::Right,
            health: BAT_MAX_HEALTH,
        }
    }

    /// Top-left corner of the bat's tile.
    pub fn position(&self) -> Vector<Game> {
        let offset = FLIGHT_AMPLITUDE * self.flight_angle.to_radians().sin();
        Vector::new(self.x, self.center_y + offset)
    }

    pub fn facing(&self) -> HorizontalFacing {
        self.facing
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn contact_damage(&self) -> u32 {
        BAT_CONTACT_DAMAGE
    }

    /// Advance the hover and turn toward `player_x`. Returns false once the
    /// bat has been defeated and should be dropped.
    pub fn update(&mut self, elapsed: Duration, player_x: Game) -> bool {
        let angle = self.flight_angle + FLIGHT_SPEED * elapsed;
        self.flight_angle = Degrees(angle.0 % 360.0);
        self.facing = if self.x + HALF_TILE > player_x {
            HorizontalFacing::Left
        } else {
            HorizontalFacing::Right
        };
        self.is_alive()
    }

    /// Shots hit anywhere on the bat's tile.
    pub fn collision_rectangle(&self) -> Rectangle {
        let pos = self.position();
        Rectangle::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE)
    }

    /// Zero-size point at the bat's centre; the player is hurt only when it
    /// lies strictly inside the player's damage box.
    pub fn damage_rectangle(&self) -> Rectangle {
        let pos = self.position();
        Rectangle::new(pos.x + HALF_TILE, pos.y + HALF_TILE, Game::ZERO, Game::ZERO)
    }

    /// Returns the health left.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        tracing::debug!(amount, remaining = self.health, "Bat hit");
        self.health
    }

    pub fn draw<C: SpriteCanvas>(&self, canvas: &mut C, sprites: &BatSprites<C::Sprite>) {
        let sprite = match self.facing {
            HorizontalFacing::Left => &sprites.left,
            HorizontalFacing::Right => &sprites.right,
        };
        canvas.draw_sprite(sprite, self.position().to_pixel(canvas.quality()));
    }
}
