use std::time::Duration;

use serde::{Deserialize, Serialize};

use cavern_core::map::{MapQuery, TileType};
use cavern_core::rectangle::Rectangle;
use cavern_core::render::SpriteCanvas;
use cavern_core::units::{Game, HALF_TILE, Velocity};
use cavern_core::vector::Vector;

use crate::motion::{HorizontalFacing, VerticalFacing};

pub const PROJECTILE_SPEED: Velocity = Velocity(0.6);
/// Distance travelled before the shot fizzles (seven half-tiles).
pub const PROJECTILE_RANGE: Game = Game(7.0 * HALF_TILE.0);
pub const PROJECTILE_CONTACT_DAMAGE: u32 = 1;
const PROJECTILE_LENGTH: Game = HALF_TILE;
const PROJECTILE_THICKNESS: Game = Game(4.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireDirection {
    Left,
    Right,
    Up,
    Down,
}

impl FireDirection {
    /// Up while looking up, down while looking down in mid-air, otherwise
    /// along the horizontal facing.
    pub fn aim(
        horizontal: HorizontalFacing,
        vertical: VerticalFacing,
        is_on_ground: bool,
    ) -> Self {
        match (vertical, horizontal) {
            (VerticalFacing::Up, _) => FireDirection::Up,
            (VerticalFacing::Down, _) if !is_on_ground => FireDirection::Down,
            (_, HorizontalFacing::Left) => FireDirection::Left,
            (_, HorizontalFacing::Right) => FireDirection::Right,
        }
    }

    fn unit(self) -> (f64, f64) {
        match self {
            FireDirection::Left => (-1.0, 0.0),
            FireDirection::Right => (1.0, 0.0),
            FireDirection::Up => (0.0, -1.0),
            FireDirection::Down => (0.0, 1.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, FireDirection::Left | FireDirection::Right)
    }
}

/// Drawables for a shot, by travel axis.
#[derive(Debug, Clone)]
pub struct ProjectileSprites<S> {
    pub horizontal: S,
    pub vertical: S,
}

/// A single gun shot travelling in a straight line from its muzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    origin: Vector<Game>,
    direction: FireDirection,
    offset: Game,
    alive: bool,
}

impl Projectile {
    pub fn new(origin: Vector<Game>, direction: FireDirection) -> Self {
        Self {
            origin,
            direction,
            offset: Game::ZERO,
            alive: true,
        }
    }

    pub fn direction(&self) -> FireDirection {
        self.direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn contact_damage(&self) -> u32 {
        PROJECTILE_CONTACT_DAMAGE
    }

    /// Centre of the shot.
    pub fn position(&self) -> Vector<Game> {
        let (dx, dy) = self.direction.unit();
        Vector::new(
            self.origin.x + self.offset * dx,
            self.origin.y + self.offset * dy,
        )
    }

    /// Thin box centred on the shot, long along the travel axis.
    pub fn collision_rectangle(&self) -> Rectangle {
        let (width, height) = if self.direction.is_horizontal() {
            (PROJECTILE_LENGTH, PROJECTILE_THICKNESS)
        } else {
            (PROJECTILE_THICKNESS, PROJECTILE_LENGTH)
        };
        let center = self.position();
        Rectangle::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Advance along the travel axis. Returns whether the shot survives.
    pub fn update<M: MapQuery + ?Sized>(&mut self, elapsed: Duration, map: &M) -> bool {
        if !self.alive {
            return false;
        }
        self.offset += PROJECTILE_SPEED * elapsed;
        if self.offset >= PROJECTILE_RANGE {
            self.alive = false;
        } else if map
            .colliding_tiles(&self.collision_rectangle())
            .iter()
            .any(|t| t.tile_type == TileType::Wall)
        {
            self.alive = false;
        }
        self.alive
    }

    /// Spend the shot on an enemy and return the damage it deals.
    pub fn collide_with_enemy(&mut self) -> u32 {
        self.alive = false;
        self.contact_damage()
    }

    pub fn draw<C: SpriteCanvas>(&self, canvas: &mut C, sprites: &ProjectileSprites<C::Sprite>) {
        if !self.alive {
            return;
        }
        let sprite = if self.direction.is_horizontal() {
            &sprites.horizontal
        } else {
            &sprites.vertical
        };
        let rect = self.collision_rectangle();
        let top_left = Vector::new(rect.left(), rect.top());
        canvas.draw_sprite(sprite, top_left.to_pixel(canvas.quality()));
    }
}
