use std::cmp::Reverse;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use cavern_core::map::{CollisionTile, MapQuery, TileType};
use cavern_core::rectangle::Rectangle;
use cavern_core::units::{Acceleration, Game, Velocity};
use cavern_core::vector::Vector;

// Walk motion
pub const WALKING_ACCELERATION: Acceleration = Acceleration(0.00083007812);
pub const FRICTION: Acceleration = Acceleration(0.00049804687);
pub const MAX_SPEED_X: Velocity = Velocity(0.15859375);
// Fall motion
pub const GRAVITY: Acceleration = Acceleration(0.00078125);
pub const MAX_SPEED_Y: Velocity = Velocity(0.2998046875);
// Jump motion
pub const AIR_ACCELERATION: Acceleration = Acceleration(0.0003125);
pub const JUMP_GRAVITY: Acceleration = Acceleration(0.0003125);
pub const JUMP_SPEED: Velocity = Velocity(0.25);
pub const SHORT_JUMP_SPEED: Velocity = Velocity(0.25 / 1.5);

/// Box probed by horizontal movement, relative to the actor position.
pub const COLLISION_X: Rectangle = Rectangle::new(Game(6.0), Game(10.0), Game(20.0), Game(12.0));
/// Box probed by vertical movement, relative to the actor position.
pub const COLLISION_Y: Rectangle = Rectangle::new(Game(10.0), Game(2.0), Game(12.0), Game(30.0));

/// Horizontal thrust requested by the controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationDirection {
    Left,
    #[default]
    Idle,
    Right,
}

impl AccelerationDirection {
    pub fn sign(self) -> f64 {
        match self {
            AccelerationDirection::Left => -1.0,
            AccelerationDirection::Idle => 0.0,
            AccelerationDirection::Right => 1.0,
        }
    }
}

/// Edge of the actor a probe extends from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// What a single integration step ran into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// Became grounded this step.
    pub landed: bool,
    /// Upward motion stopped by a ceiling.
    pub bonked: bool,
    /// Horizontal motion stopped by a wall.
    pub blocked: bool,
}

/// The first WALL tile a probe touches, nearest to the moving edge first.
///
/// The nearest-wins ordering makes the result independent of the order in
/// which the map enumerates its tiles.
pub fn wall_collision<M: MapQuery + ?Sized>(
    map: &M,
    probe: &Rectangle,
    side: Side,
) -> Option<CollisionTile> {
    let walls = map
        .colliding_tiles(probe)
        .into_iter()
        .filter(|t| t.tile_type == TileType::Wall);
    match side {
        Side::Right => walls.min_by_key(|t| (t.col, t.row)),
        Side::Left => walls.min_by_key(|t| (Reverse(t.col), t.row)),
        Side::Bottom => walls.min_by_key(|t| (t.row, t.col)),
        Side::Top => walls.min_by_key(|t| (Reverse(t.row), t.col)),
    }
}

/// Position and velocity of an actor plus the control latches the
/// integrator consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vector<Game>,
    pub velocity: Vector<Velocity>,
    pub acceleration_direction: AccelerationDirection,
    /// Only written by the vertical step.
    pub is_on_ground: bool,
    /// Jump button held; selects the weaker gravity while ascending.
    pub is_jump_active: bool,
}

impl Kinematics {
    pub fn new(position: Vector<Game>) -> Self {
        Self {
            position,
            velocity: Vector::new(Velocity::ZERO, Velocity::ZERO),
            acceleration_direction: AccelerationDirection::Idle,
            is_on_ground: false,
            is_jump_active: false,
        }
    }

    /// Advance one step: the horizontal axis is fully resolved before the
    /// vertical one.
    pub fn update<M: MapQuery + ?Sized>(&mut self, elapsed: Duration, map: &M) -> StepEvents {
        let was_on_ground = self.is_on_ground;
        let blocked = self.update_x(elapsed, map);
        let bonked = self.update_y(elapsed, map);
        StepEvents {
            landed: self.is_on_ground && !was_on_ground,
            bonked,
            blocked,
        }
    }

    /// Returns true when a wall stopped the motion.
    pub fn update_x<M: MapQuery + ?Sized>(&mut self, elapsed: Duration, map: &M) -> bool {
        let magnitude = if self.is_on_ground {
            WALKING_ACCELERATION
        } else {
            AIR_ACCELERATION
        };
        let acceleration = magnitude * self.acceleration_direction.sign();
        self.velocity.x += acceleration * elapsed;

        match self.acceleration_direction {
            AccelerationDirection::Left => self.velocity.x = self.velocity.x.max(-MAX_SPEED_X),
            AccelerationDirection::Right => self.velocity.x = self.velocity.x.min(MAX_SPEED_X),
            AccelerationDirection::Idle if self.is_on_ground => {
                let friction = FRICTION * elapsed;
                self.velocity.x = if self.velocity.x > Velocity::ZERO {
                    (self.velocity.x - friction).max(Velocity::ZERO)
                } else {
                    (self.velocity.x + friction).min(Velocity::ZERO)
                };
            },
            AccelerationDirection::Idle => {},
        }

        let delta = self.velocity.x * elapsed;
        let mut blocked = false;
        if delta > Game::ZERO {
            match wall_collision(map, &self.right_collision(delta), Side::Right) {
                Some(tile) => {
                    self.position.x = tile.bounds().left() - COLLISION_X.right();
                    self.velocity.x = Velocity::ZERO;
                    blocked = true;
                },
                None => self.position.x += delta,
            }
            if let Some(tile) = wall_collision(map, &self.left_collision(Game::ZERO), Side::Left) {
                self.position.x = tile.bounds().right() - COLLISION_X.left();
            }
        } else if delta < Game::ZERO {
            match wall_collision(map, &self.left_collision(delta), Side::Left) {
                Some(tile) => {
                    self.position.x = tile.bounds().right() - COLLISION_X.left();
                    self.velocity.x = Velocity::ZERO;
                    blocked = true;
                },
                None => self.position.x += delta,
            }
            if let Some(tile) = wall_collision(map, &self.right_collision(Game::ZERO), Side::Right)
            {
                self.position.x = tile.bounds().left() - COLLISION_X.right();
            }
        }
        blocked
    }

    /// Returns true when a ceiling stopped upward motion.
    pub fn update_y<M: MapQuery + ?Sized>(&mut self, elapsed: Duration, map: &M) -> bool {
        let gravity = if self.is_jump_active && self.velocity.y < Velocity::ZERO {
            JUMP_GRAVITY
        } else {
            GRAVITY
        };
        self.velocity.y = (self.velocity.y + gravity * elapsed).min(MAX_SPEED_Y);

        let delta = self.velocity.y * elapsed;
        let mut bonked = false;
        if delta > Game::ZERO {
            match wall_collision(map, &self.bottom_collision(delta), Side::Bottom) {
                Some(tile) => {
                    self.position.y = tile.bounds().top() - COLLISION_Y.bottom();
                    self.velocity.y = Velocity::ZERO;
                    self.is_on_ground = true;
                },
                None => {
                    self.position.y += delta;
                    self.is_on_ground = false;
                },
            }
            if let Some(tile) = wall_collision(map, &self.top_collision(Game::ZERO), Side::Top) {
                self.position.y = tile.bounds().bottom() - COLLISION_Y.top();
            }
        } else if delta < Game::ZERO {
            match wall_collision(map, &self.top_collision(delta), Side::Top) {
                Some(tile) => {
                    self.position.y = tile.bounds().bottom() - COLLISION_Y.top();
                    self.velocity.y = Velocity::ZERO;
                    bonked = true;
                },
                None => {
                    self.position.y += delta;
                    self.is_on_ground = false;
                },
            }
            if let Some(tile) = wall_collision(map, &self.bottom_collision(Game::ZERO), Side::Bottom)
            {
                self.position.y = tile.bounds().top() - COLLISION_Y.bottom();
                self.is_on_ground = true;
            }
        }
        bonked
    }

    /// Left half of the horizontal box, stretched left by `-delta`.
    pub fn left_collision(&self, delta: Game) -> Rectangle {
        assert!(delta <= Game::ZERO, "left probe needs a non-positive delta");
        Rectangle::new(
            self.position.x + COLLISION_X.left() + delta,
            self.position.y + COLLISION_X.top(),
            COLLISION_X.width() / 2.0 - delta,
            COLLISION_X.height(),
        )
    }

    /// Right half of the horizontal box, stretched right by `delta`.
    pub fn right_collision(&self, delta: Game) -> Rectangle {
        assert!(delta >= Game::ZERO, "right probe needs a non-negative delta");
        Rectangle::new(
            self.position.x + COLLISION_X.left() + COLLISION_X.width() / 2.0,
            self.position.y + COLLISION_X.top(),
            COLLISION_X.width() / 2.0 + delta,
            COLLISION_X.height(),
        )
    }

    /// Upper half of the vertical box, stretched up by `-delta`.
    pub fn top_collision(&self, delta: Game) -> Rectangle {
        assert!(delta <= Game::ZERO, "top probe needs a non-positive delta");
        Rectangle::new(
            self.position.x + COLLISION_Y.left(),
            self.position.y + COLLISION_Y.top() + delta,
            COLLISION_Y.width(),
            COLLISION_Y.height() / 2.0 - delta,
        )
    }

    /// Lower half of the vertical box, stretched down by `delta`.
    pub fn bottom_collision(&self, delta: Game) -> Rectangle {
        assert!(delta >= Game::ZERO, "bottom probe needs a non-negative delta");
        Rectangle::new(
            self.position.x + COLLISION_Y.left(),
            self.position.y + COLLISION_Y.top() + COLLISION_Y.height() / 2.0,
            COLLISION_Y.width(),
            COLLISION_Y.height() / 2.0 + delta,
        )
    }
}
