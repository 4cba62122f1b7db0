use std::time::Duration;

use serde::{Deserialize, Serialize};

use cavern_core::map::MapQuery;
use cavern_core::rectangle::Rectangle;
use cavern_core::render::SpriteCanvas;
use cavern_core::units::{Game, HALF_TILE, Velocity};
use cavern_core::vector::Vector;

use crate::invincibility::Invincibility;
use crate::motion::{
    HorizontalFacing, MotionType, SpriteFrame, SpriteState, SpriteTable, VerticalFacing,
    classify_motion,
};
use crate::physics::{
    AccelerationDirection, COLLISION_X, COLLISION_Y, JUMP_SPEED, Kinematics, SHORT_JUMP_SPEED,
    StepEvents,
};
use crate::projectile::{FireDirection, Projectile, ProjectileSprites};

pub const MAX_HEALTH: u32 = 3;
/// Shots of the player's that may be in flight at once.
pub const MAX_PROJECTILES: usize = 2;

/// The player character: kinematics plus the control latches, damage state
/// and gun that sit on top of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    kinematics: Kinematics,
    horizontal_facing: HorizontalFacing,
    vertical_facing: VerticalFacing,
    is_interacting: bool,
    invincibility: Invincibility,
    health: u32,
    /// Fire button held; a new shot needs a fresh press.
    trigger_held: bool,
    projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(position: Vector<Game>) -> Self {
        Self {
            kinematics: Kinematics::new(position),
            horizontal_facing: HorizontalFacing::Left,
            vertical_facing: VerticalFacing::Horizontal,
            is_interacting: false,
            invincibility: Invincibility::default(),
            health: MAX_HEALTH,
            trigger_held: false,
            projectiles: Vec::new(),
        }
    }

    pub fn update<M: MapQuery + ?Sized>(&mut self, elapsed: Duration, map: &M) -> StepEvents {
        let events = self.kinematics.update(elapsed, map);
        if events.landed {
            tracing::debug!(
                x = self.kinematics.position.x.0,
                y = self.kinematics.position.y.0,
                "Player landed"
            );
        }
        self.invincibility.tick(elapsed);
        self.projectiles.retain_mut(|p| p.update(elapsed, map));
        events
    }

    // Controls

    pub fn start_moving_left(&mut self) {
        self.horizontal_facing = HorizontalFacing::Left;
        self.kinematics.acceleration_direction = AccelerationDirection::Left;
        self.is_interacting = false;
    }

    pub fn start_moving_right(&mut self) {
        self.horizontal_facing = HorizontalFacing::Right;
        self.kinematics.acceleration_direction = AccelerationDirection::Right;
        self.is_interacting = false;
    }

    pub fn stop_moving(&mut self) {
        self.kinematics.acceleration_direction = AccelerationDirection::Idle;
    }

    pub fn look_up(&mut self) {
        self.vertical_facing = VerticalFacing::Up;
        self.is_interacting = false;
    }

    /// Looking down on the ground starts interacting. Repeated calls while
    /// already looking down change nothing.
    pub fn look_down(&mut self) {
        if self.vertical_facing == VerticalFacing::Down {
            return;
        }
        self.vertical_facing = VerticalFacing::Down;
        self.is_interacting = self.kinematics.is_on_ground;
    }

    pub fn look_horizontal(&mut self) {
        self.vertical_facing = VerticalFacing::Horizontal;
    }

    pub fn start_jump(&mut self) {
        self.is_interacting = false;
        self.kinematics.is_jump_active = true;
        if self.kinematics.is_on_ground {
            self.kinematics.velocity.y = -JUMP_SPEED;
        }
    }

    pub fn stop_jump(&mut self) {
        self.kinematics.is_jump_active = false;
    }

    /// Pull the trigger. Returns true when a shot left the gun.
    pub fn start_fire(&mut self) -> bool {
        self.is_interacting = false;
        if self.trigger_held {
            return false;
        }
        self.trigger_held = true;
        if self.projectiles.iter().filter(|p| p.is_alive()).count() >= MAX_PROJECTILES {
            return false;
        }
        let direction = FireDirection::aim(
            self.horizontal_facing,
            self.vertical_facing,
            self.kinematics.is_on_ground,
        );
        let shot = Projectile::new(self.gun_position(direction), direction);
        self.projectiles.push(shot);
        true
    }

    pub fn stop_fire(&mut self) {
        self.trigger_held = false;
    }

    /// Knock the player upward and open an invincibility window. Returns
    /// false, changing nothing, while already invincible.
    ///
    /// Knockback leaves the ground, so interacting ends here.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.invincibility.is_active() {
            return false;
        }
        self.is_interacting = false;
        self.kinematics.velocity.y = self.kinematics.velocity.y.min(-SHORT_JUMP_SPEED);
        self.invincibility.start();
        self.health = self.health.saturating_sub(amount);
        tracing::debug!(amount, remaining = self.health, "Player took damage");
        true
    }

    // Queries

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    pub fn position(&self) -> Vector<Game> {
        self.kinematics.position
    }

    pub fn velocity(&self) -> Vector<Velocity> {
        self.kinematics.velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.kinematics.is_on_ground
    }

    pub fn is_interacting(&self) -> bool {
        self.is_interacting
    }

    pub fn horizontal_facing(&self) -> HorizontalFacing {
        self.horizontal_facing
    }

    pub fn vertical_facing(&self) -> VerticalFacing {
        self.vertical_facing
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn invincibility(&self) -> &Invincibility {
        &self.invincibility
    }

    pub fn is_visible(&self) -> bool {
        self.invincibility.is_visible()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    pub fn motion_type(&self) -> MotionType {
        classify_motion(
            self.is_interacting,
            self.kinematics.is_on_ground,
            self.kinematics.acceleration_direction,
            self.kinematics.velocity.y,
        )
    }

    pub fn sprite_state(&self) -> SpriteState {
        SpriteState::new(
            self.motion_type(),
            self.horizontal_facing,
            self.vertical_facing,
        )
    }

    pub fn sprite_frame(&self) -> SpriteFrame {
        SpriteFrame::for_state(self.sprite_state())
    }

    /// Box enemies hurt: horizontal extent of the X box, vertical extent of
    /// the Y box.
    pub fn damage_rectangle(&self) -> Rectangle {
        let pos = self.kinematics.position;
        Rectangle::new(
            pos.x + COLLISION_X.left(),
            pos.y + COLLISION_Y.top(),
            COLLISION_X.width(),
            COLLISION_Y.height(),
        )
    }

    /// Bounding box of both collision probes.
    pub fn collision_rectangle(&self) -> Rectangle {
        let pos = self.kinematics.position;
        let left = COLLISION_X.left().min(COLLISION_Y.left());
        let top = COLLISION_X.top().min(COLLISION_Y.top());
        let right = COLLISION_X.right().max(COLLISION_Y.right());
        let bottom = COLLISION_X.bottom().max(COLLISION_Y.bottom());
        Rectangle::new(pos.x + left, pos.y + top, right - left, bottom - top)
    }

    pub fn center_pos(&self) -> Vector<Game> {
        let pos = self.kinematics.position;
        Vector::new(pos.x + HALF_TILE, pos.y + HALF_TILE)
    }

    /// Muzzle position: half a tile from the centre toward the shot.
    fn gun_position(&self, direction: FireDirection) -> Vector<Game> {
        let center = self.center_pos();
        match direction {
            FireDirection::Left => Vector::new(center.x - HALF_TILE, center.y),
            FireDirection::Right => Vector::new(center.x + HALF_TILE, center.y),
            FireDirection::Up => Vector::new(center.x, center.y - HALF_TILE),
            FireDirection::Down => Vector::new(center.x, center.y + HALF_TILE),
        }
    }

    /// Draw the character (skipped while flickered off), then its shots.
    pub fn draw<C: SpriteCanvas>(
        &self,
        canvas: &mut C,
        sprites: &SpriteTable<C::Sprite>,
        projectile_sprites: &ProjectileSprites<C::Sprite>,
    ) {
        if self.is_visible() {
            let position = self.kinematics.position.to_pixel(canvas.quality());
            canvas.draw_sprite(&sprites[self.sprite_state()], position);
        }
        for projectile in &self.projectiles {
            projectile.draw(canvas, projectile_sprites);
        }
    }
}
