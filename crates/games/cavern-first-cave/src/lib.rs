pub mod bat;
pub mod invincibility;
pub mod motion;
pub mod physics;
pub mod player;
pub mod projectile;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use cavern_core::config::CavernConfig;
use cavern_core::input::{Button, Input};
use cavern_core::map::TileMap;
use cavern_core::render::SpriteCanvas;
use cavern_core::simulation::Simulation;
use cavern_core::simulation_boilerplate;
use cavern_core::units::Tile;
use cavern_core::vector::Vector;

use bat::{BatSprites, CaveBat};
use motion::SpriteTable;
use player::Player;
use projectile::ProjectileSprites;

/// Mutable simulation state, snapshotted by `serialize_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstCaveState {
    pub player: Player,
    /// `None` once the bat has been defeated.
    pub bat: Option<CaveBat>,
    /// Logical time simulated so far.
    pub elapsed: Duration,
}

/// Gameplay notifications from one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaveEvent {
    PlayerLanded,
    /// A wall stopped the player's horizontal motion this tick.
    PlayerHitWall,
    /// A ceiling stopped the player's ascent this tick.
    PlayerHitCeiling,
    PlayerDamaged { remaining: u32 },
    EnemyHit { remaining: u32 },
    EnemyDefeated,
}

/// Drawables for everything in the cave.
pub struct FirstCaveSprites<S> {
    pub player: SpriteTable<S>,
    pub bat: BatSprites<S>,
    pub projectile: ProjectileSprites<S>,
}

/// The first cave: one player, one bat, one room.
pub struct FirstCave {
    config: CavernConfig,
    map: TileMap,
    state: FirstCaveState,
    paused: bool,
}

impl FirstCave {
    /// The demo room with the player dropped in at screen centre and the bat
    /// hovering to its left.
    pub fn new(config: CavernConfig) -> Self {
        let screen = config.screen;
        let map = TileMap::create_test_map(&screen);
        let player = Player::new(Vector::new(screen.width / 2, screen.height / 2).to_game());
        let bat = CaveBat::new(Vector::new(Tile(7), screen.height / 2 + Tile(1)).to_game());
        Self::with_layout(config, map, player, Some(bat))
    }

    pub fn with_layout(
        config: CavernConfig,
        map: TileMap,
        player: Player,
        bat: Option<CaveBat>,
    ) -> Self {
        Self {
            config,
            map,
            state: FirstCaveState {
                player,
                bat,
                elapsed: Duration::ZERO,
            },
            paused: false,
        }
    }

    pub fn config(&self) -> &CavernConfig {
        &self.config
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn state(&self) -> &FirstCaveState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn bat(&self) -> Option<&CaveBat> {
        self.state.bat.as_ref()
    }

    /// Advance by the configured tick duration.
    pub fn step(&mut self) -> Vec<CaveEvent> {
        let elapsed = self.config.tick_duration();
        self.update(elapsed)
    }

    /// Bat first, then the player (and its shots) on top.
    pub fn draw<C: SpriteCanvas>(&self, canvas: &mut C, sprites: &FirstCaveSprites<C::Sprite>) {
        if let Some(bat) = &self.state.bat {
            bat.draw(canvas, &sprites.bat);
        }
        self.state
            .player
            .draw(canvas, &sprites.player, &sprites.projectile);
    }

    fn resolve_shots(&mut self, events: &mut Vec<CaveEvent>) {
        let Some(bat) = self.state.bat.as_mut() else {
            return;
        };
        for shot in self.state.player.projectiles_mut() {
            if !bat.is_alive() {
                break;
            }
            if shot.is_alive() && bat.collision_rectangle().collides_with(&shot.collision_rectangle())
            {
                let remaining = bat.take_damage(shot.collide_with_enemy());
                events.push(CaveEvent::EnemyHit { remaining });
            }
        }
    }

    fn resolve_contact(&mut self, events: &mut Vec<CaveEvent>) {
        let player = &mut self.state.player;
        if let Some(bat) = &self.state.bat
            && bat.damage_rectangle().collides_with(&player.damage_rectangle())
            && player.take_damage(bat.contact_damage())
        {
            events.push(CaveEvent::PlayerDamaged {
                remaining: player.health(),
            });
        }
    }
}

impl Simulation for FirstCave {
    type Event = CaveEvent;

    fn handle_input(&mut self, input: &Input) -> bool {
        if input.was_pressed(Button::Quit) {
            return false;
        }
        let player = &mut self.state.player;

        match (input.is_held(Button::Left), input.is_held(Button::Right)) {
            (true, true) | (false, false) => player.stop_moving(),
            (true, false) => player.start_moving_left(),
            (false, true) => player.start_moving_right(),
        }

        match (input.is_held(Button::Up), input.is_held(Button::Down)) {
            (true, true) | (false, false) => player.look_horizontal(),
            (true, false) => player.look_up(),
            (false, true) => player.look_down(),
        }

        if input.was_pressed(Button::Jump) {
            player.start_jump();
        } else if input.was_released(Button::Jump) {
            player.stop_jump();
        }

        if input.was_pressed(Button::Fire) {
            player.start_fire();
        } else if input.was_released(Button::Fire) {
            player.stop_fire();
        }
        true
    }

    /// Player first, then the bat against the player's new position, then
    /// shots against the bat, then bat contact against the player.
    fn update(&mut self, elapsed: Duration) -> Vec<CaveEvent> {
        if self.paused {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.state.elapsed += elapsed;

        let step = self.state.player.update(elapsed, &self.map);
        if step.landed {
            events.push(CaveEvent::PlayerLanded);
        }
        if step.blocked {
            events.push(CaveEvent::PlayerHitWall);
        }
        if step.bonked {
            events.push(CaveEvent::PlayerHitCeiling);
        }

        let player_x = self.state.player.center_pos().x;
        let defeated = self
            .state
            .bat
            .as_mut()
            .is_some_and(|bat| !bat.update(elapsed, player_x));
        if defeated {
            self.state.bat = None;
            tracing::debug!("Bat defeated");
            events.push(CaveEvent::EnemyDefeated);
        }

        self.resolve_shots(&mut events);
        self.resolve_contact(&mut events);
        events
    }

    simulation_boilerplate!(state_type: FirstCaveState);
}
