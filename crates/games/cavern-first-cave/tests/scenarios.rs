use std::time::Duration;

use cavern_core::config::CavernConfig;
use cavern_core::input::{Button, Input};
use cavern_core::map::TileMap;
use cavern_core::simulation::Simulation;
use cavern_core::test_helpers::{FRAME, boxed_room, floor_map};
use cavern_core::units::{Game, Velocity};
use cavern_core::vector::Vector;

use cavern_first_cave::bat::CaveBat;
use cavern_first_cave::invincibility::INVINCIBLE_FLASH_TIME;
use cavern_first_cave::motion::MotionType;
use cavern_first_cave::physics::{JUMP_SPEED, MAX_SPEED_X};
use cavern_first_cave::player::Player;
use cavern_first_cave::{CaveEvent, FirstCave};

/// Floor row 11 tops out at y 352; a resting player sits 32 units above.
const GROUND_Y: f64 = 320.0;

fn room() -> TileMap {
    floor_map(15, 40, 11)
}

fn cave_with(player_x: f64, bat: Option<CaveBat>) -> FirstCave {
    let player = Player::new(Vector::new(Game(player_x), Game(GROUND_Y)));
    FirstCave::with_layout(CavernConfig::default(), room(), player, bat)
}

/// One host frame: apply `edit` to the latch, hand it over, then tick.
fn frame(game: &mut FirstCave, input: &mut Input, edit: impl FnOnce(&mut Input)) -> Vec<CaveEvent> {
    input.begin_new_frame();
    edit(input);
    game.handle_input(input);
    game.update(FRAME)
}

#[test]
fn holding_right_approaches_max_speed() {
    let mut game = cave_with(64.0, None);
    let mut input = Input::new();
    frame(&mut game, &mut input, |i| i.key_down(Button::Right));
    let mut previous = game.player().velocity().x;
    for _ in 0..49 {
        frame(&mut game, &mut input, |_| {});
        let vx = game.player().velocity().x;
        assert!(vx <= MAX_SPEED_X);
        assert!(vx >= previous);
        previous = vx;
    }
    assert_eq!(game.player().motion_type(), MotionType::Walking);
}

#[test]
fn releasing_right_slides_to_a_stop() {
    let mut game = cave_with(64.0, None);
    let mut input = Input::new();
    frame(&mut game, &mut input, |i| i.key_down(Button::Right));
    for _ in 0..20 {
        frame(&mut game, &mut input, |_| {});
    }
    frame(&mut game, &mut input, |i| i.key_up(Button::Right));
    let mut previous = game.player().velocity().x;
    for _ in 0..40 {
        frame(&mut game, &mut input, |_| {});
        let vx = game.player().velocity().x;
        assert!(vx <= previous);
        assert!(vx >= Velocity::ZERO);
        previous = vx;
    }
    assert_eq!(game.player().velocity().x, Velocity::ZERO);
    assert_eq!(game.player().motion_type(), MotionType::Standing);
}

#[test]
fn running_into_the_room_wall_stops_flush() {
    // Floor row 14 tops out at 448; right wall column 19 starts at x 608
    let player = Player::new(Vector::new(Game(500.0), Game(416.0)));
    let mut game = FirstCave::with_layout(CavernConfig::default(), boxed_room(15, 20), player, None);
    let mut input = Input::new();
    frame(&mut game, &mut input, |i| i.key_down(Button::Right));
    for _ in 0..100 {
        frame(&mut game, &mut input, |_| {});
    }
    assert_eq!(game.player().position().x, Game(608.0 - 26.0));
    assert_eq!(game.player().velocity().x, Velocity::ZERO);
    assert!(game.player().is_on_ground());
}

#[test]
fn jump_launches_and_lands_again() {
    let mut game = cave_with(320.0, None);
    let mut input = Input::new();
    frame(&mut game, &mut input, |_| {});
    assert!(game.player().is_on_ground());

    input.begin_new_frame();
    input.key_down(Button::Jump);
    game.handle_input(&input);
    assert_eq!(game.player().velocity().y, -JUMP_SPEED);
    game.update(FRAME);
    assert!(!game.player().is_on_ground());

    let mut landed = false;
    for _ in 0..200 {
        if frame(&mut game, &mut input, |_| {}).contains(&CaveEvent::PlayerLanded) {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert_eq!(game.player().position().y, Game(GROUND_Y));
    assert_eq!(game.player().velocity().y, Velocity::ZERO);
}

#[test]
fn short_hop_peaks_lower_than_full_jump() {
    fn peak(release_after: Option<usize>) -> Game {
        let mut game = cave_with(320.0, None);
        let mut input = Input::new();
        frame(&mut game, &mut input, |_| {});
        frame(&mut game, &mut input, |i| i.key_down(Button::Jump));
        let mut top = game.player().position().y;
        for tick in 0..100 {
            let release = release_after == Some(tick);
            frame(&mut game, &mut input, |i| {
                if release {
                    i.key_up(Button::Jump);
                }
            });
            top = top.min(game.player().position().y);
        }
        top
    }
    assert!(peak(Some(2)) > peak(None));
}

#[test]
fn looking_down_on_the_ground_interacts() {
    let mut game = cave_with(320.0, None);
    let mut input = Input::new();
    frame(&mut game, &mut input, |_| {});
    frame(&mut game, &mut input, |i| i.key_down(Button::Down));
    assert!(game.player().is_interacting());
    assert_eq!(game.player().motion_type(), MotionType::Interacting);

    frame(&mut game, &mut input, |i| i.key_down(Button::Jump));
    assert!(!game.player().is_interacting());
}

#[test]
fn three_shots_defeat_the_bat() {
    // Muzzle at x 272 sits just right of the bat's tile (224..256)
    let bat = CaveBat::new(Vector::new(Game(224.0), Game(304.0)));
    let mut game = cave_with(272.0, Some(bat));
    let mut input = Input::new();

    let mut events = Vec::new();
    for _ in 0..3 {
        events.extend(frame(&mut game, &mut input, |i| i.key_down(Button::Fire)));
        events.extend(frame(&mut game, &mut input, |i| i.key_up(Button::Fire)));
    }
    let hits: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            CaveEvent::EnemyHit { remaining } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(hits, vec![2, 1, 0]);
    // Dropped on the tick after the killing shot
    assert_eq!(events.last(), Some(&CaveEvent::EnemyDefeated));
    assert!(game.bat().is_none());
    assert!(frame(&mut game, &mut input, |_| {}).is_empty());
}

#[test]
fn damaged_player_flickers_without_stacking() {
    // Bat centre (240, ~336) inside the player's damage box
    let bat = CaveBat::new(Vector::new(Game(224.0), Game(320.0)));
    let mut game = cave_with(224.0, Some(bat));

    let events = game.update(FRAME);
    assert!(events.contains(&CaveEvent::PlayerDamaged { remaining: 2 }));
    assert!(game.player().is_invincible());
    assert!(!game.player().is_visible());

    let mut seen = Vec::new();
    for _ in 0..4 {
        game.update(INVINCIBLE_FLASH_TIME);
        seen.push(game.player().is_visible());
    }
    assert_eq!(seen, vec![true, false, true, false]);
    // Contact during the window does not stack
    assert_eq!(game.player().health(), 2);
}

#[test]
fn default_cave_runs_on_configured_tick() {
    let mut game = FirstCave::new(CavernConfig::default());
    for _ in 0..60 {
        game.step();
    }
    assert_eq!(game.state().elapsed, Duration::from_millis(960));
    assert!(game.player().is_on_ground());
}
