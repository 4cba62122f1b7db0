//! Discrete motion/facing classification and the dense sprite lookup keyed
//! by it.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use cavern_core::units::{Fps, Tile, Velocity};

use crate::physics::AccelerationDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MotionType {
    Standing,
    Walking,
    Jumping,
    Falling,
    Interacting,
}

impl MotionType {
    pub const ALL: [MotionType; 5] = [
        MotionType::Standing,
        MotionType::Walking,
        MotionType::Jumping,
        MotionType::Falling,
        MotionType::Interacting,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HorizontalFacing {
    Left,
    Right,
}

impl HorizontalFacing {
    pub const ALL: [HorizontalFacing; 2] = [HorizontalFacing::Left, HorizontalFacing::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VerticalFacing {
    Up,
    Down,
    Horizontal,
}

impl VerticalFacing {
    pub const ALL: [VerticalFacing; 3] = [
        VerticalFacing::Up,
        VerticalFacing::Down,
        VerticalFacing::Horizontal,
    ];
}

/// Sprite selection key. Field order gives the derived lexicographic `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpriteState {
    pub motion_type: MotionType,
    pub horizontal_facing: HorizontalFacing,
    pub vertical_facing: VerticalFacing,
}

impl SpriteState {
    pub const COUNT: usize =
        MotionType::ALL.len() * HorizontalFacing::ALL.len() * VerticalFacing::ALL.len();

    pub const fn new(
        motion_type: MotionType,
        horizontal_facing: HorizontalFacing,
        vertical_facing: VerticalFacing,
    ) -> Self {
        Self {
            motion_type,
            horizontal_facing,
            vertical_facing,
        }
    }

    /// Dense index in `0..COUNT`, consistent with `Ord`.
    pub fn index(self) -> usize {
        let m = self.motion_type as usize;
        let h = self.horizontal_facing as usize;
        let v = self.vertical_facing as usize;
        (m * HorizontalFacing::ALL.len() + h) * VerticalFacing::ALL.len() + v
    }

    pub fn from_index(index: usize) -> Self {
        let v = index % VerticalFacing::ALL.len();
        let h = (index / VerticalFacing::ALL.len()) % HorizontalFacing::ALL.len();
        let m = index / (VerticalFacing::ALL.len() * HorizontalFacing::ALL.len());
        Self::new(
            MotionType::ALL[m],
            HorizontalFacing::ALL[h],
            VerticalFacing::ALL[v],
        )
    }

    /// Every state in ascending order.
    pub fn all() -> impl Iterator<Item = SpriteState> {
        (0..Self::COUNT).map(Self::from_index)
    }
}

/// Classify continuous physics state into a motion type. First match wins:
/// interacting, then grounded (standing/walking), then airborne
/// (jumping while moving up, falling otherwise).
pub fn classify_motion(
    is_interacting: bool,
    is_on_ground: bool,
    acceleration_direction: AccelerationDirection,
    velocity_y: Velocity,
) -> MotionType {
    if is_interacting {
        MotionType::Interacting
    } else if is_on_ground {
        if acceleration_direction == AccelerationDirection::Idle {
            MotionType::Standing
        } else {
            MotionType::Walking
        }
    } else if velocity_y < Velocity::ZERO {
        MotionType::Jumping
    } else {
        MotionType::Falling
    }
}

/// One drawable per [`SpriteState`], stored densely.
#[derive(Debug, Clone)]
pub struct SpriteTable<S> {
    sprites: [S; SpriteState::COUNT],
}

impl<S> SpriteTable<S> {
    pub fn from_fn(mut make: impl FnMut(SpriteState) -> S) -> Self {
        Self {
            sprites: std::array::from_fn(|i| make(SpriteState::from_index(i))),
        }
    }

    pub fn get(&self, state: SpriteState) -> &S {
        &self.sprites[state.index()]
    }
}

impl<S> Index<SpriteState> for SpriteTable<S> {
    type Output = S;

    fn index(&self, state: SpriteState) -> &S {
        self.get(state)
    }
}

// Sprite sheet layout
const STAND_FRAME: Tile = Tile(0);
const WALK_FRAME: Tile = Tile(0);
const JUMP_FRAME: Tile = Tile(1);
const FALL_FRAME: Tile = Tile(2);
const UP_FRAME_OFFSET: Tile = Tile(3);
const DOWN_FRAME: Tile = Tile(6);
const BACK_FRAME: Tile = Tile(7);
const CHARACTER_FRAME: Tile = Tile(0);

pub const WALK_FRAME_COUNT: u32 = 3;
pub const WALK_FPS: Fps = Fps(15);

/// Source cell of a state on the character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub col: Tile,
    pub row: Tile,
    /// Consecutive cells to cycle through, starting at `col`.
    pub frame_count: u32,
    pub fps: Option<Fps>,
}

impl SpriteFrame {
    pub fn for_state(state: SpriteState) -> Self {
        let row = match state.horizontal_facing {
            HorizontalFacing::Left => CHARACTER_FRAME * 2,
            HorizontalFacing::Right => CHARACTER_FRAME * 2 + Tile(1),
        };

        let mut col = match state.motion_type {
            MotionType::Walking => WALK_FRAME,
            MotionType::Standing => STAND_FRAME,
            MotionType::Interacting => BACK_FRAME,
            MotionType::Jumping => JUMP_FRAME,
            MotionType::Falling => FALL_FRAME,
        };
        let airborne = matches!(
            state.motion_type,
            MotionType::Jumping | MotionType::Falling
        );
        match state.vertical_facing {
            VerticalFacing::Up => col = col + UP_FRAME_OFFSET,
            VerticalFacing::Down if airborne => col = DOWN_FRAME,
            _ => {},
        }

        let walking = state.motion_type == MotionType::Walking;
        Self {
            col,
            row,
            frame_count: if walking { WALK_FRAME_COUNT } else { 1 },
            fps: walking.then_some(WALK_FPS),
        }
    }
}
