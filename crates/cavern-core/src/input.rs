use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical buttons, independent of the device that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Fire,
    Quit,
}

/// Per-frame button latch.
///
/// `held` persists across frames; `pressed` and `released` only describe
/// transitions seen since the last [`Input::begin_new_frame`].
#[derive(Debug, Clone, Default)]
pub struct Input {
    held: HashSet<Button>,
    pressed: HashSet<Button>,
    released: HashSet<Button>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_new_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }

    pub fn key_down(&mut self, button: Button) {
        self.pressed.insert(button);
        self.held.insert(button);
    }

    pub fn key_up(&mut self, button: Button) {
        self.released.insert(button);
        self.held.remove(&button);
    }

    pub fn was_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    pub fn was_released(&self, button: Button) -> bool {
        self.released.contains(&button)
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_held_until_release() {
        let mut input = Input::new();
        input.key_down(Button::Jump);
        assert!(input.was_pressed(Button::Jump));
        assert!(input.is_held(Button::Jump));

        input.begin_new_frame();
        assert!(!input.was_pressed(Button::Jump));
        assert!(input.is_held(Button::Jump));

        input.key_up(Button::Jump);
        assert!(input.was_released(Button::Jump));
        assert!(!input.is_held(Button::Jump));
    }

    #[test]
    fn press_and_release_in_one_frame_both_latch() {
        let mut input = Input::new();
        input.key_down(Button::Fire);
        input.key_up(Button::Fire);
        assert!(input.was_pressed(Button::Fire));
        assert!(input.was_released(Button::Fire));
        assert!(!input.is_held(Button::Fire));
    }
}
