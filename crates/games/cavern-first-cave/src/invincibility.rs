use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of the post-hit invincibility window.
pub const INVINCIBLE_TIME: Duration = Duration::from_millis(3000);
/// Half-period of the sprite flicker while invincible.
pub const INVINCIBLE_FLASH_TIME: Duration = Duration::from_millis(50);

/// Timed damage immunity with a flicker schedule for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invincibility {
    active: bool,
    elapsed: Duration,
}

impl Invincibility {
    /// Open a fresh window. Returns false (and changes nothing) when one is
    /// already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.elapsed = Duration::ZERO;
        true
    }

    /// The window only closes here, once the accumulated time reaches
    /// [`INVINCIBLE_TIME`].
    pub fn tick(&mut self, elapsed: Duration) {
        if self.active {
            self.elapsed += elapsed;
            self.active = self.elapsed < INVINCIBLE_TIME;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Hidden during even flash periods of an active window.
    pub fn is_visible(&self) -> bool {
        let period = self.elapsed.as_millis() / INVINCIBLE_FLASH_TIME.as_millis();
        !(self.active && period % 2 == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lasts_exactly_three_seconds() {
        let mut inv = Invincibility::default();
        assert!(inv.start());
        inv.tick(Duration::from_millis(2999));
        assert!(inv.is_active());
        inv.tick(Duration::from_millis(1));
        assert!(!inv.is_active());
    }

    #[test]
    fn restart_during_window_is_ignored() {
        let mut inv = Invincibility::default();
        inv.start();
        inv.tick(Duration::from_millis(1200));
        assert!(!inv.start());
        assert_eq!(inv.elapsed(), Duration::from_millis(1200));
    }

    #[test]
    fn restart_after_window_resets_elapsed() {
        let mut inv = Invincibility::default();
        inv.start();
        inv.tick(INVINCIBLE_TIME);
        assert!(inv.start());
        assert_eq!(inv.elapsed(), Duration::ZERO);
    }

    #[test]
    fn inactive_window_does_not_accumulate() {
        let mut inv = Invincibility::default();
        inv.tick(Duration::from_millis(500));
        assert_eq!(inv.elapsed(), Duration::ZERO);
        assert!(inv.is_visible());
    }

    #[test]
    fn flicker_toggles_every_flash_period() {
        let mut inv = Invincibility::default();
        inv.start();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(inv.is_visible());
            inv.tick(INVINCIBLE_FLASH_TIME);
        }
        assert_eq!(seen, vec![false, true, false, true, false, true]);
    }

    #[test]
    fn visible_once_window_closes() {
        let mut inv = Invincibility::default();
        inv.start();
        // 3000 / 50 = 60, an even period, but the window is closed
        inv.tick(INVINCIBLE_TIME);
        assert!(inv.is_visible());
    }
}
