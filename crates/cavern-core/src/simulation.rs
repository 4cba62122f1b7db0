use std::time::Duration;

use crate::input::Input;

/// Fixed-step game simulation driven by an external frame loop.
///
/// The host polls devices into an [`Input`], hands it over once per frame,
/// then advances the simulation by the configured logical step regardless of
/// how long the frame actually took.
pub trait Simulation {
    /// Gameplay notifications produced by a tick.
    type Event;

    /// Apply this frame's controls. Returns false once the player asked to
    /// quit.
    fn handle_input(&mut self, input: &Input) -> bool;

    /// Advance by one logical step. Does nothing while paused.
    fn update(&mut self, elapsed: Duration) -> Vec<Self::Event>;

    /// Snapshot of the mutable simulation state.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the state with a snapshot. Returns false, keeping the current
    /// state, when the bytes do not decode.
    fn apply_state(&mut self, state: &[u8]) -> bool;

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;
}

/// Generates the snapshot and pause methods of [`Simulation`], which are the
/// same for every game.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and the calling crate to depend on `rmp-serde` and
/// `tracing`.
#[macro_export]
macro_rules! simulation_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).unwrap_or_else(|e| {
                tracing::error!("State serialization failed: {e}");
                Vec::new()
            })
        }

        fn apply_state(&mut self, state: &[u8]) -> bool {
            match rmp_serde::from_slice::<$StateType>(state) {
                Ok(s) => {
                    self.state = s;
                    true
                },
                Err(e) => {
                    tracing::warn!("Ignoring undecodable state snapshot: {e}");
                    false
                },
            }
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }
    };
}
