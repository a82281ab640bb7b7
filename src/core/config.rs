//! Match configuration.
//!
//! The rules are fixed; the only knob is which side opens. The opening side
//! places the first counter and makes the first move of active play.

use serde::{Deserialize, Serialize};

use super::side::PlayerSide;

/// Configuration for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side that places first and moves first once play is active.
    pub starting_side: PlayerSide,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_side: PlayerSide::South,
        }
    }
}

impl GameConfig {
    /// Set the opening side.
    #[must_use]
    pub fn with_starting_side(mut self, side: PlayerSide) -> Self {
        self.starting_side = side;
        self
    }
}
