//! Core types: board coordinates, sides, errors, configuration, RNG.
//!
//! Everything here is independent of the piece rules and is shared by the
//! board, the rules engine and the computer policies.

pub mod position;
pub mod side;
pub mod error;
pub mod config;
pub mod rng;

pub use position::{iter_half_board, HalfBoard, Position, BOARD_SIZE};
pub use side::{PlayerSide, SideMap};
pub use error::{ActionErrorKind, ActionResult, IllegalAction, SnapshotError};
pub use config::GameConfig;
pub use rng::GameRng;
