//! # sa-jin
//!
//! Rules engine for *Sa-Jin: Three Strengths*, a two-player abstract game on
//! an 8x8 board.
//!
//! Each side owns three counters (triangle, rectangle, square). Strong
//! counters project attack ranges; a weak counter projects nothing and
//! cannot be captured. An opposing strong counter covered by two or more of
//! the mover's strong counters is captured. Two captures win.
//!
//! ## Design Principles
//!
//! 1. **Front-end agnostic**: the engine validates and applies actions and
//!    answers queries. Rendering, input and turn pacing belong to callers.
//!
//! 2. **Atomic actions**: every operation either fully applies or returns an
//!    `IllegalAction` and leaves the match untouched.
//!
//! 3. **Persistent data structures**: the board and history use `im-rs`, so
//!    cloning a match for a trial resolution is cheap.
//!
//! ## Modules
//!
//! - `core`: coordinates, sides, errors, configuration, RNG
//! - `pieces`: counter identity and per-shape attack ranges
//! - `board`: counter placement and occupancy
//! - `rules`: the match state machine and its read-only views
//! - `policy`: computer opponents choosing among legal options
//!
//! ## Example
//!
//! ```
//! use sa_jin::{GameState, Phase, PieceType, PlayerSide, Position};
//!
//! let mut game = GameState::default();
//! let at = Position::from_algebraic("B1").unwrap();
//! game.place_piece(PlayerSide::South, PieceType::Triangle, at).unwrap();
//!
//! assert_eq!(game.phase(), Phase::Placement);
//! assert_eq!(game.current_player(), PlayerSide::North);
//! ```

pub mod core;
pub mod pieces;
pub mod board;
pub mod rules;
pub mod policy;

// Re-export commonly used types
pub use crate::core::{
    ActionErrorKind, ActionResult, IllegalAction, SnapshotError,
    PlayerSide, SideMap, Position, BOARD_SIZE,
    GameConfig, GameRng,
};

pub use crate::pieces::{Piece, PieceId, PieceType};

pub use crate::board::Board;

pub use crate::rules::{
    BoardSnapshot, GameResult, GameState, Phase, RecordKind, ScenarioBuilder, StatusSummary,
    TurnRecord, TurnRequest, TurnResult,
};

pub use crate::policy::{FirstOption, RandomPlayer, SelectionPolicy, Step, UniformRandom};
