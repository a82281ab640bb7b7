//! The Sa-Jin rules engine.
//!
//! `GameState` owns the board and drives the match through placement,
//! strength assignment and active play. Front ends call its operations,
//! render `board_snapshot()` / `status_summary()`, and never mutate the
//! board directly.

pub mod game;
pub mod setup;
pub mod summary;
pub mod turn;

pub use game::GameState;
pub use setup::ScenarioBuilder;
pub use summary::{BoardSnapshot, GameResult, Phase, StatusSummary};
pub use turn::{RecordKind, TurnRecord, TurnRequest, TurnResult};
