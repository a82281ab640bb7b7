//! Start a match from an arbitrary active-play position.
//!
//! Useful for puzzles, analysis and tests that need a specific
//! configuration without replaying placement and assignment.
//!
//! ```
//! use sa_jin::core::PlayerSide;
//! use sa_jin::pieces::PieceType;
//! use sa_jin::rules::{Phase, ScenarioBuilder};
//!
//! let game = ScenarioBuilder::new()
//!     .strong(PlayerSide::South, PieceType::Triangle, "A1")
//!     .strong(PlayerSide::South, PieceType::Rectangle, "C2")
//!     .weak(PlayerSide::South, PieceType::Square, "E3")
//!     .strong(PlayerSide::North, PieceType::Triangle, "B8")
//!     .strong(PlayerSide::North, PieceType::Rectangle, "D7")
//!     .weak(PlayerSide::North, PieceType::Square, "F6")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.phase(), Phase::Active);
//! ```

use crate::board::Board;
use crate::core::{
    ActionErrorKind, ActionResult, GameConfig, IllegalAction, PlayerSide, Position, SideMap,
};
use crate::pieces::{Piece, PieceId, PieceType};

use super::game::GameState;

#[derive(Clone, Debug)]
enum Entry {
    Alive { at: String, strong: bool },
    Captured,
}

/// Builder for a match that starts in active play.
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    config: GameConfig,
    entries: Vec<(PieceId, Entry)>,
    captures: SideMap<u8>,
    to_move: Option<PlayerSide>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            entries: Vec::new(),
            captures: SideMap::with_value(0),
            to_move: None,
        }
    }
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// A strong counter on the square named in algebraic notation.
    pub fn strong(self, side: PlayerSide, kind: PieceType, at: &str) -> Self {
        self.entry(side, kind, Entry::Alive { at: at.to_string(), strong: true })
    }

    /// A weak counter on the square named in algebraic notation.
    pub fn weak(self, side: PlayerSide, kind: PieceType, at: &str) -> Self {
        self.entry(side, kind, Entry::Alive { at: at.to_string(), strong: false })
    }

    /// A counter that has already been captured.
    pub fn captured(self, side: PlayerSide, kind: PieceType) -> Self {
        self.entry(side, kind, Entry::Captured)
    }

    /// Captures already credited to `side`.
    pub fn captures(mut self, side: PlayerSide, count: u8) -> Self {
        self.captures[side] = count;
        self
    }

    /// Side to move first. Defaults to the configured starting side.
    pub fn to_move(mut self, side: PlayerSide) -> Self {
        self.to_move = Some(side);
        self
    }

    fn entry(mut self, side: PlayerSide, kind: PieceType, entry: Entry) -> Self {
        self.entries.push((PieceId::new(side, kind), entry));
        self
    }

    /// Validate and build the match.
    ///
    /// Every side must list all three counters exactly once, squares must be
    /// distinct, and neither side may already have won.
    pub fn build(self) -> ActionResult<GameState> {
        let invalid = |reason: String| IllegalAction::new(ActionErrorKind::InvalidSetup, reason);

        let mut board = Board::new();
        let mut captured = Vec::new();

        // Captured counters first: their stale square must not clash with a living one.
        for (id, _) in self.entries.iter().filter(|(_, e)| matches!(e, Entry::Captured)) {
            let mut piece = Piece::new(id.owner, id.kind, Position::new(0, 0)?);
            piece.alive = false;
            board.add_piece(piece).map_err(|e| invalid(e.reason))?;
            captured.push(*id);
        }
        for (id, entry) in &self.entries {
            if let Entry::Alive { at, strong } = entry {
                let mut piece = Piece::new(id.owner, id.kind, Position::from_algebraic(at)?);
                piece.strong = *strong;
                board.add_piece(piece).map_err(|e| invalid(e.reason))?;
            }
        }

        for side in PlayerSide::ALL {
            if board.all_pieces_for(side).count() != PieceType::ALL.len() {
                return Err(invalid(format!("{side} must list all three counters")));
            }
            if self.captures[side] >= 2 {
                return Err(invalid(format!("{side} has already won")));
            }
            let lost = captured.iter().filter(|id| id.owner == side).count();
            if lost >= 2 {
                return Err(invalid(format!("{side} cannot lose two counters and still play")));
            }
        }

        let to_move = self.to_move.unwrap_or(self.config.starting_side);
        Ok(GameState::active_from(self.config, board, self.captures, to_move))
    }
}
