//! Read-only views of a match for front ends.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerSide, Position, SideMap, BOARD_SIZE};
use crate::pieces::PieceId;

/// Match progression. Transitions only ever move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Sides alternately place their three counters.
    Placement,
    /// Each side designates two strong counters.
    Assignment,
    /// Alternating moves, captures and resurrections.
    Active,
    /// Terminal.
    GameOver,
}

impl Phase {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Placement => "PLACEMENT",
            Phase::Assignment => "ASSIGNMENT",
            Phase::Active => "ACTIVE",
            Phase::GameOver => "GAME_OVER",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerSide),
    /// Ended without a winner. No current rule produces this.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: PlayerSide) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Compact status for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub phase: Phase,
    pub current_player: PlayerSide,
    pub winner: Option<PlayerSide>,
    /// Opposing counters captured by each side.
    pub captures: SideMap<u8>,
    pub pending_resurrection: Option<PieceId>,
}

impl std::fmt::Display for StatusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "phase: {}, to move: {}, captures: SOUTH {} / NORTH {}",
            self.phase,
            self.current_player,
            self.captures[PlayerSide::South],
            self.captures[PlayerSide::North],
        )?;
        if let Some(winner) = self.winner {
            write!(f, ", winner: {winner}")?;
        }
        if let Some(piece) = self.pending_resurrection {
            write!(f, ", awaiting resurrection of {piece}")?;
        }
        Ok(())
    }
}

/// Identifier of the living counter on each square, indexed `[row][col]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cells: [[Option<PieceId>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl BoardSnapshot {
    /// The counter on `position`, if any.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<PieceId> {
        self.cells[usize::from(position.row())][usize::from(position.col())]
    }

    /// Number of occupied squares.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceType;

    #[test]
    fn test_phase_order() {
        assert!(Phase::Placement < Phase::Assignment);
        assert!(Phase::Assignment < Phase::Active);
        assert!(Phase::Active < Phase::GameOver);
        assert_eq!(Phase::GameOver.to_string(), "GAME_OVER");
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerSide::North);
        assert!(result.is_winner(PlayerSide::North));
        assert!(!result.is_winner(PlayerSide::South));
        assert!(!GameResult::Draw.is_winner(PlayerSide::South));
    }

    #[test]
    fn test_summary_display() {
        let mut captures = SideMap::with_value(0);
        captures[PlayerSide::North] = 2;
        let summary = StatusSummary {
            phase: Phase::GameOver,
            current_player: PlayerSide::North,
            winner: Some(PlayerSide::North),
            captures,
            pending_resurrection: None,
        };

        let text = summary.to_string();
        assert!(text.contains("GAME_OVER"));
        assert!(text.contains("NORTH 2"));
        assert!(text.contains("winner: NORTH"));

        let json = serde_json::to_string(&summary).unwrap();
        let back: StatusSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut snapshot = BoardSnapshot::default();
        let id = PieceId::new(PlayerSide::South, PieceType::Square);
        snapshot.cells[1][3] = Some(id);

        assert_eq!(snapshot.at("D2".parse().unwrap()), Some(id));
        assert_eq!(snapshot.at("D3".parse().unwrap()), None);
        assert_eq!(snapshot.occupied_count(), 1);
    }
}
