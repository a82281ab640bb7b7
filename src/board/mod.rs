//! Piece registry and occupancy.
//!
//! The board owns every counter record ever placed, keyed by `PieceId`.
//! Captured counters stay registered (with `alive == false`) so they can be
//! resurrected, but occupancy queries only ever see living counters.
//!
//! Backed by `im::OrdMap`: cloning is O(1) and a clone never shares mutable
//! state with its source, so the rules engine can resolve a turn on a
//! scratch copy and discard it on failure.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{ActionErrorKind, ActionResult, IllegalAction, PlayerSide, Position, BOARD_SIZE};
use crate::pieces::{Piece, PieceId, SquareSet};

/// The 8x8 board and its counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pieces: OrdMap<PieceId, Piece>,
}

fn occupied_error(position: Position) -> IllegalAction {
    IllegalAction::new(
        ActionErrorKind::SquareOccupied,
        format!("Square {position} already occupied"),
    )
}

fn unknown_error(id: PieceId) -> IllegalAction {
    IllegalAction::new(
        ActionErrorKind::UnknownPiece,
        format!("No counter {id} on the board"),
    )
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Piece Collections ===

    /// Every registered counter, living or captured, in identifier order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Living counters.
    pub fn alive_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(|p| p.alive)
    }

    /// Living counters owned by `side`.
    pub fn pieces_for(&self, side: PlayerSide) -> impl Iterator<Item = &Piece> {
        self.alive_pieces().filter(move |p| p.owner() == side)
    }

    /// Every counter owned by `side`, including captured ones.
    pub fn all_pieces_for(&self, side: PlayerSide) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner() == side)
    }

    /// Look up a counter by identifier.
    #[must_use]
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Look up a counter, failing with `UnknownPiece`.
    pub fn piece(&self, id: PieceId) -> ActionResult<&Piece> {
        self.pieces.get(&id).ok_or_else(|| unknown_error(id))
    }

    fn piece_mut(&mut self, id: PieceId) -> ActionResult<&mut Piece> {
        self.pieces.get_mut(&id).ok_or_else(|| unknown_error(id))
    }

    /// Number of registered counters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if no counter was ever placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    // === Occupancy ===

    /// The living counter on `position`, if any.
    #[must_use]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.alive_pieces().find(|p| p.position == position)
    }

    /// Check if a living counter stands on `position`.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    /// Squares of every living counter.
    #[must_use]
    pub fn occupied(&self) -> SquareSet {
        self.alive_pieces().map(|p| p.position).collect()
    }

    /// Check if `position` shares a row or column with any living counter.
    #[must_use]
    pub fn is_aligned(&self, position: Position) -> bool {
        self.alive_pieces().any(|p| p.position.is_aligned_with(position))
    }

    /// Describe the first broken registry invariant, if any.
    ///
    /// Every entry must be keyed by its own identifier and no two living
    /// counters may share a square. Only a decoded board can break these.
    #[must_use]
    pub fn find_inconsistency(&self) -> Option<String> {
        if let Some((key, piece)) = self.pieces.iter().find(|(key, piece)| **key != piece.id) {
            return Some(format!("entry {key} holds counter {}", piece.id));
        }
        let mut seen = SquareSet::default();
        self.alive_pieces()
            .find(|p| !seen.insert(p.position))
            .map(|p| format!("square {} holds two counters", p.position))
    }

    // === Mutators ===

    /// Register a new counter.
    pub fn add_piece(&mut self, piece: Piece) -> ActionResult<()> {
        if self.pieces.contains_key(&piece.id) {
            return Err(IllegalAction::new(
                ActionErrorKind::DuplicateIdentifier,
                format!("Piece {} already exists", piece.id),
            ));
        }
        if self.is_occupied(piece.position) {
            return Err(occupied_error(piece.position));
        }
        self.pieces.insert(piece.id, piece);
        Ok(())
    }

    /// Move a living counter. Adjacency is the caller's concern.
    pub fn move_piece(&mut self, id: PieceId, destination: Position) -> ActionResult<()> {
        if !self.piece(id)?.alive {
            return Err(IllegalAction::new(
                ActionErrorKind::CapturedPiece,
                "Cannot move a captured counter",
            ));
        }
        if self.is_occupied(destination) {
            return Err(occupied_error(destination));
        }
        self.piece_mut(id)?.position = destination;
        Ok(())
    }

    /// Mark a counter captured. Its position is kept but stale.
    pub fn remove_piece(&mut self, id: PieceId) -> ActionResult<()> {
        self.piece_mut(id)?.alive = false;
        Ok(())
    }

    /// Set a counter's strength.
    pub fn set_strong(&mut self, id: PieceId, strong: bool) -> ActionResult<()> {
        self.piece_mut(id)?.strong = strong;
        Ok(())
    }

    /// Bring a captured counter back, always weak.
    pub fn resurrect_piece(&mut self, id: PieceId, position: Position) -> ActionResult<()> {
        if self.piece(id)?.alive {
            return Err(IllegalAction::new(ActionErrorKind::AlreadyAlive, "Piece is already alive"));
        }
        if self.is_occupied(position) {
            return Err(occupied_error(position));
        }
        let piece = self.piece_mut(id)?;
        piece.position = position;
        piece.alive = true;
        piece.strong = false;
        Ok(())
    }

    /// Independent value copy of the board.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

/// Rank 8 at the top, files along the bottom. Strong counters show an upper-case initial.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} |", row + 1)?;
            for col in 0..BOARD_SIZE {
                let label = Position::new(i32::from(row), i32::from(col))
                    .ok()
                    .and_then(|pos| self.piece_at(pos))
                    .map_or_else(|| " .".to_string(), Piece::label);
                write!(f, " {label}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "  {}", (b'A' + col) as char)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceType;

    fn pos(label: &str) -> Position {
        label.parse().unwrap()
    }

    fn south(kind: PieceType, at: &str) -> Piece {
        Piece::new(PlayerSide::South, kind, pos(at))
    }

    #[test]
    fn test_add_and_lookup() {
        let mut board = Board::new();
        board.add_piece(south(PieceType::Triangle, "B2")).unwrap();

        assert!(board.is_occupied(pos("B2")));
        assert_eq!(board.piece_at(pos("B2")).unwrap().kind(), PieceType::Triangle);
        assert_eq!(board.len(), 1);
        assert!(board.occupied().contains(&pos("B2")));
    }

    #[test]
    fn test_find_inconsistency() {
        let mut board = Board::new();
        board.add_piece(south(PieceType::Triangle, "B2")).unwrap();
        assert_eq!(board.find_inconsistency(), None);

        let mut stacked = board.clone();
        let rectangle = south(PieceType::Rectangle, "B2");
        stacked.pieces.insert(rectangle.id, rectangle);
        assert!(stacked.find_inconsistency().unwrap().contains("B2"));

        let mut mislabelled = board;
        let square = south(PieceType::Square, "D4");
        mislabelled.pieces.insert(PieceId::new(PlayerSide::North, PieceType::Square), square);
        assert!(mislabelled.find_inconsistency().is_some());
    }

    #[test]
    fn test_add_rejects_duplicate_and_occupied() {
        let mut board = Board::new();
        board.add_piece(south(PieceType::Triangle, "B2")).unwrap();

        let err = board.add_piece(south(PieceType::Triangle, "C3")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::DuplicateIdentifier);

        let err = board.add_piece(south(PieceType::Square, "B2")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::SquareOccupied);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::new();
        let tri = south(PieceType::Triangle, "B2");
        let sq = south(PieceType::Square, "C3");
        board.add_piece(tri.clone()).unwrap();
        board.add_piece(sq).unwrap();

        // No adjacency check at this level
        board.move_piece(tri.id, pos("H8")).unwrap();
        assert!(board.is_occupied(pos("H8")));
        assert!(!board.is_occupied(pos("B2")));

        let err = board.move_piece(tri.id, pos("C3")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::SquareOccupied);
    }

    #[test]
    fn test_captured_piece_is_invisible() {
        let mut board = Board::new();
        let tri = south(PieceType::Triangle, "B2");
        board.add_piece(tri.clone()).unwrap();
        board.remove_piece(tri.id).unwrap();

        assert!(!board.is_occupied(pos("B2")));
        assert!(board.piece_at(pos("B2")).is_none());
        assert_eq!(board.alive_pieces().count(), 0);
        assert_eq!(board.pieces().count(), 1);

        let err = board.move_piece(tri.id, pos("B3")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::CapturedPiece);

        // The square is free again
        board.add_piece(south(PieceType::Square, "B2")).unwrap();
    }

    #[test]
    fn test_resurrect_piece() {
        let mut board = Board::new();
        let mut tri = south(PieceType::Triangle, "B2");
        tri.strong = true;
        board.add_piece(tri.clone()).unwrap();
        board.add_piece(south(PieceType::Square, "C3")).unwrap();

        let err = board.resurrect_piece(tri.id, pos("A1")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::AlreadyAlive);

        board.remove_piece(tri.id).unwrap();
        let err = board.resurrect_piece(tri.id, pos("C3")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::SquareOccupied);

        board.resurrect_piece(tri.id, pos("A1")).unwrap();
        let back = board.get(tri.id).unwrap();
        assert!(back.alive);
        assert!(!back.strong);
        assert_eq!(back.position, pos("A1"));
    }

    #[test]
    fn test_unknown_piece() {
        let mut board = Board::new();
        let id = PieceId::new(PlayerSide::North, PieceType::Square);
        let err = board.move_piece(id, pos("A1")).unwrap_err();
        assert_eq!(err.kind, ActionErrorKind::UnknownPiece);
        assert_eq!(board.remove_piece(id).unwrap_err().kind, ActionErrorKind::UnknownPiece);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut board = Board::new();
        let tri = south(PieceType::Triangle, "B2");
        board.add_piece(tri.clone()).unwrap();

        let snapshot = board.copy();
        board.move_piece(tri.id, pos("B3")).unwrap();
        board.set_strong(tri.id, true).unwrap();

        let original = snapshot.get(tri.id).unwrap();
        assert_eq!(original.position, pos("B2"));
        assert!(!original.strong);
    }

    #[test]
    fn test_alignment() {
        let mut board = Board::new();
        board.add_piece(south(PieceType::Triangle, "B2")).unwrap();

        assert!(board.is_aligned(pos("B7")));
        assert!(board.is_aligned(pos("H2")));
        assert!(!board.is_aligned(pos("C3")));
    }

    #[test]
    fn test_render() {
        let mut board = Board::new();
        let mut tri = south(PieceType::Triangle, "A1");
        tri.strong = true;
        board.add_piece(tri).unwrap();
        board.add_piece(Piece::new(PlayerSide::North, PieceType::Square, pos("H8"))).unwrap();

        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("8 |"));
        assert!(lines[0].ends_with("Ns"));
        assert!(lines[7].starts_with("1 | ST"));
        assert!(lines[8].trim_start().starts_with("A"));
    }
}
