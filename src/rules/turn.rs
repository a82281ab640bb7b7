//! Turn requests, outcomes and history records.
//!
//! A turn in active play is one `TurnRequest`: the counter to move, its
//! destination, an optional strength swap and an optional resurrection
//! square. The engine answers with a `TurnResult` and appends a
//! `TurnRecord` to the match history.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerSide, Position};
use crate::pieces::{Piece, PieceId};

/// One active-play turn.
///
/// ## Example
///
/// ```
/// use sa_jin::core::PlayerSide;
/// use sa_jin::pieces::{PieceId, PieceType};
/// use sa_jin::rules::TurnRequest;
///
/// let tri = PieceId::new(PlayerSide::South, PieceType::Triangle);
/// let rect = PieceId::new(PlayerSide::South, PieceType::Rectangle);
///
/// let turn = TurnRequest::new(tri, "B3".parse().unwrap()).with_swap(tri, rect);
/// assert_eq!(turn.swap, Some((tri, rect)));
/// assert!(turn.resurrect_at.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Counter to move.
    pub piece: PieceId,
    /// Adjacent, empty square to move to.
    pub destination: Position,
    /// Exchange the strengths of two of the mover's counters after moving.
    pub swap: Option<(PieceId, PieceId)>,
    /// Where to return a captured counter if the move makes it eligible.
    pub resurrect_at: Option<Position>,
}

impl TurnRequest {
    /// A plain move.
    #[must_use]
    pub fn new(piece: PieceId, destination: Position) -> Self {
        Self {
            piece,
            destination,
            swap: None,
            resurrect_at: None,
        }
    }

    /// Add a strength swap.
    #[must_use]
    pub fn with_swap(mut self, first: PieceId, second: PieceId) -> Self {
        self.swap = Some((first, second));
        self
    }

    /// Resolve a resurrection in the same call.
    #[must_use]
    pub fn with_resurrection(mut self, position: Position) -> Self {
        self.resurrect_at = Some(position);
        self
    }
}

/// Outcome of an accepted turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    /// Opposing counters captured this turn, as they are after capture.
    pub captures: SmallVec<[Piece; 3]>,
    /// The mover's counter that came back this turn.
    pub resurrected: Option<Piece>,
    /// The move made a resurrection available but no square was given.
    /// The mover must call `complete_resurrection` before play continues.
    pub needs_resurrection: bool,
}

/// What happened in a history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// An accepted `take_turn`.
    Move {
        request: TurnRequest,
        captured: SmallVec<[PieceId; 3]>,
    },
    /// A resurrection resolved through `complete_resurrection`.
    Resurrection { piece: PieceId, position: Position },
}

/// Entry in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Active-play turn number, starting at 1.
    pub turn: u32,
    /// Side that acted.
    pub side: PlayerSide,
    pub kind: RecordKind,
}
