//! Rule violations.
//!
//! Every operation that can be refused returns [`ActionResult`]. There is a
//! single failure type, [`IllegalAction`], carrying a human-readable reason
//! and a machine-readable [`ActionErrorKind`]. Callers that need to branch
//! should prefer the query methods on `GameState`; the kind is there for
//! logging, tests and front ends that want to highlight the offending input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable category of a refused action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionErrorKind {
    /// A row or column outside `0..8`.
    OutOfBounds,
    /// Algebraic text that does not name a square.
    InvalidCoordinate,
    /// No piece with this identifier exists.
    UnknownPiece,
    /// A piece with this identifier was already registered.
    DuplicateIdentifier,
    /// The target square holds a living piece.
    SquareOccupied,
    /// The piece has been captured.
    CapturedPiece,
    /// The piece is already on the board.
    AlreadyAlive,
    /// The operation is not available in the current phase.
    WrongPhase,
    /// It is not this side's turn (or resurrection).
    WrongPlayer,
    /// The piece belongs to the other side.
    NotOwner,
    /// This piece type was already placed by this side.
    AlreadyPlaced,
    /// The square is outside the side's home rows.
    OutsideHomeRows,
    /// The square shares a row or column with a living piece.
    Aligned,
    /// This side already designated its strong pieces.
    AlreadyAssigned,
    /// The side does not have all of its pieces on the board.
    IncompleteSide,
    /// Not exactly two distinct pieces were designated strong.
    StrongCount,
    /// A move to the square the piece already stands on.
    NullMove,
    /// A move further than one square.
    IllegalDistance,
    /// The strength swap names the same piece twice or a foreign piece.
    InvalidSwap,
    /// The side would be left with fewer than two strong pieces.
    InsufficientStrength,
    /// A resurrection must be resolved before play continues.
    ResurrectionPending,
    /// `complete_resurrection` without a pending resurrection.
    NoPendingResurrection,
    /// A resurrection square was supplied but no piece can return.
    NotEligible,
    /// A scenario describes an impossible position.
    InvalidSetup,
}

/// A refused action. The engine state is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct IllegalAction {
    /// Category of the violation.
    pub kind: ActionErrorKind,
    /// Human-readable explanation.
    pub reason: String,
}

impl IllegalAction {
    /// Create a new illegal action error.
    #[must_use]
    pub fn new(kind: ActionErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result alias used by every engine operation.
pub type ActionResult<T> = Result<T, IllegalAction>;

/// Failure to encode or decode a saved session.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(String),
}
