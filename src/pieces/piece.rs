//! Counters and their identities.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{ActionErrorKind, IllegalAction, PlayerSide, Position};

/// Shape of a counter; decides its attack range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    /// Forward widening cone.
    Triangle,
    /// Straight file in both directions.
    Rectangle,
    /// Compact neighbourhood.
    Square,
}

impl PieceType {
    /// All three types, in placement order.
    pub const ALL: [PieceType; 3] = [PieceType::Triangle, PieceType::Rectangle, PieceType::Square];

    /// Lower-case name used in identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PieceType::Triangle => "triangle",
            PieceType::Rectangle => "rectangle",
            PieceType::Square => "square",
        }
    }

    /// Parse a full name or its first letter.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "triangle" | "t" => Some(PieceType::Triangle),
            "rectangle" | "r" => Some(PieceType::Rectangle),
            "square" | "s" => Some(PieceType::Square),
            _ => None,
        }
    }
}

impl std::fmt::Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a counter, derived from its owner and type.
///
/// Each side has exactly one counter of each type, so the pair is unique.
///
/// ```
/// use sa_jin::core::PlayerSide;
/// use sa_jin::pieces::{PieceId, PieceType};
///
/// let id = PieceId::new(PlayerSide::South, PieceType::Triangle);
/// assert_eq!(id.to_string(), "S_triangle");
/// assert_eq!("S_triangle".parse::<PieceId>().unwrap(), id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId {
    pub owner: PlayerSide,
    pub kind: PieceType,
}

impl PieceId {
    #[must_use]
    pub const fn new(owner: PlayerSide, kind: PieceType) -> Self {
        Self { owner, kind }
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.owner.prefix(), self.kind.name())
    }
}

impl FromStr for PieceId {
    type Err = IllegalAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown =
            || IllegalAction::new(ActionErrorKind::UnknownPiece, format!("Unknown counter {s:?}"));

        let (prefix, name) = s.trim().split_once('_').ok_or_else(unknown)?;
        let mut prefix_chars = prefix.chars();
        let owner = match (prefix_chars.next(), prefix_chars.next()) {
            (Some(c), None) => PlayerSide::from_prefix(c).ok_or_else(unknown)?,
            _ => return Err(unknown()),
        };
        let kind = PieceType::from_name(name).ok_or_else(unknown)?;
        Ok(Self::new(owner, kind))
    }
}

/// A counter and its current status.
///
/// Captured counters keep their record (and last square) so they can be
/// resurrected; their `position` is stale while `alive` is false.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub position: Position,
    /// Strong counters attack and can be captured.
    pub strong: bool,
    pub alive: bool,
}

impl Piece {
    /// A freshly placed, weak, living counter.
    #[must_use]
    pub fn new(owner: PlayerSide, kind: PieceType, position: Position) -> Self {
        Self {
            id: PieceId::new(owner, kind),
            position,
            strong: false,
            alive: true,
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerSide {
        self.id.owner
    }

    #[must_use]
    pub fn kind(&self) -> PieceType {
        self.id.kind
    }

    /// Two-letter board label: side prefix plus type initial, upper case when strong.
    #[must_use]
    pub fn label(&self) -> String {
        let initial = self.kind().name().chars().next().unwrap_or('?');
        let initial = if self.strong {
            initial.to_ascii_uppercase()
        } else {
            initial
        };
        format!("{}{}", self.owner().prefix(), initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_names() {
        for kind in PieceType::ALL {
            assert_eq!(PieceType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PieceType::from_name("R"), Some(PieceType::Rectangle));
        assert_eq!(PieceType::from_name("hexagon"), None);
    }

    #[test]
    fn test_piece_id_parse() {
        let id: PieceId = "N_square".parse().unwrap();
        assert_eq!(id, PieceId::new(PlayerSide::North, PieceType::Square));

        for bad in ["", "N", "X_square", "N_hexagon", "NS_square"] {
            let err = bad.parse::<PieceId>().unwrap_err();
            assert_eq!(err.kind, ActionErrorKind::UnknownPiece);
        }
    }

    #[test]
    fn test_new_piece_is_weak_and_alive() {
        let piece = Piece::new(PlayerSide::South, PieceType::Rectangle, "D2".parse().unwrap());
        assert!(!piece.strong);
        assert!(piece.alive);
        assert_eq!(piece.id.to_string(), "S_rectangle");
    }

    #[test]
    fn test_label() {
        let mut piece = Piece::new(PlayerSide::North, PieceType::Triangle, "A8".parse().unwrap());
        assert_eq!(piece.label(), "Nt");
        piece.strong = true;
        assert_eq!(piece.label(), "NT");
    }
}
