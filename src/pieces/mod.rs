//! Counters and their attack ranges.
//!
//! - `piece`: `PieceType`, `PieceId`, `Piece`
//! - `attacks`: per-shape coverage and attacker counting

pub mod piece;
pub mod attacks;

pub use piece::{Piece, PieceId, PieceType};
pub use attacks::{
    attacks_for, coverage_map, rectangle_attacks, square_attacks, triangle_attacks, CoverageMap,
    SquareSet,
};
