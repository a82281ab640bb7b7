//! Attack ranges.
//!
//! Each shape projects a set of covered squares from its position. The
//! functions are pure: the same square, owner and occupancy always give the
//! same set. `occupied` holds every living counter's square, including the
//! attacker itself and its allies.
//!
//! | Shape | Range | Blocking |
//! |-------|-------|----------|
//! | Triangle | forward cone, `2d + 1` wide at distance `d` | per column |
//! | Rectangle | own file, forward and backward | first counter, inclusive |
//! | Square | 5x5 block minus its four corners | none |

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::{PlayerSide, Position, BOARD_SIZE};

use super::piece::{Piece, PieceType};

/// Squares covered from a single position.
pub type SquareSet = FxHashSet<Position>;

/// Number of distinct strong attackers covering each square.
pub type CoverageMap = FxHashMap<Position, u8>;

/// Outer radius of the square counter's neighbourhood.
const SQUARE_RADIUS: i32 = 2;

/// Forward cone. A counter inside the cone blocks the rest of its column.
#[must_use]
pub fn triangle_attacks(origin: Position, owner: PlayerSide, occupied: &SquareSet) -> SquareSet {
    let mut covered = SquareSet::default();
    let mut blocked_cols = [false; BOARD_SIZE as usize];
    let step = owner.forward_step();

    for distance in 1..i32::from(BOARD_SIZE) {
        // Off the far edge ends the cone; columns clip individually below.
        if origin.translate(distance * step, 0).is_none() {
            break;
        }
        for d_col in -distance..=distance {
            let Some(target) = origin.translate(distance * step, d_col) else {
                continue;
            };
            let col = usize::from(target.col());
            if blocked_cols[col] {
                continue;
            }
            covered.insert(target);
            if occupied.contains(&target) {
                blocked_cols[col] = true;
            }
        }
    }

    covered
}

/// Both directions along the file, each ray stopping on the first counter.
#[must_use]
pub fn rectangle_attacks(origin: Position, owner: PlayerSide, occupied: &SquareSet) -> SquareSet {
    let mut covered = SquareSet::default();
    let step = owner.forward_step();

    for direction in [step, -step] {
        let mut current = origin;
        while let Some(target) = current.translate(direction, 0) {
            covered.insert(target);
            if occupied.contains(&target) {
                break;
            }
            current = target;
        }
    }

    covered
}

/// Local neighbourhood; ignores occupancy.
#[must_use]
pub fn square_attacks(origin: Position) -> SquareSet {
    let mut covered = SquareSet::default();

    for d_row in -SQUARE_RADIUS..=SQUARE_RADIUS {
        for d_col in -SQUARE_RADIUS..=SQUARE_RADIUS {
            if (d_row == 0 && d_col == 0) || d_row.abs() + d_col.abs() > SQUARE_RADIUS + 1 {
                continue;
            }
            if let Some(target) = origin.translate(d_row, d_col) {
                covered.insert(target);
            }
        }
    }

    covered
}

/// Squares covered by a counter of `kind`, ignoring its strength.
#[must_use]
pub fn attacks_for(
    kind: PieceType,
    origin: Position,
    owner: PlayerSide,
    occupied: &SquareSet,
) -> SquareSet {
    match kind {
        PieceType::Triangle => triangle_attacks(origin, owner, occupied),
        PieceType::Rectangle => rectangle_attacks(origin, owner, occupied),
        PieceType::Square => square_attacks(origin),
    }
}

impl Piece {
    /// Squares this counter covers this turn. Weak or captured counters cover nothing.
    #[must_use]
    pub fn coverage(&self, occupied: &SquareSet) -> SquareSet {
        if !self.strong || !self.alive {
            return SquareSet::default();
        }
        attacks_for(self.kind(), self.position, self.owner(), occupied)
    }
}

/// Sum the coverage of every strong, living counter in `attackers`.
#[must_use]
pub fn coverage_map<'a>(
    attackers: impl IntoIterator<Item = &'a Piece>,
    occupied: &SquareSet,
) -> CoverageMap {
    let mut coverage = CoverageMap::default();
    for piece in attackers {
        for target in piece.coverage(occupied) {
            *coverage.entry(target).or_insert(0) += 1;
        }
    }
    coverage
}
