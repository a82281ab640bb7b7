//! Player sides and per-side data storage.
//!
//! ## PlayerSide
//!
//! The two orientations on the board. SOUTH owns rows 1-4 and advances
//! towards rank 8; NORTH owns rows 5-8 and advances towards rank 1.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `PlayerSide`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Range};

use super::position::BOARD_SIZE;

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerSide {
    /// Starts on rows 1-4, forward is increasing row.
    South,
    /// Starts on rows 5-8, forward is decreasing row.
    North,
}

impl PlayerSide {
    /// Both sides, SOUTH first.
    pub const ALL: [PlayerSide; 2] = [PlayerSide::South, PlayerSide::North];

    /// Row delta of one step forward.
    #[must_use]
    pub const fn forward_step(self) -> i32 {
        match self {
            PlayerSide::South => 1,
            PlayerSide::North => -1,
        }
    }

    /// Rows on this side's half of the board (zero-based).
    #[must_use]
    pub const fn home_rows(self) -> Range<u8> {
        match self {
            PlayerSide::South => 0..BOARD_SIZE / 2,
            PlayerSide::North => BOARD_SIZE / 2..BOARD_SIZE,
        }
    }

    /// Check if `row` is one of this side's home rows.
    #[must_use]
    pub fn is_home_row(self, row: u8) -> bool {
        self.home_rows().contains(&row)
    }

    /// The far edge row, i.e. the opponent's back rank.
    #[must_use]
    pub const fn enemy_home_row(self) -> u8 {
        match self {
            PlayerSide::South => BOARD_SIZE - 1,
            PlayerSide::North => 0,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerSide::South => PlayerSide::North,
            PlayerSide::North => PlayerSide::South,
        }
    }

    /// Single-letter prefix used in piece identifiers.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            PlayerSide::South => 'S',
            PlayerSide::North => 'N',
        }
    }

    /// Parse the identifier prefix back into a side.
    #[must_use]
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'S' => Some(PlayerSide::South),
            'N' => Some(PlayerSide::North),
            _ => None,
        }
    }

    /// Upper-case name as shown in status summaries.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlayerSide::South => "SOUTH",
            PlayerSide::North => "NORTH",
        }
    }
}

impl std::fmt::Display for PlayerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use sa_jin::core::{PlayerSide, SideMap};
///
/// let mut captures: SideMap<u8> = SideMap::with_value(0);
/// captures[PlayerSide::North] += 1;
///
/// assert_eq!(captures[PlayerSide::South], 0);
/// assert_eq!(captures[PlayerSide::North], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    south: T,
    north: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerSide) -> T) -> Self {
        Self {
            south: factory(PlayerSide::South),
            north: factory(PlayerSide::North),
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            south: value.clone(),
            north: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: PlayerSide) -> &T {
        match side {
            PlayerSide::South => &self.south,
            PlayerSide::North => &self.north,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: PlayerSide) -> &mut T {
        match side {
            PlayerSide::South => &mut self.south,
            PlayerSide::North => &mut self.north,
        }
    }

    /// Iterate over (PlayerSide, &T) pairs, SOUTH first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSide, &T)> {
        [(PlayerSide::South, &self.south), (PlayerSide::North, &self.north)].into_iter()
    }

    /// Check if both entries satisfy a predicate.
    pub fn all(&self, predicate: impl Fn(&T) -> bool) -> bool {
        predicate(&self.south) && predicate(&self.north)
    }
}

impl<T> Index<PlayerSide> for SideMap<T> {
    type Output = T;

    fn index(&self, side: PlayerSide) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<PlayerSide> for SideMap<T> {
    fn index_mut(&mut self, side: PlayerSide) -> &mut Self::Output {
        self.get_mut(side)
    }
}
