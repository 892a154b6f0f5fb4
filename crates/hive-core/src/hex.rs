//! Hex coordinate system using axial coordinates (q, r).
//!
//! The hive has no fixed board: pieces spread over an unbounded hex grid.
//! Axial coordinates keep neighbor arithmetic to a fixed table of six offsets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six directions out of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// (+1, 0)
    East,
    /// (+1, -1)
    NorthEast,
    /// (0, -1)
    NorthWest,
    /// (-1, 0)
    West,
    /// (-1, +1)
    SouthWest,
    /// (0, +1)
    SouthEast,
}

impl Direction {
    /// All directions, in the same order `HexCoord::neighbors` yields them
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Axial offset (dq, dr) of one step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (0, 1),
        }
    }

    /// The direction pointing the other way
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

/// Axial coordinate for a hex cell.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// The cell every match opens on
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six neighboring cells, in `Direction::ALL` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Direction::ALL.map(|dir| self.neighbor(dir))
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: Direction) -> HexCoord {
        let (dq, dr) = direction.offset();
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// Whether `other` is one of the six neighbors
    pub fn is_adjacent(&self, other: &HexCoord) -> bool {
        self.distance_to(other) == 1
    }

    /// Cells adjacent to both `self` and `other`.
    ///
    /// Two adjacent cells always share exactly two neighbors; these are the
    /// flanking cells that form a gate between them.
    pub fn shared_neighbors(&self, other: &HexCoord) -> Vec<HexCoord> {
        self.neighbors()
            .into_iter()
            .filter(|n| n.is_adjacent(other))
            .collect()
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
