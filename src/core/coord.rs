//! Board Coordinates
//!
//! Shot targets on the 10x10 grid. The engine treats coordinates as opaque
//! targets: whether a coordinate intersects a ship is only ever established
//! by an accepted `ShotIntegrity` proof, never by inspecting the board.

use serde::{Serialize, Deserialize};

use crate::BOARD_SIZE;

/// A cell on the board.
///
/// Implements `Ord` for deterministic `BTreeSet`/`BTreeMap` storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column (0-based).
    pub x: u8,
    /// Row (0-based).
    pub y: u8,
}

impl Coordinate {
    /// Create a coordinate from column and row.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Is this coordinate on the board?
    #[inline]
    pub fn is_in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Flattened cell index (`y * BOARD_SIZE + x`).
    #[inline]
    pub fn to_index(&self) -> u16 {
        self.y as u16 * BOARD_SIZE as u16 + self.x as u16
    }

    /// Byte encoding used for nullifier derivation.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.x, self.y]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
