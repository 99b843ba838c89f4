//! Per-cell records stored in grids and level files

use serde::{Deserialize, Serialize};
use std::fmt;

/// Palette slot identifier carried by every cell
///
/// Slot 0 is `NONE`; slots `1..` are palette colors. The raw value is what
/// level files persist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(u16);

impl ColorId {
    /// No color assigned
    pub const NONE: Self = Self(0);

    /// Create a color identifier from its raw slot value
    pub const fn new(slot: u16) -> Self {
        Self(slot)
    }

    /// Raw slot value as persisted
    pub const fn slot(self) -> u16 {
        self.0
    }

    /// Whether this is the `NONE` slot
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "none")
        } else {
            write!(f, "C{}", self.0)
        }
    }
}

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridPosition {
    /// Create a position from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by a relative offset, saturating at the `i32` range
    pub const fn offset(self, offset: [i32; 2]) -> Self {
        let [dx, dy] = offset;
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Occupancy and color record for one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Whether an item covers this cell
    pub is_occupied: bool,
    /// Palette slot of the covering item
    ///
    /// Toggling a cell off does not clear this, so unoccupied cells may keep
    /// the last color written to them.
    pub color_id: ColorId,
    /// Coordinate of the cell in its grid
    pub position: GridPosition,
}

impl GridCell {
    /// Unoccupied, uncolored cell at the given position
    pub const fn empty(position: GridPosition) -> Self {
        Self {
            is_occupied: false,
            color_id: ColorId::NONE,
            position,
        }
    }

    /// Occupied and colored, the only state the placement collaborator consumes
    pub const fn is_placed(&self) -> bool {
        self.is_occupied && !self.color_id.is_none()
    }
}
