//! Item footprints: which cells a placed item covers relative to its anchor
//!
//! Each item size has a fixed offset table. The rotation selected in the
//! editor is accepted alongside the size but does not yet transform the
//! offsets.

use crate::spatial::cell::GridPosition;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const SINGLE: &[[i32; 2]] = &[[0, 0]];
// L-tromino despite the size name
const TWO_BY_TWO: &[[i32; 2]] = &[[0, 0], [1, 0], [0, 1]];
// T-tetromino
const THREE_BY_TWO: &[[i32; 2]] = &[[0, 0], [1, 0], [2, 0], [1, 1]];

/// Selectable item size variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ItemSize {
    /// Single cell
    #[default]
    OneByOne,
    /// Three-cell L shape
    TwoByTwo,
    /// Four-cell T shape
    ThreeByTwo,
}

impl ItemSize {
    /// All size variants in prefab index order
    pub const ALL: [Self; 3] = [Self::OneByOne, Self::TwoByTwo, Self::ThreeByTwo];

    /// Size for a raw prefab index, `None` when the index is unknown
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Item rotation about the x and z axes
///
/// Carried through placement so callers can keep the editor's selection,
/// but no footprint currently depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation {
    /// Rotation about the x axis
    pub x: i32,
    /// Rotation about the z axis
    pub z: i32,
}

impl Rotation {
    /// Create a rotation from its two axis components
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Ordered, non-empty set of `(dx, dy)` offsets from an anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeOffsetSet(&'static [[i32; 2]]);

impl ShapeOffsetSet {
    /// Offsets in table order
    pub const fn offsets(&self) -> &'static [[i32; 2]] {
        self.0
    }

    /// Number of cells covered
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; every footprint covers at least its anchor
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Absolute cells covered when anchored at `anchor`, in offset order
    pub fn cells_at(&self, anchor: GridPosition) -> impl Iterator<Item = GridPosition> + '_ {
        self.0.iter().map(move |&offset| anchor.offset(offset))
    }
}

/// Offsets covered by an item of `size`
///
/// `_rotation` is part of the interface for rotation-aware footprints; the
/// current tables are rotation independent.
pub const fn resolve(size: ItemSize, _rotation: Rotation) -> ShapeOffsetSet {
    match size {
        ItemSize::OneByOne => ShapeOffsetSet(SINGLE),
        ItemSize::TwoByTwo => ShapeOffsetSet(TWO_BY_TWO),
        ItemSize::ThreeByTwo => ShapeOffsetSet(THREE_BY_TWO),
    }
}

/// Offsets for a raw prefab index, falling back to a single cell for unknown sizes
pub fn resolve_index(index: usize, rotation: Rotation) -> ShapeOffsetSet {
    ItemSize::from_index(index).map_or(ShapeOffsetSet(SINGLE), |size| resolve(size, rotation))
}
