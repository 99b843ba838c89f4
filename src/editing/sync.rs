//! Hooks and data for keeping a scene in step with the edited grid
//!
//! The engine never creates scene objects. After each mutation it tells a
//! `PresentationSync` which cells changed, and `placements` lists what a
//! host should spawn for a whole level.

use num_traits::Float;

use crate::math::coordinates::GridCoordinateMapper;
use crate::spatial::cell::{ColorId, GridCell, GridPosition};
use crate::spatial::grid::CellGrid;

/// Receiver of engine mutations
pub trait PresentationSync {
    /// Called with the post-edit state of every cell an operation wrote
    fn cells_changed(&mut self, cells: &[GridCell]);

    /// Called after the working copy was replaced wholesale (load or reset)
    fn grid_replaced(&mut self, grid: &CellGrid);
}

/// Sync target that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSync;

impl PresentationSync for NoSync {
    fn cells_changed(&mut self, _cells: &[GridCell]) {}

    fn grid_replaced(&mut self, _grid: &CellGrid) {}
}

/// Sync target that records notifications, for hosts that poll
#[derive(Debug, Clone, Default)]
pub struct RecordingSync {
    /// Cells reported since the last drain, in notification order
    pub changed: Vec<GridCell>,
    /// Number of wholesale replacements seen
    pub replacements: usize,
}

impl RecordingSync {
    /// Take the recorded cells, leaving the record empty
    pub fn drain(&mut self) -> Vec<GridCell> {
        std::mem::take(&mut self.changed)
    }
}

impl PresentationSync for RecordingSync {
    fn cells_changed(&mut self, cells: &[GridCell]) {
        self.changed.extend_from_slice(cells);
    }

    fn grid_replaced(&mut self, _grid: &CellGrid) {
        self.replacements += 1;
    }
}

/// Spawn instruction for one occupied, colored cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement<F> {
    /// Grid coordinate of the cell
    pub position: GridPosition,
    /// World position, lifted above the ground plane
    pub world: [F; 3],
    /// Palette slot of the item
    pub color_id: ColorId,
}

/// Spawn instructions for every occupied, colored cell in index order
///
/// Uncolored occupied cells are skipped, as are unoccupied cells with stale
/// color.
pub fn placements<F: Float>(
    grid: &CellGrid,
    mapper: &GridCoordinateMapper<F>,
    lift: F,
) -> Vec<ItemPlacement<F>> {
    grid.iter()
        .filter(|cell| cell.is_placed())
        .map(|cell| {
            let [x, y, z] = mapper.grid_to_world(cell.position);
            ItemPlacement {
                position: cell.position,
                world: [x, y + lift, z],
                color_id: cell.color_id,
            }
        })
        .collect()
}
