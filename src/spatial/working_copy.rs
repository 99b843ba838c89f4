//! In-progress editing buffer captured from, and committed back to, a store

use bitvec::prelude::{BitVec, bitvec};

use crate::io::error::{LevelError, Result};
use crate::spatial::cell::{GridCell, GridPosition};
use crate::spatial::grid::{CellGrid, GridStore};

/// Mutable snapshot of a `GridStore`, decoupled from it until committed
///
/// Tracks which cells were written since the last capture or commit so
/// callers can tell a clean buffer from one holding unsaved edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelWorkingCopy {
    grid: CellGrid,
    dirty: BitVec,
}

impl LevelWorkingCopy {
    /// Deep copy of the store's dimensions and cells
    ///
    /// # Errors
    ///
    /// Returns an error if the store has not been initialized
    pub fn capture_from(store: &GridStore) -> Result<Self> {
        if !store.is_initialized() {
            return Err(LevelError::UninitializedGrid {
                operation: "capture",
            });
        }

        let grid = store.grid().clone();
        let dirty = bitvec![0; grid.len()];
        Ok(Self { grid, dirty })
    }

    /// Overwrite every cell of `store` with this copy and clear the dirty mask
    ///
    /// This is a full replacement: the store takes this copy's dimensions,
    /// and anything written to the store since capture is lost.
    pub fn commit_to(&mut self, store: &mut GridStore) {
        store.replace_grid(self.grid.clone());
        self.dirty.fill(false);
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.grid.contains(x, y)
    }

    /// Read a cell
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` is outside the grid
    pub fn get_cell(&self, x: i32, y: i32) -> Result<GridCell> {
        self.grid.get(x, y)
    }

    /// Overwrite a cell and mark it dirty
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` is outside the grid
    pub fn set_cell(&mut self, x: i32, y: i32, cell: GridCell) -> Result<()> {
        let index = self.grid.flat_index(x, y)?;
        self.grid.set(x, y, cell)?;
        self.dirty.set(index, true);
        Ok(())
    }

    /// Cells in `y * width + x` order
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.grid.iter()
    }

    /// Underlying cell grid
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Whether any cell was written since the last capture or commit
    pub fn is_dirty(&self) -> bool {
        self.dirty.any()
    }

    /// Positions of cells written since the last capture or commit, in index order
    pub fn dirty_positions(&self) -> Vec<GridPosition> {
        let width = self.width();
        self.dirty
            .iter_ones()
            .map(|index| GridPosition::new((index % width) as i32, (index / width) as i32))
            .collect()
    }

    /// Clear every cell and the dirty mask
    ///
    /// Part of the hard reset, which writes the store and the working copy
    /// directly instead of going through commit.
    pub(crate) fn clear(&mut self) -> Result<()> {
        self.grid.clear()?;
        self.dirty.fill(false);
        Ok(())
    }
}
