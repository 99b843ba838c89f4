//! Row-major cell grids and the canonical level store
//!
//! Cells are held in an `Array2` of shape `(height, width)`, so iteration
//! order matches the persisted index `y * width + x`. A grid starts out
//! unset and every access before initialization is reported rather than
//! indexing into missing storage.

use ndarray::Array2;

use crate::io::configuration::validate_dimension;
use crate::io::error::{LevelError, Result, out_of_bounds};
use crate::spatial::cell::{GridCell, GridPosition};

/// Rectangular grid of cell records shared by the store and working copies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    cells: Option<Array2<GridCell>>,
}

impl CellGrid {
    /// Grid of empty cells, each recording its own position
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the grid limit
    pub fn blank(width: usize, height: usize) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        let cells = Array2::from_shape_fn((height, width), |(row, col)| {
            GridCell::empty(GridPosition::new(col as i32, row as i32))
        });

        Ok(Self { cells: Some(cells) })
    }

    /// Build a grid from cells in `y * width + x` order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is invalid
    /// - The cell count is not `width * height`
    /// - A cell's recorded position differs from its index
    pub fn from_cells(width: usize, height: usize, cells: Vec<GridCell>) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        let count = cells.len();
        let cells =
            Array2::from_shape_vec((height, width), cells).map_err(|_shape_error| {
                LevelError::InvalidLevelData {
                    reason: format!(
                        "{count} cells do not fill a {width}x{height} grid ({} expected)",
                        width * height
                    ),
                }
            })?;

        if let Some(((row, col), cell)) = cells
            .indexed_iter()
            .find(|((row, col), cell)| cell.position != GridPosition::new(*col as i32, *row as i32))
        {
            return Err(LevelError::InvalidLevelData {
                reason: format!(
                    "cell at ({col}, {row}) records position ({}, {})",
                    cell.position.x, cell.position.y
                ),
            });
        }

        Ok(Self { cells: Some(cells) })
    }

    /// Whether cell storage has been allocated
    pub const fn is_initialized(&self) -> bool {
        self.cells.is_some()
    }

    /// Width in cells, zero while uninitialized
    pub fn width(&self) -> usize {
        self.cells.as_ref().map_or(0, Array2::ncols)
    }

    /// Height in cells, zero while uninitialized
    pub fn height(&self) -> usize {
        self.cells.as_ref().map_or(0, Array2::nrows)
    }

    /// Total number of cells, zero while uninitialized
    pub fn len(&self) -> usize {
        self.cells.as_ref().map_or(0, Array2::len)
    }

    /// Whether the grid holds no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Persisted index `y * width + x` of a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is uninitialized or `(x, y)` is outside it
    pub fn flat_index(&self, x: i32, y: i32) -> Result<usize> {
        let (row, col) = self.checked_index(x, y, "flat_index")?;
        Ok(row * self.width() + col)
    }

    /// Read a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is uninitialized or `(x, y)` is outside it
    pub fn get(&self, x: i32, y: i32) -> Result<GridCell> {
        let index = self.checked_index(x, y, "get_cell")?;
        self.cells
            .as_ref()
            .and_then(|cells| cells.get(index))
            .copied()
            .ok_or_else(|| out_of_bounds(x, y, self.width(), self.height()))
    }

    /// Overwrite a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is uninitialized or `(x, y)` is outside it
    pub fn set(&mut self, x: i32, y: i32, cell: GridCell) -> Result<()> {
        let index = self.checked_index(x, y, "set_cell")?;
        let (width, height) = (self.width(), self.height());
        let slot = self
            .cells
            .as_mut()
            .and_then(|cells| cells.get_mut(index))
            .ok_or_else(|| out_of_bounds(x, y, width, height))?;
        *slot = cell;
        Ok(())
    }

    /// Cells in `y * width + x` order
    pub fn iter(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().flat_map(|cells| cells.iter())
    }

    /// Set every cell to unoccupied and uncolored, keeping its position
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is uninitialized
    pub fn clear(&mut self) -> Result<()> {
        let cells = self
            .cells
            .as_mut()
            .ok_or(LevelError::UninitializedGrid { operation: "reset" })?;
        cells.map_inplace(|cell| *cell = GridCell::empty(cell.position));
        Ok(())
    }

    fn checked_index(&self, x: i32, y: i32, operation: &'static str) -> Result<(usize, usize)> {
        if !self.is_initialized() {
            return Err(LevelError::UninitializedGrid { operation });
        }
        if !self.contains(x, y) {
            return Err(out_of_bounds(x, y, self.width(), self.height()));
        }
        Ok((y as usize, x as usize))
    }
}

/// Canonical, durable grid of a level
///
/// Working copies synchronize with the store through explicit capture and
/// commit; only a hard reset writes to it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStore {
    grid: CellGrid,
}

impl GridStore {
    /// Store with no cells allocated
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing grid
    pub const fn from_grid(grid: CellGrid) -> Self {
        Self { grid }
    }

    /// Allocate cells for `width x height` unless the store already has them
    ///
    /// Existing data is kept when the dimensions already match. Returns
    /// whether storage was (re)allocated.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the grid limit
    pub fn initialize(&mut self, width: usize, height: usize) -> Result<bool> {
        if self.grid.is_initialized() && self.width() == width && self.height() == height {
            return Ok(false);
        }

        self.grid = CellGrid::blank(width, height)?;
        tracing::debug!(width, height, "allocated level grid");
        Ok(true)
    }

    /// Whether cells have been allocated
    pub const fn is_initialized(&self) -> bool {
        self.grid.is_initialized()
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the store is uninitialized or `(x, y)` is outside it
    pub fn get_cell(&self, x: i32, y: i32) -> Result<GridCell> {
        self.grid.get(x, y)
    }

    /// Overwrite a cell
    ///
    /// # Errors
    ///
    /// Returns an error if the store is uninitialized or `(x, y)` is outside it
    pub fn set_cell(&mut self, x: i32, y: i32, cell: GridCell) -> Result<()> {
        self.grid.set(x, y, cell)
    }

    /// Underlying cell grid
    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// Replace every cell and the dimensions in one step
    pub(crate) fn replace_grid(&mut self, grid: CellGrid) {
        self.grid = grid;
    }

    /// Clear every cell in place
    pub(crate) fn clear(&mut self) -> Result<()> {
        self.grid.clear()
    }
}
