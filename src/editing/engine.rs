//! Interactive editing session over one level
//!
//! The engine owns the level's `GridStore` and a single `LevelWorkingCopy`.
//! Edits land in the working copy; `save` commits it to the store and `load`
//! throws it away and captures the store again. `reset_all` is the one
//! operation that writes both directly.

use crate::editing::palette::{ColorPalette, Rgba};
use crate::editing::sync::{NoSync, PresentationSync};
use crate::io::configuration::EMPTY_COLOR;
use crate::io::error::{LevelError, Result};
use crate::spatial::cell::{ColorId, GridCell, GridPosition};
use crate::spatial::footprint::{ItemSize, Rotation, ShapeOffsetSet, resolve};
use crate::spatial::grid::GridStore;
use crate::spatial::working_copy::LevelWorkingCopy;

/// Lifecycle of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No working copy captured yet
    Uninitialized,
    /// Working copy freshly captured or hard reset, equal to the store
    Initialized,
    /// Working copy holds edits not yet saved
    Dirty,
    /// Working copy saved to the store
    Committed,
    /// Working copy recaptured from the store, unsaved edits discarded
    Reverted,
}

/// Item selection applied by `apply_brush`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brush {
    /// Footprint variant
    pub size: ItemSize,
    /// Rotation, passed through to footprint resolution
    pub rotation: Rotation,
    /// Palette slot written to every covered cell
    pub color: ColorId,
}

impl Brush {
    /// Display color of the brush's slot, `EMPTY_COLOR` when the palette lacks it
    pub fn display_color(&self, palette: &impl ColorPalette) -> Rgba {
        palette.display_color_or_empty(self.color)
    }
}

/// Editing session over a level store
#[derive(Debug)]
pub struct GridEditingEngine<S = NoSync> {
    store: GridStore,
    working: Option<LevelWorkingCopy>,
    state: EditState,
    sync: S,
}

impl GridEditingEngine<NoSync> {
    /// Session over `store` without a presentation sync target
    pub const fn new(store: GridStore) -> Self {
        Self::with_sync(store, NoSync)
    }
}

impl<S: PresentationSync> GridEditingEngine<S> {
    /// Session over `store` reporting mutations to `sync`
    pub const fn with_sync(store: GridStore, sync: S) -> Self {
        Self {
            store,
            working: None,
            state: EditState::Uninitialized,
            sync,
        }
    }

    /// Size the store to `width x height` if needed and capture a working copy
    ///
    /// A store that already has these dimensions keeps its cells.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds the grid limit
    pub fn open(&mut self, width: usize, height: usize) -> Result<()> {
        let reallocated = self.store.initialize(width, height)?;
        self.load()?;
        tracing::info!(width, height, reallocated, "level opened");
        Ok(())
    }

    /// Discard the working copy and capture the store again
    ///
    /// # Errors
    ///
    /// Returns an error if the store has not been initialized
    pub fn load(&mut self) -> Result<()> {
        let working = LevelWorkingCopy::capture_from(&self.store)?;
        self.sync.grid_replaced(working.grid());
        self.working = Some(working);
        self.state = match self.state {
            EditState::Uninitialized => EditState::Initialized,
            _ => EditState::Reverted,
        };
        tracing::info!("level data loaded");
        Ok(())
    }

    /// Commit the working copy to the store
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn save(&mut self) -> Result<()> {
        let working = self
            .working
            .as_mut()
            .ok_or(LevelError::UninitializedGrid { operation: "save" })?;
        working.commit_to(&mut self.store);
        self.state = EditState::Committed;
        tracing::info!(
            width = self.store.width(),
            height = self.store.height(),
            "level data saved"
        );
        Ok(())
    }

    /// Flip occupancy of every in-bounds cell of an item's footprint
    ///
    /// Each covered cell also takes `color`, whether it was switched on or
    /// off. Footprint cells outside the grid are skipped, so an item at the
    /// edge is placed partially. Returns the cells that were written.
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn toggle_occupancy(
        &mut self,
        anchor_x: i32,
        anchor_y: i32,
        size: ItemSize,
        rotation: Rotation,
        color: ColorId,
    ) -> Result<Vec<GridPosition>> {
        self.toggle_footprint(anchor_x, anchor_y, resolve(size, rotation), color)
    }

    /// Toggle an already resolved footprint anchored at `(anchor_x, anchor_y)`
    ///
    /// Same semantics as `toggle_occupancy`; used when the footprint comes
    /// from a raw size index rather than an `ItemSize`.
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn toggle_footprint(
        &mut self,
        anchor_x: i32,
        anchor_y: i32,
        footprint: ShapeOffsetSet,
        color: ColorId,
    ) -> Result<Vec<GridPosition>> {
        let working = self.working.as_mut().ok_or(LevelError::UninitializedGrid {
            operation: "toggle_occupancy",
        })?;

        let mut written = Vec::with_capacity(footprint.len());
        let mut changed = Vec::with_capacity(footprint.len());

        for target in footprint.cells_at(GridPosition::new(anchor_x, anchor_y)) {
            if !working.contains(target.x, target.y) {
                continue;
            }
            let mut cell = working.get_cell(target.x, target.y)?;
            cell.is_occupied = !cell.is_occupied;
            cell.color_id = color;
            working.set_cell(target.x, target.y, cell)?;
            written.push(target);
            changed.push(cell);
        }

        tracing::debug!(
            anchor_x,
            anchor_y,
            cells = footprint.len(),
            %color,
            written = written.len(),
            "toggled footprint"
        );
        self.mark_changed(&changed);
        Ok(written)
    }

    /// Toggle the brush's footprint at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn apply_brush(&mut self, x: i32, y: i32, brush: &Brush) -> Result<Vec<GridPosition>> {
        self.toggle_occupancy(x, y, brush.size, brush.rotation, brush.color)
    }

    /// Set a cell's color, leaving its occupancy as is
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured or `(x, y)` is
    /// outside the grid
    pub fn set_cell_color(&mut self, x: i32, y: i32, color: ColorId) -> Result<()> {
        let working = self.working.as_mut().ok_or(LevelError::UninitializedGrid {
            operation: "set_cell_color",
        })?;

        let mut cell = working.get_cell(x, y)?;
        cell.color_id = color;
        working.set_cell(x, y, cell)?;

        tracing::debug!(x, y, %color, "painted cell");
        self.mark_changed(&[cell]);
        Ok(())
    }

    /// Clear every cell of both the working copy and the store
    ///
    /// Positions are kept. This bypasses commit and capture: the store is
    /// written directly and the session returns to a clean baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn reset_all(&mut self) -> Result<()> {
        let working = self
            .working
            .as_mut()
            .ok_or(LevelError::UninitializedGrid { operation: "reset" })?;

        working.clear()?;
        self.store.clear()?;
        self.sync.grid_replaced(working.grid());
        self.state = EditState::Initialized;
        tracing::info!("grid reset");
        Ok(())
    }

    /// Display color of a cell: its palette color when occupied, else `EMPTY_COLOR`
    ///
    /// A slot missing from the palette also yields `EMPTY_COLOR`.
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured or `(x, y)` is
    /// outside the grid
    pub fn query_color(&self, x: i32, y: i32, palette: &impl ColorPalette) -> Result<Rgba> {
        let cell = self.cell(x, y)?;
        Ok(if cell.is_occupied {
            palette.display_color_or_empty(cell.color_id)
        } else {
            EMPTY_COLOR
        })
    }

    /// Read a cell of the working copy
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured or `(x, y)` is
    /// outside the grid
    pub fn cell(&self, x: i32, y: i32) -> Result<GridCell> {
        self.working_copy()?.get_cell(x, y)
    }

    /// Occupied cells of the working copy in index order
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn occupied_cells(&self) -> Result<Vec<GridCell>> {
        Ok(self
            .working_copy()?
            .cells()
            .filter(|cell| cell.is_occupied)
            .copied()
            .collect())
    }

    /// Working copy width in cells, zero before the first capture
    pub fn width(&self) -> usize {
        self.working.as_ref().map_or(0, LevelWorkingCopy::width)
    }

    /// Working copy height in cells, zero before the first capture
    pub fn height(&self) -> usize {
        self.working.as_ref().map_or(0, LevelWorkingCopy::height)
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EditState {
        self.state
    }

    /// Whether the working copy holds unsaved edits
    pub fn is_dirty(&self) -> bool {
        self.working.as_ref().is_some_and(LevelWorkingCopy::is_dirty)
    }

    /// Current working copy
    ///
    /// # Errors
    ///
    /// Returns an error if no working copy has been captured
    pub fn working_copy(&self) -> Result<&LevelWorkingCopy> {
        self.working.as_ref().ok_or(LevelError::UninitializedGrid {
            operation: "read working copy",
        })
    }

    /// Backing store as last saved or reset
    pub const fn store(&self) -> &GridStore {
        &self.store
    }

    /// Presentation sync target
    pub const fn sync(&self) -> &S {
        &self.sync
    }

    /// Mutable presentation sync target
    pub const fn sync_mut(&mut self) -> &mut S {
        &mut self.sync
    }

    /// End the session, returning the store; unsaved edits are dropped
    pub fn into_store(self) -> GridStore {
        self.store
    }

    fn mark_changed(&mut self, cells: &[GridCell]) {
        if cells.is_empty() {
            return;
        }
        self.state = EditState::Dirty;
        self.sync.cells_changed(cells);
    }
}
