//! Level and palette assets stored as RON files
//!
//! A level file holds the grid dimensions and every cell in `y * width + x`
//! order. Files are written pretty-printed so designers can diff them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::editing::palette::Palette;
use crate::io::error::{LevelError, Result, with_path};
use crate::spatial::cell::GridCell;
use crate::spatial::grid::{CellGrid, GridStore};

/// Persisted form of a level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelAsset {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Cells in `y * width + x` order
    pub cells: Vec<GridCell>,
}

impl GridStore {
    /// Rebuild a store from its persisted form
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the cell count is
    /// not `width * height`
    pub fn from_asset(asset: LevelAsset) -> Result<Self> {
        let grid = CellGrid::from_cells(asset.width, asset.height, asset.cells)?;
        Ok(Self::from_grid(grid))
    }

    /// Persisted form of this store
    ///
    /// # Errors
    ///
    /// Returns an error if the store has not been initialized
    pub fn to_asset(&self) -> Result<LevelAsset> {
        if !self.is_initialized() {
            return Err(LevelError::UninitializedGrid {
                operation: "serialize level",
            });
        }
        Ok(LevelAsset {
            width: self.width(),
            height: self.height(),
            cells: self.grid().iter().copied().collect(),
        })
    }
}

/// Read a level file into a store
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The contents are not a valid level asset
/// - The cell count does not match the dimensions
pub fn load_level(path: &Path) -> Result<GridStore> {
    let asset: LevelAsset = read_ron(path)?;
    let store = GridStore::from_asset(asset)?;
    tracing::info!(
        path = %path.display(),
        width = store.width(),
        height = store.height(),
        "level file read"
    );
    Ok(store)
}

/// Write a store to a level file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the store is uninitialized or the file cannot be written
pub fn save_level(store: &GridStore, path: &Path) -> Result<()> {
    write_ron(&store.to_asset()?, path)?;
    tracing::info!(path = %path.display(), "level file written");
    Ok(())
}

/// Read a palette file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid palette
pub fn load_palette(path: &Path) -> Result<Palette> {
    let palette: Palette = read_ron(path)?;
    tracing::debug!(
        path = %path.display(),
        entries = palette.entries.len(),
        "palette read"
    );
    Ok(palette)
}

/// Write a palette file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn save_palette(palette: &Palette, path: &Path) -> Result<()> {
    write_ron(palette, path)
}

fn read_ron<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| LevelError::FileSystem {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    })?;
    ron::from_str(&text).map_err(|e| with_path(e.into(), path))
}

fn write_ron<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .struct_names(false);
    let text = ron::ser::to_string_pretty(value, config).map_err(|e| with_path(e.into(), path))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LevelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    fs::write(path, text).map_err(|e| LevelError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}
