//! Editor constants and the construction-time configuration passed to components

use crate::io::error::{Result, invalid_parameter};

// Grid defaults used when a level is created without explicit dimensions
/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 8;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 8;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_024;

/// Default world distance between neighbouring cell centres
pub const DEFAULT_CELL_SPACING: f32 = 50.0;
/// Largest accepted cell spacing
pub const MAX_CELL_SPACING: f32 = 100.0;

/// Height above the grid plane at which items are spawned
pub const ITEM_SPAWN_LIFT: f32 = 0.25;

/// Color reported for empty cells and missing palette entries
pub const EMPTY_COLOR: [u8; 4] = [255, 255, 255, 255];

// Output settings
/// File extension for persisted levels and palettes
pub const LEVEL_FILE_EXTENSION: &str = "ron";
/// Suffix added to preview image filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Default edge length in pixels of one cell in preview images
pub const DEFAULT_PREVIEW_SCALE: u32 = 16;
/// Largest accepted preview scale
pub const MAX_PREVIEW_SCALE: u32 = 256;
/// Largest preview image, in pixels, a render may allocate
pub const MAX_PREVIEW_PIXELS: u64 = 4_096 * 4_096;

/// Construction-time settings for an editing session
///
/// Every component receives the values it needs from here instead of
/// reading shared editor state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// World distance between neighbouring cell centres
    pub cell_spacing: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_spacing: DEFAULT_CELL_SPACING,
        }
    }
}

impl EditorConfig {
    /// Check every field against its accepted range
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - The cell spacing is not in `(0, MAX_CELL_SPACING]`
    pub fn validate(&self) -> Result<()> {
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;

        if !(self.cell_spacing.is_finite()
            && self.cell_spacing > 0.0
            && self.cell_spacing <= MAX_CELL_SPACING)
        {
            return Err(invalid_parameter(
                "cell_spacing",
                &self.cell_spacing,
                &format!("must be in (0, {MAX_CELL_SPACING}]"),
            ));
        }

        Ok(())
    }
}

/// Check a single grid dimension
///
/// # Errors
///
/// Returns an error if the dimension is zero or exceeds `MAX_GRID_DIMENSION`
pub fn validate_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
