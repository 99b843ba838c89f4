//! Conversion between grid indices and world positions on the ground plane
//!
//! Grid columns run along world x and rows along world z; y is always 0.
//! Both directions round half away from zero, so every integer grid
//! coordinate survives a round trip for any positive spacing.

use num_traits::Float;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::cell::GridPosition;
use crate::spatial::footprint::{ItemSize, Rotation, resolve};

/// Grid to world transform for a fixed cell spacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoordinateMapper<F> {
    spacing: F,
}

impl<F: Float> GridCoordinateMapper<F> {
    /// Create a mapper for the given distance between cell centres
    ///
    /// # Errors
    ///
    /// Returns an error if the spacing is not finite and strictly positive
    pub fn new(spacing: F) -> Result<Self> {
        if !(spacing.is_finite() && spacing > F::zero()) {
            return Err(invalid_parameter(
                "cell_spacing",
                &spacing.to_f64().unwrap_or(f64::NAN),
                &"must be finite and positive",
            ));
        }
        Ok(Self { spacing })
    }

    /// Distance between neighbouring cell centres
    pub const fn spacing(&self) -> F {
        self.spacing
    }

    /// World position `[x, y, z]` of a grid cell
    pub fn grid_to_world(&self, position: GridPosition) -> [F; 3] {
        grid_to_world(position.x, position.y, self.spacing)
    }

    /// Nearest grid cell to a world position on the ground plane
    ///
    /// Returns `None` when the scaled coordinates are not finite or do not
    /// fit an `i32`.
    pub fn world_to_grid(&self, world_x: F, world_z: F) -> Option<GridPosition> {
        world_to_grid(world_x, world_z, self.spacing).map(|[x, y]| GridPosition::new(x, y))
    }

    /// World positions of a footprint anchored at the grid origin
    ///
    /// Used to draw the selection preview of the current brush.
    pub fn footprint_preview(&self, size: ItemSize, rotation: Rotation) -> Vec<[F; 3]> {
        resolve(size, rotation)
            .cells_at(GridPosition::default())
            .map(|cell| self.grid_to_world(cell))
            .collect()
    }
}

/// World position `[x, y, z]` of cell `(x, y)` for a given spacing
pub fn grid_to_world<F: Float>(x: i32, y: i32, spacing: F) -> [F; 3] {
    [
        to_float::<F>(x) * spacing,
        F::zero(),
        to_float::<F>(y) * spacing,
    ]
}

/// Nearest cell `[x, y]` to a ground-plane world position, rounding half away from zero
pub fn world_to_grid<F: Float>(world_x: F, world_z: F, spacing: F) -> Option<[i32; 2]> {
    let x = (world_x / spacing).round().to_i32()?;
    let y = (world_z / spacing).round().to_i32()?;
    Some([x, y])
}

// Every i32 is representable (possibly rounded) in f32 and f64
fn to_float<F: Float>(value: i32) -> F {
    F::from(value).unwrap_or_else(F::zero)
}
