//! Mathematical utilities for grid and world space conversion

/// Grid to world coordinate mapping
pub mod coordinates;

pub use coordinates::GridCoordinateMapper;
