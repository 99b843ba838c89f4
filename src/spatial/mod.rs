//! Spatial data structures for level grids
//!
//! This module contains spatial-related functionality including:
//! - Cell records and palette slot identifiers
//! - Item footprint tables
//! - The persisted level store and editing working copies

/// Cell records and positions
pub mod cell;
/// Item footprint resolution
pub mod footprint;
/// Cell grids and the canonical level store
pub mod grid;
/// Editing buffers synchronized with a store
pub mod working_copy;

pub use grid::GridStore;
pub use working_copy::LevelWorkingCopy;
