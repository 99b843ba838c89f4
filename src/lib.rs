//! Grid level data engine for shape-placement puzzle level design
//!
//! Designers lay out colored items with fixed footprint shapes on a
//! rectangular grid. Edits go to a working copy that is committed to, or
//! recaptured from, the level's persisted store on request.

#![forbid(unsafe_code)]

/// Editing session, palette lookup and presentation sync hooks
pub mod editing;
/// Input/output operations, configuration and error handling
pub mod io;
/// Coordinate conversion between grid and world space
pub mod math;
/// Grid cells, footprints, the level store and working copies
pub mod spatial;

pub use editing::engine::{Brush, EditState, GridEditingEngine};
pub use io::error::{LevelError, Result};
