//! Level editing session and its external collaborators

/// Editing session over a level store
pub mod engine;
/// Palette slot color lookup
pub mod palette;
/// Presentation sync hooks and spawn placements
pub mod sync;
