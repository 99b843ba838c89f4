//! Color lookup for palette slots
//!
//! The palette is owned by the host; the engine only asks it for the
//! display color of a slot and substitutes `EMPTY_COLOR` when it has none.

use serde::{Deserialize, Serialize};

use crate::io::configuration::EMPTY_COLOR;
use crate::spatial::cell::ColorId;

/// RGBA display color
pub type Rgba = [u8; 4];

/// Source of display colors for palette slots
pub trait ColorPalette {
    /// Display color of `color`, `None` when the palette has no entry for it
    fn display_color(&self, color: ColorId) -> Option<Rgba>;

    /// Display color of `color`, or `EMPTY_COLOR` when the palette has no entry
    fn display_color_or_empty(&self, color: ColorId) -> Rgba {
        self.display_color(color).unwrap_or(EMPTY_COLOR)
    }
}

/// One palette slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Slot this entry colors
    pub color_id: ColorId,
    /// Designer-facing name
    #[serde(default)]
    pub name: String,
    /// Display color
    pub rgba: Rgba,
}

/// Ordered palette as stored in a palette asset
///
/// Entries are normally laid out so entry `n` describes slot `n`, which
/// allows a direct lookup; otherwise the entries are scanned in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Entries in slot order
    pub entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Create a palette from its entries
    pub const fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// Entry at the slot's own index, if it describes that slot
    pub fn direct(&self, color: ColorId) -> Option<&PaletteEntry> {
        self.entries
            .get(usize::from(color.slot()))
            .filter(|entry| entry.color_id == color)
    }

    /// First entry describing the slot
    pub fn find(&self, color: ColorId) -> Option<&PaletteEntry> {
        self.entries.iter().find(|entry| entry.color_id == color)
    }

    /// Slot of the first entry with the given name, ignoring case
    pub fn slot_named(&self, name: &str) -> Option<ColorId> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.color_id)
    }
}

impl ColorPalette for Palette {
    fn display_color(&self, color: ColorId) -> Option<Rgba> {
        self.direct(color)
            .or_else(|| self.find(color))
            .map(|entry| entry.rgba)
    }
}
