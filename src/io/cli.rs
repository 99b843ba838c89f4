//! Command-line interface for editing level files

use crate::editing::engine::GridEditingEngine;
use crate::editing::sync::placements;
use crate::io::configuration::{
    DEFAULT_CELL_SPACING, DEFAULT_HEIGHT, DEFAULT_PREVIEW_SCALE, DEFAULT_WIDTH, EditorConfig,
    ITEM_SPAWN_LIFT, LEVEL_FILE_EXTENSION, PREVIEW_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_preview_png;
use crate::io::persistence::{load_level, load_palette, save_level};
use crate::math::coordinates::GridCoordinateMapper;
use crate::spatial::cell::{ColorId, GridCell};
use crate::spatial::footprint::{ItemSize, Rotation, resolve, resolve_index};
use crate::spatial::grid::GridStore;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridlevel")]
#[command(author, version, about = "Edit grid levels for shape-placement puzzles")]
/// Command-line arguments for the level editor
pub struct Cli {
    /// Level file to operate on
    #[arg(value_name = "LEVEL")]
    pub level: PathBuf,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Level file path, with the level extension added when none was given
    pub fn level_path(&self) -> PathBuf {
        if self.level.extension().is_some() {
            self.level.clone()
        } else {
            self.level.with_extension(LEVEL_FILE_EXTENSION)
        }
    }
}

/// Level editing operations
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create the level, or resize it when the dimensions differ
    New {
        /// Grid width in cells
        #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
        width: usize,

        /// Grid height in cells
        #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
        height: usize,
    },

    /// Toggle an item footprint anchored at a cell
    Toggle {
        /// Anchor column
        #[arg(allow_negative_numbers = true)]
        x: i32,

        /// Anchor row
        #[arg(allow_negative_numbers = true)]
        y: i32,

        /// Item size
        #[arg(short, long, value_enum, default_value_t = ItemSize::OneByOne)]
        size: ItemSize,

        /// Raw prefab size index, used instead of `--size`; unknown indices place one cell
        #[arg(long, conflicts_with = "size")]
        size_index: Option<usize>,

        /// Rotation about the x axis
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotation_x: i32,

        /// Rotation about the z axis
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotation_z: i32,

        /// Palette slot, or an entry name when `--palette` is given
        #[arg(short, long, default_value = "0")]
        color: String,

        /// Palette file for resolving color names
        #[arg(short, long)]
        palette: Option<PathBuf>,
    },

    /// Set the color of one cell without changing its occupancy
    Paint {
        /// Column
        x: i32,

        /// Row
        y: i32,

        /// Palette slot, or an entry name when `--palette` is given
        color: String,

        /// Palette file for resolving color names
        #[arg(short, long)]
        palette: Option<PathBuf>,
    },

    /// Clear every cell
    Reset,

    /// Print the grid, one character per cell
    Show,

    /// List spawn positions of every placed item
    Placements {
        /// World distance between neighbouring cell centres
        #[arg(short, long, default_value_t = DEFAULT_CELL_SPACING)]
        spacing: f32,
    },

    /// Export a PNG preview colored through a palette file
    Preview {
        /// Palette file
        #[arg(short, long)]
        palette: PathBuf,

        /// Output image (defaults to `<level>_preview.png`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixels per cell edge
        #[arg(short, long, default_value_t = DEFAULT_PREVIEW_SCALE)]
        scale: u32,
    },
}

/// Runs one parsed command against its level file
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the command, writing any report to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the level or palette cannot be read or written,
    /// or the edit itself is rejected
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let level_path = self.cli.level_path();
        let path = level_path.as_path();

        match &self.cli.command {
            Command::New { width, height } => {
                let config = EditorConfig {
                    width: *width,
                    height: *height,
                    ..EditorConfig::default()
                };
                config.validate()?;

                let store = if path.exists() {
                    load_level(path)?
                } else {
                    GridStore::new()
                };
                let mut engine = GridEditingEngine::new(store);
                engine.open(config.width, config.height)?;
                save_level(engine.store(), path)
            }
            Command::Toggle {
                x,
                y,
                size,
                size_index,
                rotation_x,
                rotation_z,
                color,
                palette,
            } => {
                let color = resolve_color(color, palette.as_deref())?;
                let rotation = Rotation::new(*rotation_x, *rotation_z);
                let footprint = size_index.map_or_else(
                    || resolve(*size, rotation),
                    |index| resolve_index(index, rotation),
                );
                Self::edit(path, |engine| {
                    engine.toggle_footprint(*x, *y, footprint, color).map(drop)
                })
            }
            Command::Paint {
                x,
                y,
                color,
                palette,
            } => {
                let color = resolve_color(color, palette.as_deref())?;
                Self::edit(path, |engine| engine.set_cell_color(*x, *y, color))
            }
            Command::Reset => {
                let mut engine = Self::open_existing(path)?;
                engine.reset_all()?;
                save_level(engine.store(), path)
            }
            Command::Show => {
                let engine = Self::open_existing(path)?;
                for line in render_ascii(&engine)? {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            }
            Command::Placements { spacing } => {
                let engine = Self::open_existing(path)?;
                let config = EditorConfig {
                    width: engine.width(),
                    height: engine.height(),
                    cell_spacing: *spacing,
                };
                config.validate()?;
                let mapper = GridCoordinateMapper::new(config.cell_spacing)?;
                for placement in placements(engine.working_copy()?.grid(), &mapper, ITEM_SPAWN_LIFT)
                {
                    let [wx, wy, wz] = placement.world;
                    writeln!(
                        out,
                        "{} {} {} {wx} {wy} {wz}",
                        placement.position.x, placement.position.y, placement.color_id
                    )?;
                }
                Ok(())
            }
            Command::Preview {
                palette,
                output,
                scale,
            } => {
                let engine = Self::open_existing(path)?;
                let palette = load_palette(palette)?;
                let output_path = output
                    .clone()
                    .unwrap_or_else(|| Self::get_preview_path(path));
                export_preview_png(&engine, &palette, *scale, &output_path)
            }
        }
    }

    fn open_existing(path: &Path) -> Result<GridEditingEngine> {
        let mut engine = GridEditingEngine::new(load_level(path)?);
        engine.load()?;
        Ok(engine)
    }

    fn edit(path: &Path, apply: impl FnOnce(&mut GridEditingEngine) -> Result<()>) -> Result<()> {
        let mut engine = Self::open_existing(path)?;
        apply(&mut engine)?;
        engine.save()?;
        save_level(engine.store(), path)
    }

    /// Default preview path next to the level file
    pub fn get_preview_path(level_path: &Path) -> PathBuf {
        let stem = level_path.file_stem().unwrap_or_default();
        let preview_name = format!("{}{PREVIEW_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = level_path.parent() {
            parent.join(preview_name)
        } else {
            PathBuf::from(preview_name)
        }
    }
}

/// Palette slot named by a CLI color argument
///
/// A number is taken as the raw slot. Anything else is looked up by entry
/// name, ignoring case, in the palette file.
///
/// # Errors
///
/// Returns an error if:
/// - A name is given without a palette file
/// - The palette file cannot be read
/// - No palette entry has that name
pub fn resolve_color(color: &str, palette: Option<&Path>) -> Result<ColorId> {
    if let Ok(slot) = color.parse::<u16>() {
        return Ok(ColorId::new(slot));
    }

    let Some(palette_path) = palette else {
        return Err(invalid_parameter(
            "color",
            &color,
            &"color names need a palette file",
        ));
    };

    load_palette(palette_path)?
        .slot_named(color)
        .ok_or_else(|| invalid_parameter("color", &color, &"no palette entry has this name"))
}

/// Text rendering of the working copy, one line per row starting at row 0
///
/// `.` is empty, `#` occupied without color, and occupied colored cells show
/// their slot in base 36 (`+` beyond slot 35).
///
/// # Errors
///
/// Returns an error if no working copy has been captured
pub fn render_ascii(engine: &GridEditingEngine) -> Result<Vec<String>> {
    let working = engine.working_copy()?;
    let width = working.width().max(1);

    let cells: Vec<&GridCell> = working.cells().collect();
    Ok(cells
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell_glyph(cell)).collect())
        .collect())
}

fn cell_glyph(cell: &GridCell) -> char {
    if !cell.is_occupied {
        '.'
    } else if cell.color_id.is_none() {
        '#'
    } else {
        char::from_digit(u32::from(cell.color_id.slot()), 36).unwrap_or('+')
    }
}
