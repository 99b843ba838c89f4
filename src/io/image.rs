//! Flat top-down PNG previews of a level

use image::{ImageBuffer, Rgba};
use std::path::Path;

use crate::editing::engine::GridEditingEngine;
use crate::editing::palette::ColorPalette;
use crate::editing::sync::PresentationSync;
use crate::io::configuration::{MAX_PREVIEW_PIXELS, MAX_PREVIEW_SCALE};
use crate::io::error::{LevelError, Result, invalid_parameter};

/// Render the working copy as an RGBA image, `scale` pixels per cell edge
///
/// Row 0 of the grid is the top row of the image. Colors come from
/// `query_color`, so empty cells use the empty color.
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or exceeds `MAX_PREVIEW_SCALE`
/// - The image would exceed `MAX_PREVIEW_PIXELS`
/// - No working copy has been captured
pub fn render_preview<S: PresentationSync>(
    engine: &GridEditingEngine<S>,
    palette: &impl ColorPalette,
    scale: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if scale == 0 || scale > MAX_PREVIEW_SCALE {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("must be between 1 and {MAX_PREVIEW_SCALE}"),
        ));
    }

    let working = engine.working_copy()?;
    let width = working.width() as u32;
    let height = working.height() as u32;

    let pixels = u64::from(width * scale) * u64::from(height * scale);
    if pixels > MAX_PREVIEW_PIXELS {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!(
                "a {width}x{height} grid at this scale needs {pixels} pixels, limit is {MAX_PREVIEW_PIXELS}"
            ),
        ));
    }

    let mut img = ImageBuffer::new(width * scale, height * scale);

    for y in 0..height {
        for x in 0..width {
            let color = Rgba(engine.query_color(x as i32, y as i32, palette)?);
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, color);
                }
            }
        }
    }

    Ok(img)
}

/// Render the working copy and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see `render_preview`)
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png<S: PresentationSync>(
    engine: &GridEditingEngine<S>,
    palette: &impl ColorPalette,
    scale: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_preview(engine, palette, scale)?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| LevelError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| LevelError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), scale, "preview written");
    Ok(())
}
