use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;

use crate::raster::Canvas;

/// Encodes the canvas as an RGB PNG at `path`. The caller has already
/// validated the table, so the only failures left are I/O.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let side = canvas.side() as u32;
    let image = RgbImage::from_raw(side, side, canvas.rgb().to_vec())
        .expect("canvas buffer length matches its side length");
    image
        .save(path)
        .with_context(|| format!("could not write image to {}", path.display()))?;
    Ok(())
}
