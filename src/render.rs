//! Debug rendering of a finished grid. The generator never calls into this module.

use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::{Cell, TerrainGrid};

/// Overlay colors: water blue, temperate green, cold white, warm yellow.
#[must_use]
pub fn cell_rgb(cell: Cell) -> [u8; 3] {
    match cell {
        Cell::Water => [0, 0, 255],
        Cell::Land => [0, 255, 0],
        Cell::Cold => [255, 255, 255],
        Cell::Warm => [255, 235, 4],
    }
}

/// Draws every cell as a `cell_size`-pixel square. Row `y = height - 1` ends up on
/// top of the image so the cold edge reads as north.
pub fn to_rgba_image(grid: &TerrainGrid, cell_size: u32) -> Result<RgbaImage> {
    if cell_size == 0 {
        return Err(Error::InvalidConfiguration(
            "cell size must be positive".to_string(),
        ));
    }
    let too_large = || {
        Error::InvalidConfiguration(format!(
            "a {}x{} grid at {cell_size} px per cell does not fit in an image",
            grid.width(),
            grid.height()
        ))
    };
    let img_width = grid.width().checked_mul(cell_size).ok_or_else(too_large)?;
    let img_height = grid.height().checked_mul(cell_size).ok_or_else(too_large)?;
    // Rect corners are i32.
    if i32::try_from(img_width).is_err() || i32::try_from(img_height).is_err() {
        return Err(too_large());
    }

    let mut img: RgbaImage = ImageBuffer::from_pixel(img_width, img_height, Rgba([0, 0, 0, 255]));

    for y in 0..grid.height() {
        let top = (grid.height() - 1 - y) * cell_size;
        for x in 0..grid.width() {
            let [r, g, b] = cell_rgb(grid.get(x, y));
            draw_filled_rect_mut(
                &mut img,
                Rect::at((x * cell_size) as i32, top as i32).of_size(cell_size, cell_size),
                Rgba([r, g, b, 255]),
            );
        }
    }

    Ok(img)
}

pub fn save_as_png(grid: &TerrainGrid, path: impl AsRef<Path>, cell_size: u32) -> Result<()> {
    to_rgba_image(grid, cell_size)?.save(path)?;
    Ok(())
}
