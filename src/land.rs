use rand_chacha::ChaCha8Rng;

use crate::config::SweepMode;
use crate::grid::{Cell, TerrainGrid};
use crate::seed::roll_percent;
use crate::sweep::{Neighborhood, sweep};

/// Sprays water and land over a fresh grid.
///
/// The water chance of a cell is `water_percent + far_diff`, where `far_diff` grows
/// linearly from 0 at the centre to `water_border` on each axis, so borders drown
/// and an island silhouette appears.
pub fn generate_land(
    width: u32,
    height: u32,
    water_percent: u32,
    water_border: u32,
    rng: &mut ChaCha8Rng,
) -> TerrainGrid {
    let mut grid = TerrainGrid::new(width, height);
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    let border = water_border as f32;

    for x in 0..width {
        for y in 0..height {
            let far_diff = border * ((half_w - x as f32) / half_w).abs()
                + border * ((half_h - y as f32) / half_h).abs();
            let roll = roll_percent(rng) as f32;
            let cell = if roll < water_percent as f32 + far_diff {
                Cell::Water
            } else {
                Cell::Land
            };
            grid.set(x, y, cell);
        }
    }

    grid
}

/// Number of land neighbors of `(x, y)`.
#[must_use]
pub fn count_land(grid: &TerrainGrid, x: u32, y: u32, neighborhood: Neighborhood) -> u32 {
    let mut count = 0;
    neighborhood.for_each_neighbor(grid, x, y, |cell| {
        if cell == Cell::Land {
            count += 1;
        }
    });
    count
}

/// `(water_below, land_above)` thresholds for a neighborhood.
///
/// The wide pass leaves a 9..=12 dead zone so large blobs form; the narrow
/// pass is a plain majority filter around 4.
#[must_use]
pub fn land_thresholds(neighborhood: Neighborhood) -> (u32, u32) {
    match neighborhood {
        Neighborhood::Wide => (9, 12),
        Neighborhood::Narrow => (4, 4),
    }
}

/// One land smoothing pass. Returns the number of cells that changed.
pub fn smooth_land(grid: &mut TerrainGrid, neighborhood: Neighborhood, mode: SweepMode) -> usize {
    let (water_below, land_above) = land_thresholds(neighborhood);
    sweep(grid, mode, |g, x, y| {
        let count = count_land(g, x, y, neighborhood);
        if count < water_below {
            Cell::Water
        } else if count > land_above {
            Cell::Land
        } else {
            g.get(x, y)
        }
    })
}
