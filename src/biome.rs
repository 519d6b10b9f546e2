use rand_chacha::ChaCha8Rng;

use crate::config::SweepMode;
use crate::grid::{Cell, TerrainGrid};
use crate::seed::roll_percent;
use crate::sweep::{Neighborhood, sweep};

/// Turns land cells into cold or warm biomes depending on latitude.
///
/// Above the middle row (`y > height / 2`) a cell becomes [`Cell::Cold`] with
/// probability `100 * y / height` percent; below it becomes [`Cell::Warm`] with
/// probability `100 * (height - y) / height` percent. The middle row and
/// failed rolls stay [`Cell::Land`] (temperate). Water is never touched and the
/// middle row consumes no draws.
pub fn assign_biomes(grid: &mut TerrainGrid, rng: &mut ChaCha8Rng) {
    let width = grid.width();
    let height = grid.height();
    let equator = height / 2;
    let height_f = height as f32;

    for x in 0..width {
        for y in 0..height {
            if grid.get(x, y) != Cell::Land {
                continue;
            }
            if y > equator {
                let chance = 100.0 * y as f32 / height_f;
                if (roll_percent(rng) as f32) < chance {
                    grid.set(x, y, Cell::Cold);
                }
            } else if y < equator {
                let chance = 100.0 * (height - y) as f32 / height_f;
                if (roll_percent(rng) as f32) < chance {
                    grid.set(x, y, Cell::Warm);
                }
            }
        }
    }
}

/// Neighbor tally indexed by [`Cell::code`].
#[must_use]
pub fn count_biomes(grid: &TerrainGrid, x: u32, y: u32, neighborhood: Neighborhood) -> [u32; 4] {
    let mut counts = [0; 4];
    neighborhood.for_each_neighbor(grid, x, y, |cell| counts[cell.code() as usize] += 1);
    counts
}

/// Plurality vote between biomes. Cold or warm win only with a strict majority
/// over both other biomes; every tie falls back to temperate.
#[must_use]
pub fn vote_biome(counts: [u32; 4]) -> Cell {
    let land = counts[Cell::Land.code() as usize];
    let cold = counts[Cell::Cold.code() as usize];
    let warm = counts[Cell::Warm.code() as usize];

    if cold > land && cold > warm {
        Cell::Cold
    } else if warm > land && warm > cold {
        Cell::Warm
    } else {
        Cell::Land
    }
}

/// One biome smoothing pass over non-water cells. Returns the number of cells that changed.
pub fn smooth_biomes(grid: &mut TerrainGrid, neighborhood: Neighborhood, mode: SweepMode) -> usize {
    sweep(grid, mode, |g, x, y| {
        let current = g.get(x, y);
        if current.is_water() {
            current
        } else {
            vote_biome(count_biomes(g, x, y, neighborhood))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::rng_from_seed;

    #[test]
    fn water_is_untouched_by_assignment() {
        let mut grid = TerrainGrid::from_rows(&["0101", "1010", "0101", "1010"]).unwrap();
        let water_before: Vec<bool> = grid.cells().iter().map(|c| c.is_water()).collect();
        assign_biomes(&mut grid, &mut rng_from_seed("biomes"));
        let water_after: Vec<bool> = grid.cells().iter().map(|c| c.is_water()).collect();
        assert_eq!(water_before, water_after);
    }

    #[test]
    fn equator_row_stays_temperate() {
        let mut grid = TerrainGrid::from_rows(&["111", "111", "111", "111"]).unwrap();
        assign_biomes(&mut grid, &mut rng_from_seed("equator"));
        for x in 0..3 {
            assert_eq!(grid.get(x, 2), Cell::Land);
        }
    }

    #[test]
    fn bottom_row_is_always_warm() {
        // At y = 0 the warm chance is 100%.
        let mut grid = TerrainGrid::from_rows(&["1111111", "0000000", "0000000"]).unwrap();
        assign_biomes(&mut grid, &mut rng_from_seed("tropics"));
        assert_eq!(grid.count(Cell::Warm), 7);
    }

    #[test]
    fn strict_majority_wins() {
        assert_eq!(vote_biome([0, 0, 5, 3]), Cell::Cold);
        assert_eq!(vote_biome([2, 1, 1, 4]), Cell::Warm);
        assert_eq!(vote_biome([9, 3, 2, 2]), Cell::Land);
    }

    #[test]
    fn ties_resolve_to_temperate() {
        assert_eq!(vote_biome([0, 0, 4, 4]), Cell::Land);
        assert_eq!(vote_biome([0, 3, 3, 2]), Cell::Land);
        assert_eq!(vote_biome([0, 2, 1, 2]), Cell::Land);
        assert_eq!(vote_biome([8, 0, 0, 0]), Cell::Land);
    }

    #[test]
    fn centre_follows_cold_majority() {
        // 3×3 grid: the wide window is clipped to the 8 surrounding cells.
        let mut grid = TerrainGrid::from_rows(&["223", "212", "323"]).unwrap();
        smooth_biomes(&mut grid, Neighborhood::Wide, SweepMode::Buffered);
        assert_eq!(grid.get(1, 1), Cell::Cold);
    }

    #[test]
    fn centre_tie_becomes_temperate() {
        let mut grid = TerrainGrid::from_rows(&["232", "313", "232"]).unwrap();
        smooth_biomes(&mut grid, Neighborhood::Narrow, SweepMode::Buffered);
        assert_eq!(grid.get(1, 1), Cell::Land);
    }

    #[test]
    fn water_survives_smoothing() {
        let mut grid = TerrainGrid::from_rows(&["222", "202", "222"]).unwrap();
        smooth_biomes(&mut grid, Neighborhood::Narrow, SweepMode::Buffered);
        assert_eq!(grid.get(1, 1), Cell::Water);
        assert_eq!(grid.count(Cell::Water), 1);
    }
}
