//! Full-grid sweeps shared by land and biome smoothing.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SweepMode;
use crate::grid::{Cell, TerrainGrid};

/// Square window examined around a cell, the cell itself excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// 5×5 window (half-width 2), used before the first land smoothing pass completes.
    Wide,
    /// 3×3 window (half-width 1).
    Narrow,
}

impl Neighborhood {
    #[must_use]
    pub fn half_width(self) -> u32 {
        match self {
            Neighborhood::Wide => 2,
            Neighborhood::Narrow => 1,
        }
    }

    /// Calls `f` for every in-bounds neighbor of `(x, y)`.
    /// Out-of-bounds positions are skipped, so edge cells simply have fewer neighbors.
    #[inline]
    pub fn for_each_neighbor(
        self,
        grid: &TerrainGrid,
        x: u32,
        y: u32,
        mut f: impl FnMut(Cell),
    ) {
        let r = self.half_width();
        let x_end = (x + r).min(grid.width() - 1);
        let y_end = (y + r).min(grid.height() - 1);
        for nx in x.saturating_sub(r)..=x_end {
            for ny in y.saturating_sub(r)..=y_end {
                if nx != x || ny != y {
                    f(grid.get(nx, ny));
                }
            }
        }
    }
}

/// Applies `rule` to every cell and returns how many cells changed.
///
/// `rule` receives the grid it must read from and the cell position. In
/// [`SweepMode::Buffered`] that is a copy taken before the pass; in
/// [`SweepMode::InPlace`] it is the grid being rewritten, visited x-outer, y-inner.
pub(crate) fn sweep<F>(grid: &mut TerrainGrid, mode: SweepMode, rule: F) -> usize
where
    F: Fn(&TerrainGrid, u32, u32) -> Cell + Sync,
{
    match mode {
        SweepMode::Buffered => sweep_buffered(grid, &rule),
        SweepMode::InPlace => {
            let mut changed = 0;
            for x in 0..grid.width() {
                for y in 0..grid.height() {
                    let next = rule(grid, x, y);
                    if next != grid.get(x, y) {
                        grid.set(x, y, next);
                        changed += 1;
                    }
                }
            }
            changed
        }
    }
}

fn sweep_buffered<F>(grid: &mut TerrainGrid, rule: &F) -> usize
where
    F: Fn(&TerrainGrid, u32, u32) -> Cell + Sync,
{
    let source = grid.clone();
    let width = grid.width() as usize;

    let update_row = |(y, row): (usize, &mut [Cell])| -> usize {
        let mut changed = 0;
        for (x, cell) in row.iter_mut().enumerate() {
            let next = rule(&source, x as u32, y as u32);
            if next != *cell {
                *cell = next;
                changed += 1;
            }
        }
        changed
    };

    #[cfg(feature = "parallel")]
    let changed: usize = grid
        .cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .map(update_row)
        .sum();

    #[cfg(not(feature = "parallel"))]
    let changed: usize = grid
        .cells_mut()
        .chunks_mut(width)
        .enumerate()
        .map(update_row)
        .sum();

    changed
}
