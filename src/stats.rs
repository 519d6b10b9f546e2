use serde::Serialize;
use std::fmt;

use crate::grid::{Cell, TerrainGrid};

/// Summary of a grid: category counts and where the water sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub width: u32,
    pub height: u32,
    /// Cells per category, indexed by [`Cell::code`]
    pub counts: [usize; 4],
    /// Water share of the outermost ring of cells
    pub border_water_fraction: f32,
    /// Water share of the central block spanning half of each axis (a quarter of the area)
    pub inner_water_fraction: f32,
}

impl GridStats {
    #[must_use]
    pub fn of(grid: &TerrainGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut counts = [0; 4];
        let (mut border_total, mut border_water) = (0usize, 0usize);
        let (mut inner_total, mut inner_water) = (0usize, 0usize);

        let inner_x = width / 4..(3 * width).div_ceil(4);
        let inner_y = height / 4..(3 * height).div_ceil(4);

        for y in 0..height {
            for x in 0..width {
                let cell = grid.get(x, y);
                counts[cell.code() as usize] += 1;

                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    border_total += 1;
                    border_water += usize::from(cell.is_water());
                }
                if inner_x.contains(&x) && inner_y.contains(&y) {
                    inner_total += 1;
                    inner_water += usize::from(cell.is_water());
                }
            }
        }

        Self {
            width,
            height,
            counts,
            border_water_fraction: fraction(border_water, border_total),
            inner_water_fraction: fraction(inner_water, inner_total),
        }
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.counts[cell.code() as usize]
    }

    /// Whether every category occurs at least once.
    #[must_use]
    pub fn has_all_categories(&self) -> bool {
        self.counts.iter().all(|&c| c > 0)
    }
}

fn fraction(part: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32
    }
}

impl fmt::Display for GridStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = (self.width as usize) * (self.height as usize);
        writeln!(f, "{}x{} cells", self.width, self.height)?;
        for cell in Cell::ALL {
            let n = self.count(cell);
            writeln!(
                f,
                "  {:<6} {:>8} ({:.1}%)",
                format!("{cell:?}"),
                n,
                100.0 * fraction(n, total)
            )?;
        }
        write!(
            f,
            "  water on border {:.1}%, in centre {:.1}%",
            100.0 * self.border_water_fraction,
            100.0 * self.inner_water_fraction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_fractions() {
        let grid = TerrainGrid::from_rows(&["0000", "0110", "0230", "0000"]).unwrap();
        let stats = GridStats::of(&grid);
        assert_eq!(stats.counts, [12, 2, 1, 1]);
        assert!(stats.has_all_categories());
        assert!((stats.border_water_fraction - 1.0).abs() < f32::EPSILON);
        assert!(stats.inner_water_fraction.abs() < f32::EPSILON);
    }

    #[test]
    fn missing_category_is_reported() {
        let grid = TerrainGrid::from_rows(&["01", "10"]).unwrap();
        assert!(!GridStats::of(&grid).has_all_categories());
    }
}
