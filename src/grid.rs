use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Terrain category stored in every cell.
///
/// During the land phase only `Water` and `Land` appear. After biome generation
/// a remaining `Land` cell means the temperate biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Water = 0,
    Land = 1,
    Cold = 2,
    Warm = 3,
}

impl Cell {
    pub const ALL: [Cell; 4] = [Cell::Water, Cell::Land, Cell::Cold, Cell::Warm];

    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Water),
            1 => Some(Cell::Land),
            2 => Some(Cell::Cold),
            3 => Some(Cell::Warm),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_water(self) -> bool {
        self == Cell::Water
    }
}

/// Row-major `width × height` grid of [`Cell`]s. `(0, 0)` is the bottom-left corner,
/// `y` grows towards the cold edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    data: Vec<Cell>,
}

/// Serializable view of a grid: `rows[y][x]` holds the category code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<u8>>,
}

impl TerrainGrid {
    /// All-water grid.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Cell::Water; (width as usize) * (height as usize)],
        }
    }

    /// Builds a grid from row-major category codes (`codes[y * width + x]`).
    pub fn from_codes(width: u32, height: u32, codes: &[u8]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        if codes.len() != (width as usize) * (height as usize) {
            return Err(Error::InvalidConfiguration(format!(
                "expected {} cell codes, got {}",
                (width as usize) * (height as usize),
                codes.len()
            )));
        }
        let data = codes
            .iter()
            .map(|&c| {
                Cell::from_code(c)
                    .ok_or_else(|| Error::InvalidConfiguration(format!("unknown cell code {c}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a grid from digit strings, one per row, row 0 first.
    ///
    /// ```
    /// use terragen::{Cell, TerrainGrid};
    /// let grid = TerrainGrid::from_rows(&["012", "300"]).unwrap();
    /// assert_eq!(grid.get(0, 1), Cell::Warm);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut codes = Vec::with_capacity((width * height) as usize);
        for row in rows {
            if row.len() as u32 != width {
                return Err(Error::InvalidConfiguration(
                    "rows must all have the same length".to_string(),
                ));
            }
            for ch in row.chars() {
                let code = ch.to_digit(10).ok_or_else(|| {
                    Error::InvalidConfiguration(format!("unexpected character {ch:?} in row"))
                })?;
                codes.push(code as u8);
            }
        }
        Self::from_codes(width, height, &codes)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let i = self.idx(x, y);
        self.data[i] = cell;
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.data
    }

    /// Number of cells holding `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.data.iter().filter(|&&c| c == cell).count()
    }

    /// Rows of digit characters, row 0 first. Handy for fixtures and debugging.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.data
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|c| char::from(b'0' + c.code()))
                    .collect()
            })
            .collect()
    }

    #[must_use]
    pub fn to_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            rows: self
                .data
                .chunks(self.width as usize)
                .map(|row| row.iter().map(|c| c.code()).collect())
                .collect(),
        }
    }

    pub fn save_as_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_snapshot())?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_categories() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_code(cell.code()), Some(cell));
        }
        assert_eq!(Cell::from_code(4), None);
    }

    #[test]
    fn from_rows_is_row_major() {
        let grid = TerrainGrid::from_rows(&["0123", "1100"]).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(3, 0), Cell::Warm);
        assert_eq!(grid.get(1, 1), Cell::Land);
        assert_eq!(grid.count(Cell::Land), 3);
        assert_eq!(grid.to_rows(), vec!["0123".to_string(), "1100".to_string()]);
    }

    #[test]
    fn rejects_ragged_rows_and_bad_codes() {
        assert!(TerrainGrid::from_rows(&["01", "0"]).is_err());
        assert!(TerrainGrid::from_rows(&["05"]).is_err());
        assert!(TerrainGrid::from_codes(2, 2, &[0, 1, 2]).is_err());
    }

    #[test]
    fn snapshot_serializes_codes() {
        let grid = TerrainGrid::from_rows(&["01", "23"]).unwrap();
        let json = serde_json::to_string(&grid.to_snapshot()).unwrap();
        assert_eq!(json, r#"{"width":2,"height":2,"rows":[[0,1],[2,3]]}"#);
    }
}
