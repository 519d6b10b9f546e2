// src/config.rs
//! Generator configuration
//!
//! Every parameter that shapes a run lives here:
//! - grid dimensions
//! - seed handling (fixed string or regenerated from the clock)
//! - water share and border bias for the initial spray
//! - sweep mode used by the smoothing passes
//!
//! All structures (de)serialize so a run can be described in a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// How a smoothing pass reads neighbor values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Every cell sees the grid as it was when the pass started.
    #[default]
    Buffered,
    /// Cells are rewritten in place, x-outer and y-inner, so later cells
    /// observe values already updated in the same pass.
    InPlace,
}

/// Parameters for one [`TerrainGenerator`](crate::TerrainGenerator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Grid width in cells (default 200)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Grid height in cells (default 200)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Seed string hashed into the RNG. May be empty when `random_seed` is set.
    #[serde(default)]
    pub seed: String,

    /// Replace `seed` with a clock-derived value at the start of every phase.
    #[serde(default)]
    pub random_seed: bool,

    /// Base chance, in percent, that a sprayed cell is water (0..=100)
    #[serde(default = "default_water_percent")]
    pub water_percent: u32,

    /// Extra water chance added towards the borders (0..=100).
    /// Reaches `water_border` on the edge midpoints and twice that in the corners.
    #[serde(default = "default_water_border")]
    pub water_border: u32,

    /// Read/write discipline of the smoothing passes
    #[serde(default)]
    pub sweep: SweepMode,
}

fn default_width() -> u32 {
    200
}
fn default_height() -> u32 {
    200
}
fn default_water_percent() -> u32 {
    45
}
fn default_water_border() -> u32 {
    25
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            seed: String::new(),
            random_seed: false,
            water_percent: 45,
            water_border: 25,
            sweep: SweepMode::Buffered,
        }
    }
}

impl GeneratorConfig {
    /// Convenience constructor for a fixed-seed configuration with default bias values.
    #[must_use]
    pub fn with_seed(width: u32, height: u32, seed: impl Into<String>) -> Self {
        Self {
            width,
            height,
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a TOML file and validates it.
    ///
    /// ```toml
    /// # continent.toml
    /// width = 120
    /// height = 80
    /// seed = "archipelago"
    /// water_percent = 50
    /// sweep = "in_place"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration without touching any generator state.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.water_percent > 100 {
            return Err(Error::InvalidConfiguration(format!(
                "water_percent must be within 0..=100, got {}",
                self.water_percent
            )));
        }
        if self.water_border > 100 {
            return Err(Error::InvalidConfiguration(format!(
                "water_border must be within 0..=100, got {}",
                self.water_border
            )));
        }
        if self.seed.is_empty() && !self.random_seed {
            return Err(Error::InvalidConfiguration(
                "seed is empty and random_seed is disabled".to_string(),
            ));
        }
        Ok(())
    }
}
