pub mod batch;
pub mod biome;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod land;
pub mod render;
pub mod seed;
pub mod stats;
pub mod sweep;

pub use config::{GeneratorConfig, SweepMode};
pub use error::{Error, Result};
pub use generator::{GenerationState, Phase, Step, TerrainGenerator};
pub use grid::{Cell, GridSnapshot, TerrainGrid};
pub use stats::GridStats;
pub use sweep::Neighborhood;
