// src/generator.rs
//! Two-phase continent generator
//!
//! [`TerrainGenerator`] owns the configuration, the grid and the phase state.
//! Callers drive it step by step with [`TerrainGenerator::generate`] and
//! [`TerrainGenerator::smooth`], or in one go with [`TerrainGenerator::run_full_cycle`].

use log::{debug, info};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;

use crate::biome;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::grid::TerrainGrid;
use crate::land;
use crate::seed::{rng_from_seed, time_seed};
use crate::sweep::Neighborhood;

/// Where a generator is in its cycle, including smoothing passes done in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    NotStarted,
    LandPhase { smoothed_passes: u32 },
    BiomesPhase { smoothed_passes: u32 },
}

/// Coarse phase reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Land,
    Biomes,
}

impl GenerationState {
    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            GenerationState::NotStarted => Phase::NotStarted,
            GenerationState::LandPhase { .. } => Phase::Land,
            GenerationState::BiomesPhase { .. } => Phase::Biomes,
        }
    }

    /// Window for the next smoothing pass. Only land smoothing narrows the window;
    /// biome smoothing always starts from a fresh phase and keeps the wide one.
    #[must_use]
    pub fn neighborhood(self) -> Neighborhood {
        match self {
            GenerationState::LandPhase { smoothed_passes } if smoothed_passes > 0 => {
                Neighborhood::Narrow
            }
            _ => Neighborhood::Wide,
        }
    }
}

/// One manual step of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Generate,
    Smooth,
}

impl Step {
    /// The canonical continent sequence: spray, coarse smoothing, fine smoothing,
    /// biome assignment, biome smoothing.
    pub const FULL_CYCLE: [Step; 5] = [
        Step::Generate,
        Step::Smooth,
        Step::Smooth,
        Step::Generate,
        Step::Smooth,
    ];

    /// Parses a comma separated list such as `"g,s,s,g,s"`.
    pub fn parse_sequence(input: &str) -> Result<Vec<Step>> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "g" | "generate" => Ok(Step::Generate),
            "s" | "smooth" => Ok(Step::Smooth),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown step {other:?}, expected \"generate\" or \"smooth\""
            ))),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Generate => write!(f, "generate"),
            Step::Smooth => write!(f, "smooth"),
        }
    }
}

/// Seeded cellular-automaton continent generator.
///
/// Not synchronized: run independent generators for parallel work
/// (see [`generate_batch`](crate::batch::generate_batch)).
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: GeneratorConfig,
    seed: String,
    grid: Option<TerrainGrid>,
    state: GenerationState,
}

impl TerrainGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            seed: config.seed.clone(),
            config,
            grid: None,
            state: GenerationState::NotStarted,
        })
    }

    /// Replaces the configuration and discards the current grid.
    /// On error the generator is left untouched.
    pub fn configure(&mut self, config: GeneratorConfig) -> Result<()> {
        config.validate()?;
        self.seed = config.seed.clone();
        self.config = config;
        self.grid = None;
        self.state = GenerationState::NotStarted;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Seed used by the most recent phase. Differs from the configured seed once
    /// `random_seed` has regenerated it.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.state
    }

    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.state.phase()
    }

    /// Whether the next smoothing pass uses the wide 5×5 window.
    #[must_use]
    pub fn is_first_smoothing_pass(&self) -> bool {
        self.state.neighborhood() == Neighborhood::Wide
    }

    /// Read-only view of the grid.
    pub fn grid_snapshot(&self) -> Result<&TerrainGrid> {
        self.grid.as_ref().ok_or(Error::NotYetGenerated)
    }

    /// Advances one generation phase: land when no land phase is active,
    /// biomes right after a land phase. A third call starts over with fresh land.
    pub fn generate(&mut self) {
        match self.state {
            GenerationState::LandPhase { .. } if self.grid.is_some() => self.generate_biomes(),
            _ => self.generate_land(),
        }
    }

    /// Runs one smoothing pass for the current phase and returns how many cells changed.
    pub fn smooth(&mut self) -> Result<usize> {
        let grid = self.grid.as_mut().ok_or(Error::NotYetGenerated)?;
        let neighborhood = self.state.neighborhood();
        let sweep = self.config.sweep;

        let (changed, next) = match self.state {
            GenerationState::NotStarted => return Err(Error::NotYetGenerated),
            GenerationState::LandPhase { smoothed_passes } => (
                land::smooth_land(grid, neighborhood, sweep),
                GenerationState::LandPhase {
                    smoothed_passes: smoothed_passes + 1,
                },
            ),
            GenerationState::BiomesPhase { smoothed_passes } => (
                biome::smooth_biomes(grid, neighborhood, sweep),
                GenerationState::BiomesPhase {
                    smoothed_passes: smoothed_passes + 1,
                },
            ),
        };

        debug!(
            "smoothing pass in {:?} phase with {:?} window changed {} cells",
            self.state.phase(),
            neighborhood,
            changed
        );
        self.state = next;
        Ok(changed)
    }

    /// `generate, smooth, smooth, generate, smooth`: one complete continent when
    /// started from a fresh generator or after a previous full cycle.
    pub fn run_full_cycle(&mut self) -> Result<()> {
        self.run_steps(&Step::FULL_CYCLE)
    }

    pub fn run_steps(&mut self, steps: &[Step]) -> Result<()> {
        for step in steps {
            match step {
                Step::Generate => self.generate(),
                Step::Smooth => {
                    self.smooth()?;
                }
            }
        }
        Ok(())
    }

    /// Smooths until a pass changes nothing. Returns the number of passes run,
    /// including the final no-op one, or `None` if `max_passes` ran out first.
    pub fn smooth_until_stable(&mut self, max_passes: usize) -> Result<Option<usize>> {
        for pass in 1..=max_passes {
            if self.smooth()? == 0 {
                return Ok(Some(pass));
            }
        }
        Ok(None)
    }

    fn phase_rng(&mut self) -> ChaCha8Rng {
        if self.config.random_seed {
            self.seed = time_seed();
            info!("regenerated seed {}", self.seed);
        }
        rng_from_seed(&self.seed)
    }

    fn generate_land(&mut self) {
        let mut rng = self.phase_rng();
        let grid = land::generate_land(
            self.config.width,
            self.config.height,
            self.config.water_percent,
            self.config.water_border,
            &mut rng,
        );
        info!(
            "generated {}x{} land with seed {:?}",
            grid.width(),
            grid.height(),
            self.seed
        );
        self.grid = Some(grid);
        self.state = GenerationState::LandPhase { smoothed_passes: 0 };
    }

    fn generate_biomes(&mut self) {
        let mut rng = self.phase_rng();
        if let Some(grid) = self.grid.as_mut() {
            biome::assign_biomes(grid, &mut rng);
        }
        info!("assigned biomes with seed {:?}", self.seed);
        self.state = GenerationState::BiomesPhase { smoothed_passes: 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn generator(seed: &str) -> TerrainGenerator {
        TerrainGenerator::new(GeneratorConfig::with_seed(24, 16, seed)).unwrap()
    }

    #[test]
    fn rejects_invalid_configuration() {
        let err = TerrainGenerator::new(GeneratorConfig::with_seed(0, 16, "x")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn grid_is_unavailable_before_generate() {
        let mut generator = generator("early");
        assert_eq!(generator.current_phase(), Phase::NotStarted);
        assert!(matches!(
            generator.grid_snapshot(),
            Err(Error::NotYetGenerated)
        ));
        assert!(matches!(generator.smooth(), Err(Error::NotYetGenerated)));
        assert_eq!(generator.state(), GenerationState::NotStarted);
    }

    #[test]
    fn dispatch_follows_phase_cycle() {
        let mut generator = generator("cycle");

        generator.generate();
        assert_eq!(generator.current_phase(), Phase::Land);
        assert!(generator.is_first_smoothing_pass());

        generator.smooth().unwrap();
        assert!(!generator.is_first_smoothing_pass());
        generator.smooth().unwrap();
        assert_eq!(
            generator.state(),
            GenerationState::LandPhase { smoothed_passes: 2 }
        );

        generator.generate();
        assert_eq!(generator.current_phase(), Phase::Biomes);
        assert!(generator.is_first_smoothing_pass());

        generator.smooth().unwrap();
        generator.smooth().unwrap();
        assert_eq!(
            generator.state(),
            GenerationState::BiomesPhase { smoothed_passes: 2 }
        );
        assert!(generator.is_first_smoothing_pass());

        generator.generate();
        assert_eq!(
            generator.state(),
            GenerationState::LandPhase { smoothed_passes: 0 }
        );
        let grid = generator.grid_snapshot().unwrap();
        assert!(
            grid.cells()
                .iter()
                .all(|&c| c == Cell::Water || c == Cell::Land)
        );
    }

    #[test]
    fn third_generate_restarts_from_same_seed() {
        let mut generator = generator("restart");
        generator.generate();
        let first = generator.grid_snapshot().unwrap().clone();

        generator.generate();
        generator.generate();
        assert_eq!(generator.grid_snapshot().unwrap(), &first);
    }

    #[test]
    fn random_seed_is_regenerated_and_recorded() {
        let mut config = GeneratorConfig::with_seed(16, 16, "");
        config.random_seed = true;
        let mut generator = TerrainGenerator::new(config).unwrap();
        generator.generate();
        assert!(!generator.seed().is_empty());
        assert!(generator.seed().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn configure_resets_and_rejects_without_mutation() {
        let mut generator = generator("reset");
        generator.run_full_cycle().unwrap();

        let err = generator
            .configure(GeneratorConfig::with_seed(8, 8, ""))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert_eq!(generator.current_phase(), Phase::Biomes);
        assert!(generator.grid_snapshot().is_ok());

        generator
            .configure(GeneratorConfig::with_seed(8, 8, "other"))
            .unwrap();
        assert_eq!(generator.current_phase(), Phase::NotStarted);
        assert_eq!(generator.seed(), "other");
        assert!(generator.grid_snapshot().is_err());
    }

    #[test]
    fn steps_parse_short_and_long_names() {
        let steps = Step::parse_sequence("g, smooth ,S,generate,s").unwrap();
        assert_eq!(steps, Step::FULL_CYCLE.to_vec());
        assert!(Step::parse_sequence("g,x").is_err());
    }

    #[test]
    fn run_steps_matches_full_cycle() {
        let mut manual = generator("steps");
        manual.run_steps(&Step::FULL_CYCLE).unwrap();
        let mut full = generator("steps");
        full.run_full_cycle().unwrap();
        assert_eq!(
            manual.grid_snapshot().unwrap(),
            full.grid_snapshot().unwrap()
        );
    }
}
