use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use terragen::batch::{generate_batch, numbered_seeds};
use terragen::render::save_as_png;
use terragen::{GeneratorConfig, GridStats, Step, SweepMode, TerrainGenerator};

/// Continent generator: sprays land, smooths it, then assigns cold, warm and temperate biomes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Seed string
    #[arg(short, long)]
    seed: Option<String>,

    /// Derive the seed from the clock at every phase
    #[arg(long)]
    random_seed: bool,

    /// Base water chance in percent
    #[arg(long)]
    water_percent: Option<u32>,

    /// Extra water chance towards the borders in percent
    #[arg(long)]
    water_border: Option<u32>,

    /// Rewrite cells in place during smoothing instead of double buffering
    #[arg(long)]
    in_place: bool,

    /// Step sequence, e.g. "g,s,s,g,s" (default: full cycle)
    #[arg(long)]
    steps: Option<String>,

    /// Where to save the rendered grid
    #[arg(short, long, default_value = "continent.png")]
    output: PathBuf,

    /// Also dump the grid as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Pixels per cell in the PNG
    #[arg(long, default_value_t = 4)]
    cell_size: u32,

    /// Generate this many continents from numbered seeds instead of one
    #[arg(long)]
    count: Option<usize>,
}

impl Cli {
    fn load_config(&self) -> terragen::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_toml_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = &self.seed {
            config.seed.clone_from(seed);
        }
        if let Some(percent) = self.water_percent {
            config.water_percent = percent;
        }
        if let Some(border) = self.water_border {
            config.water_border = border;
        }
        if self.random_seed {
            config.random_seed = true;
        }
        if self.in_place {
            config.sweep = SweepMode::InPlace;
        }
        if config.seed.is_empty() && !config.random_seed {
            config.random_seed = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("continent");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    path.with_file_name(format!("{stem}_{index}.{ext}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Loading configuration...");
    let config = cli.load_config()?;

    if let Some(count) = cli.count {
        let prefix = if config.seed.is_empty() {
            terragen::seed::time_seed()
        } else {
            config.seed.clone()
        };
        let seeds = numbered_seeds(&prefix, count);
        println!(
            "Generating {count} continents ({}×{})...",
            config.width, config.height
        );
        let grids = generate_batch(&config, &seeds)?;
        for (i, (seed, grid)) in seeds.iter().zip(&grids).enumerate() {
            let path = numbered_path(&cli.output, i);
            save_as_png(grid, &path, cli.cell_size)?;
            println!("  {seed} -> {}", path.display());
        }
        println!("\nDone!");
        return Ok(());
    }

    let steps = match &cli.steps {
        Some(sequence) => Step::parse_sequence(sequence)?,
        None => Step::FULL_CYCLE.to_vec(),
    };

    println!(
        "Generating continent (size: {}×{})...",
        config.width, config.height
    );
    let mut generator = TerrainGenerator::new(config)?;
    for step in &steps {
        info!("step: {step}");
        generator.run_steps(std::slice::from_ref(step))?;
    }

    let grid = generator.grid_snapshot()?;
    println!("Seed: {}", generator.seed());
    println!("{}", GridStats::of(grid));

    println!("Saving to {}", cli.output.display());
    save_as_png(grid, &cli.output, cli.cell_size)?;

    if let Some(json) = &cli.json {
        println!("Saving JSON to {}", json.display());
        grid.save_as_json(json)?;
    }

    println!("\nDone!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "terragen-cli",
            "--width",
            "32",
            "--seed",
            "cli",
            "--in-place",
        ]);
        let config = cli.load_config().unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 200);
        assert_eq!(config.seed, "cli");
        assert!(!config.random_seed);
        assert_eq!(config.sweep, SweepMode::InPlace);
    }

    #[test]
    fn missing_seed_falls_back_to_random() {
        let cli = Cli::parse_from(["terragen-cli"]);
        assert!(cli.load_config().unwrap().random_seed);
    }

    #[test]
    fn numbered_paths_keep_extension() {
        let path = numbered_path(Path::new("out/map.png"), 3);
        assert_eq!(path, PathBuf::from("out/map_3.png"));
    }
}
