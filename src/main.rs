use std::error::Error;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use tilemap_generator::ascii::{self, AsciiMode};
use tilemap_generator::config::{GenerationConfig, ItemCandidate};
use tilemap_generator::export;
use tilemap_generator::generator::MapGenerator;

#[derive(Parser, Debug)]
#[command(name = "tilemap_generator")]
#[command(about = "Generate ground/water tile maps with scattered decorative items")]
struct Args {
    /// JSON file with a full or partial generation config
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the map in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses a clock-derived seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Noise coordinate scale (lower = larger landmasses)
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Density threshold in [0, 1]; higher means more water
    #[arg(long)]
    water_probability: Option<f32>,

    /// Maximum isolated-tile removal passes
    #[arg(long)]
    cleanup_iterations: Option<u32>,

    /// Item candidate as NAME:WEIGHT (repeatable; an empty NAME is a blank entry)
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<ItemCandidate>,

    /// Export a colour preview PNG
    #[arg(long)]
    png: Option<String>,

    /// Export the normalized density field as a greyscale PNG
    #[arg(long)]
    density_png: Option<String>,

    /// Print the density ramp instead of tiles
    #[arg(long)]
    density: bool,

    /// Don't print the map
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_item(s: &str) -> Result<ItemCandidate, String> {
    let (name, weight) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:WEIGHT, got '{}'", s))?;
    let weight: u32 = weight
        .trim()
        .parse()
        .map_err(|e| format!("bad weight '{}': {}", weight, e))?;

    let name = name.trim();
    if name.is_empty() {
        Ok(ItemCandidate::empty(weight))
    } else {
        Ok(ItemCandidate::new(name, weight))
    }
}

fn build_config(args: &Args) -> Result<GenerationConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig {
            use_random_seed: true,
            ..GenerationConfig::default()
        },
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
        config.use_random_seed = false;
    }
    if let Some(lacunarity) = args.lacunarity {
        config.lacunarity = lacunarity;
    }
    if let Some(water_probability) = args.water_probability {
        config.water_probability = water_probability;
    }
    if let Some(cleanup_iterations) = args.cleanup_iterations {
        config.cleanup_iterations = cleanup_iterations;
    }
    if !args.items.is_empty() {
        config.items = args.items.clone();
    }

    Ok(config)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let mut generator = MapGenerator::new(config);
    let map = generator.generate()?;

    println!("Generated map with seed: {}", map.seed);
    println!("Map size: {}x{}", map.width(), map.height());

    let stats = map.stats;
    let total = map.width() * map.height();
    println!(
        "Ground: {} cells ({:.1}%), {} removed in {} cleanup pass(es)",
        stats.final_ground,
        100.0 * stats.final_ground as f64 / total as f64,
        stats.cleanup.removed,
        stats.cleanup.passes,
    );
    println!("Items placed: {}", stats.items_placed);

    if !args.quiet {
        let mode = if args.density { AsciiMode::Density } else { AsciiMode::Tiles };
        println!();
        print!("{}", ascii::render_ascii_map(map, mode));
        if mode == AsciiMode::Tiles {
            println!();
            print!("{}", ascii::tile_legend(map));
        }
    }

    if let Some(ref path) = args.png {
        export::export_map_png(map, path)?;
        println!("Saved map preview to: {}", path);
    }

    if let Some(ref path) = args.density_png {
        export::export_density_png(&map.density, path)?;
        println!("Saved density preview to: {}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("tree:5"), Ok(ItemCandidate::new("tree", 5)));
        assert_eq!(parse_item(" :2"), Ok(ItemCandidate::empty(2)));
        assert_eq!(parse_item("ns:tree:3"), Ok(ItemCandidate::new("ns:tree", 3)));
        assert!(parse_item("tree").is_err());
        assert!(parse_item("tree:-1").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "tilemap_generator",
            "-W", "20",
            "--seed", "4",
            "--item", "rock:2",
            "--item", "tree:1",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.width, 20);
        assert_eq!(config.height, 100);
        assert_eq!(config.seed, 4);
        assert!(!config.use_random_seed);
        assert_eq!(config.items.len(), 2);
    }

    #[test]
    fn test_no_seed_means_random_seed() {
        let args = Args::parse_from(["tilemap_generator"]);
        assert!(build_config(&args).unwrap().use_random_seed);
    }
}
