//! Sectorgen CLI - Procedural star-sector generator.
//!
//! Generate hex sectors of star systems, render them as SVG
//! connectivity maps, and query nearby systems from sector text.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use sectorgen::config::{DensityProfile, Genre, GeneratorConfig};
use sectorgen::dice::Dice;
use sectorgen::export;
use sectorgen::geometry::HexCoord;
use sectorgen::routing;
use sectorgen::sector;

/// Procedural star-sector generator.
#[derive(Parser)]
#[command(name = "sectorgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML), merged with SECTORGEN_* variables.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new sector and write its text and JSON records.
    Generate {
        /// Sector name, used for labels and output file names.
        #[arg(short, long)]
        name: Option<String>,

        /// Density profile (extra_galactic, rift, sparse, scattered,
        /// standard, dense, cluster, core).
        #[arg(short, long)]
        density: Option<DensityProfile>,

        /// Genre rules (standard, opera, firm).
        #[arg(short, long)]
        genre: Option<Genre>,

        /// Lower bound applied to generated tech levels.
        #[arg(long)]
        tech_floor: Option<i32>,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },
    /// Render an SVG map from an existing sector text file.
    Svg {
        /// Sector text file to render.
        input: PathBuf,

        /// Output SVG path; defaults to the input with an .svg suffix.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List systems within jump range of a coordinate.
    Nearby {
        /// Sector text file to query.
        input: PathBuf,

        /// 4-digit hex coordinate, e.g. 1101.
        coord: String,
    },
}

fn setup_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let colors = fern::colors::ColoredLevelConfig::new()
        .error(fern::colors::Color::Red)
        .warn(fern::colors::Color::Yellow)
        .info(fern::colors::Color::Blue)
        .debug(fern::colors::Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .unwrap_or_else(|e| eprintln!("Failed to initialise logging: {}", e));
}

fn main() {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    let config_path = cli.config.as_deref().and_then(Path::to_str);
    match cli.command {
        Commands::Generate {
            name,
            density,
            genre,
            tech_floor,
            seed,
            output,
        } => {
            let mut config = GeneratorConfig::load(config_path).unwrap_or_else(|e| {
                eprintln!("Error loading configuration: {}", e);
                std::process::exit(1);
            });
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(density) = density {
                config.density = density;
            }
            if let Some(genre) = genre {
                config.genre = genre;
            }
            if let Some(floor) = tech_floor {
                config.tech_floor = Some(floor);
            }
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            run_generate(&config, &output);
        }
        Commands::Svg { input, output } => run_svg(&input, output),
        Commands::Nearby { input, coord } => run_nearby(&input, &coord),
    }
}

fn file_slug(name: &str) -> String {
    name.to_lowercase().replace(char::is_whitespace, "-")
}

fn run_generate(config: &GeneratorConfig, output: &Path) {
    println!("Sectorgen - Procedural Star-Sector Generator");
    println!("============================================");
    println!("Sector:  {}", config.name);
    println!("Density: {}", config.density);
    if let Some(seed) = config.seed {
        println!("Seed:    {}", seed);
    }
    println!("Output:  {}", output.display());

    let mut dice = match config.seed {
        Some(seed) => Dice::seeded(seed),
        None => Dice::from_clock(),
    };

    let start = Instant::now();
    let sector = sector::generate(config, &mut dice);
    println!(
        "\nGenerated {} inhabited volumes in {:.2?}",
        sector.volumes.len(),
        start.elapsed()
    );

    fs::create_dir_all(output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let slug = file_slug(&config.name);
    let text_path = output.join(format!("{}.txt", slug));
    export::write_sector(&sector, &text_path).unwrap_or_else(|e| {
        eprintln!("Error writing sector text: {}", e);
        std::process::exit(1);
    });
    println!("  Wrote {}", text_path.display());

    let json_path = output.join(format!("{}.json", slug));
    export::write_json(&sector, &json_path).unwrap_or_else(|e| {
        eprintln!("Error writing volume index: {}", e);
        std::process::exit(1);
    });
    println!("  Wrote {}", json_path.display());
}

fn run_svg(input: &Path, output: Option<PathBuf>) {
    let text = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", input.display(), e);
        std::process::exit(1);
    });
    let summaries = export::parse_summaries(&text);
    info!("parsed {} volume summaries", summaries.len());

    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().replace('-', " "))
        .unwrap_or_else(|| "Sector".to_string());
    let output = output.unwrap_or_else(|| input.with_extension("svg"));

    export::write_map(&summaries, &name, &output).unwrap_or_else(|e| {
        eprintln!("Error writing map: {}", e);
        std::process::exit(1);
    });
    println!(
        "Rendered {} volumes to {}",
        summaries.len(),
        output.display()
    );
}

fn run_nearby(input: &Path, coord: &str) {
    let origin = HexCoord::parse(coord).unwrap_or_else(|| {
        eprintln!("Error: '{}' is not a 4-digit hex coordinate", coord);
        std::process::exit(1);
    });
    let text = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", input.display(), e);
        std::process::exit(1);
    });
    let summaries = export::parse_summaries(&text);
    let occupied = summaries.iter().map(|s| s.coord).collect();

    let routes = routing::nearby(origin, &occupied);
    if routes.is_empty() {
        println!("No inhabited systems within jump range of {}", origin);
        return;
    }
    println!("Systems within jump range of {}:", origin);
    for route in routes {
        let summary = summaries.iter().find(|s| s.coord == route.to);
        let (uwp, name) = summary
            .map(|s| (s.uwp.as_str(), s.name.as_str()))
            .unwrap_or((".........", "?"));
        println!(
            "  {}  {}  {:<20} jump-{}",
            route.to,
            uwp,
            name,
            route.distance.round() as i64
        );
    }
}
