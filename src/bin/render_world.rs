//! Headless World Renderer
//!
//! Generates a world and prints its root map and statistics, or the
//! statistics alone as JSON.

use std::path::PathBuf;

use clap::Parser;
use sludge::{World, WorldConfig};

/// Render a generated world without exploring it
#[derive(Parser, Debug)]
#[command(name = "render_world")]
#[command(about = "Print the root map and registry statistics of a generated world")]
struct Args {
    /// World seed
    #[arg(long)]
    seed: Option<u64>,

    /// World config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("sludge=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {:?}: {}", path, e);
            std::process::exit(1);
        }),
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let world = match World::from_config(config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("World generation failed: {}", e);
            std::process::exit(1);
        }
    };
    let summary = world.summary();

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", world.render_map());
    println!();
    println!("Seed:        {}", summary.seed);
    println!("Size:        {}x{}", summary.width, summary.height);
    println!("Areas:       {}", summary.areas);
    println!("Caves:       {}", summary.caves);
    println!("Settlements: {}", summary.settlements);
    println!("Buildings:   {}", summary.buildings);
    println!("Merchants:   {}", summary.merchants);
    println!("Enemies:     {}", summary.enemies);
    println!("Item stacks: {}", summary.item_stacks);
    println!(
        "Tiles:       {} water, {} grass, {} rock, {} path",
        summary.water_tiles, summary.grass_tiles, summary.rock_tiles, summary.path_tiles
    );
}
