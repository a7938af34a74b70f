//! Sludge - Entry Point
//!
//! Generates a world and lets a single local player wander it from stdin.
//! The networked session layer drives the same `World` calls.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use sludge::core::error::Result;
use sludge::{Catalog, Direction, MoveOutcome, Player, World, WorldConfig};

/// Explore a generated Sludge world from the terminal
#[derive(Parser, Debug)]
#[command(name = "sludge")]
#[command(about = "Generate a world and explore it from the terminal")]
struct Args {
    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// World config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog TOML file (items, enemies, names, vocabulary)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Root terrain width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Root terrain height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Print the root map before exploring
    #[arg(long)]
    map: bool,

    /// Player name
    #[arg(long, default_value = "Wanderer")]
    name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sludge=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    let world = World::generate(config, catalog)?;
    if args.map {
        print!("{}", world.render_map());
    }

    println!("\n=== SLUDGE ===");
    println!("Commands:");
    println!("  w/a/s/d [n]  - Walk up to n cells (default 1)");
    println!("  look / l     - Look around");
    println!("  enter / e    - Pass through an entrance or exit");
    println!("  map / m      - Show the map of the wilds");
    println!("  quit / q     - Exit");
    println!();

    let mut player = world.spawn_player(args.name);
    world.look(&mut player);
    flush(&mut player)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            prompt()?;
            continue;
        };

        match command.to_ascii_lowercase().as_str() {
            "quit" | "q" => break,
            "look" | "l" => world.look(&mut player),
            "enter" | "e" => {
                world.enter_portal(&mut player);
            }
            "map" | "m" => print!("{}", world.render_map()),
            key => match Direction::from_key(key) {
                Some(direction) => {
                    let distance = words.next().and_then(|n| n.parse().ok()).unwrap_or(1);
                    if let MoveOutcome::Moved { distance, .. } =
                        world.move_player(&mut player, direction, distance)
                    {
                        tracing::debug!("{} moved {} cells {:?}", player.name, distance, direction);
                    }
                }
                None => player.say(format!("Unknown command: {}", key)),
            },
        }

        flush(&mut player)?;
    }

    Ok(())
}

fn flush(player: &mut Player) -> Result<()> {
    print!("{}", player.take_output());
    prompt()
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}
