//! # Craftbook
//!
//! Command-line entry point: loads configuration and recipes, runs the
//! configured craft sequence and prints the session report.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use craftbook_engine::{CraftingSession, EngineConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "craftbook")]
#[command(about = "Crafts items from an inventory using a recipe book")]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON recipe file (overrides the configuration)
    #[arg(short, long)]
    recipes: Option<PathBuf>,

    /// JSON item description file (overrides the configuration)
    #[arg(short, long)]
    items: Option<PathBuf>,

    /// Recipe to craft; repeat to craft several in order (overrides the configuration)
    #[arg(long = "craft")]
    craft: Vec<String>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point.
fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let mut filter = EnvFilter::from_default_env();
    for target in ["craftbook", "craftbook_engine", "craftbook_gameplay"] {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!("Craftbook v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from(path),
        None => EngineConfig::load(),
    };
    if let Some(recipes) = args.recipes {
        config.recipe_file = Some(recipes);
    }
    if let Some(items) = args.items {
        config.item_file = Some(items);
    }
    if !args.craft.is_empty() {
        config.craft_sequence = args.craft;
        config.validate();
    }

    let mut session = CraftingSession::from_config(&config)?;
    let result = session.run(&config.craft_sequence);

    // The report is printed even when a craft fails part way through
    print!("{}", session.report());

    if let Err(e) = result {
        error!("Crafting stopped: {e}");
        return Err(e.into());
    }

    info!("Crafting session complete");
    Ok(())
}
