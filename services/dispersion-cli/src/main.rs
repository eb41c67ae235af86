//! Particle dispersion command-line driver.
//!
//! Loads a particle dataset and layer options, runs a display layer
//! against a headless map and prints what the renderer received:
//! - `render`: heatmap payload or keyframe markers for a display mode
//! - `bounds`: bounding box of every particle position
//! - `ids`: unique particle ids
//! - `stats`: grid statistics of a binned heatmap

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dispersion_layer::DisplayMode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "dispersion-cli")]
#[command(about = "Render particle dispersion datasets without a map")]
struct Args {
    /// Particle dataset (JSON object of step key to particle records)
    #[arg(long, env = "DISPERSION_DATA")]
    data: PathBuf,

    /// Layer options file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, env = "DISPERSION_OPTIONS")]
    options: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display a mode and print the rendered layer
    Render {
        /// FINAL, EXPOSURE or KEYFRAME
        #[arg(long)]
        mode: DisplayMode,

        /// Keyframe to show (KEYFRAME mode only)
        #[arg(long)]
        frame: Option<usize>,
    },

    /// Print the bounding box of all particle positions
    Bounds,

    /// Print the unique particle ids
    Ids,

    /// Bin a heatmap mode and print its grid statistics
    Stats {
        #[arg(long, default_value = "EXPOSURE")]
        mode: DisplayMode,

        /// Cell edge length in kilometres (default from options)
        #[arg(long)]
        cell_size_km: Option<f64>,
    },
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays machine readable.
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    info!(data = %args.data.display(), "Starting particle dispersion driver");

    let options = config::load_options(args.options.as_deref())?;
    let data = config::load_dataset(&args.data)?;
    let mut layer = commands::build_layer(options, data)?;

    let output = match args.command {
        Command::Render { mode, frame } => commands::render(&mut layer, mode, frame)?,
        Command::Bounds => commands::bounds(&layer),
        Command::Ids => commands::ids(&layer),
        Command::Stats { mode, cell_size_km } => commands::stats(&mut layer, mode, cell_size_km)?,
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize output")?;
    println!("{}", text);

    layer.deactivate();
    Ok(())
}
