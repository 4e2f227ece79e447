//! voxelstream - headless driver for the chunk streaming core
//!
//! Walks a player through a noise-generated world for a fixed number of
//! ticks, streaming chunks around it and exercising ray picks and collision.

mod config;
mod headless;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stream a voxel world around a simulated player", long_about = None)]
struct Args {
    /// Streaming settings (TOML). Missing or invalid files fall back to defaults
    #[arg(long, default_value = config::DEFAULT_STREAMING_PATH)]
    config: PathBuf,
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Random seed for the player's path
    #[arg(long, default_value_t = 1337)]
    seed: u64,
    /// Override the terrain noise seed
    #[arg(long)]
    world_seed: Option<u32>,
    /// Override the number of generation workers (0 = inline)
    #[arg(long)]
    workers: Option<usize>,
    /// Override the render distance in chunks
    #[arg(long)]
    render_distance: Option<i32>,
    /// Write one JSON event per line to this file
    #[arg(long)]
    events: Option<PathBuf>,
    /// Write a JSON metrics report to this file
    #[arg(long)]
    metrics: Option<PathBuf>,
    /// Save the effective settings to this file before running
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting voxelstream v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut streaming = config::load_from_path(&args.config);
    if let Some(seed) = args.world_seed {
        streaming.noise.seed = seed;
    }
    if let Some(workers) = args.workers {
        streaming.worker_threads = workers;
    }
    if let Some(render_distance) = args.render_distance {
        streaming.render_distance = render_distance;
    }

    if let Some(path) = args.write_config.as_deref() {
        config::save_to_path(&streaming, path)
            .with_context(|| format!("failed to save settings to {}", path.display()))?;
        info!("Saved settings to {}", path.display());
    }

    let summary = headless::run(headless::HeadlessConfig {
        streaming,
        ticks: args.ticks,
        seed: args.seed,
        run_name: format!("headless_seed_{}", args.seed),
        events: args.events,
        metrics: args.metrics,
    })?;

    println!(
        "{:?}: {} chunks loaded, {} generated, {} unloaded, {}/{} rays hit, {:.1}us per update",
        summary.result,
        summary.stats.loaded_chunks,
        summary.stats.chunks_generated,
        summary.stats.chunks_unloaded,
        summary.queries.ray_hits,
        summary.queries.rays_cast,
        summary.streaming.avg_update_time_us,
    );
    Ok(())
}
