use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use strata_runtime::ChunkManager;
use strata_world::{WorldGenParams, WorldGenerator};

mod app;
mod config;
mod raycast;
mod renderer;

use app::App;
use config::EngineConfig;

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Headless voxel world streaming and editing")]
struct Cli {
    /// Engine config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Streaming radius in chunks
    #[arg(long)]
    render_distance: Option<i32>,
    /// World seed; overrides the config file
    #[arg(long)]
    seed: Option<i32>,
    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u32>,
    /// Log filter, e.g. "info" or "chunks=debug"
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
    /// Report greedy-merge statistics at exit
    #[arg(long)]
    greedy: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut log_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = &cli.log_level {
        log_builder.parse_filters(filter);
    }
    log_builder.init();

    let mut cfg = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(r) = cli.render_distance {
        cfg.render_distance = r;
    }
    if let Some(f) = cli.frames {
        cfg.frames = f;
    }
    if let Some(s) = cli.seed {
        cfg.worldgen.seed = Some(s);
    }

    let dims = cfg.dims()?;
    let tiles = Arc::new(cfg.tile_table()?);
    let params = WorldGenParams::from_config(&cfg.worldgen);
    log::info!(target: "events", "seed {}", params.seed);

    let manager = ChunkManager::new(WorldGenerator::new(params), dims, tiles);
    let mut app = App::new(manager, cfg);
    let stats = app.run();
    let late = app.settle(Duration::from_secs(2));

    let manager = app.manager();
    let renderer = app.renderer();
    log::info!(
        target: "events",
        "done: frames={} inserted={} picks={} edits={} chunks={} pending={} faces={}",
        stats.frames,
        stats.inserted + late,
        stats.picks,
        stats.edits,
        manager.chunk_count(),
        manager.pending_count(),
        manager.face_count()
    );
    log::info!(
        target: "events",
        "renderer: uploads={} releases={} draws={} drawn_faces={} resident_faces={}",
        renderer.uploads,
        renderer.releases,
        renderer.draws,
        renderer.drawn_faces,
        renderer.resident_faces()
    );
    if cli.greedy {
        let faces = manager.face_count();
        let rects = app.greedy_rect_count();
        let ratio = if faces == 0 { 1.0 } else { rects as f64 / faces as f64 };
        log::info!(target: "events", "greedy: {} faces -> {} rects ({:.2})", faces, rects, ratio);
    }
    Ok(())
}
