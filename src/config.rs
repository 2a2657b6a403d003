use std::fs;
use std::path::Path;

use serde::Deserialize;
use strata_blocks::{TileTable, TilesConfig};
use strata_world::{ChunkDims, ConfigError, WorldGenConfig};

/// Contents of `strata.toml`. Every key is optional.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    /// Streaming radius in chunks (Chebyshev).
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_time_ms")]
    pub frame_time_ms: u64,
    /// Chunks the reference point advances along +X per frame.
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    /// Frames between ray-picked edits; 0 disables picking.
    #[serde(default = "default_pick_every")]
    pub pick_every: u32,
    #[serde(default)]
    pub chunk: ChunkConfig,
    #[serde(default)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub tiles: TilesConfig,
}

fn default_render_distance() -> i32 {
    4
}
fn default_frames() -> u32 {
    240
}
fn default_frame_time_ms() -> u64 {
    16
}
fn default_walk_speed() -> f32 {
    0.25
}
fn default_pick_every() -> u32 {
    30
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ChunkConfig {
    #[serde(default = "default_size_xy")]
    pub size_x: usize,
    #[serde(default = "default_size_xy")]
    pub size_y: usize,
    #[serde(default = "default_size_z")]
    pub size_z: usize,
}

fn default_size_xy() -> usize {
    16
}
fn default_size_z() -> usize {
    128
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size_x: default_size_xy(),
            size_y: default_size_xy(),
            size_z: default_size_z(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            frames: default_frames(),
            frame_time_ms: default_frame_time_ms(),
            walk_speed: default_walk_speed(),
            pick_every: default_pick_every(),
            chunk: ChunkConfig::default(),
            worldgen: WorldGenConfig::default(),
            tiles: TilesConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn dims(&self) -> Result<ChunkDims, ConfigError> {
        ChunkDims::new(self.chunk.size_x, self.chunk.size_y, self.chunk.size_z)
    }

    pub fn tile_table(&self) -> Result<TileTable, ConfigError> {
        Ok(TileTable::from_config(&self.tiles)?)
    }
}
