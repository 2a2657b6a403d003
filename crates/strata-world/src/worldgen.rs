use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct WorldGenConfig {
    /// Fixed seed; a time-derived seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<i32>,
    #[serde(default = "default_height_frequency")]
    pub height_frequency: f32,
    #[serde(default = "default_height_scale")]
    pub height_scale: f32,
    #[serde(default)]
    pub base_height: i32,
    #[serde(default = "default_dirt_depth_range")]
    pub dirt_depth_range: u32,
}

fn default_height_frequency() -> f32 {
    0.01
}
fn default_height_scale() -> f32 {
    10.0
}
fn default_dirt_depth_range() -> u32 {
    4
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            height_frequency: default_height_frequency(),
            height_scale: default_height_scale(),
            base_height: 0,
            dirt_depth_range: default_dirt_depth_range(),
        }
    }
}

/// Resolved generation parameters; the seed is always concrete.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub height_frequency: f32,
    pub height_scale: f32,
    pub base_height: i32,
    pub dirt_depth_range: u32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config_with_seed(&WorldGenConfig::default(), 1337)
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        let seed = match cfg.seed {
            Some(s) => s,
            None => {
                let s = time_seed();
                log::info!("worldgen seed not configured; using {}", s);
                s
            }
        };
        Self::from_config_with_seed(cfg, seed)
    }

    pub fn from_config_with_seed(cfg: &WorldGenConfig, seed: i32) -> Self {
        Self {
            seed,
            height_frequency: cfg.height_frequency,
            height_scale: cfg.height_scale,
            base_height: cfg.base_height,
            dirt_depth_range: cfg.dirt_depth_range,
        }
    }
}

fn time_seed() -> i32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    (nanos ^ (nanos >> 32)) as i32
}
