use strata_blocks::TileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("chunk dimensions {sx}x{sy}x{sz} outside 1..={max:?}")]
    InvalidDims {
        sx: usize,
        sy: usize,
        sz: usize,
        max: (usize, usize, usize),
    },
    #[error(transparent)]
    InvalidTile(#[from] TileError),
}
