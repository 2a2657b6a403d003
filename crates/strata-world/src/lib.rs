//! World sizing, chunk addressing, and terrain generation.
#![forbid(unsafe_code)]

mod chunk_coord;
mod dims;
mod error;
pub mod generator;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use dims::ChunkDims;
pub use error::ConfigError;
pub use generator::WorldGenerator;
pub use worldgen::{WorldGenConfig, WorldGenParams};
