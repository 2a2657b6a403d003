//! Block types, face directions, texture tiles and packed face records.
#![forbid(unsafe_code)]

pub mod face;
pub mod face_data;
pub mod tiles;
pub mod types;

pub use face::BlockFace;
pub use face_data::{FaceData, FaceKey, MergedFace};
pub use tiles::{TileError, TileTable, TilesConfig};
pub use types::BlockType;
