//! Chunk storage, visible-face meshing, greedy merging and incremental edits.
#![forbid(unsafe_code)]

mod chunk;
mod edit;
mod face_list;
pub mod greedy;
mod lookup;

pub use chunk::Chunk;
pub use edit::EditOutcome;
pub use face_list::FaceList;
pub use greedy::greedy_merge;
pub use lookup::{BlockLookup, ChunkAccess, Isolated};
