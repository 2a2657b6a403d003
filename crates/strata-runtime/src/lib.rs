//! Chunk streaming: the live chunk index, the background builder and edits.
#![forbid(unsafe_code)]

mod index;
mod manager;
mod renderer;

pub use index::ChunkSlot;
pub use manager::ChunkManager;
pub use renderer::ChunkRenderer;
