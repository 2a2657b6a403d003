use strata_blocks::FaceData;
use strata_world::ChunkCoord;

/// GPU-facing side of the chunk lifecycle. Only ever called from the thread
/// that owns the [`ChunkManager`](crate::ChunkManager).
pub trait ChunkRenderer {
    /// Creates or refreshes the instance buffer for a chunk.
    fn upload(&mut self, coord: ChunkCoord, faces: &[FaceData]);
    /// Frees whatever `upload` created.
    fn release(&mut self, coord: ChunkCoord);
    fn draw(&mut self, coord: ChunkCoord, face_count: usize);
}
