use hashbrown::HashMap;
use strata_blocks::FaceData;
use strata_runtime::ChunkRenderer;
use strata_world::ChunkCoord;

/// Renderer with no GPU behind it. Tracks what a real backend would hold so
/// the driver can report it.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    resident: HashMap<ChunkCoord, usize>,
    pub uploads: u64,
    pub releases: u64,
    pub draws: u64,
    pub drawn_faces: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks with a live instance buffer.
    pub fn resident_chunks(&self) -> usize {
        self.resident.len()
    }

    /// Faces across all live instance buffers.
    pub fn resident_faces(&self) -> usize {
        self.resident.values().sum()
    }
}

impl ChunkRenderer for HeadlessRenderer {
    fn upload(&mut self, coord: ChunkCoord, faces: &[FaceData]) {
        self.resident.insert(coord, faces.len());
        self.uploads += 1;
    }

    fn release(&mut self, coord: ChunkCoord) {
        if self.resident.remove(&coord).is_none() {
            log::warn!(target: "chunks", "release of unknown buffer ({}, {})", coord.cx, coord.cy);
        }
        self.releases += 1;
    }

    fn draw(&mut self, _coord: ChunkCoord, face_count: usize) {
        self.draws += 1;
        self.drawn_faces += face_count as u64;
    }
}
