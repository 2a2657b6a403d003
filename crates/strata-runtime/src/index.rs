use std::collections::BTreeMap;

use strata_blocks::BlockType;
use strata_chunk::{BlockLookup, Chunk, ChunkAccess};
use strata_geom::IVec3;
use strata_world::{ChunkCoord, ChunkDims};

/// One entry of the chunk index.
#[derive(Debug)]
pub enum ChunkSlot {
    /// Requested; the worker has not delivered it yet.
    Pending,
    Ready(Box<Chunk>),
}

impl ChunkSlot {
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, ChunkSlot::Ready(_))
    }

    #[inline]
    pub fn chunk(&self) -> Option<&Chunk> {
        match self {
            ChunkSlot::Ready(c) => Some(c.as_ref()),
            ChunkSlot::Pending => None,
        }
    }

    #[inline]
    pub fn chunk_mut(&mut self) -> Option<&mut Chunk> {
        match self {
            ChunkSlot::Ready(c) => Some(c.as_mut()),
            ChunkSlot::Pending => None,
        }
    }
}

pub(crate) type Index = BTreeMap<ChunkCoord, ChunkSlot>;

fn lookup(map: &Index, dims: ChunkDims, pos: IVec3) -> BlockType {
    if pos.z < 0 || pos.z >= dims.sz as i32 {
        return BlockType::Air;
    }
    let coord = ChunkCoord::containing(pos, dims);
    map.get(&coord)
        .and_then(ChunkSlot::chunk)
        .and_then(|c| c.get_world(pos))
        .unwrap_or(BlockType::Air)
}

/// Read-only view of a locked index.
pub(crate) struct IndexView<'a> {
    pub map: &'a Index,
    pub dims: ChunkDims,
}

impl BlockLookup for IndexView<'_> {
    fn block_at(&self, pos: IVec3) -> BlockType {
        lookup(self.map, self.dims, pos)
    }
}

/// Mutable view used while one chunk is taken out of the index for an edit.
pub(crate) struct IndexAccess<'a> {
    pub map: &'a mut Index,
    pub dims: ChunkDims,
}

impl BlockLookup for IndexAccess<'_> {
    fn block_at(&self, pos: IVec3) -> BlockType {
        lookup(self.map, self.dims, pos)
    }
}

impl ChunkAccess for IndexAccess<'_> {
    fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.map.get_mut(&coord).and_then(ChunkSlot::chunk_mut)
    }
}
