use strata_blocks::BlockType;
use strata_geom::IVec3;
use strata_world::ChunkCoord;

use crate::chunk::Chunk;

/// Read access to blocks outside the chunk being meshed or edited.
///
/// Positions are world cells. Anything not backed by a loaded chunk reads as
/// air, which the mesher treats as open space.
pub trait BlockLookup {
    fn block_at(&self, pos: IVec3) -> BlockType;
}

/// Mutable access to neighboring chunks, used by edits that cross a chunk
/// boundary and must update the neighbor's face list.
pub trait ChunkAccess: BlockLookup {
    fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk>;
}

/// A world with nothing loaded around the chunk.
#[derive(Clone, Copy, Debug, Default)]
pub struct Isolated;

impl BlockLookup for Isolated {
    #[inline]
    fn block_at(&self, _pos: IVec3) -> BlockType {
        BlockType::Air
    }
}

impl ChunkAccess for Isolated {
    #[inline]
    fn chunk_mut(&mut self, _coord: ChunkCoord) -> Option<&mut Chunk> {
        None
    }
}

impl<T: BlockLookup + ?Sized> BlockLookup for &T {
    #[inline]
    fn block_at(&self, pos: IVec3) -> BlockType {
        (**self).block_at(pos)
    }
}
