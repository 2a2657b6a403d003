use std::sync::Arc;

use strata_blocks::{BlockFace, BlockType, FaceData, FaceKey, TileTable};
use strata_geom::IVec3;
use strata_world::{ChunkCoord, ChunkDims, WorldGenerator};

use crate::face_list::FaceList;
use crate::lookup::BlockLookup;

/// One full-height column of the world and the faces needed to draw it.
///
/// Invariant: `faces` holds exactly one record for every (solid cell, face)
/// pair whose neighbor is open, and nothing else. A neighbor is open when it is
/// air in this chunk, lies above or below the chunk, or lies in another chunk
/// and the lookup reports air (unloaded chunks read as air).
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    dims: ChunkDims,
    origin: IVec3,
    blocks: Vec<BlockType>,
    pub(crate) faces: FaceList,
    tiles: Arc<TileTable>,
}

/// Where the cell across a face lives, relative to a chunk.
pub(crate) enum Neighbor {
    /// Inside this chunk, block-local position.
    Local(IVec3),
    /// Inside a horizontally adjacent chunk, local to that chunk.
    Remote(ChunkCoord, IVec3),
    /// Above the top or below the bottom of the world.
    Void,
}

impl Chunk {
    /// An all-air chunk with no faces.
    pub fn new(coord: ChunkCoord, dims: ChunkDims, tiles: Arc<TileTable>) -> Self {
        Self {
            coord,
            dims,
            origin: coord.origin(dims),
            blocks: vec![BlockType::Air; dims.volume()],
            faces: FaceList::new(),
            tiles,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    pub fn world_origin(&self) -> IVec3 {
        self.origin
    }

    #[inline]
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    #[inline]
    pub fn tiles(&self) -> &TileTable {
        &self.tiles
    }

    #[inline]
    pub fn is_valid_block_index(&self, pos: IVec3) -> bool {
        self.dims.contains(pos)
    }

    /// Block at a local position; air outside the chunk.
    #[inline]
    pub fn get_local(&self, pos: IVec3) -> BlockType {
        if !self.is_valid_block_index(pos) {
            return BlockType::Air;
        }
        self.blocks[self.dims.idx(pos.x as usize, pos.y as usize, pos.z as usize)]
    }

    #[inline]
    pub fn contains_world(&self, pos: IVec3) -> bool {
        self.is_valid_block_index(pos - self.origin)
    }

    #[inline]
    pub fn get_world(&self, pos: IVec3) -> Option<BlockType> {
        if !self.contains_world(pos) {
            return None;
        }
        Some(self.get_local(pos - self.origin))
    }

    #[inline]
    pub fn faces(&self) -> &[FaceData] {
        self.faces.as_slice()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn has_face(&self, pos: IVec3, face: BlockFace) -> bool {
        self.faces.contains(FaceKey::new(pos, face))
    }

    /// Fills every cell from the generator.
    pub fn generate(&mut self, generator: &WorldGenerator) {
        let ChunkDims { sx, sy, sz } = self.dims;
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let wp = self.origin + IVec3::new(x as i32, y as i32, z as i32);
                    self.blocks[self.dims.idx(x, y, z)] = generator.block_type_at(wp);
                }
            }
        }
    }

    /// Rebuilds the face list from scratch.
    pub fn build_faces(&mut self, lookup: &impl BlockLookup) {
        self.faces.clear();
        let ChunkDims { sx, sy, sz } = self.dims;
        for z in 0..sz {
            for y in 0..sy {
                for x in 0..sx {
                    let ty = self.blocks[self.dims.idx(x, y, z)];
                    if ty.is_air() {
                        continue;
                    }
                    let pos = IVec3::new(x as i32, y as i32, z as i32);
                    for face in BlockFace::ALL {
                        if self.is_face_visible(pos, face, lookup) {
                            self.insert_face(pos, face, ty);
                        }
                    }
                }
            }
        }
        log::trace!(
            target: "chunks",
            "meshed ({}, {}) faces={}",
            self.coord.cx,
            self.coord.cy,
            self.faces.len()
        );
    }

    /// True when the cell across `face` from local `pos` is open.
    pub fn is_face_visible(&self, pos: IVec3, face: BlockFace, lookup: &impl BlockLookup) -> bool {
        match self.locate(pos + face.normal()) {
            Neighbor::Void => true,
            Neighbor::Local(n) => self.get_local(n).is_air(),
            Neighbor::Remote(_, _) => lookup.block_at(self.origin + pos + face.normal()).is_air(),
        }
    }

    /// Re-evaluates the faces on one horizontal border against the current
    /// neighbors. Returns whether the face list changed.
    pub fn reconcile_border(&mut self, side: BlockFace, lookup: &impl BlockLookup) -> bool {
        if !side.is_horizontal() {
            return false;
        }
        let mut changed = false;
        for pos in self.border_cells(side) {
            let ty = self.get_local(pos);
            if ty.is_air() {
                continue;
            }
            let visible = self.is_face_visible(pos, side, lookup);
            let present = self.has_face(pos, side);
            if visible && !present {
                changed |= self.insert_face(pos, side, ty);
            } else if !visible && present {
                changed |= self.faces.remove(FaceKey::new(pos, side)).is_some();
            }
        }
        changed
    }

    fn border_cells(&self, side: BlockFace) -> Vec<IVec3> {
        let ChunkDims { sx, sy, sz } = self.dims;
        let (sx, sy, sz) = (sx as i32, sy as i32, sz as i32);
        let mut cells = Vec::new();
        match side {
            BlockFace::Left | BlockFace::Right => {
                let x = if side == BlockFace::Left { 0 } else { sx - 1 };
                for z in 0..sz {
                    for y in 0..sy {
                        cells.push(IVec3::new(x, y, z));
                    }
                }
            }
            BlockFace::Front | BlockFace::Back => {
                let y = if side == BlockFace::Front { 0 } else { sy - 1 };
                for z in 0..sz {
                    for x in 0..sx {
                        cells.push(IVec3::new(x, y, z));
                    }
                }
            }
            BlockFace::Top | BlockFace::Bottom => {}
        }
        cells
    }

    pub(crate) fn locate(&self, n: IVec3) -> Neighbor {
        if n.z < 0 || n.z >= self.dims.sz as i32 {
            return Neighbor::Void;
        }
        if self.is_valid_block_index(n) {
            return Neighbor::Local(n);
        }
        let world = self.origin + n;
        let coord = ChunkCoord::containing(world, self.dims);
        Neighbor::Remote(coord, world - coord.origin(self.dims))
    }

    /// Inserts the face of a block of type `ty` at `pos`. Air has no faces.
    pub(crate) fn insert_face(&mut self, pos: IVec3, face: BlockFace, ty: BlockType) -> bool {
        match self.tiles.tile(ty, face) {
            Some(tile) => self.faces.insert(FaceData::new(pos, face, tile)),
            None => false,
        }
    }

    #[inline]
    pub(crate) fn write_block(&mut self, pos: IVec3, ty: BlockType) {
        let i = self.dims.idx(pos.x as usize, pos.y as usize, pos.z as usize);
        self.blocks[i] = ty;
    }
}

impl BlockLookup for Chunk {
    #[inline]
    fn block_at(&self, pos: IVec3) -> BlockType {
        self.get_world(pos).unwrap_or(BlockType::Air)
    }
}
