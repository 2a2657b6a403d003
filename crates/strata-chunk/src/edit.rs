//! Incremental single-block edits that keep the face list exact without a
//! rebuild.

use strata_blocks::{BlockFace, BlockType, FaceKey};
use strata_geom::IVec3;
use strata_world::ChunkCoord;

use crate::chunk::{Chunk, Neighbor};
use crate::lookup::ChunkAccess;

/// What an edit touched. Neighbor chunks listed in `touched` had their face
/// lists mutated and must be re-published by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub changed: bool,
    pub touched: Vec<ChunkCoord>,
}

impl EditOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    fn touch(&mut self, coord: ChunkCoord) {
        if !self.touched.contains(&coord) {
            self.touched.push(coord);
        }
    }

    fn merge(mut self, other: EditOutcome) -> Self {
        self.changed |= other.changed;
        for c in other.touched {
            self.touch(c);
        }
        self
    }
}

impl Chunk {
    /// Clears a solid cell. Faces of the removed block disappear and faces of
    /// solid neighbors that it was hiding appear.
    pub fn remove_block_at(&mut self, pos: IVec3, access: &mut impl ChunkAccess) -> EditOutcome {
        if !self.is_valid_block_index(pos) {
            log::trace!(target: "edits", "remove ignored: {} outside chunk", pos);
            return EditOutcome::unchanged();
        }
        if self.get_local(pos).is_air() {
            return EditOutcome::unchanged();
        }
        let mut out = EditOutcome {
            changed: true,
            touched: Vec::new(),
        };
        for face in BlockFace::ALL {
            if self.faces.remove(FaceKey::new(pos, face)).is_some() {
                continue;
            }
            // Hidden face: the neighbor across it is solid and now exposed.
            match self.locate(pos + face.normal()) {
                Neighbor::Void => {}
                Neighbor::Local(n) => {
                    let ty = self.get_local(n);
                    self.insert_face(n, face.inverse(), ty);
                }
                Neighbor::Remote(coord, n) => {
                    if let Some(other) = access.chunk_mut(coord) {
                        let ty = other.get_local(n);
                        if other.insert_face(n, face.inverse(), ty) {
                            out.touch(coord);
                        }
                    }
                }
            }
        }
        self.write_block(pos, BlockType::Air);
        log::debug!(
            target: "edits",
            "removed block at {} in ({}, {})",
            pos,
            self.coord().cx,
            self.coord().cy
        );
        out
    }

    /// Places a solid block into an air cell.
    pub fn add_block_at(
        &mut self,
        pos: IVec3,
        ty: BlockType,
        access: &mut impl ChunkAccess,
    ) -> EditOutcome {
        if !self.is_valid_block_index(pos) {
            log::trace!(target: "edits", "add ignored: {} outside chunk", pos);
            return EditOutcome::unchanged();
        }
        if ty.is_air() || self.get_local(pos).is_solid() {
            return EditOutcome::unchanged();
        }
        let mut out = EditOutcome {
            changed: true,
            touched: Vec::new(),
        };
        for face in BlockFace::ALL {
            match self.locate(pos + face.normal()) {
                Neighbor::Void => {
                    self.insert_face(pos, face, ty);
                }
                Neighbor::Local(n) => {
                    if self.get_local(n).is_solid() {
                        self.faces.remove(FaceKey::new(n, face.inverse()));
                    } else {
                        self.insert_face(pos, face, ty);
                    }
                }
                Neighbor::Remote(coord, n) => {
                    let world = self.world_origin() + pos + face.normal();
                    if access.block_at(world).is_solid() {
                        if let Some(other) = access.chunk_mut(coord) {
                            if other.faces.remove(FaceKey::new(n, face.inverse())).is_some() {
                                out.touch(coord);
                            }
                        }
                    } else {
                        self.insert_face(pos, face, ty);
                    }
                }
            }
        }
        self.write_block(pos, ty);
        log::debug!(
            target: "edits",
            "added {} at {} in ({}, {})",
            ty,
            pos,
            self.coord().cx,
            self.coord().cy
        );
        out
    }

    /// Air removes, solid on air adds, a different solid type replaces.
    pub fn set_block_at(
        &mut self,
        pos: IVec3,
        ty: BlockType,
        access: &mut impl ChunkAccess,
    ) -> EditOutcome {
        if !self.is_valid_block_index(pos) {
            log::trace!(target: "edits", "set ignored: {} outside chunk", pos);
            return EditOutcome::unchanged();
        }
        let current = self.get_local(pos);
        if ty.is_air() {
            return self.remove_block_at(pos, access);
        }
        if current.is_air() {
            return self.add_block_at(pos, ty, access);
        }
        if current == ty {
            return EditOutcome::unchanged();
        }
        let removed = self.remove_block_at(pos, access);
        removed.merge(self.add_block_at(pos, ty, access))
    }
}
