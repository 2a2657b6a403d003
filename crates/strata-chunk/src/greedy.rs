//! Greedy rectangle merge over a chunk's visible faces.
//!
//! Faces sharing a direction and a block type that sit side by side on the
//! same plane collapse into one rectangle. The merge is read-only: it never touches
//! the face list, and the rectangles cover exactly the input cells.

use hashbrown::HashMap;
use strata_blocks::face_data::{MAX_X, MAX_Y, MAX_Z};
use strata_blocks::{BlockFace, BlockType, FaceData, FaceKey, MergedFace};
use strata_geom::IVec3;

use crate::chunk::Chunk;

fn axis_step(axis: usize) -> IVec3 {
    match axis {
        0 => IVec3::new(1, 0, 0),
        1 => IVec3::new(0, 1, 0),
        _ => IVec3::new(0, 0, 1),
    }
}

fn key_at(p: IVec3, face: BlockFace) -> Option<FaceKey> {
    let inside = p.x >= 0
        && p.y >= 0
        && p.z >= 0
        && (p.x as usize) < MAX_X
        && (p.y as usize) < MAX_Y
        && (p.z as usize) < MAX_Z;
    inside.then(|| FaceKey::new(p, face))
}

struct Pending {
    types: HashMap<FaceKey, BlockType>,
}

impl Pending {
    fn qualifies(&self, p: IVec3, face: BlockFace, ty: BlockType) -> bool {
        key_at(p, face).is_some_and(|k| self.types.get(&k) == Some(&ty))
    }

    fn take(&mut self, p: IVec3, face: BlockFace) {
        if let Some(k) = key_at(p, face) {
            self.types.remove(&k);
        }
    }
}

/// Merges faces in list order: each still-pending face seeds a rectangle that
/// grows along the first in-plane axis ("+" then "-") and then along the
/// second, one full row at a time. `block_type` resolves the block behind a
/// face position; the merged record keeps the seed's tile.
pub fn greedy_merge(
    faces: &[FaceData],
    block_type: impl Fn(IVec3) -> BlockType,
) -> Vec<MergedFace> {
    let mut pending = Pending {
        types: faces
            .iter()
            .map(|f| (f.key(), block_type(f.position())))
            .collect(),
    };
    let mut out = Vec::new();

    for seed in faces {
        let Some(&ty) = pending.types.get(&seed.key()) else {
            continue;
        };
        let face = seed.face();
        let start = seed.position();
        let (a, b) = face.plane_axes();
        let (da, db) = (axis_step(a), axis_step(b));

        let mut plus_u = 0;
        while pending.qualifies(start + da * (plus_u + 1), face, ty) {
            plus_u += 1;
        }
        let mut minus_u = 0;
        while pending.qualifies(start - da * (minus_u + 1), face, ty) {
            minus_u += 1;
        }
        let row_start = start - da * minus_u;
        let width = minus_u + plus_u + 1;

        let row_ok = |pending: &Pending, v: i32| {
            (0..width).all(|u| pending.qualifies(row_start + da * u + db * v, face, ty))
        };
        let mut plus_v = 0;
        while row_ok(&pending, plus_v + 1) {
            plus_v += 1;
        }
        let mut minus_v = 0;
        while row_ok(&pending, -(minus_v + 1)) {
            minus_v += 1;
        }
        let corner = row_start - db * minus_v;
        let height = minus_v + plus_v + 1;

        for v in 0..height {
            for u in 0..width {
                pending.take(corner + da * u + db * v, face);
            }
        }
        out.push(MergedFace {
            face: FaceData::new(corner, face, seed.tile()),
            width: width as u16,
            height: height as u16,
        });
    }
    out
}

impl Chunk {
    /// Greedy-merged rectangles for the current face list.
    pub fn greedy_faces(&self) -> Vec<MergedFace> {
        greedy_merge(self.faces(), |p| self.get_local(p))
    }
}
