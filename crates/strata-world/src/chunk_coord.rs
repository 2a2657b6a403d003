use serde::{Deserialize, Serialize};
use strata_blocks::BlockFace;
use strata_geom::IVec3;

use crate::dims::ChunkDims;

/// Horizontal chunk index. Chunks span the full world height, so only X/Y
/// are addressed. Ordering is lexicographic on `(cx, cy)`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
        }
    }

    /// Chunk on the other side of a horizontal face; `None` for top/bottom.
    #[inline]
    pub fn neighbor(self, face: BlockFace) -> Option<Self> {
        if !face.is_horizontal() {
            return None;
        }
        let n = face.normal();
        Some(self.offset(n.x, n.y))
    }

    /// Chebyshev (chessboard) distance in chunk-index space.
    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cy - other.cy).abs())
    }

    /// Index of the chunk containing a world cell.
    #[inline]
    pub fn containing(pos: IVec3, dims: ChunkDims) -> Self {
        Self {
            cx: pos.x.div_euclid(dims.sx as i32),
            cy: pos.y.div_euclid(dims.sy as i32),
        }
    }

    /// World position of local cell (0,0,0).
    #[inline]
    pub fn origin(self, dims: ChunkDims) -> IVec3 {
        IVec3::new(self.cx * dims.sx as i32, self.cy * dims.sy as i32, 0)
    }

    /// Every index within `radius` (Chebyshev) of `self`, row-major.
    pub fn square(self, radius: i32) -> Vec<ChunkCoord> {
        if radius < 0 {
            return Vec::new();
        }
        let side = (2 * radius + 1) as usize;
        let mut coords = Vec::with_capacity(side * side);
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                coords.push(self.offset(dx, dy));
            }
        }
        coords
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containing_uses_floor_division() {
        let dims = ChunkDims::new(16, 16, 128).unwrap();
        assert_eq!(ChunkCoord::containing(IVec3::new(0, 15, 5), dims), ChunkCoord::new(0, 0));
        assert_eq!(ChunkCoord::containing(IVec3::new(-1, 16, 5), dims), ChunkCoord::new(-1, 1));
        assert_eq!(ChunkCoord::containing(IVec3::new(-16, -17, 0), dims), ChunkCoord::new(-1, -2));
    }

    #[test]
    fn neighbor_follows_face_normals() {
        let c = ChunkCoord::new(3, -2);
        assert_eq!(c.neighbor(BlockFace::Right), Some(ChunkCoord::new(4, -2)));
        assert_eq!(c.neighbor(BlockFace::Front), Some(ChunkCoord::new(3, -3)));
        assert_eq!(c.neighbor(BlockFace::Top), None);
    }

    #[test]
    fn square_covers_radius() {
        let sq = ChunkCoord::new(1, 1).square(2);
        assert_eq!(sq.len(), 25);
        assert!(sq.iter().all(|c| c.chebyshev(ChunkCoord::new(1, 1)) <= 2));
        assert!(ChunkCoord::default().square(-1).is_empty());
    }
}
