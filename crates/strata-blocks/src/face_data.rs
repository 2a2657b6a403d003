//! Packed per-face render records.
//!
//! Layout, 24 bits total:
//!
//! ```text
//! position  (u16): xxxx yyyy zzzz zzzz   x: 4 bits, y: 4 bits, z: 8 bits
//! dir/tile  (u8) : 0ddd tttt             direction: 3 bits, tile id: 4 bits
//! ```
//!
//! The field widths bound the chunk dimensions: at most 16 x 16 x 256 cells.

use std::hash::{Hash, Hasher};

use strata_geom::IVec3;

use crate::face::BlockFace;

pub const X_BITS: u32 = 4;
pub const Y_BITS: u32 = 4;
pub const Z_BITS: u32 = 8;
pub const DIR_BITS: u32 = 3;
pub const TILE_BITS: u32 = 4;

pub const MAX_X: usize = 1 << X_BITS;
pub const MAX_Y: usize = 1 << Y_BITS;
pub const MAX_Z: usize = 1 << Z_BITS;
pub const MAX_TILE: u8 = (1 << TILE_BITS) - 1;

const X_MASK: u16 = (1 << X_BITS) - 1;
const Y_MASK: u16 = (1 << Y_BITS) - 1;
const Z_MASK: u16 = (1 << Z_BITS) - 1;
const DIR_MASK: u8 = (1 << DIR_BITS) - 1;
const TILE_MASK: u8 = MAX_TILE;

/// Join key for face records: block-local position plus direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey {
    pub position: u16,
    pub direction: u8,
}

/// One visible face of one block.
///
/// Equality and hashing only look at position and direction; the tile id is
/// payload.
#[derive(Copy, Clone, Debug)]
pub struct FaceData {
    position: u16,
    direction_tile: u8,
}

impl FaceData {
    /// Packs a block-local position. Components outside the field widths are
    /// masked, so callers must bounds-check first.
    #[inline]
    pub fn new(pos: IVec3, face: BlockFace, tile: u8) -> Self {
        debug_assert!((pos.x as usize) < MAX_X && (pos.y as usize) < MAX_Y);
        debug_assert!((pos.z as usize) < MAX_Z);
        debug_assert!(tile <= MAX_TILE);
        Self {
            position: Self::pack_position(pos),
            direction_tile: ((face.index() as u8 & DIR_MASK) << TILE_BITS) | (tile & TILE_MASK),
        }
    }

    #[inline]
    pub fn pack_position(pos: IVec3) -> u16 {
        ((pos.x as u16 & X_MASK) << (Y_BITS + Z_BITS))
            | ((pos.y as u16 & Y_MASK) << Z_BITS)
            | (pos.z as u16 & Z_MASK)
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.position >> (Y_BITS + Z_BITS)) & X_MASK) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        ((self.position >> Z_BITS) & Y_MASK) as u8
    }

    #[inline]
    pub fn z(self) -> u8 {
        (self.position & Z_MASK) as u8
    }

    #[inline]
    pub fn position(self) -> IVec3 {
        IVec3::new(self.x() as i32, self.y() as i32, self.z() as i32)
    }

    #[inline]
    pub fn face(self) -> BlockFace {
        let d = ((self.direction_tile >> TILE_BITS) & DIR_MASK) as usize;
        // Only `new` writes this field, always from a valid face.
        BlockFace::from_index(d).unwrap_or(BlockFace::Front)
    }

    #[inline]
    pub fn tile(self) -> u8 {
        self.direction_tile & TILE_MASK
    }

    #[inline]
    pub fn key(self) -> FaceKey {
        FaceKey {
            position: self.position,
            direction: (self.direction_tile >> TILE_BITS) & DIR_MASK,
        }
    }

    #[inline]
    pub fn packed_position(self) -> u16 {
        self.position
    }

    #[inline]
    pub fn packed_direction_tile(self) -> u8 {
        self.direction_tile
    }

    /// The 24-bit instance word uploaded to the renderer.
    #[inline]
    pub fn to_bits(self) -> u32 {
        (u32::from(self.position) << 8) | u32::from(self.direction_tile)
    }
}

impl FaceKey {
    #[inline]
    pub fn new(pos: IVec3, face: BlockFace) -> Self {
        Self {
            position: FaceData::pack_position(pos),
            direction: face.index() as u8,
        }
    }
}

impl PartialEq for FaceData {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FaceData {}

impl Hash for FaceData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A rectangle of coplanar same-type faces produced by greedy merging.
///
/// `face.position()` is the rectangle's minimum corner; `width` runs along the
/// face's first in-plane axis and `height` along the second.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MergedFace {
    pub face: FaceData,
    pub width: u16,
    pub height: u16,
}

impl MergedFace {
    #[inline]
    pub fn area(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Every block-local cell covered by this rectangle.
    pub fn cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        let (a, b) = self.face.face().plane_axes();
        let origin = self.face.position();
        (0..i32::from(self.height)).flat_map(move |v| {
            (0..i32::from(self.width)).map(move |u| {
                let mut c = [origin.x, origin.y, origin.z];
                c[a] += u;
                c[b] += v;
                IVec3::new(c[0], c[1], c[2])
            })
        })
    }
}
