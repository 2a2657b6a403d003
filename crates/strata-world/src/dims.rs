use strata_blocks::face_data::{MAX_X, MAX_Y, MAX_Z};
use strata_geom::IVec3;

use crate::error::ConfigError;

/// Chunk extent in cells. Bounded by the packed face position widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkDims {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self {
            sx: 16,
            sy: 16,
            sz: 128,
        }
    }
}

impl ChunkDims {
    pub fn new(sx: usize, sy: usize, sz: usize) -> Result<Self, ConfigError> {
        if sx == 0 || sy == 0 || sz == 0 || sx > MAX_X || sy > MAX_Y || sz > MAX_Z {
            return Err(ConfigError::InvalidDims {
                sx,
                sy,
                sz,
                max: (MAX_X, MAX_Y, MAX_Z),
            });
        }
        Ok(Self { sx, sy, sz })
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.sx * self.sy * self.sz
    }

    #[inline]
    pub fn contains(&self, p: IVec3) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as usize) < self.sx
            && (p.y as usize) < self.sy
            && (p.z as usize) < self.sz
    }

    /// Linear storage index, X fastest then Y then Z.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.sy + y) * self.sx + x
    }
}
