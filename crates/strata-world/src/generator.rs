//! Deterministic column-based terrain.
//!
//! Surface height comes from seeded 2-D OpenSimplex noise. The cell at the
//! surface is grass, a per-column band below it is dirt, the rest is stone and
//! everything above is air.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use strata_blocks::BlockType;
use strata_geom::IVec3;

use crate::worldgen::WorldGenParams;

pub struct WorldGenerator {
    params: WorldGenParams,
    terrain: FastNoiseLite,
}

impl WorldGenerator {
    pub fn new(params: WorldGenParams) -> Self {
        let mut terrain = FastNoiseLite::with_seed(params.seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(params.height_frequency));
        Self { params, terrain }
    }

    pub fn with_seed(seed: i32) -> Self {
        Self::new(WorldGenParams {
            seed,
            ..WorldGenParams::default()
        })
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    /// Height of the grass cell in column (x, y).
    pub fn surface_height(&self, x: i32, y: i32) -> i32 {
        let n = self.terrain.get_noise_2d(x as f32, y as f32);
        let n = (n * 0.5 + 0.5).clamp(0.0, 1.0);
        self.params.base_height + (n * self.params.height_scale).floor() as i32
    }

    /// Number of dirt cells under the grass in column (x, y).
    pub fn dirt_depth(&self, x: i32, y: i32) -> i32 {
        if self.params.dirt_depth_range == 0 {
            return 0;
        }
        (column_hash(x, y) % self.params.dirt_depth_range) as i32
    }

    pub fn block_type_at(&self, pos: IVec3) -> BlockType {
        let height = self.surface_height(pos.x, pos.y);
        if pos.z == height {
            return BlockType::Grass;
        }
        if pos.z < height {
            if pos.z >= height - self.dirt_depth(pos.x, pos.y) {
                return BlockType::Dirt;
            }
            return BlockType::Stone;
        }
        BlockType::Air
    }
}

/// Integer avalanche hash of a column; independent of the seed.
#[inline]
fn column_hash(x: i32, y: i32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x9E37_79B1) ^ (y as u32).wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    h
}
