use proptest::prelude::*;
use strata_blocks::BlockType;
use strata_geom::IVec3;
use strata_world::{ChunkCoord, ChunkDims, WorldGenerator};

fn coord() -> impl Strategy<Value = i32> {
    -100_000i32..=100_000
}

proptest! {
    // Same seed, same position -> same block, across generator instances
    #[test]
    fn generation_is_deterministic(
        seed in any::<i32>(),
        x in coord(),
        y in coord(),
        z in -4i32..40,
    ) {
        let a = WorldGenerator::with_seed(seed);
        let b = WorldGenerator::with_seed(seed);
        let p = IVec3::new(x, y, z);
        prop_assert_eq!(a.block_type_at(p), b.block_type_at(p));
        prop_assert_eq!(a.block_type_at(p), a.block_type_at(p));
    }

    // Each column has exactly one grass cell and nothing solid above it
    #[test]
    fn single_surface_per_column(seed in any::<i32>(), x in coord(), y in coord()) {
        let wg = WorldGenerator::with_seed(seed);
        let mut grass = 0;
        let mut seen_grass = false;
        for z in -8..32 {
            let b = wg.block_type_at(IVec3::new(x, y, z));
            if b == BlockType::Grass {
                grass += 1;
                seen_grass = true;
            } else if seen_grass {
                prop_assert_eq!(b, BlockType::Air);
            }
        }
        prop_assert_eq!(grass, 1);
    }

    // containing() and origin() agree for every cell of a chunk footprint
    #[test]
    fn chunk_origin_contains_cells(x in coord(), y in coord()) {
        let dims = ChunkDims::default();
        let c = ChunkCoord::containing(IVec3::new(x, y, 0), dims);
        let o = c.origin(dims);
        prop_assert!(x >= o.x && x < o.x + dims.sx as i32);
        prop_assert!(y >= o.y && y < o.y + dims.sy as i32);
        prop_assert_eq!(o.z, 0);
    }
}
