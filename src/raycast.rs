use std::fmt;

use strata_blocks::{BlockFace, BlockType};
use strata_chunk::BlockLookup;
use strata_geom::{IVec3, Vec3};

/// Result of a pick ray. A miss is air at the origin with a zero normal;
/// check [`HitResult::is_hit`] before using the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitResult {
    pub block: BlockType,
    pub position: IVec3,
    pub normal: IVec3,
    pub face: Option<BlockFace>,
}

impl HitResult {
    pub fn miss() -> Self {
        Self {
            block: BlockType::Air,
            position: IVec3::ZERO,
            normal: IVec3::ZERO,
            face: None,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.block.is_solid()
    }

    /// Cell in front of the struck face, where a placed block goes.
    #[inline]
    pub fn place_position(&self) -> IVec3 {
        self.position + self.normal
    }
}

impl fmt::Display for HitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HitResult: {} | p: {} | n: {}",
            self.block, self.position, self.normal
        )
    }
}

#[inline]
fn inv_or_max(v: f32) -> f32 {
    if v.abs() < 1e-8 { f32::MAX } else { 1.0 / v.abs() }
}

#[inline]
fn signum_i(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Voxel DDA through cells centered on integer coordinates: cell (x, y, z)
/// spans [x - 0.5, x + 0.5) on each axis.
pub fn cast_ray(
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
    lookup: &impl BlockLookup,
) -> HitResult {
    let len = direction.length();
    if len < 1e-6 || !(max_distance > 0.0) || !max_distance.is_finite() {
        return HitResult::miss();
    }
    let d = direction / len;

    // Shift so cell boundaries fall on integers.
    let o = origin + Vec3::new(0.5, 0.5, 0.5);
    let base = o.floor();
    let mut cell = IVec3::new(base.x as i32, base.y as i32, base.z as i32);
    let step = IVec3::new(signum_i(d.x), signum_i(d.y), signum_i(d.z));

    let (ix, iy, iz) = (inv_or_max(d.x), inv_or_max(d.y), inv_or_max(d.z));
    let tdx = if step.x == 0 { f32::MAX } else { ix };
    let tdy = if step.y == 0 { f32::MAX } else { iy };
    let tdz = if step.z == 0 { f32::MAX } else { iz };

    let f = o - base;
    let first = |s: i32, frac: f32, inv: f32| match s {
        1 => (1.0 - frac) * inv,
        -1 => frac * inv,
        _ => f32::MAX,
    };
    let mut tmx = first(step.x, f.x, ix);
    let mut tmy = first(step.y, f.y, iy);
    let mut tmz = first(step.z, f.z, iz);

    let mut prev: Option<IVec3> = None;
    let mut t = 0.0f32;
    let max_steps = (max_distance.ceil() as usize)
        .saturating_mul(3)
        .saturating_add(3);

    for _ in 0..max_steps {
        if t > max_distance {
            break;
        }
        let block = lookup.block_at(cell);
        if block.is_solid() {
            let arrival = match prev {
                Some(p) => -(cell - p).as_vec3(),
                None => -d,
            };
            let face = BlockFace::best_aligned(arrival);
            return HitResult {
                block,
                position: cell,
                normal: face.map_or(IVec3::ZERO, BlockFace::normal),
                face,
            };
        }
        prev = Some(cell);
        if tmx < tmy {
            if tmx < tmz {
                cell.x += step.x;
                t = tmx;
                tmx += tdx;
            } else {
                cell.z += step.z;
                t = tmz;
                tmz += tdz;
            }
        } else if tmy < tmz {
            cell.y += step.y;
            t = tmy;
            tmy += tdy;
        } else {
            cell.z += step.z;
            t = tmz;
            tmz += tdz;
        }
    }
    HitResult::miss()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Cells(HashMap<IVec3, BlockType>);

    impl BlockLookup for Cells {
        fn block_at(&self, pos: IVec3) -> BlockType {
            self.0.get(&pos).copied().unwrap_or(BlockType::Air)
        }
    }

    fn one(pos: IVec3, ty: BlockType) -> Cells {
        let mut c = Cells::default();
        c.0.insert(pos, ty);
        c
    }

    #[test]
    fn downward_ray_hits_top_face() {
        let world = one(IVec3::new(0, 0, 0), BlockType::Stone);
        let hit = cast_ray(Vec3::new(0.2, -0.1, 5.0), Vec3::new(0.0, 0.0, -1.0), 10.0, &world);
        assert!(hit.is_hit());
        assert_eq!(hit.block, BlockType::Stone);
        assert_eq!(hit.position, IVec3::new(0, 0, 0));
        assert_eq!(hit.face, Some(BlockFace::Top));
        assert_eq!(hit.normal, IVec3::new(0, 0, 1));
        assert_eq!(hit.place_position(), IVec3::new(0, 0, 1));
    }

    #[test]
    fn ray_from_block_center_returns_that_block() {
        let world = one(IVec3::new(3, -2, 7), BlockType::Grass);
        let hit = cast_ray(Vec3::new(3.0, -2.0, 7.0), Vec3::new(1.0, 0.0, 0.0), 4.0, &world);
        assert_eq!(hit.block, BlockType::Grass);
        assert_eq!(hit.position, IVec3::new(3, -2, 7));
        // Inside the block: the face facing back along the ray.
        assert_eq!(hit.face, Some(BlockFace::Left));
    }

    #[test]
    fn side_hit_reports_crossed_face() {
        let world = one(IVec3::new(4, 0, 0), BlockType::Dirt);
        let hit = cast_ray(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 10.0, &world);
        assert_eq!(hit.position, IVec3::new(4, 0, 0));
        assert_eq!(hit.face, Some(BlockFace::Left));
        assert_eq!(hit.place_position(), IVec3::new(3, 0, 0));

        let world = one(IVec3::new(0, -3, 0), BlockType::Dirt);
        let hit = cast_ray(Vec3::ZERO, Vec3::new(0.1, -1.0, 0.05), 10.0, &world);
        assert_eq!(hit.position, IVec3::new(0, -3, 0));
        assert_eq!(hit.face, Some(BlockFace::Back));
    }

    #[test]
    fn misses_report_air_and_zero() {
        let empty = Cells::default();
        let hit = cast_ray(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), 50.0, &empty);
        assert_eq!(hit, HitResult::miss());
        assert!(!hit.is_hit());
        assert_eq!(hit.to_string(), "HitResult: air | p: 0,0,0 | n: 0,0,0");

        let world = one(IVec3::new(0, 0, -8), BlockType::Stone);
        assert!(!cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 5.0, &world).is_hit());
        assert!(!cast_ray(Vec3::ZERO, Vec3::ZERO, 5.0, &world).is_hit());
        assert!(!cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0, &world).is_hit());
    }

    #[test]
    fn huge_range_still_stops_at_first_block() {
        let world = one(IVec3::new(5, 0, 0), BlockType::Stone);
        let hit = cast_ray(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1e30, &world);
        assert_eq!(hit.position, IVec3::new(5, 0, 0));
        assert_eq!(hit.face, Some(BlockFace::Left));
    }

    #[test]
    fn display_names_hit() {
        let world = one(IVec3::new(0, 0, -2), BlockType::Cobblestone);
        let hit = cast_ray(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 5.0, &world);
        assert_eq!(hit.to_string(), "HitResult: cobblestone | p: 0,0,-2 | n: 0,0,1");
    }
}
