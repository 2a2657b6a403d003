use strata_geom::{IVec3, Vec3};

/// The six axis-aligned block faces. Z is up.
///
/// The discriminant order is load-bearing: it indexes the tile table and is
/// stored in the 3-bit direction field of [`crate::FaceData`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum BlockFace {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

impl BlockFace {
    pub const COUNT: usize = 6;

    pub const ALL: [BlockFace; Self::COUNT] = [
        BlockFace::Front,
        BlockFace::Back,
        BlockFace::Left,
        BlockFace::Right,
        BlockFace::Top,
        BlockFace::Bottom,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a face.
    #[inline]
    pub fn from_index(i: usize) -> Option<BlockFace> {
        Self::ALL.get(i).copied()
    }

    /// Integer grid delta when stepping out through this face.
    #[inline]
    pub fn normal(self) -> IVec3 {
        match self {
            BlockFace::Front => IVec3::new(0, -1, 0),
            BlockFace::Back => IVec3::new(0, 1, 0),
            BlockFace::Left => IVec3::new(-1, 0, 0),
            BlockFace::Right => IVec3::new(1, 0, 0),
            BlockFace::Top => IVec3::new(0, 0, 1),
            BlockFace::Bottom => IVec3::new(0, 0, -1),
        }
    }

    #[inline]
    pub fn normal_f32(self) -> Vec3 {
        self.normal().as_vec3()
    }

    #[inline]
    pub fn inverse(self) -> BlockFace {
        match self {
            BlockFace::Front => BlockFace::Back,
            BlockFace::Back => BlockFace::Front,
            BlockFace::Left => BlockFace::Right,
            BlockFace::Right => BlockFace::Left,
            BlockFace::Top => BlockFace::Bottom,
            BlockFace::Bottom => BlockFace::Top,
        }
    }

    /// True for faces whose normal leaves the chunk's horizontal footprint.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        !matches!(self, BlockFace::Top | BlockFace::Bottom)
    }

    /// The two in-plane axes (0 = X, 1 = Y, 2 = Z) used when growing
    /// rectangles across a face plane.
    #[inline]
    pub fn plane_axes(self) -> (usize, usize) {
        match self {
            BlockFace::Front | BlockFace::Back => (0, 2),
            BlockFace::Left | BlockFace::Right => (1, 2),
            BlockFace::Top | BlockFace::Bottom => (0, 1),
        }
    }

    /// Face whose normal has the largest positive dot product with `v`.
    /// Ties keep the earlier face in [`BlockFace::ALL`] order.
    pub fn best_aligned(v: Vec3) -> Option<BlockFace> {
        let mut best = None;
        let mut best_dot = 0.0f32;
        for face in Self::ALL {
            let d = v.dot(face.normal_f32());
            if d > best_dot {
                best_dot = d;
                best = Some(face);
            }
        }
        best
    }
}
