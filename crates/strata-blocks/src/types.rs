use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of block types. `Air` is the empty sentinel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    Air,
    Dirt,
    Grass,
    Stone,
    Cobblestone,
}

impl BlockType {
    /// Number of solid (tile-bearing) types.
    pub const SOLID_COUNT: usize = 4;

    pub const ALL_SOLID: [BlockType; Self::SOLID_COUNT] = [
        BlockType::Dirt,
        BlockType::Grass,
        BlockType::Stone,
        BlockType::Cobblestone,
    ];

    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, BlockType::Air)
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Row in per-type tables; `None` for air.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            BlockType::Air => None,
            BlockType::Dirt => Some(0),
            BlockType::Grass => Some(1),
            BlockType::Stone => Some(2),
            BlockType::Cobblestone => Some(3),
        }
    }

    /// Inverse of [`BlockType::index`]. Out-of-range rows map to air.
    #[inline]
    pub fn from_index(i: usize) -> BlockType {
        Self::ALL_SOLID.get(i).copied().unwrap_or(BlockType::Air)
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Dirt => "dirt",
            BlockType::Grass => "grass",
            BlockType::Stone => "stone",
            BlockType::Cobblestone => "cobblestone",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_distinct_from_every_solid_type() {
        for ty in BlockType::ALL_SOLID {
            assert_ne!(ty, BlockType::Air);
            assert!(ty.is_solid());
        }
        assert!(BlockType::Air.is_air());
        assert_eq!(BlockType::default(), BlockType::Air);
    }

    #[test]
    fn index_roundtrip() {
        for ty in BlockType::ALL_SOLID {
            let i = ty.index().unwrap();
            assert_eq!(BlockType::from_index(i), ty);
        }
        assert_eq!(BlockType::Air.index(), None);
        assert_eq!(BlockType::from_index(99), BlockType::Air);
    }

    #[test]
    fn display_uses_lowercase_names() {
        assert_eq!(BlockType::Cobblestone.to_string(), "cobblestone");
        assert_eq!(BlockType::Air.to_string(), "air");
    }
}
