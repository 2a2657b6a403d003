use serde::Deserialize;
use thiserror::Error;

use crate::face::BlockFace;
use crate::face_data::MAX_TILE;
use crate::types::BlockType;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("tile id {tile} for {block} {face:?} exceeds {max}")]
    OutOfRange {
        block: BlockType,
        face: BlockFace,
        tile: u8,
        max: u8,
    },
}

/// `[block type][face] -> atlas tile id` lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileTable {
    rows: [[u8; BlockFace::COUNT]; BlockType::SOLID_COUNT],
}

impl Default for TileTable {
    fn default() -> Self {
        Self {
            //      FRONT BACK LEFT RIGHT TOP BOTTOM
            rows: [
                [0, 0, 0, 0, 0, 0], // dirt
                [2, 2, 2, 2, 1, 0], // grass
                [3, 3, 3, 3, 3, 3], // stone
                [4, 4, 4, 4, 4, 4], // cobblestone
            ],
        }
    }
}

impl TileTable {
    /// Tile id for one face of a block type; `None` for air.
    #[inline]
    pub fn tile(&self, ty: BlockType, face: BlockFace) -> Option<u8> {
        ty.index().map(|row| self.rows[row][face.index()])
    }

    /// Replaces one row, validating every id against the packed tile width.
    pub fn set_row(&mut self, ty: BlockType, row: [u8; BlockFace::COUNT]) -> Result<(), TileError> {
        let Some(i) = ty.index() else {
            return Ok(());
        };
        for face in BlockFace::ALL {
            let tile = row[face.index()];
            if tile > MAX_TILE {
                return Err(TileError::OutOfRange {
                    block: ty,
                    face,
                    tile,
                    max: MAX_TILE,
                });
            }
        }
        self.rows[i] = row;
        Ok(())
    }

    pub fn from_config(cfg: &TilesConfig) -> Result<Self, TileError> {
        let mut table = TileTable::default();
        let overrides = [
            (BlockType::Dirt, cfg.dirt),
            (BlockType::Grass, cfg.grass),
            (BlockType::Stone, cfg.stone),
            (BlockType::Cobblestone, cfg.cobblestone),
        ];
        for (ty, row) in overrides {
            if let Some(row) = row {
                table.set_row(ty, row)?;
            }
        }
        Ok(table)
    }
}

// --- Config ---

/// Optional per-type overrides, in `BlockFace` order.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TilesConfig {
    #[serde(default)]
    pub dirt: Option<[u8; 6]>,
    #[serde(default)]
    pub grass: Option<[u8; 6]>,
    #[serde(default)]
    pub stone: Option<[u8; 6]>,
    #[serde(default)]
    pub cobblestone: Option<[u8; 6]>,
}
