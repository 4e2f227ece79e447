use std::fmt;

use glam::IVec3;
use serde::{Deserialize, Serialize};
use voxelstream_core::{ChunkPos, LocalPos};

/// Kind of solid block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// Terrain surface and the default placement type.
    #[default]
    Grass,
    /// Dirt.
    Dirt,
    /// Stone.
    Stone,
    /// Sand.
    Sand,
    /// Wood.
    Wood,
}

impl BlockType {
    /// Every block type, in declaration order.
    pub const ALL: [BlockType; 5] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Wood,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "Grass",
            BlockType::Dirt => "Dirt",
            BlockType::Stone => "Stone",
            BlockType::Sand => "Sand",
            BlockType::Wood => "Wood",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placed voxel. Positions are cached so lookups never recompute them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Kind of block.
    pub block_type: BlockType,
    /// Cell inside the owning chunk.
    pub local: LocalPos,
    /// World voxel, always `origin + local` of the owning chunk.
    pub global: IVec3,
}

impl Block {
    /// Block at `local` inside the chunk at `origin`.
    pub fn new(block_type: BlockType, local: LocalPos, origin: ChunkPos) -> Self {
        Self {
            block_type,
            local,
            global: origin.global(local),
        }
    }
}
