use serde::{Deserialize, Serialize};

/// Raw block id as stored in the chunk voxel grid.
pub type BlockId = u8;

/// Ids of the blocks the renderer and the demo world refer to by name.
pub mod ids {
    use super::BlockId;

    pub const AIR: BlockId = 0;
    pub const STONE: BlockId = 1;
    pub const GRASS: BlockId = 2;
    pub const DIRT: BlockId = 3;
    pub const WATER: BlockId = 9;
    pub const SAND: BlockId = 12;
    pub const LOG: BlockId = 17;
    pub const LEAVES: BlockId = 18;
}

/// Which biome color table (if any) tints a block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeTint {
    #[default]
    None,
    Grass,
    Leaves,
}

impl BiomeTint {
    #[inline]
    pub fn is_tinted(self) -> bool {
        !matches!(self, BiomeTint::None)
    }
}
