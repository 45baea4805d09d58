use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::config::{BaseTable, BlocksConfig};
use super::types::{BiomeTint, BlockId, ids};

const TABLE_LEN: usize = 256;

// Blocks that never hide what is behind them in the classic block set.
const CLASSIC_TRANSPARENT: &[BlockId] = &[
    0, 6, 8, 9, 18, 20, 37, 38, 39, 40, 44, 50, 51, 52, 53, 55, 59, 63, 64, 65, 66, 67, 68, 69,
    70, 71, 72, 75, 76, 77, 79, 81, 83, 85, 92,
];

const CLASSIC_NAMES: &[(BlockId, &str)] = &[
    (ids::AIR, "air"),
    (ids::STONE, "stone"),
    (ids::GRASS, "grass"),
    (ids::DIRT, "dirt"),
    (8, "flowing_water"),
    (ids::WATER, "water"),
    (ids::SAND, "sand"),
    (ids::LOG, "log"),
    (ids::LEAVES, "leaves"),
];

/// Per-block-id lookup of transparency and biome tint.
///
/// Both lookups are a single array index so they can sit on the per-voxel path.
#[derive(Clone, Debug)]
pub struct BlockTable {
    transparent: [bool; TABLE_LEN],
    tint: [BiomeTint; TABLE_LEN],
    pub by_name: HashMap<String, BlockId>,
}

impl Default for BlockTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl BlockTable {
    /// A table where every block but air is opaque and nothing is tinted.
    pub fn empty() -> Self {
        let mut transparent = [false; TABLE_LEN];
        transparent[ids::AIR as usize] = true;
        Self {
            transparent,
            tint: [BiomeTint::None; TABLE_LEN],
            by_name: HashMap::new(),
        }
    }

    /// The classic block set: grass and leaves tinted, foliage/liquids/torches transparent.
    pub fn classic() -> Self {
        let mut table = Self::empty();
        for &id in CLASSIC_TRANSPARENT {
            table.transparent[id as usize] = true;
        }
        table.tint[ids::GRASS as usize] = BiomeTint::Grass;
        table.tint[ids::LEAVES as usize] = BiomeTint::Leaves;
        for &(id, name) in CLASSIC_NAMES {
            table.by_name.insert(name.to_string(), id);
        }
        table
    }

    #[inline]
    pub fn is_transparent(&self, id: BlockId) -> bool {
        self.transparent[id as usize]
    }

    #[inline]
    pub fn is_opaque(&self, id: BlockId) -> bool {
        !self.transparent[id as usize]
    }

    #[inline]
    pub fn biome_tint(&self, id: BlockId) -> BiomeTint {
        self.tint[id as usize]
    }

    pub fn set_transparent(&mut self, id: BlockId, transparent: bool) {
        self.transparent[id as usize] = transparent;
    }

    pub fn set_biome_tint(&mut self, id: BlockId, tint: BiomeTint) {
        self.tint[id as usize] = tint;
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn from_config(cfg: BlocksConfig) -> Self {
        let mut table = match cfg.base {
            BaseTable::Classic => Self::classic(),
            BaseTable::Empty => Self::empty(),
        };
        for def in cfg.blocks {
            if let Some(t) = def.transparent {
                table.set_transparent(def.id, t);
            }
            if let Some(tint) = def.biome_tint {
                table.set_biome_tint(def.id, tint);
            }
            if let Some(name) = def.name {
                table.by_name.insert(name, def.id);
            }
        }
        table
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Ok(Self::from_config(cfg))
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
