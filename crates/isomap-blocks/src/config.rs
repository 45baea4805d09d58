use serde::Deserialize;

use super::types::{BiomeTint, BlockId};

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    // Which built-in table to start from before applying `blocks`.
    #[serde(default)]
    pub base: BaseTable,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BaseTable {
    #[default]
    Classic,
    Empty,
}

// Per-block overrides; absent fields keep the base table's value.
#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub id: BlockId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub transparent: Option<bool>,
    #[serde(default)]
    pub biome_tint: Option<BiomeTint>,
}
