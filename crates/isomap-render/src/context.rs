use isomap_biome::BiomeSource;
use isomap_blocks::{BlockId, BlockTable};
use isomap_chunk::{ChunkBuf, ChunkCoord};

use crate::TextureStore;

/// Everything a mode needs to set itself up for one chunk.
#[derive(Clone, Copy)]
pub struct ChunkContext<'a> {
    /// World chunk coordinate, not yet normalized.
    pub coord: ChunkCoord,
    pub textures: &'a TextureStore,
    /// `Some` when the world renders with biome colors.
    pub biomes: Option<&'a dyn BiomeSource>,
}

/// The voxel currently being visited and where its sprite lands.
#[derive(Clone, Copy, Debug)]
pub struct VoxelContext<'a> {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub block: BlockId,
    /// Top-left corner of the sprite in the destination image.
    pub imgx: i32,
    pub imgy: i32,
    pub chunk: &'a ChunkBuf,
    pub table: &'a BlockTable,
}
