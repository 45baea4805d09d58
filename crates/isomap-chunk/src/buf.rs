use isomap_blocks::BlockId;
use isomap_blocks::types::ids;

use super::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME, ChunkCoord};

/// Decoded block ids of one chunk, laid out x-major then y then z.
#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub blocks: Vec<BlockId>,
}

impl ChunkBuf {
    /// All-air chunk.
    pub fn empty(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![ids::AIR; CHUNK_VOLUME],
        }
    }

    /// Wraps decoded block ids; short or long input is padded with air / truncated.
    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<BlockId>) -> Self {
        let mut b = blocks;
        if b.len() != CHUNK_VOLUME {
            b.resize(CHUNK_VOLUME, ids::AIR);
        }
        Self { coord, blocks: b }
    }

    pub fn from_fn(coord: ChunkCoord, mut f: impl FnMut(usize, usize, usize) -> BlockId) -> Self {
        let mut blocks = Vec::with_capacity(CHUNK_VOLUME);
        for x in 0..CHUNK_SIZE_X {
            for y in 0..CHUNK_SIZE_Y {
                for z in 0..CHUNK_SIZE_Z {
                    blocks.push(f(x, y, z));
                }
            }
        }
        Self { coord, blocks }
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (x * CHUNK_SIZE_Y + y) * CHUNK_SIZE_Z + z
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        self.blocks[Self::idx(x, y, z)] = id;
    }

    /// `true` when nothing in the chunk could produce a sprite.
    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == ids::AIR)
    }
}
