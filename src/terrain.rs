//! Noise heightmap world used when no chunk data is supplied.

use fastnoise_lite::{FastNoiseLite, NoiseType};
use isomap_blocks::BlockId;
use isomap_blocks::types::ids;
use isomap_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkBuf, ChunkCoord};

const TRUNK_HEIGHT: usize = 4;
// Trees keep their canopy inside the chunk.
const CANOPY_MARGIN: usize = 2;

pub struct DemoWorld {
    pub seed: i32,
    pub sea_level: usize,
    terrain: FastNoiseLite,
}

impl DemoWorld {
    pub fn new(seed: i32, sea_level: usize) -> Self {
        let mut terrain = FastNoiseLite::with_seed(seed);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(0.02));
        Self {
            seed,
            sea_level,
            terrain,
        }
    }

    /// Surface height of world column `(wx, wy)`; at least 1, below the chunk top.
    pub fn height_at(&self, wx: i32, wy: i32) -> usize {
        let h = self.terrain.get_noise_2d(wx as f32, wy as f32);
        let min_h = self.sea_level as f32 - 12.0;
        let max_h = self.sea_level as f32 + 20.0;
        let hh = ((h + 1.0) * 0.5 * (max_h - min_h) + min_h) as i32;
        // leave room above for a full tree
        hh.clamp(1, (CHUNK_SIZE_Z - TRUNK_HEIGHT - 3) as i32) as usize
    }

    fn surface_block(&self, height: usize) -> BlockId {
        if height <= self.sea_level + 1 {
            ids::SAND
        } else {
            ids::GRASS
        }
    }

    fn tree_at(&self, wx: i32, wy: i32) -> bool {
        let mut h = (wx as u32).wrapping_mul(0x9E37_79B1)
            ^ (wy as u32).wrapping_mul(0x85EB_CA77)
            ^ (self.seed as u32);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        h % 61 == 0
    }

    pub fn generate(&self, coord: ChunkCoord) -> ChunkBuf {
        let mut chunk = ChunkBuf::empty(coord);
        let wx0 = coord.cx * CHUNK_SIZE_X as i32;
        let wy0 = coord.cy * CHUNK_SIZE_Y as i32;
        let mut trees = Vec::new();

        for x in 0..CHUNK_SIZE_X {
            for y in 0..CHUNK_SIZE_Y {
                let (wx, wy) = (wx0 + x as i32, wy0 + y as i32);
                let height = self.height_at(wx, wy);
                let top = self.surface_block(height);
                for z in 0..height {
                    let b = if z == height - 1 {
                        top
                    } else if z + 4 >= height {
                        ids::DIRT
                    } else {
                        ids::STONE
                    };
                    chunk.set_local(x, y, z, b);
                }
                for z in height..=self.sea_level {
                    chunk.set_local(x, y, z, ids::WATER);
                }
                let inner = (CANOPY_MARGIN..CHUNK_SIZE_X - CANOPY_MARGIN).contains(&x)
                    && (CANOPY_MARGIN..CHUNK_SIZE_Y - CANOPY_MARGIN).contains(&y);
                if inner && top == ids::GRASS && self.tree_at(wx, wy) {
                    trees.push((x, y, height));
                }
            }
        }
        for (x, y, base) in trees {
            plant_tree(&mut chunk, x, y, base);
        }
        chunk
    }
}

fn plant_tree(chunk: &mut ChunkBuf, x: usize, y: usize, base: usize) {
    for z in base..base + TRUNK_HEIGHT {
        chunk.set_local(x, y, z, ids::LOG);
    }
    let crown = base + TRUNK_HEIGHT - 2;
    for z in crown..crown + 3 {
        let r = if z == crown + 2 { 1 } else { CANOPY_MARGIN };
        for lx in x - r..=x + r {
            for ly in y - r..=y + r {
                if chunk.get_local(lx, ly, z) == ids::AIR {
                    chunk.set_local(lx, ly, z, ids::LEAVES);
                }
            }
        }
    }
}
