use byteorder::{BigEndian, ByteOrder};
use isomap_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, ChunkPos, REGION_CHUNKS};

/// Samples along each side of a region's biome grid (16 per chunk, 32 chunks).
pub const GRID_SIDE: usize = CHUNK_SIZE_X * REGION_CHUNKS as usize;
/// Size of one region grid on disk: 512×512 big-endian u16.
pub const GRID_BYTES: usize = GRID_SIDE * GRID_SIDE * 2;

/// Position of voxel column `(x, y)` of chunk `pos` in its region's biome grid.
///
/// Rows follow the chunk's y axis, columns its x axis; distinct inputs never
/// share a slot and every result is below `GRID_SIDE * GRID_SIDE`.
#[inline]
pub fn biome_index(pos: ChunkPos, x: usize, y: usize) -> usize {
    let row = pos.y * CHUNK_SIZE_Y + y;
    let col = pos.x * CHUNK_SIZE_X + x;
    row * GRID_SIDE + col
}

/// One region's biome indices, kept in their on-disk big-endian form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeGrid {
    data: Vec<u8>,
}

impl BiomeGrid {
    pub fn from_be_bytes(data: Vec<u8>) -> Result<Self, crate::BiomeError> {
        if data.len() != GRID_BYTES {
            return Err(crate::BiomeError::BadLength {
                expected: GRID_BYTES,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Grid with every sample set to `value`.
    pub fn filled(value: u16) -> Self {
        Self::from_fn(|_, _| value)
    }

    /// Builds a grid from `f(row, col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> u16) -> Self {
        let mut data = vec![0u8; GRID_BYTES];
        for row in 0..GRID_SIDE {
            for col in 0..GRID_SIDE {
                let i = (row * GRID_SIDE + col) * 2;
                BigEndian::write_u16(&mut data[i..i + 2], f(row, col));
            }
        }
        Self { data }
    }

    /// Biome index stored at `index` (see [`biome_index`]).
    #[inline]
    pub fn get(&self, index: usize) -> Option<u16> {
        let i = index.checked_mul(2)?;
        let end = i.checked_add(2)?;
        self.data.get(i..end).map(BigEndian::read_u16)
    }

    #[inline]
    pub fn at(&self, pos: ChunkPos, x: usize, y: usize) -> Option<u16> {
        self.get(biome_index(pos, x, y))
    }

    pub fn as_be_bytes(&self) -> &[u8] {
        &self.data
    }
}
