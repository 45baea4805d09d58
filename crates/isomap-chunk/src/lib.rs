//! Chunk voxel buffer, chunk/region coordinates, and occlusion culling.
#![forbid(unsafe_code)]

mod buf;
mod coord;
pub mod occlusion;

pub use buf::ChunkBuf;
pub use coord::{ChunkCoord, ChunkPos};
pub use occlusion::is_occluded;

/// Voxels along a chunk's x axis.
pub const CHUNK_SIZE_X: usize = 16;
/// Voxels along a chunk's y axis.
pub const CHUNK_SIZE_Y: usize = 16;
/// Voxels along a chunk's vertical (z) axis.
pub const CHUNK_SIZE_Z: usize = 128;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Chunks along each side of a region.
pub const REGION_CHUNKS: i32 = 32;
