//! Biome index grids, grass/foliage color tables, and the sources that supply them.
#![forbid(unsafe_code)]

mod cache;
mod color;
mod error;
mod grid;
pub mod source;

pub use cache::{GridCache, GridCacheStats};
pub use color::ColorTable;
pub use error::BiomeError;
pub use grid::{BiomeGrid, GRID_BYTES, GRID_SIDE, biome_index};
pub use source::{BiomeSource, RegionBiomeStore, StaticBiomes};
