//! Where render workers get biome data from.
//!
//! A source hands out shared, immutable grids and color tables. Loading and
//! caching policy belongs to the source; renderers only hold the `Arc`s for
//! the duration of one chunk.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use isomap_chunk::ChunkCoord;

use crate::{BiomeError, BiomeGrid, ColorTable, GridCache};

pub trait BiomeSource: Send + Sync {
    /// Grid covering the region that contains `coord`.
    fn grid_for(&self, coord: ChunkCoord) -> Result<Arc<BiomeGrid>, BiomeError>;
    fn grass_colors(&self) -> Result<Arc<ColorTable>, BiomeError>;
    fn foliage_colors(&self) -> Result<Arc<ColorTable>, BiomeError>;
}

/// One grid reused for every region; handy for previews and tests.
#[derive(Clone, Debug)]
pub struct StaticBiomes {
    pub grid: Arc<BiomeGrid>,
    pub grass: Arc<ColorTable>,
    pub foliage: Arc<ColorTable>,
}

impl StaticBiomes {
    pub fn new(grid: BiomeGrid, grass: ColorTable, foliage: ColorTable) -> Self {
        Self {
            grid: Arc::new(grid),
            grass: Arc::new(grass),
            foliage: Arc::new(foliage),
        }
    }
}

impl BiomeSource for StaticBiomes {
    fn grid_for(&self, _coord: ChunkCoord) -> Result<Arc<BiomeGrid>, BiomeError> {
        Ok(Arc::clone(&self.grid))
    }

    fn grass_colors(&self) -> Result<Arc<ColorTable>, BiomeError> {
        Ok(Arc::clone(&self.grass))
    }

    fn foliage_colors(&self) -> Result<Arc<ColorTable>, BiomeError> {
        Ok(Arc::clone(&self.foliage))
    }
}

/// Reads `b.{rx}.{ry}.biome` region files from a directory on demand.
pub struct RegionBiomeStore {
    dir: PathBuf,
    grass: Arc<ColorTable>,
    foliage: Arc<ColorTable>,
    cache: GridCache,
}

impl RegionBiomeStore {
    pub const DEFAULT_CACHE_REGIONS: usize = 16;

    pub fn new(dir: impl Into<PathBuf>, grass: ColorTable, foliage: ColorTable) -> Self {
        Self {
            dir: dir.into(),
            grass: Arc::new(grass),
            foliage: Arc::new(foliage),
            cache: GridCache::new(Self::DEFAULT_CACHE_REGIONS),
        }
    }

    pub fn region_path(&self, region: (i32, i32)) -> PathBuf {
        self.dir.join(format!("b.{}.{}.biome", region.0, region.1))
    }

    pub fn cache(&self) -> &GridCache {
        &self.cache
    }

    fn load_region(&self, region: (i32, i32)) -> Result<BiomeGrid, BiomeError> {
        let path = self.region_path(region);
        let data = fs::read(&path).map_err(|source| BiomeError::Io {
            path: path.clone(),
            source,
        })?;
        log::debug!("loaded biome region {:?} from {}", region, path.display());
        BiomeGrid::from_be_bytes(data)
    }
}

impl BiomeSource for RegionBiomeStore {
    fn grid_for(&self, coord: ChunkCoord) -> Result<Arc<BiomeGrid>, BiomeError> {
        let region = coord.region();
        if let Some(grid) = self.cache.get(region) {
            return Ok(grid);
        }
        // Two workers may race to load the same region; both results are identical.
        let grid = Arc::new(self.load_region(region)?);
        self.cache.insert(region, Arc::clone(&grid));
        Ok(grid)
    }

    fn grass_colors(&self) -> Result<Arc<ColorTable>, BiomeError> {
        Ok(Arc::clone(&self.grass))
    }

    fn foliage_colors(&self) -> Result<Arc<ColorTable>, BiomeError> {
        Ok(Arc::clone(&self.foliage))
    }
}
