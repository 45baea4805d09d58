//! Picks the biome source a render uses and synthesizes one when none is on disk.

use std::error::Error;
use std::path::Path;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use image::{Rgb, RgbImage};
use isomap_biome::{BiomeGrid, BiomeSource, ColorTable, RegionBiomeStore, StaticBiomes};

use crate::config::RenderConfig;

/// Side of a colormap image; tables hold `COLORMAP_SIDE²` colors.
pub const COLORMAP_SIDE: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Foliage {
    Grass,
    Leaves,
}

/// Climate-style gradient: columns run warm to cold, rows wet to dry.
pub fn gradient_colormap(kind: Foliage) -> RgbImage {
    let (lush, dry, cold): ([f32; 3], [f32; 3], [f32; 3]) = match kind {
        Foliage::Grass => ([71.0, 205.0, 51.0], [191.0, 183.0, 85.0], [128.0, 180.0, 151.0]),
        Foliage::Leaves => ([26.0, 191.0, 0.0], [174.0, 164.0, 42.0], [96.0, 161.0, 123.0]),
    };
    RgbImage::from_fn(COLORMAP_SIDE, COLORMAP_SIDE, |col, row| {
        let t = col as f32 / (COLORMAP_SIDE - 1) as f32;
        let m = row as f32 / (COLORMAP_SIDE - 1) as f32;
        let px = std::array::from_fn(|c| {
            let warm = lush[c] * (1.0 - m) + dry[c] * m;
            (warm * (1.0 - t) + cold[c] * t).round().clamp(0.0, 255.0) as u8
        });
        Rgb(px)
    })
}

/// Smooth noise-driven grid whose values all index into a `COLORMAP_SIDE²` table.
pub fn synthetic_grid(seed: i32) -> BiomeGrid {
    let mut temp = FastNoiseLite::with_seed(seed ^ 0x1203_5F31);
    temp.set_noise_type(Some(NoiseType::OpenSimplex2));
    temp.set_frequency(Some(0.006));
    let mut moist = FastNoiseLite::with_seed(((seed as u32) ^ 0x92E3_A1B2u32) as i32);
    moist.set_noise_type(Some(NoiseType::OpenSimplex2));
    moist.set_frequency(Some(0.009));

    let side = COLORMAP_SIDE as f32 - 1.0;
    BiomeGrid::from_fn(|row, col| {
        let (fx, fy) = (col as f32, row as f32);
        let t = ((temp.get_noise_2d(fx, fy) + 1.0) * 0.5 * side).clamp(0.0, side) as u16;
        let m = ((moist.get_noise_2d(fx, fy) + 1.0) * 0.5 * side).clamp(0.0, side) as u16;
        m * COLORMAP_SIDE as u16 + t
    })
}

fn colormap_or_gradient(path: Option<&Path>, kind: Foliage) -> Result<ColorTable, Box<dyn Error>> {
    match path {
        Some(p) => Ok(ColorTable::load_colormap(p)?),
        None => Ok(ColorTable::from_image(&gradient_colormap(kind))),
    }
}

/// `None` when biome coloring is off; region files when a directory is
/// configured, otherwise one synthetic grid shared by every region.
pub fn build_source(cfg: &RenderConfig) -> Result<Option<Box<dyn BiomeSource>>, Box<dyn Error>> {
    if !cfg.render.biomes {
        log::info!("biome coloring disabled");
        return Ok(None);
    }
    let grass = colormap_or_gradient(cfg.biomes.grass_colormap.as_deref(), Foliage::Grass)?;
    let foliage = colormap_or_gradient(cfg.biomes.foliage_colormap.as_deref(), Foliage::Leaves)?;
    let source: Box<dyn BiomeSource> = match cfg.biomes.dir.as_deref() {
        Some(dir) => {
            log::info!("reading biome regions from {}", dir.display());
            Box::new(RegionBiomeStore::new(dir, grass, foliage))
        }
        None => {
            log::info!("using synthetic biomes (seed {})", cfg.world.seed);
            Box::new(StaticBiomes::new(
                synthetic_grid(cfg.world.seed),
                grass,
                foliage,
            ))
        }
    };
    Ok(Some(source))
}
