use std::error::Error;
use std::time::Instant;

use image::RgbaImage;
use isomap_blocks::BlockTable;
use isomap_chunk::ChunkCoord;
use isomap_render::ChunkContext;
use rayon::ThreadPoolBuilder;

use crate::assets::build_texture_store;
use crate::biomes::build_source;
use crate::config::RenderConfig;
use crate::driver::{compose_tile, grid_coords, render_chunks};
use crate::terrain::DemoWorld;

/// Renders the configured chunk grid of the demo world into one tile.
pub fn render_world(cfg: &RenderConfig) -> Result<RgbaImage, Box<dyn Error>> {
    let t0 = Instant::now();
    let table = match cfg.blocks.path.as_deref() {
        Some(p) => BlockTable::load_from_path(p)?,
        None => BlockTable::classic(),
    };
    let textures = build_texture_store(cfg.textures.dir.as_deref())?;
    let biomes = build_source(cfg)?;
    let world = DemoWorld::new(cfg.world.seed, cfg.world.sea_level);

    let [ox, oy] = cfg.world.origin;
    let origin = ChunkCoord::new(ox, oy);
    let coords = grid_coords(origin, cfg.world.chunks_x, cfg.world.chunks_y);
    let base = ChunkContext {
        coord: origin,
        textures: &textures,
        biomes: biomes.as_deref(),
    };
    log::info!(
        "rendering {}x{} chunks from ({}, {}) in {} mode",
        cfg.world.chunks_x,
        cfg.world.chunks_y,
        ox,
        oy,
        cfg.render.mode
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(cfg.render.threads)
        .thread_name(|i| format!("isomap-render-{i}"))
        .build()?;
    let chunks = pool.install(|| {
        render_chunks(cfg.render.mode, &coords, base, &table, |c| world.generate(c))
    })?;

    let tile = compose_tile(&chunks, origin, cfg.world.chunks_x, cfg.world.chunks_y);
    log::info!(target: "perf", "tile {}x{} done in {:?}", tile.width(), tile.height(), t0.elapsed());
    Ok(tile)
}
