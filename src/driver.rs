//! Walks chunks back to front through a render mode and stitches the results.

use std::time::Instant;

use image::RgbaImage;
use isomap_blocks::BlockTable;
use isomap_blocks::types::ids;
use isomap_chunk::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkBuf, ChunkCoord};
use isomap_composite::alpha_over;
use isomap_render::{ChunkContext, RenderError, RenderMode, RenderModeKind, VoxelContext};
use rayon::prelude::*;

pub const CHUNK_IMAGE_WIDTH: u32 = 384;
pub const CHUNK_IMAGE_HEIGHT: u32 = 1728;

/// Largest grid side a tile is rendered for; keeps the tile near 12k×7.7k pixels.
pub const MAX_GRID_CHUNKS: u32 = 32;

// Pixel shift between neighboring chunks on the tile.
const CHUNK_STEP_X: i32 = 192;
const CHUNK_STEP_Y: i32 = 96;

/// Top-left corner of voxel `(x, y, z)`'s sprite in the chunk image.
#[inline]
pub fn project(x: usize, y: usize, z: usize) -> (i32, i32) {
    let (x, y, z) = (x as i32, y as i32, z as i32);
    (12 * x + 12 * y, 6 * y - 6 * x + 1614 - 12 * z)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Non-air voxels with a sprite.
    pub visited: usize,
    pub occluded: usize,
    pub drawn: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.occluded += rhs.occluded;
        self.drawn += rhs.drawn;
    }
}

pub struct ChunkImage {
    pub coord: ChunkCoord,
    pub image: RgbaImage,
    pub stats: DrawStats,
}

/// Renders one chunk with a fresh mode instance.
///
/// An all-air chunk comes back blank without a mode being created.
pub fn render_chunk(
    kind: RenderModeKind,
    ctx: &ChunkContext<'_>,
    chunk: &ChunkBuf,
    table: &BlockTable,
) -> Result<ChunkImage, RenderError> {
    if chunk.is_all_air() {
        log::debug!("chunk ({}, {}) is all air", ctx.coord.cx, ctx.coord.cy);
        return Ok(ChunkImage {
            coord: ctx.coord,
            image: RgbaImage::new(CHUNK_IMAGE_WIDTH, CHUNK_IMAGE_HEIGHT),
            stats: DrawStats::default(),
        });
    }
    let mut mode = kind.create();
    render_chunk_with(&mut *mode, ctx, chunk, table)
}

/// Runs an unstarted `mode` over `chunk`.
///
/// `finish` runs whether or not `start` or a draw failed; the first error wins.
pub fn render_chunk_with(
    mode: &mut dyn RenderMode,
    ctx: &ChunkContext<'_>,
    chunk: &ChunkBuf,
    table: &BlockTable,
) -> Result<ChunkImage, RenderError> {
    let mut image = RgbaImage::new(CHUNK_IMAGE_WIDTH, CHUNK_IMAGE_HEIGHT);
    let mut stats = DrawStats::default();

    let walked = mode
        .start(ctx)
        .and_then(|()| walk(&*mode, ctx, chunk, table, &mut image, &mut stats));
    let finished = mode.finish();
    walked?;
    finished?;

    Ok(ChunkImage {
        coord: ctx.coord,
        image,
        stats,
    })
}

// x runs high to low so each draw lands in front of everything before it.
fn walk(
    mode: &dyn RenderMode,
    ctx: &ChunkContext<'_>,
    chunk: &ChunkBuf,
    table: &BlockTable,
    image: &mut RgbaImage,
    stats: &mut DrawStats,
) -> Result<(), RenderError> {
    for x in (0..CHUNK_SIZE_X).rev() {
        for y in 0..CHUNK_SIZE_Y {
            for z in 0..CHUNK_SIZE_Z {
                let block = chunk.get_local(x, y, z);
                if block == ids::AIR {
                    continue;
                }
                let Some(pair) = ctx.textures.block(block) else {
                    continue;
                };
                stats.visited += 1;
                let (imgx, imgy) = project(x, y, z);
                let voxel = VoxelContext {
                    x,
                    y,
                    z,
                    block,
                    imgx,
                    imgy,
                    chunk,
                    table,
                };
                if mode.occluded(&voxel)? {
                    stats.occluded += 1;
                    continue;
                }
                mode.draw(&voxel, image, &pair.source, pair.mask())?;
                stats.drawn += 1;
            }
        }
    }
    Ok(())
}

/// Renders every coordinate in parallel on the current rayon pool.
///
/// `load` supplies the voxels for a coordinate; results come back in input order.
pub fn render_chunks<F>(
    kind: RenderModeKind,
    coords: &[ChunkCoord],
    base: ChunkContext<'_>,
    table: &BlockTable,
    load: F,
) -> Result<Vec<ChunkImage>, RenderError>
where
    F: Fn(ChunkCoord) -> ChunkBuf + Sync,
{
    let t0 = Instant::now();
    let out = coords
        .par_iter()
        .map(|&coord| {
            let chunk = load(coord);
            let ctx = ChunkContext { coord, ..base };
            render_chunk(kind, &ctx, &chunk, table)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut total = DrawStats::default();
    for c in &out {
        total += c.stats;
    }
    log::info!(
        target: "perf",
        "rendered {} chunks in {:?}: visited={} occluded={} drawn={}",
        out.len(),
        t0.elapsed(),
        total.visited,
        total.occluded,
        total.drawn
    );
    Ok(out)
}

/// Coordinates of a `chunks_x` × `chunks_y` grid starting at `origin`, back to front.
///
/// Both counts must be in `1..=MAX_GRID_CHUNKS` and the grid must not run past `i32`.
pub fn grid_coords(origin: ChunkCoord, chunks_x: u32, chunks_y: u32) -> Vec<ChunkCoord> {
    let mut coords = Vec::with_capacity((chunks_x * chunks_y) as usize);
    for dx in (0..chunks_x as i32).rev() {
        for dy in 0..chunks_y as i32 {
            coords.push(origin.offset(dx, dy));
        }
    }
    coords
}

/// Size of the tile holding a `chunks_x` × `chunks_y` grid, each in `1..=MAX_GRID_CHUNKS`.
pub fn tile_size(chunks_x: u32, chunks_y: u32) -> (u32, u32) {
    let span = chunks_x + chunks_y - 2;
    (
        CHUNK_IMAGE_WIDTH + CHUNK_STEP_X as u32 * span,
        CHUNK_IMAGE_HEIGHT + CHUNK_STEP_Y as u32 * span,
    )
}

/// Where the chunk at grid offset `(dx, dy)` lands on the tile.
pub fn chunk_offset(dx: i32, dy: i32, chunks_x: u32) -> (i32, i32) {
    (
        CHUNK_STEP_X * (dx + dy),
        CHUNK_STEP_Y * (dy - dx + chunks_x as i32 - 1),
    )
}

/// Composites chunk images onto one tile, back to front.
pub fn compose_tile(
    chunks: &[ChunkImage],
    origin: ChunkCoord,
    chunks_x: u32,
    chunks_y: u32,
) -> RgbaImage {
    let (w, h) = tile_size(chunks_x, chunks_y);
    let mut tile = RgbaImage::new(w, h);
    let mut order: Vec<&ChunkImage> = chunks.iter().collect();
    order.sort_by_key(|c| (-(c.coord.cx - origin.cx), c.coord.cy - origin.cy));
    for c in order {
        let (ox, oy) = chunk_offset(c.coord.cx - origin.cx, c.coord.cy - origin.cy, chunks_x);
        alpha_over(&mut tile, &c.image, &c.image, ox, oy);
    }
    tile
}
