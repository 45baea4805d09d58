use std::sync::Arc;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use isomap_biome::{BiomeGrid, ColorTable, GRID_SIDE, StaticBiomes, biome_index};
use isomap_blocks::{BlockTable, types::ids};
use isomap_chunk::{ChunkBuf, ChunkCoord, ChunkPos};
use isomap_composite::Mask;
use isomap_render::{
    ChunkContext, FaceMasks, NormalMode, RenderError, RenderMode, RenderModeKind, TexturePair,
    TextureStore, VoxelContext,
};

const GRASS_BASE: [u8; 4] = [200, 180, 160, 255];

// Top face covers the upper half of the sprite only.
fn top_half_mask() -> GrayImage {
    GrayImage::from_fn(24, 24, |_, y| Luma([if y < 12 { 255 } else { 0 }]))
}

fn store() -> TextureStore {
    let mut store = TextureStore::new();
    store.biome_grass = Some(TexturePair::new(RgbaImage::from_pixel(
        24,
        24,
        Rgba(GRASS_BASE),
    )));
    store.biome_leaf = Some(TexturePair::new(RgbaImage::from_pixel(
        24,
        24,
        Rgba([60, 60, 60, 200]),
    )));
    let full = Arc::new(GrayImage::from_pixel(24, 24, Luma([255])));
    store.face_masks = Some(FaceMasks {
        top: Arc::new(top_half_mask()),
        left: Arc::clone(&full),
        right: full,
    });
    store
}

fn grid_with(cell: usize, value: u16) -> BiomeGrid {
    BiomeGrid::from_fn(|row, col| if row * GRID_SIDE + col == cell { value } else { 0 })
}

fn voxel<'a>(chunk: &'a ChunkBuf, table: &'a BlockTable, block: u8) -> VoxelContext<'a> {
    VoxelContext {
        x: 0,
        y: 0,
        z: 0,
        block,
        imgx: 0,
        imgy: 0,
        chunk,
        table,
    }
}

#[test]
fn grass_voxel_in_negative_chunk_is_tinted_from_its_region_slot() {
    let coord = ChunkCoord::new(-3, 40);
    let cell = biome_index(ChunkPos::normalize(-3, 40), 0, 0);
    assert_eq!(cell, 66096);

    let mut grass = vec![[255, 255, 255]; 8];
    grass[5] = [128, 255, 64];
    let source = StaticBiomes::new(
        grid_with(cell, 5),
        ColorTable::new(grass),
        ColorTable::new(vec![[0, 0, 0]; 8]),
    );
    let textures = store();
    let ctx = ChunkContext {
        coord,
        textures: &textures,
        biomes: Some(&source),
    };

    let mut mode = NormalMode::new();
    mode.start(&ctx).unwrap();
    assert_eq!(mode.chunk_pos(), Some(ChunkPos { x: 29, y: 8 }));

    let table = BlockTable::classic();
    let mut chunk = ChunkBuf::empty(coord);
    chunk.set_local(0, 0, 0, ids::GRASS);
    let v = voxel(&chunk, &table, ids::GRASS);
    assert!(!mode.occluded(&v).unwrap());

    // the plain grass sprite passed in is ignored in favor of the biome one
    let plain = RgbaImage::from_pixel(24, 24, Rgba([1, 1, 1, 255]));
    let mut dst = RgbaImage::new(24, 24);
    mode.draw(&v, &mut dst, &plain, Mask::Alpha(&plain)).unwrap();

    assert_eq!(dst.get_pixel(4, 3).0, [100, 180, 40, 255]);
    assert_eq!(dst.get_pixel(4, 20).0, GRASS_BASE);
    mode.finish().unwrap();
}

#[test]
fn biome_value_past_color_table_is_reported() {
    let source = StaticBiomes::new(
        BiomeGrid::filled(300),
        ColorTable::new(vec![[9, 9, 9]; 256]),
        ColorTable::new(vec![[9, 9, 9]; 256]),
    );
    let textures = store();
    let ctx = ChunkContext {
        coord: ChunkCoord::new(2, 2),
        textures: &textures,
        biomes: Some(&source),
    };
    let mut mode = NormalMode::new();
    mode.start(&ctx).unwrap();

    let table = BlockTable::classic();
    let chunk = ChunkBuf::empty(ctx.coord);
    let plain = RgbaImage::new(24, 24);
    let mut dst = RgbaImage::new(24, 24);
    let err = mode
        .draw(&voxel(&chunk, &table, ids::LEAVES), &mut dst, &plain, Mask::Alpha(&plain))
        .unwrap_err();
    match err {
        RenderError::IndexOutOfRange { table, index, len } => {
            assert_eq!(table, "foliage");
            assert_eq!(index, 300);
            assert_eq!(len, 256);
        }
        other => panic!("unexpected error: {other}"),
    }
    mode.finish().unwrap();
}

#[test]
fn operations_outside_active_state_are_contract_violations() {
    let table = BlockTable::classic();
    let chunk = ChunkBuf::empty(ChunkCoord::new(0, 0));
    let plain = RgbaImage::new(24, 24);
    let mut dst = RgbaImage::new(24, 24);

    let mut mode = NormalMode::new();
    let v = voxel(&chunk, &table, ids::STONE);
    assert!(matches!(
        mode.occluded(&v),
        Err(RenderError::ContractViolation { op: "occluded", state: "uninitialized" })
    ));
    assert!(matches!(
        mode.draw(&v, &mut dst, &plain, Mask::Alpha(&plain)),
        Err(RenderError::ContractViolation { op: "draw", .. })
    ));
    assert!(matches!(
        mode.finish(),
        Err(RenderError::ContractViolation { op: "finish", state: "uninitialized" })
    ));

    let textures = TextureStore::new();
    let ctx = ChunkContext {
        coord: ChunkCoord::new(0, 0),
        textures: &textures,
        biomes: None,
    };
    mode.start(&ctx).unwrap();
    mode.finish().unwrap();
    assert!(matches!(
        mode.draw(&v, &mut dst, &plain, Mask::Alpha(&plain)),
        Err(RenderError::ContractViolation { op: "draw", state: "finished" })
    ));
    assert!(matches!(
        mode.start(&ctx),
        Err(RenderError::ContractViolation { op: "start", state: "finished" })
    ));
}

#[test]
fn failed_acquisition_leaves_mode_unusable_until_finish() {
    let textures = TextureStore::new();
    let source = StaticBiomes::new(
        BiomeGrid::filled(0),
        ColorTable::default(),
        ColorTable::default(),
    );
    let ctx = ChunkContext {
        coord: ChunkCoord::new(7, -7),
        textures: &textures,
        biomes: Some(&source),
    };
    let mut mode = RenderModeKind::Normal.create();
    let err = mode.start(&ctx).unwrap_err();
    assert!(matches!(err, RenderError::ResourceAcquisitionFailure { .. }));

    let table = BlockTable::classic();
    let chunk = ChunkBuf::empty(ctx.coord);
    assert!(matches!(
        mode.occluded(&voxel(&chunk, &table, ids::STONE)),
        Err(RenderError::ContractViolation { state: "failed", .. })
    ));
    mode.finish().unwrap();
}

#[test]
fn without_biomes_grass_draws_its_plain_sprite() {
    let textures = store();
    let ctx = ChunkContext {
        coord: ChunkCoord::new(-1, -1),
        textures: &textures,
        biomes: None,
    };
    let mut mode = NormalMode::new();
    mode.start(&ctx).unwrap();
    assert!(!mode.is_tinting());

    let table = BlockTable::classic();
    let chunk = ChunkBuf::empty(ctx.coord);
    let plain = RgbaImage::from_pixel(24, 24, Rgba([30, 160, 40, 255]));
    let mut dst = RgbaImage::new(24, 24);
    mode.draw(&voxel(&chunk, &table, ids::GRASS), &mut dst, &plain, Mask::Alpha(&plain))
        .unwrap();
    assert!(dst.pixels().all(|p| p.0 == [30, 160, 40, 255]));
    mode.finish().unwrap();
}

#[test]
fn leaves_are_tinted_only_where_their_own_mask_covers() {
    let mut textures = store();
    // opaque sprite, but its coverage image only spans the left half
    let left_half = RgbaImage::from_fn(24, 24, |x, _| {
        Rgba([0, 0, 0, if x < 12 { 255 } else { 0 }])
    });
    textures.biome_leaf = Some(TexturePair::with_mask(
        RgbaImage::from_pixel(24, 24, Rgba([100, 100, 100, 255])),
        left_half,
    ));
    let source = StaticBiomes::new(
        BiomeGrid::filled(3),
        ColorTable::new(vec![[0, 0, 0]; 4]),
        ColorTable::new(vec![[9, 9, 9], [9, 9, 9], [9, 9, 9], [255, 0, 0]]),
    );
    let ctx = ChunkContext {
        coord: ChunkCoord::new(4, -9),
        textures: &textures,
        biomes: Some(&source),
    };
    let mut mode = NormalMode::new();
    mode.start(&ctx).unwrap();

    let table = BlockTable::classic();
    let chunk = ChunkBuf::empty(ctx.coord);
    let plain = RgbaImage::from_pixel(24, 24, Rgba([1, 1, 1, 255]));
    let mut dst = RgbaImage::from_pixel(24, 24, Rgba([50, 50, 50, 255]));
    mode.draw(&voxel(&chunk, &table, ids::LEAVES), &mut dst, &plain, Mask::Alpha(&plain))
        .unwrap();

    for y in [0, 11, 23] {
        assert_eq!(dst.get_pixel(3, y).0, [100, 0, 0, 255]);
        assert_eq!(dst.get_pixel(11, y).0, [100, 0, 0, 255]);
        assert_eq!(dst.get_pixel(12, y).0, [50, 50, 50, 255]);
        assert_eq!(dst.get_pixel(20, y).0, [50, 50, 50, 255]);
    }
    mode.finish().unwrap();
}
