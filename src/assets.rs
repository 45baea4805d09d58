//! Block sprites and face masks.
//!
//! Every block the demo world places gets a synthesized isometric cube; a
//! textures directory can replace any of them with `{block_id}.png`.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use isomap_blocks::BlockId;
use isomap_blocks::types::ids;
use isomap_render::{FaceMasks, TexturePair, TextureStore};

/// Side of a block sprite in pixels.
pub const SPRITE_SIZE: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Top,
    Left,
    Right,
}

/// Which face (if any) covers sprite pixel `(x, y)`.
///
/// The top face is the diamond in the upper half; the two sides are the
/// parallelograms below it, split at the vertical center line.
pub fn face_at(x: u32, y: u32) -> Option<Face> {
    let half = SPRITE_SIZE as f32 / 2.0;
    let (fx, fy) = (x as f32 + 0.5, y as f32 + 0.5);
    if (fx - half).abs() / half + (fy - half / 2.0).abs() / (half / 2.0) <= 1.0 {
        return Some(Face::Top);
    }
    if fx < half {
        let top = half / 2.0 + fx / 2.0;
        (fy >= top && fy < top + half).then_some(Face::Left)
    } else {
        let top = half - (fx - half) / 2.0;
        (fy >= top && fy < top + half).then_some(Face::Right)
    }
}

pub fn face_mask(face: Face) -> GrayImage {
    GrayImage::from_fn(SPRITE_SIZE, SPRITE_SIZE, |x, y| {
        Luma([if face_at(x, y) == Some(face) { 255 } else { 0 }])
    })
}

pub fn face_masks() -> FaceMasks {
    FaceMasks {
        top: Arc::new(face_mask(Face::Top)),
        left: Arc::new(face_mask(Face::Left)),
        right: Arc::new(face_mask(Face::Right)),
    }
}

/// Colors for the three faces of a synthesized cube plus its opacity.
#[derive(Clone, Copy, Debug)]
pub struct CubeStyle {
    pub top: [u8; 3],
    pub side: [u8; 3],
    pub alpha: u8,
    /// Punch a regular pattern of holes, for foliage.
    pub sparse: bool,
}

impl CubeStyle {
    const fn solid(top: [u8; 3], side: [u8; 3]) -> Self {
        Self {
            top,
            side,
            alpha: 255,
            sparse: false,
        }
    }
}

fn shade(c: [u8; 3], f: u16) -> [u8; 3] {
    c.map(|v| (u16::from(v) * f / 100) as u8)
}

/// Isometric cube with the left face a little darker than the top and the right darker still.
pub fn cube_sprite(style: CubeStyle) -> RgbaImage {
    let left = shade(style.side, 80);
    let right = shade(style.side, 64);
    RgbaImage::from_fn(SPRITE_SIZE, SPRITE_SIZE, |x, y| {
        let Some(face) = face_at(x, y) else {
            return Rgba([0, 0, 0, 0]);
        };
        if style.sparse && (x * 7 + y * 3) % 5 == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let [r, g, b] = match face {
            Face::Top => style.top,
            Face::Left => left,
            Face::Right => right,
        };
        Rgba([r, g, b, style.alpha])
    })
}

const DIRT_BROWN: [u8; 3] = [134, 96, 67];

/// Built-in look of each block the demo world uses.
pub fn builtin_style(id: BlockId) -> Option<CubeStyle> {
    let style = match id {
        ids::STONE => CubeStyle::solid([125, 125, 125], [116, 116, 116]),
        ids::GRASS => CubeStyle::solid([95, 159, 53], DIRT_BROWN),
        ids::DIRT => CubeStyle::solid(DIRT_BROWN, DIRT_BROWN),
        ids::WATER => CubeStyle {
            alpha: 150,
            ..CubeStyle::solid([47, 67, 244], [47, 67, 244])
        },
        ids::SAND => CubeStyle::solid([219, 211, 160], [219, 211, 160]),
        ids::LOG => CubeStyle::solid([160, 130, 77], [102, 81, 51]),
        ids::LEAVES => CubeStyle {
            sparse: true,
            ..CubeStyle::solid([60, 140, 40], [60, 140, 40])
        },
        _ => return None,
    };
    Some(style)
}

/// Grass with a neutral top, so the biome color alone decides its hue.
pub fn biome_grass_sprite() -> RgbaImage {
    cube_sprite(CubeStyle::solid([200, 200, 200], DIRT_BROWN))
}

pub fn biome_leaf_sprite() -> RgbaImage {
    cube_sprite(CubeStyle {
        sparse: true,
        ..CubeStyle::solid([170, 170, 170], [170, 170, 170])
    })
}

/// Builds the store from built-in sprites, then applies overrides from `overrides`.
pub fn build_texture_store(overrides: Option<&Path>) -> Result<TextureStore, Box<dyn Error>> {
    let mut store = TextureStore::new();
    for id in 0..=BlockId::MAX {
        if let Some(style) = builtin_style(id) {
            store.insert(id, TexturePair::new(cube_sprite(style)));
        }
    }
    store.biome_grass = Some(TexturePair::new(biome_grass_sprite()));
    store.biome_leaf = Some(TexturePair::new(biome_leaf_sprite()));
    store.face_masks = Some(face_masks());

    if let Some(dir) = overrides {
        let loaded = load_overrides(&mut store, dir)?;
        log::info!("loaded {} sprite overrides from {}", loaded, dir.display());
    }
    Ok(store)
}

// Files not named `{id}.png` are ignored; unreadable images abort.
fn load_overrides(store: &mut TextureStore, dir: &Path) -> Result<usize, Box<dyn Error>> {
    let mut loaded = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let Some(id) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<BlockId>().ok())
        else {
            log::warn!("skipping sprite with non-numeric name {}", path.display());
            continue;
        };
        let img = image::open(&path)?.to_rgba8();
        if img.dimensions() != (SPRITE_SIZE, SPRITE_SIZE) {
            log::warn!(
                "sprite {} is {}x{}, expected {}x{}",
                path.display(),
                img.width(),
                img.height(),
                SPRITE_SIZE,
                SPRITE_SIZE
            );
        }
        store.insert(id, TexturePair::new(img));
        loaded += 1;
    }
    Ok(loaded)
}
