//! Read-only sprite store shared by every render worker.

use std::sync::Arc;

use hashbrown::HashMap;
use image::{GrayImage, RgbaImage};
use isomap_blocks::BlockId;
use isomap_composite::Mask;

/// A block sprite and the mask it is composited through.
///
/// Most sprites are their own mask (via alpha); `mask` is only set when a
/// sprite needs a separate coverage image.
#[derive(Clone, Debug)]
pub struct TexturePair {
    pub source: Arc<RgbaImage>,
    pub mask: Option<Arc<RgbaImage>>,
}

impl TexturePair {
    pub fn new(source: RgbaImage) -> Self {
        Self {
            source: Arc::new(source),
            mask: None,
        }
    }

    pub fn with_mask(source: RgbaImage, mask: RgbaImage) -> Self {
        Self {
            source: Arc::new(source),
            mask: Some(Arc::new(mask)),
        }
    }

    #[inline]
    pub fn mask(&self) -> Mask<'_> {
        Mask::Alpha(self.mask.as_deref().unwrap_or(&*self.source))
    }
}

/// Coverage masks for the three visible faces of a block sprite.
#[derive(Clone, Debug)]
pub struct FaceMasks {
    pub top: Arc<GrayImage>,
    pub left: Arc<GrayImage>,
    pub right: Arc<GrayImage>,
}

#[derive(Clone, Debug, Default)]
pub struct TextureStore {
    pub blocks: HashMap<BlockId, TexturePair>,
    /// Untinted grass sprite used when biome colors are applied.
    pub biome_grass: Option<TexturePair>,
    /// Untinted leaf sprite used when biome colors are applied.
    pub biome_leaf: Option<TexturePair>,
    pub face_masks: Option<FaceMasks>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn block(&self, id: BlockId) -> Option<&TexturePair> {
        self.blocks.get(&id)
    }

    pub fn insert(&mut self, id: BlockId, pair: TexturePair) {
        self.blocks.insert(id, pair);
    }
}
