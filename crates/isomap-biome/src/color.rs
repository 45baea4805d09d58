use std::path::Path;

use image::RgbImage;

use crate::BiomeError;

/// Ordered RGB lookup selected by biome index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<[u8; 3]>,
}

impl ColorTable {
    pub fn new(colors: Vec<[u8; 3]>) -> Self {
        Self { colors }
    }

    /// Row-major pixels of a colormap image, so index `row * width + col`
    /// addresses pixel `(col, row)`.
    pub fn from_image(img: &RgbImage) -> Self {
        Self {
            colors: img.pixels().map(|p| p.0).collect(),
        }
    }

    pub fn load_colormap(path: impl AsRef<Path>) -> Result<Self, BiomeError> {
        let img = image::open(path.as_ref())?.to_rgb8();
        log::debug!(
            "loaded colormap {} ({}x{})",
            path.as_ref().display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(&img))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
