use image::{GrayImage, RgbaImage};

/// Per-pixel coverage in `0..=255`; 0 leaves the destination alone, 255 fully replaces/tints it.
pub trait CoverageMask {
    fn dimensions(&self) -> (u32, u32);
    fn coverage(&self, x: u32, y: u32) -> u8;
}

// RGBA textures double as their own masks through the alpha channel.
impl CoverageMask for RgbaImage {
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    #[inline]
    fn coverage(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[3]
    }
}

// Precomputed face masks are single-channel.
impl CoverageMask for GrayImage {
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        GrayImage::dimensions(self)
    }

    #[inline]
    fn coverage(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y).0[0]
    }
}

/// Borrowed mask of either kind, chosen at runtime without dynamic dispatch per pixel.
#[derive(Clone, Copy, Debug)]
pub enum Mask<'a> {
    Alpha(&'a RgbaImage),
    Luma(&'a GrayImage),
}

impl CoverageMask for Mask<'_> {
    #[inline]
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Mask::Alpha(img) => CoverageMask::dimensions(*img),
            Mask::Luma(img) => CoverageMask::dimensions(*img),
        }
    }

    #[inline]
    fn coverage(&self, x: u32, y: u32) -> u8 {
        match self {
            Mask::Alpha(img) => img.coverage(x, y),
            Mask::Luma(img) => img.coverage(x, y),
        }
    }
}
