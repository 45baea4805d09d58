use serde::{Deserialize, Serialize};

use super::REGION_CHUNKS;

/// World-space chunk coordinate, unbounded and possibly negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
        }
    }

    /// Region containing this chunk (floor division by the region size).
    #[inline]
    pub fn region(self) -> (i32, i32) {
        (
            self.cx.div_euclid(REGION_CHUNKS),
            self.cy.div_euclid(REGION_CHUNKS),
        )
    }

    /// Position of this chunk inside its region.
    #[inline]
    pub fn in_region(self) -> ChunkPos {
        ChunkPos::normalize(self.cx, self.cy)
    }
}

/// Chunk position inside its 32×32 region; both axes lie in `[0, 32)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: usize,
    pub y: usize,
}

impl ChunkPos {
    /// Floor-style modulo: negative inputs wrap to the top of the range (-5 -> 27).
    #[inline]
    pub fn normalize(cx: i32, cy: i32) -> Self {
        Self {
            x: cx.rem_euclid(REGION_CHUNKS) as usize,
            y: cy.rem_euclid(REGION_CHUNKS) as usize,
        }
    }
}
