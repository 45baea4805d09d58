use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use isomap_composite::Mask;
use serde::Deserialize;

use crate::{ChunkContext, NormalMode, RenderError, VoxelContext};

/// The four-step contract every render mode implements for one chunk.
///
/// `occluded` and `draw` only read mode state; everything a mode needs for the
/// chunk is gathered in `start` and dropped in `finish`.
pub trait RenderMode: Send {
    fn name(&self) -> &'static str;

    fn start(&mut self, ctx: &ChunkContext<'_>) -> Result<(), RenderError>;

    /// `true` when nothing of the voxel can be visible.
    fn occluded(&self, voxel: &VoxelContext<'_>) -> Result<bool, RenderError>;

    /// Composites the voxel's sprite onto `dst` at `(voxel.imgx, voxel.imgy)`.
    fn draw(
        &self,
        voxel: &VoxelContext<'_>,
        dst: &mut RgbaImage,
        src: &RgbaImage,
        mask: Mask<'_>,
    ) -> Result<(), RenderError>;

    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Modes a driver can pick by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderModeKind {
    #[default]
    Normal,
}

impl RenderModeKind {
    pub const ALL: &'static [RenderModeKind] = &[RenderModeKind::Normal];

    /// Fresh, unstarted instance for a single chunk.
    pub fn create(self) -> Box<dyn RenderMode> {
        match self {
            RenderModeKind::Normal => Box::new(NormalMode::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderModeKind::Normal => "normal",
        }
    }
}

impl fmt::Display for RenderModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown render mode `{}`", s))
    }
}
