//! The plain textured mode with optional biome tinting of grass and leaves.

use std::sync::Arc;

use image::{GrayImage, RgbaImage};
use isomap_biome::{BiomeGrid, BiomeSource, ColorTable, GRID_SIDE, biome_index};
use isomap_blocks::BiomeTint;
use isomap_chunk::{ChunkCoord, ChunkPos, is_occluded};
use isomap_composite::{Mask, alpha_over, tint_with_mask};

use crate::{ChunkContext, RenderError, RenderMode, TexturePair, TextureStore, VoxelContext};

/// Biome data held for the lifetime of one chunk.
#[derive(Clone, Debug)]
struct BiomeResources {
    grid: Arc<BiomeGrid>,
    grass_colors: Arc<ColorTable>,
    foliage_colors: Arc<ColorTable>,
    grass_texture: TexturePair,
    leaf_texture: TexturePair,
    top_mask: Arc<GrayImage>,
}

impl BiomeResources {
    fn acquire(
        coord: ChunkCoord,
        source: &dyn BiomeSource,
        textures: &TextureStore,
    ) -> Result<Self, RenderError> {
        let grid = source
            .grid_for(coord)
            .map_err(|e| RenderError::biome("biome grid", e))?;
        let grass_colors = source
            .grass_colors()
            .map_err(|e| RenderError::biome("grass colors", e))?;
        let foliage_colors = source
            .foliage_colors()
            .map_err(|e| RenderError::biome("foliage colors", e))?;
        let grass_texture = textures
            .biome_grass
            .clone()
            .ok_or_else(|| RenderError::missing("biome grass texture"))?;
        let leaf_texture = textures
            .biome_leaf
            .clone()
            .ok_or_else(|| RenderError::missing("biome leaf texture"))?;
        let top_mask = textures
            .face_masks
            .as_ref()
            .map(|m| Arc::clone(&m.top))
            .ok_or_else(|| RenderError::missing("top face mask"))?;
        Ok(Self {
            grid,
            grass_colors,
            foliage_colors,
            grass_texture,
            leaf_texture,
            top_mask,
        })
    }
}

#[derive(Debug)]
struct ActiveChunk {
    pos: ChunkPos,
    biome: Option<BiomeResources>,
}

#[derive(Debug, Default)]
enum Lifecycle {
    #[default]
    Uninitialized,
    Active(ActiveChunk),
    /// `start` failed; nothing is held and only `finish` is accepted.
    Failed,
    Finished,
}

impl Lifecycle {
    fn name(&self) -> &'static str {
        match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Active(_) => "active",
            Lifecycle::Failed => "failed",
            Lifecycle::Finished => "finished",
        }
    }
}

#[derive(Debug, Default)]
pub struct NormalMode {
    state: Lifecycle,
}

impl NormalMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized chunk position while active.
    pub fn chunk_pos(&self) -> Option<ChunkPos> {
        match &self.state {
            Lifecycle::Active(a) => Some(a.pos),
            _ => None,
        }
    }

    /// Whether this chunk is being drawn with biome colors.
    pub fn is_tinting(&self) -> bool {
        matches!(&self.state, Lifecycle::Active(a) if a.biome.is_some())
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, Lifecycle::Finished)
    }

    fn active(&self, op: &'static str) -> Result<&ActiveChunk, RenderError> {
        match &self.state {
            Lifecycle::Active(a) => Ok(a),
            other => Err(RenderError::ContractViolation {
                op,
                state: other.name(),
            }),
        }
    }
}

impl RenderMode for NormalMode {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn start(&mut self, ctx: &ChunkContext<'_>) -> Result<(), RenderError> {
        if !matches!(self.state, Lifecycle::Uninitialized) {
            return Err(RenderError::ContractViolation {
                op: "start",
                state: self.state.name(),
            });
        }
        let pos = ctx.coord.in_region();
        let biome = match ctx.biomes {
            Some(source) => match BiomeResources::acquire(ctx.coord, source, ctx.textures) {
                Ok(res) => Some(res),
                Err(err) => {
                    self.state = Lifecycle::Failed;
                    return Err(err);
                }
            },
            None => None,
        };
        log::debug!(
            "normal mode start chunk=({}, {}) region_pos=({}, {}) biomes={}",
            ctx.coord.cx,
            ctx.coord.cy,
            pos.x,
            pos.y,
            biome.is_some()
        );
        self.state = Lifecycle::Active(ActiveChunk { pos, biome });
        Ok(())
    }

    fn occluded(&self, voxel: &VoxelContext<'_>) -> Result<bool, RenderError> {
        self.active("occluded")?;
        Ok(is_occluded(
            voxel.chunk,
            voxel.table,
            voxel.x,
            voxel.y,
            voxel.z,
        ))
    }

    fn draw(
        &self,
        voxel: &VoxelContext<'_>,
        dst: &mut RgbaImage,
        src: &RgbaImage,
        mask: Mask<'_>,
    ) -> Result<(), RenderError> {
        let active = self.active("draw")?;
        let tint = voxel.table.biome_tint(voxel.block);
        let biome = active.biome.as_ref().filter(|_| tint.is_tinted());

        let (src, mask) = match (biome, tint) {
            (Some(b), BiomeTint::Grass) => (&*b.grass_texture.source, b.grass_texture.mask()),
            (Some(b), BiomeTint::Leaves) => (&*b.leaf_texture.source, b.leaf_texture.mask()),
            _ => (src, mask),
        };
        alpha_over(dst, src, &mask, voxel.imgx, voxel.imgy);

        let Some(b) = biome else {
            return Ok(());
        };
        let (table, table_name, tint_mask) = match tint {
            BiomeTint::Grass => (&b.grass_colors, "grass", Mask::Luma(&*b.top_mask)),
            BiomeTint::Leaves => (&b.foliage_colors, "foliage", mask),
            BiomeTint::None => return Ok(()),
        };
        let cell = biome_index(active.pos, voxel.x, voxel.y);
        let index = b
            .grid
            .get(cell)
            .map(usize::from)
            .ok_or(RenderError::IndexOutOfRange {
                table: "biome grid",
                index: cell,
                len: GRID_SIDE * GRID_SIDE,
            })?;
        let color = table.get(index).ok_or(RenderError::IndexOutOfRange {
            table: table_name,
            index,
            len: table.len(),
        })?;
        tint_with_mask(dst, color, &tint_mask, voxel.imgx, voxel.imgy);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        match std::mem::take(&mut self.state) {
            Lifecycle::Active(active) => {
                log::debug!(
                    "normal mode finish region_pos=({}, {})",
                    active.pos.x,
                    active.pos.y
                );
                self.state = Lifecycle::Finished;
                Ok(())
            }
            Lifecycle::Failed => {
                self.state = Lifecycle::Finished;
                Ok(())
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(RenderError::ContractViolation {
                    op: "finish",
                    state,
                })
            }
        }
    }
}
