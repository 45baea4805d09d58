//! Render modes: per-chunk occlusion, compositing, and biome tinting.
//!
//! A driver creates one mode instance per chunk and walks it through
//! `start`, then `occluded`/`draw` for each voxel back to front, then `finish`.
//! Instances never carry anything from one chunk to the next.
#![forbid(unsafe_code)]

mod context;
mod error;
mod mode;
pub mod normal;
pub mod textures;

pub use context::{ChunkContext, VoxelContext};
pub use error::RenderError;
pub use mode::{RenderMode, RenderModeKind};
pub use normal::NormalMode;
pub use textures::{FaceMasks, TexturePair, TextureStore};
