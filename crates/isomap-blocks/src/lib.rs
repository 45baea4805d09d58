//! Block ids, transparency, and biome tint tables.
#![forbid(unsafe_code)]

pub mod config;
pub mod table;
pub mod types;

// Re-exports for convenience
pub use table::BlockTable;
pub use types::{BiomeTint, BlockId};
