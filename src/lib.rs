//! Isometric map renderer: demo world, sprites, biome sources, and the chunk driver.
#![forbid(unsafe_code)]

pub mod assets;
pub mod biomes;
pub mod config;
pub mod driver;
pub mod pipeline;
pub mod terrain;

pub use config::RenderConfig;
pub use pipeline::render_world;
