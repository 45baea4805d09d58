use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use isomap_render::RenderModeKind;
use serde::Deserialize;

use crate::driver::MAX_GRID_CHUNKS;

// Top-level render config file; every section is optional.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub biomes: BiomesConfig,
    #[serde(default)]
    pub textures: TexturesConfig,
    #[serde(default)]
    pub blocks: BlocksSection,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    // First chunk of the rendered grid, in world chunk coordinates.
    #[serde(default)]
    pub origin: [i32; 2],
    #[serde(default = "default_chunks")]
    pub chunks_x: u32,
    #[serde(default = "default_chunks")]
    pub chunks_y: u32,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_sea_level")]
    pub sea_level: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            origin: [0, 0],
            chunks_x: default_chunks(),
            chunks_y: default_chunks(),
            seed: default_seed(),
            sea_level: default_sea_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct RenderSection {
    #[serde(default)]
    pub mode: RenderModeKind,
    #[serde(default = "default_true")]
    pub biomes: bool,
    // 0 lets rayon pick
    #[serde(default)]
    pub threads: usize,
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            mode: RenderModeKind::default(),
            biomes: true,
            threads: 0,
            output: default_output(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BiomesConfig {
    // Directory of `b.{rx}.{ry}.biome` region files.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub grass_colormap: Option<PathBuf>,
    #[serde(default)]
    pub foliage_colormap: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TexturesConfig {
    // Directory of `{block_id}.png` sprites replacing the built-in ones.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_chunks() -> u32 {
    4
}
fn default_seed() -> i32 {
    1337
}
fn default_sea_level() -> usize {
    62
}
fn default_true() -> bool {
    true
}
fn default_output() -> PathBuf {
    PathBuf::from("isomap.png")
}

impl RenderConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: RenderConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads `path`, resolving relative paths inside it against the file's directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let Some(base) = path.parent() {
            cfg.rebase(base);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let grid = 1..=MAX_GRID_CHUNKS;
        if !grid.contains(&self.world.chunks_x) || !grid.contains(&self.world.chunks_y) {
            return Err(format!(
                "world.chunks_x and world.chunks_y must be between 1 and {}",
                MAX_GRID_CHUNKS
            )
            .into());
        }
        let [ox, oy] = self.world.origin;
        // the last chunk is origin + chunks - 1; one past it must still be an i32
        if ox.checked_add(self.world.chunks_x as i32).is_none()
            || oy.checked_add(self.world.chunks_y as i32).is_none()
        {
            return Err("world.origin plus the grid size overflows chunk coordinates".into());
        }
        if self.world.sea_level >= isomap_chunk::CHUNK_SIZE_Z {
            return Err(format!(
                "world.sea_level {} must be below {}",
                self.world.sea_level,
                isomap_chunk::CHUNK_SIZE_Z
            )
            .into());
        }
        Ok(())
    }

    fn rebase(&mut self, base: &Path) {
        let fix = |p: &mut Option<PathBuf>| {
            if let Some(inner) = p.as_mut() {
                if inner.is_relative() {
                    *inner = base.join(&*inner);
                }
            }
        };
        fix(&mut self.biomes.dir);
        fix(&mut self.biomes.grass_colormap);
        fix(&mut self.biomes.foliage_colormap);
        fix(&mut self.textures.dir);
        fix(&mut self.blocks.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.world.origin, [0, 0]);
        assert_eq!(cfg.world.chunks_x, 4);
        assert_eq!(cfg.world.sea_level, 62);
        assert_eq!(cfg.render.mode, RenderModeKind::Normal);
        assert!(cfg.render.biomes);
        assert_eq!(cfg.render.output, PathBuf::from("isomap.png"));
        assert!(cfg.biomes.dir.is_none());
    }

    #[test]
    fn sections_parse() {
        let cfg = RenderConfig::from_toml_str(
            r#"
            [world]
            origin = [-3, 40]
            chunks_x = 2
            chunks_y = 1
            seed = 7

            [render]
            mode = "normal"
            biomes = false
            threads = 3

            [biomes]
            dir = "biomes"
            grass_colormap = "grasscolor.png"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.world.origin, [-3, 40]);
        assert_eq!((cfg.world.chunks_x, cfg.world.chunks_y), (2, 1));
        assert!(!cfg.render.biomes);
        assert_eq!(cfg.render.threads, 3);
        assert_eq!(cfg.biomes.dir, Some(PathBuf::from("biomes")));
        assert!(cfg.biomes.foliage_colormap.is_none());
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(RenderConfig::from_toml_str("[world]\nchunks_x = 0").is_err());
        assert!(
            RenderConfig::from_toml_str("[world]\nchunks_x = 4000000000\nchunks_y = 4000000000")
                .is_err()
        );
        assert!(RenderConfig::from_toml_str("[world]\nchunks_y = 33").is_err());
        assert!(RenderConfig::from_toml_str("[world]\nchunks_x = 32\nchunks_y = 32").is_ok());
        assert!(
            RenderConfig::from_toml_str("[world]\norigin = [2147483647, 0]\nchunks_x = 1").is_err()
        );
        assert!(
            RenderConfig::from_toml_str("[world]\norigin = [-2147483648, 2147483640]\nchunks_y = 4")
                .is_ok()
        );
        assert!(RenderConfig::from_toml_str("[world]\nsea_level = 128").is_err());
        assert!(RenderConfig::from_toml_str("[render]\nmode = \"cave\"").is_err());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("isomap.toml");
        fs::write(&path, "[textures]\ndir = \"sprites\"\n[blocks]\npath = \"/abs/blocks.toml\"").unwrap();
        let cfg = RenderConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.textures.dir, Some(dir.path().join("sprites")));
        assert_eq!(cfg.blocks.path, Some(PathBuf::from("/abs/blocks.toml")));
    }
}
