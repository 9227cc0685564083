//! Content factory for loading levels and settings from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{GameConfig, Level, LevelSpec};

use crate::loaders::{Campaign, CampaignLoader, ConfigLoader, LevelLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── campaign.toml
/// └── levels/
///     ├── shadow_castle.ron
///     └── sunken_crypt.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load_or_default(&path)
    }

    /// Load the campaign from `campaign.toml`.
    pub fn load_campaign(&self) -> LoadResult<Campaign> {
        let path = self.data_dir.join("campaign.toml");
        CampaignLoader::load(&path)
    }

    /// Load the raw level spec from `levels/{level_id}.ron`.
    pub fn load_level_spec(&self, level_id: &str) -> LoadResult<LevelSpec> {
        LevelLoader::load(&self.level_path(level_id))
    }

    /// Load and validate a level.
    pub fn load_level(&self, level_id: &str, config: &GameConfig) -> LoadResult<Level> {
        let spec = self.load_level_spec(level_id)?;
        Level::from_spec(spec, config).with_context(|| format!("Level '{level_id}' is invalid"))
    }

    pub fn level_path(&self, level_id: &str) -> PathBuf {
        self.data_dir.join("levels").join(format!("{}.ron", level_id))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
